#![forbid(unsafe_code)]

//! flowwrap demo binary entry point.

use std::process;

use flowwrap_demo::cli;
use tracing_subscriber::EnvFilter;

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let opts = cli::Opts::parse();
    init_logging(opts.log.as_deref());

    let width = opts.width.unwrap_or_else(flowwrap_demo::terminal_width);
    let output = flowwrap_demo::load_config(&opts)
        .and_then(|config| flowwrap_demo::run(&opts, config, width));

    match output {
        Ok(text) if opts.json => println!("{text}"),
        Ok(text) => print!("{text}"),
        Err(err) => {
            eprintln!("flowwrap-demo: {err}");
            process::exit(1);
        }
    }
}
