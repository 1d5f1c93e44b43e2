#![forbid(unsafe_code)]

//! Command-line argument parsing for the flow demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `FLOWWRAP_DEMO_*` prefix.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use flowwrap_layout::{Ellipsis, FlowConfig, LayoutDirection};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
flowwrap demo: lay out 'Hello N' chips in a wrapping flow

USAGE:
    flowwrap-demo [OPTIONS]

OPTIONS:
    --width=N            Container width in columns (default: terminal width)
    --items=N            Number of chips (default: 12)
    --max-lines=N        Line budget before truncating (default: unbounded)
    --item-spacing=N     Columns between chips (default: 1)
    --line-spacing=N     Rows between lines (default: 0)
    --padding=N          Padding on every side (default: 0)
    --rtl                Lay out right to left
    --ellipsis=TEXT      Marker for truncated chips (default: …)
    --config=PATH        Load a JSON flow configuration; flags override it
    --json               Print the measurement and placement as JSON
    --log=LEVEL          Log filter, e.g. 'debug' or 'flowwrap_layout=trace'
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    FLOWWRAP_DEMO_WIDTH          Override --width
    FLOWWRAP_DEMO_ITEMS          Override --items
    FLOWWRAP_DEMO_MAX_LINES      Override --max-lines
    FLOWWRAP_DEMO_ITEM_SPACING   Override --item-spacing
    FLOWWRAP_DEMO_LINE_SPACING   Override --line-spacing
    FLOWWRAP_DEMO_PADDING        Override --padding
    FLOWWRAP_DEMO_RTL            Set to 1 or true for --rtl
    FLOWWRAP_DEMO_ELLIPSIS       Override --ellipsis
    FLOWWRAP_DEMO_CONFIG         Override --config
    FLOWWRAP_DEMO_LOG            Override --log (RUST_LOG is used otherwise)";

/// Parsed command-line options.
///
/// Flow fields are `None` unless given, so a `--config` file keeps its values
/// for anything not set on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub width: Option<u16>,
    pub items: usize,
    pub max_lines: Option<u16>,
    pub item_spacing: Option<u16>,
    pub line_spacing: Option<u16>,
    pub padding: Option<u16>,
    pub rtl: bool,
    pub ellipsis: Option<String>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub log: Option<String>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: None,
            items: 12,
            max_lines: None,
            item_spacing: None,
            line_spacing: None,
            padding: None,
            rtl: false,
            ellipsis: None,
            config: None,
            json: false,
            log: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// A rejected command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn parse_flag<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Parse `args` (without the program name) on top of environment defaults.
///
/// Environment variables take precedence over defaults but are overridden by
/// explicit flags. Unparseable environment values are ignored.
pub fn parse_from<I, F>(args: I, var: F) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    if let Some(n) = var("FLOWWRAP_DEMO_WIDTH").and_then(|v| v.parse().ok()) {
        opts.width = Some(n);
    }
    if let Some(n) = var("FLOWWRAP_DEMO_ITEMS").and_then(|v| v.parse().ok()) {
        opts.items = n;
    }
    if let Some(n) = var("FLOWWRAP_DEMO_MAX_LINES").and_then(|v| v.parse().ok()) {
        opts.max_lines = Some(n);
    }
    if let Some(n) = var("FLOWWRAP_DEMO_ITEM_SPACING").and_then(|v| v.parse().ok()) {
        opts.item_spacing = Some(n);
    }
    if let Some(n) = var("FLOWWRAP_DEMO_LINE_SPACING").and_then(|v| v.parse().ok()) {
        opts.line_spacing = Some(n);
    }
    if let Some(n) = var("FLOWWRAP_DEMO_PADDING").and_then(|v| v.parse().ok()) {
        opts.padding = Some(n);
    }
    if let Some(v) = var("FLOWWRAP_DEMO_RTL") {
        opts.rtl = truthy(&v);
    }
    if let Some(v) = var("FLOWWRAP_DEMO_ELLIPSIS") {
        opts.ellipsis = Some(v);
    }
    if let Some(v) = var("FLOWWRAP_DEMO_CONFIG") {
        opts.config = Some(PathBuf::from(v));
    }
    if let Some(v) = var("FLOWWRAP_DEMO_LOG") {
        opts.log = Some(v);
    }

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--rtl" => opts.rtl = true,
            "--json" => opts.json = true,
            other => {
                if let Some(val) = other.strip_prefix("--width=") {
                    opts.width = Some(parse_flag("--width", val)?);
                } else if let Some(val) = other.strip_prefix("--items=") {
                    opts.items = parse_flag("--items", val)?;
                } else if let Some(val) = other.strip_prefix("--max-lines=") {
                    opts.max_lines = Some(parse_flag("--max-lines", val)?);
                } else if let Some(val) = other.strip_prefix("--item-spacing=") {
                    opts.item_spacing = Some(parse_flag("--item-spacing", val)?);
                } else if let Some(val) = other.strip_prefix("--line-spacing=") {
                    opts.line_spacing = Some(parse_flag("--line-spacing", val)?);
                } else if let Some(val) = other.strip_prefix("--padding=") {
                    opts.padding = Some(parse_flag("--padding", val)?);
                } else if let Some(val) = other.strip_prefix("--ellipsis=") {
                    opts.ellipsis = Some(val.to_string());
                } else if let Some(val) = other.strip_prefix("--config=") {
                    opts.config = Some(PathBuf::from(val));
                } else if let Some(val) = other.strip_prefix("--log=") {
                    opts.log = Some(val.to_string());
                } else {
                    return Err(CliError::UnknownArgument(other.to_string()));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

impl Opts {
    /// Parse the process arguments and environment, exiting on help, version
    /// or bad input.
    pub fn parse() -> Self {
        match parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("flowwrap-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Apply the flow flags on top of `base`. Unset flags keep `base` values,
    /// except item spacing which defaults to one column for chips.
    pub fn flow_config(&self, base: FlowConfig, from_file: bool) -> FlowConfig {
        let mut config = base;
        if let Some(n) = self.item_spacing {
            config = config.item_spacing(n);
        } else if !from_file {
            config = config.item_spacing(1);
        }
        if let Some(n) = self.line_spacing {
            config = config.line_spacing(n);
        }
        if let Some(n) = self.max_lines {
            config = config.max_lines(n);
        }
        if let Some(n) = self.padding {
            config = config.padding(n);
        }
        if let Some(text) = &self.ellipsis {
            config = config.ellipsis(Ellipsis::Glyph(text.clone().into()));
        }
        config
    }

    pub fn direction(&self) -> LayoutDirection {
        if self.rtl {
            LayoutDirection::Rtl
        } else {
            LayoutDirection::Ltr
        }
    }
}
