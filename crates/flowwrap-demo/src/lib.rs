#![forbid(unsafe_code)]

//! Flow demo: `Hello N` chips laid out in a wrapping, truncating flow and
//! drawn to a text canvas.

pub mod chips;
pub mod cli;
pub mod render;

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use flowwrap_layout::{
    DEFAULT_ELLIPSIS_GLYPH, Ellipsis, FlowConfig, FlowConfigError, FlowLayout, LayoutResult,
    MeasureSpec, Placement, PlacementError, Rect, Size,
};
use serde::Serialize;

use crate::chips::ChipHost;
use crate::cli::Opts;
use crate::render::Canvas;

/// Width used when the terminal cannot be queried.
pub const FALLBACK_WIDTH: u16 = 80;

#[derive(Debug)]
pub enum DemoError {
    ReadConfig { path: PathBuf, source: io::Error },
    ParseConfig(serde_json::Error),
    Config(FlowConfigError),
    Placement(PlacementError),
    Json(serde_json::Error),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadConfig { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::ParseConfig(err) => write!(f, "invalid config: {err}"),
            Self::Config(err) => write!(f, "invalid config: {err}"),
            Self::Placement(err) => write!(f, "placement failed: {err}"),
            Self::Json(err) => write!(f, "cannot encode report: {err}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadConfig { source, .. } => Some(source),
            Self::ParseConfig(err) | Self::Json(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Placement(err) => Some(err),
        }
    }
}

impl From<FlowConfigError> for DemoError {
    fn from(err: FlowConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<PlacementError> for DemoError {
    fn from(err: PlacementError) -> Self {
        Self::Placement(err)
    }
}

/// Terminal width, or [`FALLBACK_WIDTH`] when there is no terminal.
pub fn terminal_width() -> u16 {
    match crossterm::terminal::size() {
        Ok((width, _)) if width > 0 => width,
        Ok(_) => FALLBACK_WIDTH,
        Err(err) => {
            tracing::warn!(%err, fallback = FALLBACK_WIDTH, "terminal size unavailable");
            FALLBACK_WIDTH
        }
    }
}

/// The flow configuration: the `--config` file if any, then flag overrides.
pub fn load_config(opts: &Opts) -> Result<FlowConfig, DemoError> {
    let Some(path) = &opts.config else {
        return Ok(opts.flow_config(FlowConfig::new(), false));
    };
    let text = fs::read_to_string(path).map_err(|source| DemoError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    let base: FlowConfig = serde_json::from_str(&text).map_err(DemoError::ParseConfig)?;
    tracing::debug!(path = %path.display(), "loaded flow config");
    Ok(opts.flow_config(base, true))
}

#[derive(Serialize)]
struct Report<'a> {
    width: u16,
    size: Size,
    result: LayoutResult,
    placement: &'a Placement,
}

/// Lay out `opts.items` chips at `width` columns and render them.
///
/// Returns the text canvas, or the JSON report with `--json`.
pub fn run(opts: &Opts, config: FlowConfig, width: u16) -> Result<String, DemoError> {
    let layout = FlowLayout::new(config)?;
    let mut host = ChipHost::hello(opts.items).direction(opts.direction());

    let width_spec = MeasureSpec::Exactly(width);
    let result = layout.measure(&mut host, width_spec, MeasureSpec::Unspecified);
    let size = result.resolve_size(width_spec, MeasureSpec::Unspecified);
    let placement = layout.place(&host, Rect::from_size(size), &result)?;
    placement.apply(&mut host);

    tracing::info!(
        shown = placement.placed_item_count(),
        total = opts.items,
        lines = result.line_count,
        truncated = result.is_truncated(),
        "laid out chips"
    );

    if opts.json {
        let report = Report {
            width,
            size,
            result,
            placement: &placement,
        };
        return serde_json::to_string_pretty(&report).map_err(DemoError::Json);
    }

    let mut canvas = Canvas::new(size);
    for (label, rect) in host.shown() {
        canvas.put_chip(rect, label);
    }
    if let Some(rect) = host.ellipsis_position() {
        let glyph = match &layout.config().ellipsis {
            Ellipsis::Glyph(text) => &**text,
            Ellipsis::Custom(_) => DEFAULT_ELLIPSIS_GLYPH,
        };
        canvas.put(rect, glyph);
    }
    Ok(canvas.to_string())
}
