#![forbid(unsafe_code)]

//! Wrapping flow layout.
//!
//! Items are laid out along a line in reading order and wrap onto new lines
//! when the width runs out. After `max_lines` lines the remaining items are
//! cut and an ellipsis marker stands in for them.
//!
//! Layout is two passes over a [`FlowHost`]:
//!
//! - [`FlowLayout::measure`] measures items, reserving room for the ellipsis
//!   on every line, and finds the truncation point.
//! - [`FlowLayout::place`] assigns rectangles within the final area and decides
//!   whether the last kept item must give up its slot to the marker.
//!
//! ```
//! use flowwrap_layout::{FixedItems, FlowConfig, FlowLayout, MeasureSpec, Rect};
//!
//! let layout = FlowLayout::new(FlowConfig::new().item_spacing(1).max_lines(2))?;
//! let mut host = FixedItems::from_widths([6, 6, 6, 6, 6, 6], 1);
//!
//! let result = layout.measure(&mut host, MeasureSpec::AtMost(14), MeasureSpec::Unspecified);
//! let size = result.resolve_size(MeasureSpec::AtMost(14), MeasureSpec::Unspecified);
//! let placement = layout.place(&host, Rect::from_size(size), &result)?;
//!
//! assert!(result.is_truncated());
//! assert!(placement.ellipsis_rect().is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod cursor;
pub mod host;
mod measure;
pub mod measure_spec;
pub mod place;

pub use config::{DEFAULT_ELLIPSIS_GLYPH, Ellipsis, FlowConfig, FlowConfigError, UNBOUNDED_LINES};
pub use flowwrap_core::geometry::{LayoutDirection, Margins, Rect, Sides, Size};
pub use host::{FixedItems, FlowHost, FlowItem, FlowSlot};
pub use measure::LayoutResult;
pub use measure_spec::{AvailableSpace, MeasureSpec};
pub use place::{PlacedSlot, Placement, PlacementError};

/// A validated flow configuration and the passes that use it.
///
/// Holds no per-layout state: the truncation point travels from
/// [`FlowLayout::measure`] to [`FlowLayout::place`] inside [`LayoutResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLayout {
    config: FlowConfig,
}

impl FlowLayout {
    /// Validate `config` and wrap it.
    pub fn new(config: FlowConfig) -> Result<Self, FlowConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    #[inline]
    pub fn line_spacing(&self) -> u16 {
        self.config.line_spacing
    }

    #[inline]
    pub fn item_spacing(&self) -> u16 {
        self.config.item_spacing
    }

    #[inline]
    pub fn max_lines(&self) -> u16 {
        self.config.max_lines
    }

    pub fn set_line_spacing(&mut self, spacing: u16) {
        self.config.line_spacing = spacing;
    }

    pub fn set_item_spacing(&mut self, spacing: u16) {
        self.config.item_spacing = spacing;
    }

    /// Change the line budget. Zero is rejected and leaves the layout unchanged.
    pub fn set_max_lines(&mut self, max_lines: u16) -> Result<(), FlowConfigError> {
        if max_lines == 0 {
            return Err(FlowConfigError::ZeroMaxLines);
        }
        self.config.max_lines = max_lines;
        Ok(())
    }

    /// Measurement pass.
    ///
    /// Measures each visible item once, in order, up to the truncation point.
    /// The result is only valid for placement against the same host contents.
    pub fn measure<H>(&self, host: &mut H, width: MeasureSpec, height: MeasureSpec) -> LayoutResult
    where
        H: FlowHost + ?Sized,
    {
        measure::measure(&self.config, host, width, height)
    }

    /// Placement pass within `area`, using a result from [`FlowLayout::measure`].
    pub fn place<H>(
        &self,
        host: &H,
        area: Rect,
        result: &LayoutResult,
    ) -> Result<Placement, PlacementError>
    where
        H: FlowHost + ?Sized,
    {
        place::place(&self.config, host, area, result)
    }

    /// Measure, then place at `origin` using the size the measurement reports.
    ///
    /// The placement is returned, not applied; call [`Placement::apply`] to
    /// hand it to the host.
    pub fn arrange<H>(
        &self,
        host: &mut H,
        width: MeasureSpec,
        height: MeasureSpec,
        origin: (u16, u16),
    ) -> Result<(Size, Placement), PlacementError>
    where
        H: FlowHost + ?Sized,
    {
        let result = self.measure(host, width, height);
        let size = result.resolve_size(width, height);
        let area = Rect::new(origin.0, origin.1, size.width, size.height);
        let placement = self.place(host, area, &result)?;
        Ok((size, placement))
    }
}
