//! Flow configuration and its validation.

use std::borrow::Cow;
use std::fmt;

use flowwrap_core::geometry::{Sides, Size};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// `max_lines` value meaning "no practical limit".
pub const UNBOUNDED_LINES: u16 = u16::MAX;

/// Glyph used when no custom ellipsis is configured.
pub const DEFAULT_ELLIPSIS_GLYPH: &str = "…";

/// The placeholder shown in place of truncated items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ellipsis {
    /// A text marker, measured by display width with a height of one unit.
    Glyph(Cow<'static, str>),
    /// A host-drawn marker with a fixed intrinsic size.
    Custom(Size),
}

impl Ellipsis {
    /// Size the marker occupies when the host does not measure it itself.
    ///
    /// Independent of the available width.
    pub fn intrinsic_size(&self) -> Size {
        match self {
            Self::Glyph(text) => {
                let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
                Size::new(width, u16::from(width > 0))
            }
            Self::Custom(size) => *size,
        }
    }
}

impl Default for Ellipsis {
    fn default() -> Self {
        Self::Glyph(Cow::Borrowed(DEFAULT_ELLIPSIS_GLYPH))
    }
}

/// Spacing, line budget, padding and ellipsis for a flow container.
///
/// Built with chained setters; checked by [`FlowConfig::validate`] or when
/// handed to [`crate::FlowLayout::new`].
///
/// ```
/// use flowwrap_layout::{Ellipsis, FlowConfig};
///
/// let config = FlowConfig::new()
///     .item_spacing(1)
///     .line_spacing(0)
///     .max_lines(2)
///     .ellipsis(Ellipsis::Glyph("...".into()));
/// assert!(config.validate().is_ok());
/// assert!(FlowConfig::new().max_lines(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Gap between the bottom of one line and the top of the next.
    pub line_spacing: u16,
    /// Gap between consecutive items on a line.
    pub item_spacing: u16,
    /// Maximum number of lines before truncating. Must be positive.
    pub max_lines: u16,
    /// Container padding.
    pub padding: Sides,
    /// Marker substituted for truncated items.
    pub ellipsis: Ellipsis,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            line_spacing: 0,
            item_spacing: 0,
            max_lines: UNBOUNDED_LINES,
            padding: Sides::default(),
            ellipsis: Ellipsis::default(),
        }
    }
}

impl FlowConfig {
    /// Default configuration: no spacing, no padding, unbounded lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap between lines.
    #[must_use]
    pub fn line_spacing(mut self, spacing: u16) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the gap between items on a line.
    #[must_use]
    pub fn item_spacing(mut self, spacing: u16) -> Self {
        self.item_spacing = spacing;
        self
    }

    /// Set the line budget.
    #[must_use]
    pub fn max_lines(mut self, max_lines: u16) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set the container padding.
    #[must_use]
    pub fn padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set the truncation marker.
    #[must_use]
    pub fn ellipsis(mut self, ellipsis: Ellipsis) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    /// Reject configurations the flow passes cannot honor.
    pub fn validate(&self) -> Result<(), FlowConfigError> {
        if self.max_lines == 0 {
            return Err(FlowConfigError::ZeroMaxLines);
        }
        Ok(())
    }
}

/// Invalid flow configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowConfigError {
    /// `max_lines` was zero.
    ZeroMaxLines,
}

impl fmt::Display for FlowConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxLines => write!(f, "max_lines must be greater than zero"),
        }
    }
}

impl std::error::Error for FlowConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_and_unbounded() {
        let config = FlowConfig::default();
        assert_eq!(config.max_lines, UNBOUNDED_LINES);
        assert_eq!(config.ellipsis, Ellipsis::Glyph("…".into()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_max_lines_rejected() {
        let err = FlowConfig::new().max_lines(0).validate().unwrap_err();
        assert_eq!(err, FlowConfigError::ZeroMaxLines);
        assert_eq!(err.to_string(), "max_lines must be greater than zero");
    }

    #[test]
    fn glyph_measures_by_display_width() {
        assert_eq!(Ellipsis::default().intrinsic_size(), Size::new(1, 1));
        assert_eq!(
            Ellipsis::Glyph("...".into()).intrinsic_size(),
            Size::new(3, 1)
        );
        // Wide glyphs take two columns.
        assert_eq!(
            Ellipsis::Glyph("更多".into()).intrinsic_size(),
            Size::new(4, 1)
        );
        assert_eq!(Ellipsis::Glyph("".into()).intrinsic_size(), Size::ZERO);
    }

    #[test]
    fn custom_ellipsis_keeps_host_size() {
        let ellipsis = Ellipsis::Custom(Size::new(20, 8));
        assert_eq!(ellipsis.intrinsic_size(), Size::new(20, 8));
    }

    #[test]
    fn builder_sets_every_field() {
        let config = FlowConfig::new()
            .line_spacing(2)
            .item_spacing(3)
            .max_lines(4)
            .padding(1)
            .ellipsis(Ellipsis::Custom(Size::new(5, 1)));
        assert_eq!(config.line_spacing, 2);
        assert_eq!(config.item_spacing, 3);
        assert_eq!(config.max_lines, 4);
        assert_eq!(config.padding, Sides::all(1));
        assert_eq!(config.ellipsis, Ellipsis::Custom(Size::new(5, 1)));
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let config: FlowConfig =
            serde_json::from_str(r#"{"max_lines": 2, "item_spacing": 1}"#).unwrap();
        assert_eq!(config.max_lines, 2);
        assert_eq!(config.item_spacing, 1);
        assert_eq!(config.line_spacing, 0);
        assert_eq!(config.ellipsis, Ellipsis::default());

        let bad: FlowConfig = serde_json::from_str(r#"{"max_lines": 0}"#).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn ellipsis_json_shape() {
        let config: FlowConfig =
            serde_json::from_str(r#"{"ellipsis": {"custom": {"width": 3, "height": 2}}}"#).unwrap();
        assert_eq!(config.ellipsis, Ellipsis::Custom(Size::new(3, 2)));
        let config: FlowConfig =
            serde_json::from_str(r#"{"ellipsis": {"glyph": "+more"}}"#).unwrap();
        assert_eq!(config.ellipsis, Ellipsis::Glyph("+more".into()));
    }
}
