//! Size negotiation between a flow container and whatever bounds it.

use serde::{Deserialize, Serialize};

/// How an outer layout constrains one axis of the flow container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureSpec {
    /// The container must be exactly this size.
    Exactly(u16),
    /// The container may be at most this size.
    AtMost(u16),
    /// No constraint; report the content size.
    #[default]
    Unspecified,
}

impl MeasureSpec {
    /// Upper bound on the axis, if any.
    #[inline]
    pub const fn limit(self) -> Option<u16> {
        match self {
            Self::Exactly(size) | Self::AtMost(size) => Some(size),
            Self::Unspecified => None,
        }
    }

    /// Size to report for `content` under this constraint.
    ///
    /// ```
    /// use flowwrap_layout::MeasureSpec;
    ///
    /// assert_eq!(MeasureSpec::Exactly(300).resolve(500), 300);
    /// assert_eq!(MeasureSpec::AtMost(300).resolve(500), 300);
    /// assert_eq!(MeasureSpec::AtMost(300).resolve(120), 120);
    /// assert_eq!(MeasureSpec::Unspecified.resolve(500), 500);
    /// ```
    #[inline]
    pub fn resolve(self, content: u16) -> u16 {
        match self {
            Self::Exactly(size) => size,
            Self::AtMost(size) => content.min(size),
            Self::Unspecified => content,
        }
    }

    /// Constraint left for children once `padding` is taken out.
    ///
    /// Children never get an exact size from a flow container, only a bound.
    #[inline]
    pub fn shrink(self, padding: u16) -> Self {
        match self.limit() {
            Some(size) => Self::AtMost(size.saturating_sub(padding)),
            None => Self::Unspecified,
        }
    }
}

/// Space offered to an item when the host measures it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AvailableSpace {
    pub width: MeasureSpec,
    pub height: MeasureSpec,
}

impl AvailableSpace {
    /// Unconstrained on both axes.
    pub const UNBOUNDED: Self = Self {
        width: MeasureSpec::Unspecified,
        height: MeasureSpec::Unspecified,
    };

    /// Create from per-axis constraints.
    #[inline]
    pub const fn new(width: MeasureSpec, height: MeasureSpec) -> Self {
        Self { width, height }
    }
}
