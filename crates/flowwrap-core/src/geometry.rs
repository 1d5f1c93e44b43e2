#![forbid(unsafe_code)]

//! Geometric primitives for flow layout.
//!
//! All coordinates are non-negative integer units with the origin at the
//! top-left of the container. Arithmetic saturates instead of wrapping, so an
//! oversized item produces a clamped rectangle rather than a panic.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle assigned to an item or to the ellipsis marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in units.
    pub width: u16,
    /// Height in units.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Size of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the two rectangles share at least one unit of area.
    #[inline]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Reflect this rectangle horizontally inside `container`.
    ///
    /// The distance from the container's left edge becomes the distance from
    /// its right edge. Positions that would fall left of the container clamp
    /// to its left edge.
    pub fn mirrored_within(&self, container: &Rect) -> Rect {
        let local_right = self.right().saturating_sub(container.x);
        let mirrored_x = container.width.saturating_sub(local_right);
        Rect {
            x: container.x.saturating_add(mirrored_x),
            ..*self
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Physical padding around the flow content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    /// Equal padding on every side.
    pub const fn all(val: u16) -> Self {
        Self::new(val, val, val, val)
    }

    /// Horizontal padding only.
    pub const fn horizontal(val: u16) -> Self {
        Self::new(0, val, 0, val)
    }

    /// Create padding in CSS order: top, right, bottom, left.
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }

    /// Padding on the side where lines begin.
    #[inline]
    pub const fn start(&self, direction: LayoutDirection) -> u16 {
        match direction {
            LayoutDirection::Ltr => self.left,
            LayoutDirection::Rtl => self.right,
        }
    }

    /// Padding on the side where lines end.
    #[inline]
    pub const fn end(&self, direction: LayoutDirection) -> u16 {
        match direction {
            LayoutDirection::Ltr => self.right,
            LayoutDirection::Rtl => self.left,
        }
    }
}

impl From<u16> for Sides {
    fn from(val: u16) -> Self {
        Self::all(val)
    }
}

impl From<(u16, u16)> for Sides {
    fn from((vertical, horizontal): (u16, u16)) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

/// Direction-relative margins of a single item.
///
/// `start` is the leading side of the line: left in LTR, right in RTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Margins {
    pub start: u16,
    pub end: u16,
}

impl Margins {
    /// No margins.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create margins.
    #[inline]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Both sides equal.
    #[inline]
    pub const fn symmetric(val: u16) -> Self {
        Self::new(val, val)
    }

    /// Resolve physical left/right margins for a layout direction.
    #[inline]
    pub const fn from_physical(left: u16, right: u16, direction: LayoutDirection) -> Self {
        match direction {
            LayoutDirection::Ltr => Self::new(left, right),
            LayoutDirection::Rtl => Self::new(right, left),
        }
    }

    /// Combined margin along the main axis.
    #[inline]
    pub const fn sum(&self) -> u16 {
        self.start.saturating_add(self.end)
    }
}

/// Horizontal flow direction of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutDirection {
    /// Lines start on the left.
    #[default]
    Ltr,
    /// Lines start on the right.
    Rtl,
}

impl LayoutDirection {
    /// True for right-to-left.
    #[inline]
    pub const fn is_rtl(self) -> bool {
        matches!(self, LayoutDirection::Rtl)
    }
}
