//! Line cursor and the wrap decision shared by both passes.
//!
//! Measurement and placement must agree on where lines break, so neither pass
//! decides on its own: both feed the tentative end edge of the next item into
//! [`LineCursor::decide`]. Coordinates are `u32` in the main-axis "start
//! space" (distance from the line's start edge) and only narrowed to `u16`
//! when a rectangle leaves the pass.

use flowwrap_core::geometry::{Margins, Size};

/// What happens once every allowed line is in use and an item still overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineBudget {
    /// Stop the pass: the item starts the truncated tail.
    Truncate,
    /// Keep the item on the last line even though it overflows.
    Overflow,
}

/// Outcome of offering one item to the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WrapDecision {
    /// The item stays on the current line.
    Continue,
    /// Open a new line before placing the item.
    Wrap,
    /// The line budget is exhausted; the pass ends at this item.
    Truncate,
}

/// Transient per-pass position of the next item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineCursor {
    origin: u32,
    line_spacing: u32,
    /// Where the next item's slot begins along the main axis.
    pub(crate) start: u32,
    /// Top of the current line.
    pub(crate) top: u32,
    /// Lowest item bottom on the current line.
    pub(crate) bottom: u32,
    /// 1-based number of lines opened so far.
    pub(crate) line_count: u32,
}

impl LineCursor {
    pub(crate) fn new(origin_start: u16, origin_top: u16, line_spacing: u16) -> Self {
        let top = u32::from(origin_top);
        Self {
            origin: u32::from(origin_start),
            line_spacing: u32::from(line_spacing),
            start: u32::from(origin_start),
            top,
            bottom: top,
            line_count: 1,
        }
    }

    /// End edge an item would reach if it started at the cursor.
    #[inline]
    pub(crate) fn tentative_end(&self, margins: Margins, width: u16) -> u32 {
        self.start
            .saturating_add(u32::from(margins.start))
            .saturating_add(u32::from(width))
    }

    /// Decide whether an item ending at `end` fits before `limit`.
    ///
    /// Applies to every item, the first on a line included: an oversized item
    /// opens a new line while the budget allows, and is cut once it does not.
    pub(crate) fn decide(
        &self,
        end: u32,
        limit: u32,
        max_lines: u16,
        budget: LineBudget,
    ) -> WrapDecision {
        if end <= limit {
            return WrapDecision::Continue;
        }
        if self.line_count < u32::from(max_lines) {
            return WrapDecision::Wrap;
        }
        match budget {
            LineBudget::Truncate => WrapDecision::Truncate,
            LineBudget::Overflow => WrapDecision::Continue,
        }
    }

    /// Move to the start of the next line.
    pub(crate) fn wrap(&mut self) {
        self.start = self.origin;
        self.top = self.bottom.saturating_add(self.line_spacing);
        self.bottom = self.top;
        self.line_count += 1;
    }

    /// Account for an item placed at the cursor and step past it.
    pub(crate) fn advance(&mut self, margins: Margins, size: Size, item_spacing: u16) {
        self.bottom = self.bottom.max(self.top.saturating_add(u32::from(size.height)));
        self.start = self
            .start
            .saturating_add(u32::from(margins.sum()))
            .saturating_add(u32::from(size.width))
            .saturating_add(u32::from(item_spacing));
    }
}

/// Narrow a pass coordinate to the public `u16` range.
#[inline]
pub(crate) fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
