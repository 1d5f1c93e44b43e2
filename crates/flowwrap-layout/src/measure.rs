//! Measurement pass: content size and truncation point.

use flowwrap_core::geometry::Size;
use serde::{Deserialize, Serialize};

use crate::config::FlowConfig;
use crate::cursor::{LineBudget, LineCursor, WrapDecision, clamp_u16};
use crate::host::FlowHost;
use crate::measure_spec::{AvailableSpace, MeasureSpec};

/// Output of the measurement pass, consumed by placement.
///
/// Only valid for the item sequence and width it was computed from; any
/// resize or content change requires a new measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Index of the first item that did not fit within `max_lines`.
    pub truncation: Option<usize>,
    /// Size the content needs, padding included.
    pub content: Size,
    /// Lines used by the items that fit.
    pub line_count: u16,
    /// Measured size of the ellipsis marker.
    pub ellipsis: Size,
    /// Host item count at measurement time.
    pub item_count: usize,
}

impl LayoutResult {
    /// True when some items did not fit.
    #[inline]
    pub const fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    /// Size to report to the outer layout.
    pub fn resolve_size(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        Size::new(width.resolve(self.content.width), height.resolve(self.content.height))
    }
}

/// Walk the items once, measuring each, and find where lines break.
///
/// Every line keeps room for the ellipsis after its last item, so a marker can
/// always follow the last kept item without measuring again. Items after the
/// truncation point are never measured.
pub(crate) fn measure<H>(
    config: &FlowConfig,
    host: &mut H,
    width: MeasureSpec,
    height: MeasureSpec,
) -> LayoutResult
where
    H: FlowHost + ?Sized,
{
    let item_count = host.item_count();
    let _span = flowwrap_core::debug_span!(
        "flow_measure",
        items = item_count,
        width = ?width,
        max_lines = config.max_lines
    )
    .entered();

    let padding = config.padding;
    let ellipsis = host.measure_ellipsis(&config.ellipsis);
    let ellipsis_width = u32::from(ellipsis.width);

    let max_width = width.limit().map_or(u32::MAX, u32::from);
    let max_end = max_width.saturating_sub(u32::from(padding.right));
    let line_room = max_end.saturating_sub(u32::from(padding.left));
    if ellipsis_width > line_room {
        flowwrap_core::warn!(ellipsis = ellipsis.width, line_room, "ellipsis wider than a line");
    }
    let available = AvailableSpace::new(
        width.shrink(padding.horizontal_sum()),
        height.shrink(padding.vertical_sum()),
    );

    let mut cursor = LineCursor::new(padding.left, padding.top, config.line_spacing);
    let mut max_edge = u32::from(padding.left);
    let mut last_end: Option<u32> = None;
    let mut truncation = None;

    for index in 0..item_count {
        if !host.is_visible(index) {
            continue;
        }
        let size = host.measure_item(index, available);
        let margins = host.margins(index);

        let end = cursor.tentative_end(margins, size.width);
        match cursor.decide(
            end.saturating_add(ellipsis_width),
            max_end,
            config.max_lines,
            LineBudget::Truncate,
        ) {
            WrapDecision::Continue => {}
            WrapDecision::Wrap => {
                cursor.wrap();
                flowwrap_core::trace!(index, line = cursor.line_count, "wrap");
            }
            WrapDecision::Truncate => {
                flowwrap_core::debug!(index, lines = cursor.line_count, "truncated");
                truncation = Some(index);
                break;
            }
        }

        let end = cursor.tentative_end(margins, size.width);
        max_edge = max_edge.max(end);
        last_end = Some(end.saturating_add(u32::from(margins.end)));
        cursor.advance(margins, size, config.item_spacing);
    }

    // Interior end margins are covered by the next item's start; the last kept
    // item's is not. The marker's reserved width is never part of the content.
    if let Some(end) = last_end {
        max_edge = max_edge.max(end);
    }

    let content = Size::new(
        clamp_u16(max_edge.saturating_add(u32::from(padding.right))),
        clamp_u16(cursor.bottom.saturating_add(u32::from(padding.bottom))),
    );

    LayoutResult {
        truncation,
        content,
        line_count: clamp_u16(cursor.line_count),
        ellipsis,
        item_count,
    }
}
