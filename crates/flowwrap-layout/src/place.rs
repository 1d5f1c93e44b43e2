//! Placement pass: final rectangles, eviction and the ellipsis marker.

use std::fmt;

use flowwrap_core::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::config::FlowConfig;
use crate::cursor::{LineBudget, LineCursor, WrapDecision, clamp_u16};
use crate::host::{FlowHost, FlowSlot};
use crate::measure::LayoutResult;

/// One rectangle of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedSlot {
    pub slot: FlowSlot,
    pub rect: Rect,
}

/// Ordered output of the placement pass.
///
/// Items appear in flow order. The ellipsis, when present, is always the last
/// entry; a renderer can draw the slots in order without further sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    slots: Vec<PlacedSlot>,
    hidden_from: Option<usize>,
}

impl Placement {
    /// All placed slots, in drawing order.
    pub fn slots(&self) -> &[PlacedSlot] {
        &self.slots
    }

    /// Iterate over placed slots.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedSlot> {
        self.slots.iter()
    }

    /// Rectangle of a host item, if it was placed.
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        self.slots
            .iter()
            .find(|placed| placed.slot == FlowSlot::Item(index))
            .map(|placed| placed.rect)
    }

    /// Rectangle of the ellipsis, if truncation happened.
    pub fn ellipsis_rect(&self) -> Option<Rect> {
        self.slots
            .last()
            .filter(|placed| placed.slot == FlowSlot::Ellipsis)
            .map(|placed| placed.rect)
    }

    /// Number of host items that received a rectangle.
    pub fn placed_item_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|placed| matches!(placed.slot, FlowSlot::Item(_)))
            .count()
    }

    /// First evicted item index; it and every later item are not displayed.
    pub fn hidden_from(&self) -> Option<usize> {
        self.hidden_from
    }

    /// Hand the rectangles to the host.
    ///
    /// Placed slots are assigned in order; visible items from the eviction
    /// point onward are released, as is the ellipsis when nothing was cut.
    pub fn apply<H>(&self, host: &mut H)
    where
        H: FlowHost + ?Sized,
    {
        for placed in &self.slots {
            host.assign_position(placed.slot, placed.rect);
        }
        match self.hidden_from {
            Some(first) => {
                for index in first..host.item_count() {
                    if host.is_visible(index) {
                        host.release(FlowSlot::Item(index));
                    }
                }
            }
            None => host.release(FlowSlot::Ellipsis),
        }
    }
}

/// Placement was asked to use a measurement that does not match the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The host's item count changed since measurement.
    StaleMeasurement { measured: usize, current: usize },
    /// The truncation index is past the end or names a hidden item.
    TruncationOutOfRange { index: usize, item_count: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleMeasurement { measured, current } => write!(
                f,
                "stale measurement: measured {measured} items, host now has {current}"
            ),
            Self::TruncationOutOfRange { index, item_count } => write!(
                f,
                "truncation index {index} does not name a visible item (item count {item_count})"
            ),
        }
    }
}

impl std::error::Error for PlacementError {}

/// The cut recorded by measurement, resolved against the host.
#[derive(Debug, Clone, Copy)]
struct Cut {
    /// Last visible item before the truncated one, if any.
    anchor: Option<usize>,
    /// First item measurement could not fit.
    truncated: usize,
}

fn resolve_cut<H>(host: &H, result: &LayoutResult) -> Result<Option<Cut>, PlacementError>
where
    H: FlowHost + ?Sized,
{
    let current = host.item_count();
    if current != result.item_count {
        return Err(PlacementError::StaleMeasurement {
            measured: result.item_count,
            current,
        });
    }
    let Some(truncated) = result.truncation else {
        return Ok(None);
    };
    if truncated >= current || !host.is_visible(truncated) {
        return Err(PlacementError::TruncationOutOfRange {
            index: truncated,
            item_count: current,
        });
    }
    let anchor = (0..truncated).rev().find(|&index| host.is_visible(index));
    Ok(Some(Cut { anchor, truncated }))
}

/// Assign rectangles within `area` using a matching measurement.
///
/// Lines break against the final width without the ellipsis reservation
/// measurement made. Once `max_lines` lines are open, remaining items stay on
/// the last line until the cut.
pub(crate) fn place<H>(
    config: &FlowConfig,
    host: &H,
    area: Rect,
    result: &LayoutResult,
) -> Result<Placement, PlacementError>
where
    H: FlowHost + ?Sized,
{
    let cut = resolve_cut(host, result)?;
    let item_count = host.item_count();
    let _span = flowwrap_core::debug_span!(
        "flow_place",
        items = item_count,
        x = area.x,
        y = area.y,
        w = area.width,
        h = area.height
    )
    .entered();

    let direction = host.layout_direction();
    let padding = config.padding;
    let max_end = u32::from(area.width).saturating_sub(u32::from(padding.end(direction)));
    let ellipsis = result.ellipsis;

    let to_rect = |start: u32, top: u32, size: Size| {
        let rect = Rect::new(
            area.x.saturating_add(clamp_u16(start)),
            area.y.saturating_add(clamp_u16(top)),
            size.width,
            size.height,
        );
        if direction.is_rtl() {
            rect.mirrored_within(&area)
        } else {
            rect
        }
    };

    let mut cursor = LineCursor::new(padding.start(direction), padding.top, config.line_spacing);
    let mut placement = Placement {
        slots: Vec::with_capacity(item_count.min(cut.map_or(item_count, |c| c.truncated)) + 1),
        hidden_from: None,
    };

    for index in 0..item_count {
        if !host.is_visible(index) {
            continue;
        }
        let size = host.measured_size(index);
        let margins = host.margins(index);

        let end = cursor.tentative_end(margins, size.width);
        let decision = cursor.decide(end, max_end, config.max_lines, LineBudget::Overflow);
        if decision == WrapDecision::Wrap {
            cursor.wrap();
            flowwrap_core::trace!(index, line = cursor.line_count, "wrap");
        }
        let slot_start = cursor.start;
        let item_start = slot_start.saturating_add(u32::from(margins.start));
        let item_end = item_start.saturating_add(u32::from(size.width));
        let top = cursor.top;

        let Some(cut) = cut.filter(|cut| cut.anchor == Some(index) || cut.truncated == index)
        else {
            placement.slots.push(PlacedSlot {
                slot: FlowSlot::Item(index),
                rect: to_rect(item_start, top, size),
            });
            cursor.advance(margins, size, config.item_spacing);
            continue;
        };

        if cut.truncated == index {
            // Nothing visible before the cut: the marker takes the first slot.
            flowwrap_core::debug!(truncated = index, "no item before the cut");
            placement.hidden_from = Some(index);
            placement.slots.push(PlacedSlot {
                slot: FlowSlot::Ellipsis,
                rect: to_rect(slot_start, top, Size::new(ellipsis.width, size.height)),
            });
            return Ok(placement);
        }

        let next = host.measured_size(cut.truncated);
        let next_margins = host.margins(cut.truncated);
        let remaining = max_end.saturating_sub(item_end);
        let required = u32::from(margins.end)
            + u32::from(config.item_spacing)
            + u32::from(next_margins.sum())
            + u32::from(next.width)
            + u32::from(ellipsis.width);
        let keep_anchor = remaining > required;
        flowwrap_core::debug!(
            anchor = index,
            truncated = cut.truncated,
            remaining,
            required,
            keep_anchor,
            "eviction decision"
        );

        let marker_size = Size::new(ellipsis.width, size.height);
        if keep_anchor {
            placement.slots.push(PlacedSlot {
                slot: FlowSlot::Item(index),
                rect: to_rect(item_start, top, size),
            });
            cursor.advance(margins, size, config.item_spacing);
            placement.hidden_from = Some(cut.truncated);
            placement.slots.push(PlacedSlot {
                slot: FlowSlot::Ellipsis,
                rect: to_rect(cursor.start, top, marker_size),
            });
        } else {
            placement.hidden_from = Some(index);
            placement.slots.push(PlacedSlot {
                slot: FlowSlot::Ellipsis,
                rect: to_rect(slot_start, top, marker_size),
            });
        }
        return Ok(placement);
    }

    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FixedItems, FlowItem};
    use crate::measure::measure;
    use crate::measure_spec::MeasureSpec;
    use flowwrap_core::geometry::{LayoutDirection, Margins, Sides};

    fn run(config: &FlowConfig, host: &mut FixedItems, width: u16) -> (LayoutResult, Placement) {
        let result = measure(config, host, MeasureSpec::Exactly(width), MeasureSpec::Unspecified);
        let area = Rect::new(0, 0, width, result.content.height);
        let placement = place(config, &*host, area, &result).unwrap();
        (result, placement)
    }

    #[test]
    fn empty_host_places_nothing() {
        let mut host = FixedItems::default();
        let (_, placement) = run(&FlowConfig::new(), &mut host, 40);
        assert!(placement.slots().is_empty());
        assert_eq!(placement.ellipsis_rect(), None);
    }

    #[test]
    fn untruncated_items_all_placed_without_marker() {
        let config = FlowConfig::new().item_spacing(10);
        let mut host = FixedItems::from_widths([50, 50, 50], 4).ellipsis_size(Size::new(20, 4));
        let (result, placement) = run(&config, &mut host, 120);
        assert_eq!(result.truncation, None);
        assert_eq!(placement.placed_item_count(), 3);
        assert_eq!(placement.ellipsis_rect(), None);
        assert_eq!(placement.hidden_from(), None);
        // Placement has no reservation: two items share the first line.
        assert_eq!(placement.item_rect(0), Some(Rect::new(0, 0, 50, 4)));
        assert_eq!(placement.item_rect(1), Some(Rect::new(60, 0, 50, 4)));
        assert_eq!(placement.item_rect(2), Some(Rect::new(0, 4, 50, 4)));
    }

    #[test]
    fn anchor_evicted_when_no_room_for_next_item() {
        let config = FlowConfig::new().max_lines(1).item_spacing(10);
        let mut host = FixedItems::from_widths([70, 70], 3).ellipsis_size(Size::new(20, 1));
        let (result, placement) = run(&config, &mut host, 120);
        assert_eq!(result.truncation, Some(1));
        // 120 - 70 = 50 is not more than 10 + 70 + 20.
        assert_eq!(placement.placed_item_count(), 0);
        assert_eq!(placement.hidden_from(), Some(0));
        assert_eq!(placement.ellipsis_rect(), Some(Rect::new(0, 0, 20, 3)));
    }

    #[test]
    fn anchor_kept_when_next_item_and_marker_fit() {
        // Measurement reserves the marker, placement only needs it at the cut.
        let config = FlowConfig::new().max_lines(1).item_spacing(1);
        let mut host =
            FixedItems::from_widths([10, 10, 10, 10], 1).ellipsis_size(Size::new(25, 1));
        let result = measure(
            &config,
            &mut host,
            MeasureSpec::Exactly(60),
            MeasureSpec::Unspecified,
        );
        // 10 + 25 fits, 21 + 25 fits, 32 + 25 fits, 43 + 25 > 60.
        assert_eq!(result.truncation, Some(3));

        // Placement at a wider final width leaves room after item 2.
        let placement = place(&config, &host, Rect::new(0, 0, 80, 1), &result).unwrap();
        // remaining 80 - 32 = 48 > 1 + 10 + 25 = 36.
        assert_eq!(placement.hidden_from(), Some(3));
        assert_eq!(placement.placed_item_count(), 3);
        assert_eq!(placement.item_rect(2), Some(Rect::new(22, 0, 10, 1)));
        assert_eq!(placement.ellipsis_rect(), Some(Rect::new(33, 0, 25, 1)));
        assert_eq!(placement.item_rect(3), None);
    }

    #[test]
    fn marker_is_last_slot_and_never_overlaps_items() {
        let config = FlowConfig::new().max_lines(2).item_spacing(2);
        let mut host = FixedItems::from_widths([8; 12], 1).ellipsis_size(Size::new(3, 1));
        let (result, placement) = run(&config, &mut host, 30);
        assert!(result.is_truncated());
        let marker = placement.ellipsis_rect().unwrap();
        assert_eq!(placement.slots().last().unwrap().slot, FlowSlot::Ellipsis);
        for placed in &placement.slots()[..placement.slots().len() - 1] {
            assert!(!placed.rect.overlaps(&marker), "{placed:?} overlaps {marker:?}");
        }
        assert!(placement.placed_item_count() < host.items().len());
    }

    #[test]
    fn rtl_mirrors_ltr() {
        let config = FlowConfig::new().item_spacing(2).padding(Sides::horizontal(3));
        let items = [
            FlowItem::new(10, 1).with_margins(Margins::new(1, 4)),
            FlowItem::new(7, 1),
            FlowItem::new(12, 1).with_margins(Margins::new(2, 0)),
        ];
        let mut ltr = FixedItems::new(items);
        let mut rtl = FixedItems::new(items).direction(LayoutDirection::Rtl);
        let (_, ltr_place) = run(&config, &mut ltr, 40);
        let (_, rtl_place) = run(&config, &mut rtl, 40);
        let area = Rect::new(0, 0, 40, 10);
        for (l, r) in ltr_place.slots().iter().zip(rtl_place.slots()) {
            assert_eq!(l.slot, r.slot);
            assert_eq!(l.rect.mirrored_within(&area), r.rect);
        }
        assert_eq!(rtl_place.item_rect(0), Some(Rect::new(26, 0, 10, 1)));
    }

    #[test]
    fn area_origin_offsets_every_rect() {
        let config = FlowConfig::new();
        let mut host = FixedItems::from_widths([5, 5], 2);
        let result = measure(
            &config,
            &mut host,
            MeasureSpec::Exactly(20),
            MeasureSpec::Unspecified,
        );
        let placement = place(&config, &host, Rect::new(7, 9, 20, 2), &result).unwrap();
        assert_eq!(placement.item_rect(0), Some(Rect::new(7, 9, 5, 2)));
        assert_eq!(placement.item_rect(1), Some(Rect::new(12, 9, 5, 2)));
    }

    #[test]
    fn hidden_item_before_cut_is_skipped_for_anchor() {
        let config = FlowConfig::new().max_lines(1).item_spacing(1);
        let mut host = FixedItems::new([
            FlowItem::new(10, 1),
            FlowItem::new(10, 1).hidden(),
            FlowItem::new(30, 1),
        ])
        .ellipsis_size(Size::new(2, 1));
        let result = measure(
            &config,
            &mut host,
            MeasureSpec::Exactly(30),
            MeasureSpec::Unspecified,
        );
        assert_eq!(result.truncation, Some(2));
        let placement = place(&config, &host, Rect::new(0, 0, 30, 1), &result).unwrap();
        assert_eq!(placement.hidden_from(), Some(0));
        assert_eq!(placement.ellipsis_rect(), Some(Rect::new(0, 0, 2, 1)));
    }

    #[test]
    fn stale_measurement_is_rejected() {
        let config = FlowConfig::new();
        let mut host = FixedItems::from_widths([5, 5], 1);
        let result = measure(
            &config,
            &mut host,
            MeasureSpec::Exactly(20),
            MeasureSpec::Unspecified,
        );
        host.push(FlowItem::new(5, 1));
        let err = place(&config, &host, Rect::new(0, 0, 20, 1), &result).unwrap_err();
        assert_eq!(err, PlacementError::StaleMeasurement { measured: 2, current: 3 });
    }

    #[test]
    fn bogus_truncation_index_is_rejected() {
        let config = FlowConfig::new();
        let host = FixedItems::from_widths([5, 5], 1);
        let result = LayoutResult {
            truncation: Some(5),
            item_count: 2,
            ..LayoutResult::default()
        };
        assert_eq!(
            place(&config, &host, Rect::new(0, 0, 20, 1), &result).unwrap_err(),
            PlacementError::TruncationOutOfRange { index: 5, item_count: 2 }
        );

        let hidden = FixedItems::new([FlowItem::new(5, 1), FlowItem::new(5, 1).hidden()]);
        let result = LayoutResult {
            truncation: Some(1),
            item_count: 2,
            ..LayoutResult::default()
        };
        let err = place(&config, &hidden, Rect::new(0, 0, 20, 1), &result).unwrap_err();
        assert_eq!(err, PlacementError::TruncationOutOfRange { index: 1, item_count: 2 });
        assert_eq!(
            err.to_string(),
            "truncation index 1 does not name a visible item (item count 2)"
        );
    }

    #[test]
    fn cut_at_first_item_puts_marker_in_first_slot() {
        let config = FlowConfig::new().max_lines(1).padding(Sides::horizontal(2));
        let mut host = FixedItems::from_widths([120, 10], 4).ellipsis_size(Size::new(20, 1));
        let (result, placement) = run(&config, &mut host, 100);
        assert_eq!(result.truncation, Some(0));
        assert_eq!(placement.placed_item_count(), 0);
        assert_eq!(placement.hidden_from(), Some(0));
        // The marker stands in for item 0 and takes its line height.
        assert_eq!(placement.slots().len(), 1);
        assert_eq!(placement.ellipsis_rect(), Some(Rect::new(2, 0, 20, 4)));

        placement.apply(&mut host);
        assert_eq!(host.position(0), None);
        assert_eq!(host.position(1), None);
        assert_eq!(host.ellipsis_position(), Some(Rect::new(2, 0, 20, 4)));
    }

    #[test]
    fn cut_after_hidden_leading_items_has_no_anchor() {
        let config = FlowConfig::new().max_lines(1);
        let mut host = FixedItems::new([
            FlowItem::new(5, 1).hidden(),
            FlowItem::new(50, 2),
            FlowItem::new(5, 1),
        ])
        .ellipsis_size(Size::new(3, 1))
        .direction(LayoutDirection::Rtl);
        let (result, placement) = run(&config, &mut host, 30);
        assert_eq!(result.truncation, Some(1));
        assert_eq!(placement.hidden_from(), Some(1));
        // Mirrored to the start edge on the right.
        assert_eq!(placement.ellipsis_rect(), Some(Rect::new(27, 0, 3, 2)));
    }

    #[test]
    fn apply_assigns_and_releases() {
        let config = FlowConfig::new().max_lines(1).item_spacing(10);
        let mut host = FixedItems::from_widths([70, 70, 70], 3).ellipsis_size(Size::new(20, 1));
        let (_, placement) = run(&config, &mut host, 120);
        // Seed stale positions to check they get cleared.
        host.assign_position(FlowSlot::Item(2), Rect::new(1, 1, 1, 1));
        placement.apply(&mut host);
        assert_eq!(host.position(0), None);
        assert_eq!(host.position(2), None);
        assert_eq!(host.ellipsis_position(), Some(Rect::new(0, 0, 20, 3)));

        let mut roomy = FixedItems::from_widths([10], 1);
        let (_, placement) = run(&FlowConfig::new(), &mut roomy, 50);
        roomy.assign_position(FlowSlot::Ellipsis, Rect::new(9, 9, 1, 1));
        placement.apply(&mut roomy);
        assert_eq!(roomy.position(0), Some(Rect::new(0, 0, 10, 1)));
        assert_eq!(roomy.ellipsis_position(), None);
    }
}
