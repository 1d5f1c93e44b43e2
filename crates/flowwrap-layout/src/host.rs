//! The contract between the flow passes and the container that owns the items.
//!
//! The flow algorithm never owns items. It asks the host how many there are,
//! which are visible, how big they are and which margins they carry, and hands
//! back one rectangle per placed item through [`FlowHost::assign_position`].

use flowwrap_core::geometry::{LayoutDirection, Margins, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::config::Ellipsis;
use crate::measure_spec::AvailableSpace;

/// What a placed rectangle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowSlot {
    /// The host item at this index.
    Item(usize),
    /// The truncation marker.
    Ellipsis,
}

/// A container whose children can be flowed.
///
/// Items are addressed by index in `0..item_count()`, in flow order.
pub trait FlowHost {
    /// Number of items, hidden ones included.
    fn item_count(&self) -> usize;

    /// Hidden items take no space and receive no position.
    fn is_visible(&self, _index: usize) -> bool {
        true
    }

    /// Measure an item. Called at most once per visible item per measurement
    /// pass; the result must be returned by [`FlowHost::measured_size`] until
    /// the next measurement.
    fn measure_item(&mut self, index: usize, available: AvailableSpace) -> Size;

    /// Size recorded by the last [`FlowHost::measure_item`] for this item.
    fn measured_size(&self, index: usize) -> Size;

    /// Direction-relative margins of an item.
    fn margins(&self, _index: usize) -> Margins {
        Margins::ZERO
    }

    fn layout_direction(&self) -> LayoutDirection {
        LayoutDirection::Ltr
    }

    /// Measure the truncation marker. Called once per measurement pass.
    fn measure_ellipsis(&mut self, ellipsis: &Ellipsis) -> Size {
        ellipsis.intrinsic_size()
    }

    /// Record the final rectangle for an item or the marker.
    fn assign_position(&mut self, _slot: FlowSlot, _rect: Rect) {}

    /// The slot is not displayed after this placement.
    fn release(&mut self, _slot: FlowSlot) {}
}

/// A pre-measured item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowItem {
    pub size: Size,
    pub margins: Margins,
    pub visible: bool,
}

impl FlowItem {
    /// A visible item with no margins.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width, height),
            margins: Margins::ZERO,
            visible: true,
        }
    }

    /// Set the margins.
    #[must_use]
    pub const fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Hide the item.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Host for items whose sizes are known up front.
///
/// Records what the passes did: how many times items were measured, and the
/// rectangles assigned by the last [`crate::Placement::apply`].
#[derive(Debug, Clone, Default)]
pub struct FixedItems {
    items: Vec<FlowItem>,
    direction: LayoutDirection,
    ellipsis_size: Option<Size>,
    positions: Vec<Option<Rect>>,
    ellipsis_position: Option<Rect>,
    measure_calls: usize,
}

impl FixedItems {
    /// Wrap a list of items, laid out left to right.
    pub fn new(items: impl IntoIterator<Item = FlowItem>) -> Self {
        let items: Vec<FlowItem> = items.into_iter().collect();
        let positions = vec![None; items.len()];
        Self {
            items,
            positions,
            ..Self::default()
        }
    }

    /// Visible margin-less items of the given widths, all `height` tall.
    pub fn from_widths(widths: impl IntoIterator<Item = u16>, height: u16) -> Self {
        Self::new(widths.into_iter().map(|w| FlowItem::new(w, height)))
    }

    /// Set the layout direction.
    #[must_use]
    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Override the marker's measured size regardless of the configured ellipsis.
    #[must_use]
    pub fn ellipsis_size(mut self, size: Size) -> Self {
        self.ellipsis_size = Some(size);
        self
    }

    /// Append an item.
    pub fn push(&mut self, item: FlowItem) {
        self.items.push(item);
        self.positions.push(None);
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
        self.ellipsis_position = None;
    }

    /// The items, in flow order.
    pub fn items(&self) -> &[FlowItem] {
        &self.items
    }

    /// Rectangle assigned to an item by the last applied placement.
    pub fn position(&self, index: usize) -> Option<Rect> {
        self.positions.get(index).copied().flatten()
    }

    /// Rectangle assigned to the ellipsis by the last applied placement.
    pub fn ellipsis_position(&self) -> Option<Rect> {
        self.ellipsis_position
    }

    /// Total `measure_item` calls so far.
    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }
}

impl FlowHost for FixedItems {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn is_visible(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.visible)
    }

    fn measure_item(&mut self, index: usize, _available: AvailableSpace) -> Size {
        self.measure_calls += 1;
        self.measured_size(index)
    }

    fn measured_size(&self, index: usize) -> Size {
        self.items.get(index).map_or(Size::ZERO, |item| item.size)
    }

    fn margins(&self, index: usize) -> Margins {
        self.items.get(index).map_or(Margins::ZERO, |item| item.margins)
    }

    fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    fn measure_ellipsis(&mut self, ellipsis: &Ellipsis) -> Size {
        self.ellipsis_size.unwrap_or_else(|| ellipsis.intrinsic_size())
    }

    fn assign_position(&mut self, slot: FlowSlot, rect: Rect) {
        match slot {
            FlowSlot::Item(index) => {
                if let Some(position) = self.positions.get_mut(index) {
                    *position = Some(rect);
                }
            }
            FlowSlot::Ellipsis => self.ellipsis_position = Some(rect),
        }
    }

    fn release(&mut self, slot: FlowSlot) {
        match slot {
            FlowSlot::Item(index) => {
                if let Some(position) = self.positions.get_mut(index) {
                    *position = None;
                }
            }
            FlowSlot::Ellipsis => self.ellipsis_position = None,
        }
    }
}
