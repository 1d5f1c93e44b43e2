#![forbid(unsafe_code)]

//! Text chips: a flow host whose items are short labels.

use flowwrap_layout::{AvailableSpace, FlowHost, FlowSlot, LayoutDirection, Rect, Size};
use unicode_width::UnicodeWidthStr;

/// Columns a chip adds around its label: `[` and `]`.
pub const CHIP_FRAME: u16 = 2;

/// A row of labelled chips, one terminal row tall each.
#[derive(Debug, Clone, Default)]
pub struct ChipHost {
    labels: Vec<String>,
    measured: Vec<Size>,
    positions: Vec<Option<Rect>>,
    ellipsis: Option<Rect>,
    direction: LayoutDirection,
}

impl ChipHost {
    /// `count` chips labelled `Hello 0` through `Hello {count - 1}`.
    pub fn hello(count: usize) -> Self {
        Self::from_labels((0..count).map(|i| format!("Hello {i}")))
    }

    pub fn from_labels(labels: impl IntoIterator<Item = String>) -> Self {
        let labels: Vec<String> = labels.into_iter().collect();
        let n = labels.len();
        Self {
            labels,
            measured: vec![Size::ZERO; n],
            positions: vec![None; n],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
        self.measured.push(Size::ZERO);
        self.positions.push(None);
    }

    /// Drop every chip.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.measured.clear();
        self.positions.clear();
        self.ellipsis = None;
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Where the last applied placement put a chip.
    pub fn position(&self, index: usize) -> Option<Rect> {
        self.positions.get(index).copied().flatten()
    }

    pub fn ellipsis_position(&self) -> Option<Rect> {
        self.ellipsis
    }

    /// Chips that currently hold a position, in flow order.
    pub fn shown(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.labels
            .iter()
            .zip(&self.positions)
            .filter_map(|(label, rect)| rect.map(|rect| (label.as_str(), rect)))
    }
}

impl FlowHost for ChipHost {
    fn item_count(&self) -> usize {
        self.labels.len()
    }

    fn measure_item(&mut self, index: usize, available: AvailableSpace) -> Size {
        let Some(label) = self.labels.get(index) else {
            return Size::ZERO;
        };
        let natural = u16::try_from(label.width())
            .unwrap_or(u16::MAX)
            .saturating_add(CHIP_FRAME);
        // A chip never asks for more than one full line.
        let width = available.width.limit().map_or(natural, |max| natural.min(max));
        let size = Size::new(width, 1);
        if let Some(slot) = self.measured.get_mut(index) {
            *slot = size;
        }
        size
    }

    fn measured_size(&self, index: usize) -> Size {
        self.measured.get(index).copied().unwrap_or(Size::ZERO)
    }

    fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    fn assign_position(&mut self, slot: FlowSlot, rect: Rect) {
        match slot {
            FlowSlot::Item(index) => {
                if let Some(position) = self.positions.get_mut(index) {
                    *position = Some(rect);
                }
            }
            FlowSlot::Ellipsis => self.ellipsis = Some(rect),
        }
    }

    fn release(&mut self, slot: FlowSlot) {
        match slot {
            FlowSlot::Item(index) => {
                if let Some(position) = self.positions.get_mut(index) {
                    *position = None;
                }
            }
            FlowSlot::Ellipsis => self.ellipsis = None,
        }
    }
}
