// SPDX-License-Identifier: MIT OR Apache-2.0
//! Item store: the provider interface the widget edits through, and the
//! stock `IndexMap`-backed implementation.

use crate::coords::{Frame, FrameBounds};
use crate::error::{Result, TimelineError};
use crate::item::{ItemId, ItemRange, MediaDescriptor, TrackItem};
use crate::render::{CompactDrawRegion, CustomDrawRegion, Surface};
use indexmap::IndexMap;

/// Frames kept past an item end when the sequence grows to fit it
pub const FRAME_MAX_MARGIN: Frame = 100;

/// Items and bounds the sequencer widget edits.
///
/// Indices are row positions. The widget only passes indices below
/// `item_count()` taken during the same tick.
pub trait SequenceProvider {
    /// First frame of the sequence
    fn frame_min(&self) -> Frame;

    /// Last frame of the sequence
    fn frame_max(&self) -> Frame;

    /// Move the last frame
    fn set_frame_max(&mut self, frame: Frame);

    /// Number of rows
    fn item_count(&self) -> usize;

    /// Read an item's editable part
    fn get(&self, index: usize) -> ItemRange;

    /// Write an item's editable part back
    fn set(&mut self, index: usize, range: ItemRange);

    /// Remove an item; later rows shift up
    fn del(&mut self, index: usize);

    /// Clone an item
    fn duplicate(&mut self, _index: usize) {}

    /// Extra row height below the bar for custom content
    fn custom_height(&self, _index: usize) -> f32 {
        0.0
    }

    /// A drag on `index` started
    fn begin_edit(&mut self, _index: usize) {}

    /// The open drag ended
    fn end_edit(&mut self) {}

    /// Bar double-clicked
    fn double_click(&mut self, _index: usize) {}

    /// Copy label clicked
    fn copy(&mut self) {}

    /// Paste label clicked
    fn paste(&mut self) {}

    /// Text shown on the collapsed placeholder row
    fn collapse_label(&self, frame_count: Frame, item_count: usize) -> String {
        format!("{frame_count} Frames / {item_count} entries")
    }

    /// Insert a new item for dropped media. Returns `false` if unsupported.
    fn insert_from_external(
        &mut self,
        _descriptor: &MediaDescriptor,
        _start: Frame,
        _end: Frame,
    ) -> bool {
        false
    }

    /// Draw custom content for a row with extra height
    fn custom_draw(
        &mut self,
        _index: usize,
        _surface: &mut dyn Surface,
        _region: &CustomDrawRegion,
    ) {
    }

    /// Draw custom content inside a compact row
    fn custom_draw_compact(
        &mut self,
        _index: usize,
        _surface: &mut dyn Surface,
        _region: &CompactDrawRegion,
    ) {
    }

    /// Current bounds
    fn bounds(&self) -> FrameBounds {
        FrameBounds::new(self.frame_min(), self.frame_max())
    }
}

/// Ordered list of media items with sequence bounds
#[derive(Debug, Clone)]
pub struct MediaSequence {
    /// Sequence name
    pub name: String,
    items: IndexMap<ItemId, TrackItem>,
    frame_min: Frame,
    frame_max: Frame,
    editing: Option<usize>,
}

impl MediaSequence {
    /// Create an empty sequence spanning `0..=100`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: IndexMap::new(),
            frame_min: 0,
            frame_max: 100,
            editing: None,
        }
    }

    /// Builder: set bounds
    pub fn with_bounds(mut self, min: Frame, max: Frame) -> Self {
        let bounds = FrameBounds::new(min, max);
        self.frame_min = bounds.min;
        self.frame_max = bounds.max;
        self
    }

    /// Append an item, growing the bounds to fit
    pub fn push(&mut self, item: TrackItem) -> ItemId {
        let id = item.id;
        self.grow_to_fit(item.end);
        self.items.insert(id, item);
        id
    }

    /// Item at a row
    pub fn item(&self, index: usize) -> Option<&TrackItem> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    /// Mutable item at a row
    pub fn item_mut(&mut self, index: usize) -> Option<&mut TrackItem> {
        self.items.get_index_mut(index).map(|(_, item)| item)
    }

    /// Item by identity
    pub fn item_by_id(&self, id: ItemId) -> Option<&TrackItem> {
        self.items.get(&id)
    }

    /// Row of an item
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    /// All items in row order
    pub fn items(&self) -> impl Iterator<Item = &TrackItem> {
        self.items.values()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Row currently under a drag, if any
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Checked read
    pub fn try_get(&self, index: usize) -> Result<&TrackItem> {
        self.item(index).ok_or(TimelineError::IndexOutOfRange {
            index,
            count: self.items.len(),
        })
    }

    /// Checked write; rejects inverted ranges
    pub fn try_set(&mut self, index: usize, range: ItemRange) -> Result<()> {
        if range.start > range.end {
            return Err(TimelineError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        self.try_get(index)?;
        self.write_range(index, range);
        Ok(())
    }

    /// Checked removal
    pub fn remove(&mut self, index: usize) -> Result<TrackItem> {
        let count = self.items.len();
        let (_, item) = self
            .items
            .shift_remove_index(index)
            .ok_or(TimelineError::IndexOutOfRange { index, count })?;
        tracing::debug!("Removed item '{}' at row {}", item.label, index);
        Ok(item)
    }

    /// Push `frame_max` past `end` when it no longer fits
    pub fn grow_to_fit(&mut self, end: Frame) {
        if end > self.frame_max {
            self.frame_max = end + FRAME_MAX_MARGIN;
            tracing::debug!("Sequence '{}' grew to frame {}", self.name, self.frame_max);
        }
    }

    fn write_range(&mut self, index: usize, range: ItemRange) {
        let frame_min = self.frame_min;
        let start = range.start.max(frame_min);
        let end = range.end.max(start);
        self.grow_to_fit(end);
        if let Some(item) = self.item_mut(index) {
            item.start = start;
            item.end = end;
            item.label = range.label;
            item.color = range.color;
        }
    }
}

impl Default for MediaSequence {
    fn default() -> Self {
        Self::new("Untitled Sequence")
    }
}

impl SequenceProvider for MediaSequence {
    fn frame_min(&self) -> Frame {
        self.frame_min
    }

    fn frame_max(&self) -> Frame {
        self.frame_max
    }

    fn set_frame_max(&mut self, frame: Frame) {
        self.frame_max = frame.max(self.frame_min);
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> ItemRange {
        self.item(index)
            .map(TrackItem::range)
            .unwrap_or_else(|| ItemRange::new(self.frame_min, self.frame_min, ""))
    }

    fn set(&mut self, index: usize, range: ItemRange) {
        self.write_range(index, range);
    }

    fn del(&mut self, index: usize) {
        if let Err(e) = self.remove(index) {
            tracing::warn!("Delete ignored: {e}");
        }
    }

    fn duplicate(&mut self, index: usize) {
        if let Some(copy) = self.item(index).map(TrackItem::duplicate) {
            tracing::debug!("Duplicated item '{}' from row {}", copy.label, index);
            self.push(copy);
        }
    }

    fn custom_height(&self, index: usize) -> f32 {
        self.item(index)
            .filter(|item| item.expanded)
            .map_or(0.0, |item| item.extra_height)
    }

    fn begin_edit(&mut self, index: usize) {
        if let Some(open) = self.editing {
            tracing::warn!("begin_edit({index}) while row {open} is still being edited");
        }
        self.editing = Some(index);
    }

    fn end_edit(&mut self) {
        self.editing = None;
    }

    fn double_click(&mut self, index: usize) {
        if let Some(item) = self.item_mut(index) {
            item.expanded = !item.expanded;
            tracing::debug!("Item '{}' expanded: {}", item.label, item.expanded);
        }
    }

    fn insert_from_external(
        &mut self,
        descriptor: &MediaDescriptor,
        start: Frame,
        end: Frame,
    ) -> bool {
        let item = TrackItem::from_descriptor(descriptor, start, end);
        tracing::debug!("Inserted '{}' at {}..={}", item.label, item.start, item.end);
        self.push(item);
        true
    }
}
