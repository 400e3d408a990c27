// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track items placed on the timeline.

use crate::coords::Frame;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default bar color (muted violet)
pub const DEFAULT_ITEM_COLOR: [u8; 4] = [128, 128, 170, 255];

/// Stable identity of an item, independent of its row index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Create a new random item ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of media backing an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MediaKind {
    /// Video clip
    Video,
    /// Audio clip
    Audio,
    /// Still image
    Image,
    /// Anything else
    #[default]
    Other,
}

/// Editable part of an item, read and written as a unit through the store
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRange {
    /// First frame
    pub start: Frame,
    /// Last frame
    pub end: Frame,
    /// Legend label
    pub label: String,
    /// Bar color, RGBA
    pub color: [u8; 4],
}

impl ItemRange {
    /// Create a range with the default color
    pub fn new(start: Frame, end: Frame, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            color: DEFAULT_ITEM_COLOR,
        }
    }

    /// Number of frames covered
    pub fn length(&self) -> Frame {
        self.end - self.start
    }
}

/// One time-ranged entry on the timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    /// Unique item ID
    pub id: ItemId,
    /// First frame
    pub start: Frame,
    /// Last frame
    pub end: Frame,
    /// Legend label
    pub label: String,
    /// Bar color, RGBA
    pub color: [u8; 4],
    /// Extra row height for expanded custom content
    pub extra_height: f32,
    /// Source media path
    pub path: Option<String>,
    /// Source media kind
    pub media_kind: MediaKind,
    /// Whether the host shows the expanded content
    pub expanded: bool,
}

impl TrackItem {
    /// Create an item with the default color and no extra height
    pub fn new(label: impl Into<String>, start: Frame, end: Frame) -> Self {
        Self {
            id: ItemId::new(),
            start,
            end: end.max(start),
            label: label.into(),
            color: DEFAULT_ITEM_COLOR,
            extra_height: 0.0,
            path: None,
            media_kind: MediaKind::Other,
            expanded: false,
        }
    }

    /// Builder: set extra row height
    pub fn with_extra_height(mut self, extra_height: f32) -> Self {
        self.extra_height = extra_height.max(0.0);
        self
    }

    /// Builder: set color
    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    /// Create an item from a dropped media descriptor
    pub fn from_descriptor(descriptor: &MediaDescriptor, start: Frame, end: Frame) -> Self {
        let mut item = Self::new(descriptor.name.clone(), start, end);
        item.path = descriptor.path.clone();
        item.media_kind = descriptor.kind;
        item.expanded = true;
        item
    }

    /// Snapshot of the editable part
    pub fn range(&self) -> ItemRange {
        ItemRange {
            start: self.start,
            end: self.end,
            label: self.label.clone(),
            color: self.color,
        }
    }

    /// Copy of this item under a new identity
    pub fn duplicate(&self) -> Self {
        Self {
            id: ItemId::new(),
            ..self.clone()
        }
    }

    /// Number of frames covered
    pub fn length(&self) -> Frame {
        self.end - self.start
    }
}

/// Drag-and-drop payload describing media to insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Display name
    pub name: String,
    /// Source path
    pub path: Option<String>,
    /// Frame range in the source
    pub start: Frame,
    /// Frame range in the source
    pub end: Frame,
    /// Media kind
    pub kind: MediaKind,
}

impl MediaDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, start: Frame, end: Frame, kind: MediaKind) -> Self {
        Self {
            name: name.into(),
            path: None,
            start,
            end: end.max(start),
            kind,
        }
    }

    /// Builder: set the source path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Length of the source range
    pub fn length(&self) -> Frame {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_never_inverted() {
        let item = TrackItem::new("clip", 30, 10);
        assert_eq!(item.start, 30);
        assert_eq!(item.end, 30);
    }

    #[test]
    fn test_duplicate_gets_new_id() {
        let item = TrackItem::new("clip", 0, 10).with_extra_height(40.0);
        let copy = item.duplicate();
        assert_ne!(copy.id, item.id);
        assert_eq!(copy.range(), item.range());
        assert_eq!(copy.extra_height, 40.0);
    }

    #[test]
    fn test_from_descriptor() {
        let descriptor = MediaDescriptor::new("intro.mp4", 0, 250, MediaKind::Video)
            .with_path("media/intro.mp4");
        let item = TrackItem::from_descriptor(&descriptor, 40, 290);
        assert_eq!(item.label, "intro.mp4");
        assert_eq!(item.path.as_deref(), Some("media/intro.mp4"));
        assert_eq!(item.media_kind, MediaKind::Video);
        assert_eq!(item.length(), descriptor.length());
    }

    #[test]
    fn test_extra_height_non_negative() {
        let item = TrackItem::new("clip", 0, 1).with_extra_height(-3.0);
        assert_eq!(item.extra_height, 0.0);
    }
}
