// SPDX-License-Identifier: MIT OR Apache-2.0
//! Widget geometry.
//!
//! Everything here is a pure function of the canvas rectangle, the config,
//! the row heights and the current frame mapping. Both hit testing and
//! drawing read from the same [`SequencerLayout`], so what is drawn is what
//! responds to the pointer.

use crate::config::SequencerConfig;
use crate::coords::{Frame, FrameBounds, FrameMapping};
use crate::render::{CompactDrawRegion, CustomDrawRegion};
use egui::{Pos2, Rect, Vec2};

/// Which end(s) of an item a drag moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMask {
    /// Start only
    Left = 1,
    /// End only
    Right = 2,
    /// Whole item
    Body = 3,
}

impl EdgeMask {
    /// Raw mask bits
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the start moves
    pub fn moves_start(self) -> bool {
        self.bits() & 1 != 0
    }

    /// Whether the end moves
    pub fn moves_end(self) -> bool {
        self.bits() & 2 != 0
    }
}

/// One row of the content area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Top of the row
    pub top: f32,
    /// Bar row height
    pub height: f32,
    /// Custom height below the bar row
    pub extra: f32,
}

impl RowLayout {
    /// Bottom of the row including the extra height
    pub fn bottom(&self) -> f32 {
        self.top + self.height + self.extra
    }

    /// Whether `y` falls inside the row
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Pixel rectangles of one item bar and its grab zones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBar {
    /// The bar
    pub bar: Rect,
    /// Bar plus the half-tone area over the extra height
    pub extended: Rect,
    /// Left edge grab zone
    pub left_handle: Rect,
    /// Right edge grab zone
    pub right_handle: Rect,
}

impl ItemBar {
    /// Lay out an item bar on a row
    pub fn compute(
        mapping: &FrameMapping,
        row: &RowLayout,
        start: Frame,
        end: Frame,
        min_handle_width: f32,
    ) -> Self {
        let ppf = mapping.pixels_per_frame;
        let bar = Rect::from_min_max(
            Pos2::new(mapping.frame_to_pixel(start), row.top + 2.0),
            Pos2::new(mapping.frame_to_pixel(end) + ppf, row.top + row.height - 2.0),
        );
        let extended = Rect::from_min_max(bar.min, Pos2::new(bar.max.x, bar.max.y + row.extra));

        let max_handle = bar.width() / 3.0;
        let min_handle = min_handle_width.min(max_handle);
        let handle = (ppf / 2.0).clamp(min_handle, max_handle);
        let left_handle = Rect::from_min_max(bar.min, Pos2::new(bar.min.x + handle, bar.max.y));
        let right_handle = Rect::from_min_max(Pos2::new(bar.max.x - handle, bar.min.y), bar.max);

        Self {
            bar,
            extended,
            left_handle,
            right_handle,
        }
    }

    /// Grab zone under `pos`; edges win over the body
    pub fn hit(&self, pos: Pos2) -> Option<EdgeMask> {
        if self.left_handle.contains(pos) {
            Some(EdgeMask::Left)
        } else if self.right_handle.contains(pos) {
            Some(EdgeMask::Right)
        } else if self.bar.contains(pos) {
            Some(EdgeMask::Body)
        } else {
            None
        }
    }

    /// Rectangle for a grab zone
    pub fn zone(&self, mask: EdgeMask) -> Rect {
        match mask {
            EdgeMask::Left => self.left_handle,
            EdgeMask::Right => self.right_handle,
            EdgeMask::Body => self.bar,
        }
    }

    /// Whether any part of the bar is inside the horizontal span
    pub fn overlaps_x(&self, min_x: f32, max_x: f32) -> bool {
        self.bar.min.x <= max_x && self.bar.max.x >= min_x
    }
}

/// Scrollbar thumb and its resize handles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarThumb {
    /// Thumb
    pub thumb: Rect,
    /// Left resize handle
    pub left_handle: Rect,
    /// Right resize handle
    pub right_handle: Rect,
    /// Thumb width before any floor was applied
    pub ratio_width: f32,
}

impl ScrollbarThumb {
    /// Lay out the thumb over `track`
    pub fn compute(
        track: Rect,
        bounds: FrameBounds,
        first_frame: Frame,
        visible_frames: Frame,
        config: &SequencerConfig,
    ) -> Self {
        let track_width = track.width();
        let span = bounds.span_nonzero() as f32;
        let ratio = (visible_frames as f32 / span).min(1.0);
        let ratio_width = ratio * track_width;
        let width = ratio_width.max(config.min_thumb_width).min(track_width);
        let offset = ((first_frame - bounds.min) as f32 / span * track_width)
            .min(track_width - width)
            .max(0.0);

        let thumb = Rect::from_min_size(
            Pos2::new(track.min.x + offset, track.min.y),
            Vec2::new(width, track.height()),
        );
        let handle = config.thumb_handle_width.min(width / 2.0);
        let left_handle =
            Rect::from_min_max(thumb.min, Pos2::new(thumb.min.x + handle, thumb.max.y));
        let right_handle =
            Rect::from_min_max(Pos2::new(thumb.max.x - handle, thumb.min.y), thumb.max);

        Self {
            thumb,
            left_handle,
            right_handle,
            ratio_width,
        }
    }

    /// Thumb pixels per frame, for mapping thumb drags back to frames.
    ///
    /// Uses the unfloored width so the thumb tracks the pointer on long
    /// sequences where the drawn thumb is held at `min_thumb_width`.
    pub fn pixels_per_frame(&self, visible_frames: Frame) -> f32 {
        (self.ratio_width / visible_frames.max(1) as f32).max(f32::EPSILON)
    }
}

/// Geometry of the whole widget for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerLayout {
    /// Everything the widget occupies
    pub canvas: Rect,
    /// Single placeholder row when collapsed or empty
    pub collapsed: bool,
    /// Header strip (ruler)
    pub header: Rect,
    /// Part of the header that scrubs the playhead
    pub cursor_strip: Rect,
    /// Visible content frame (clip for rows)
    pub content_frame: Rect,
    /// Full content area, all rows
    pub content: Rect,
    /// Legend column of the content area
    pub legend: Rect,
    /// Rows, in item order
    pub rows: Vec<RowLayout>,
    /// Whole scrollbar strip
    pub scrollbar: Rect,
    /// Scrollbar track right of the legend
    pub scrollbar_track: Rect,
    /// Screen x where the first visible frame starts
    pub origin_x: f32,
    /// Pixel width available to frames
    pub track_width: f32,
}

impl SequencerLayout {
    /// Lay out the widget. `row_extras` holds one custom height per item.
    pub fn compute(
        canvas: Rect,
        config: &SequencerConfig,
        row_extras: &[f32],
        expanded: bool,
    ) -> Self {
        let width = canvas.width();
        let origin_x = canvas.min.x + config.legend_width;
        let track_width = config.track_width(width);
        let collapsed = !expanded || row_extras.is_empty();

        if collapsed {
            let row = Rect::from_min_size(canvas.min, Vec2::new(width, config.item_height));
            return Self {
                canvas,
                collapsed,
                header: row,
                cursor_strip: Rect::NOTHING,
                content_frame: row,
                content: row,
                legend: Rect::NOTHING,
                rows: Vec::new(),
                scrollbar: Rect::NOTHING,
                scrollbar_track: Rect::NOTHING,
                origin_x,
                track_width,
            };
        }

        let header = Rect::from_min_size(canvas.min, Vec2::new(width, config.header_height));
        let cursor_strip = Rect::from_min_max(
            Pos2::new(origin_x, canvas.min.y),
            Pos2::new(canvas.max.x, canvas.min.y + config.item_height),
        );

        let frame_height = (canvas.height()
            - config.content_bottom_padding
            - config.header_height
            - config.scrollbar_height)
            .max(0.0);
        let content_frame = Rect::from_min_size(
            Pos2::new(canvas.min.x, header.max.y),
            Vec2::new(width, frame_height),
        );

        let mut rows = Vec::with_capacity(row_extras.len());
        let mut top = content_frame.min.y;
        for &extra in row_extras {
            let row = RowLayout {
                top,
                height: config.item_height,
                extra: extra.max(0.0),
            };
            top = row.bottom();
            rows.push(row);
        }

        let content = Rect::from_min_max(content_frame.min, Pos2::new(canvas.max.x, top));
        let legend = Rect::from_min_max(content.min, Pos2::new(origin_x, content.max.y));

        let scrollbar = Rect::from_min_size(
            Pos2::new(canvas.min.x, content_frame.max.y + config.scrollbar_spacing),
            Vec2::new(width, config.scrollbar_height),
        );
        let scrollbar_track =
            Rect::from_min_max(Pos2::new(origin_x, scrollbar.min.y), scrollbar.max);

        Self {
            canvas,
            collapsed,
            header,
            cursor_strip,
            content_frame,
            content,
            legend,
            rows,
            scrollbar,
            scrollbar_track,
            origin_x,
            track_width,
        }
    }

    /// Frame mapping for this layout
    pub fn mapping(&self, first_frame: Frame, pixels_per_frame: f32) -> FrameMapping {
        FrameMapping::new(self.origin_x, first_frame, pixels_per_frame)
    }

    /// Row under screen y
    pub fn row_at(&self, y: f32) -> Option<usize> {
        self.rows.iter().position(|row| row.contains_y(y))
    }

    /// Full-width band of a row's bar line, legend included
    pub fn row_band(&self, index: usize) -> Option<Rect> {
        self.rows.get(index).map(|row| {
            Rect::from_min_max(
                Pos2::new(self.canvas.min.x, row.top),
                Pos2::new(self.canvas.max.x, row.top + row.height),
            )
        })
    }

    /// Row background right of the legend, extra height included
    pub fn row_background(&self, index: usize) -> Option<Rect> {
        self.rows.get(index).map(|row| {
            Rect::from_min_max(
                Pos2::new(self.origin_x, row.top + 1.0),
                Pos2::new(self.canvas.max.x, row.bottom()),
            )
        })
    }

    /// Where the row label is drawn
    pub fn label_pos(&self, index: usize) -> Option<Pos2> {
        self.rows
            .get(index)
            .map(|row| Pos2::new(self.content.min.x + 3.0, row.top + 2.0))
    }

    /// Delete button of a row (`slot` 0) or duplicate button (`slot` 1)
    pub fn legend_button(
        &self,
        index: usize,
        slot: usize,
        config: &SequencerConfig,
    ) -> Option<Rect> {
        self.label_pos(index).map(|label| {
            let x = self.origin_x - config.item_height * (slot + 1) as f32 - 8.0;
            Rect::from_min_size(Pos2::new(x, label.y + 2.0), Vec2::splat(config.button_size))
        })
    }

    /// Expand/collapse toggle in the top-left corner
    pub fn expand_button(&self, config: &SequencerConfig) -> Rect {
        Rect::from_min_size(self.canvas.min + Vec2::splat(2.0), Vec2::splat(config.button_size))
    }

    /// Copy (`paste == false`) or paste label area in the header
    pub fn clipboard_button(&self, paste: bool, config: &SequencerConfig) -> Rect {
        let x = self.content.min.x + if paste { 140.0 } else { 100.0 };
        Rect::from_min_max(
            Pos2::new(x, self.canvas.min.y + 2.0),
            Pos2::new(x + 30.0, self.canvas.min.y + config.item_height - 2.0),
        )
    }

    /// Bar geometry of an item
    pub fn item_bar(
        &self,
        index: usize,
        mapping: &FrameMapping,
        start: Frame,
        end: Frame,
        config: &SequencerConfig,
    ) -> Option<ItemBar> {
        self.rows
            .get(index)
            .map(|row| ItemBar::compute(mapping, row, start, end, config.item_handle_min_width))
    }

    /// Custom draw region of a row with extra height
    pub fn custom_region(
        &self,
        index: usize,
        mapping: &FrameMapping,
        bounds: FrameBounds,
    ) -> Option<CustomDrawRegion> {
        let row = self.rows.get(index)?;
        let top = row.top + row.height;
        let bottom = top + row.extra;
        let (left, right) = self.span_x(mapping, bounds);
        Some(CustomDrawRegion {
            content: Rect::from_min_max(Pos2::new(left, top), Pos2::new(right, bottom)),
            legend: Rect::from_min_max(
                Pos2::new(self.canvas.min.x, top),
                Pos2::new(self.origin_x, bottom),
            ),
            content_clip: Rect::from_min_max(
                Pos2::new(self.origin_x, top),
                Pos2::new(self.canvas.max.x, bottom),
            )
                .intersect(self.content_frame),
            legend_clip: Rect::from_min_max(
                Pos2::new(self.canvas.min.x, top),
                Pos2::new(self.origin_x, bottom),
            )
                .intersect(self.content_frame),
        })
    }

    /// Custom draw region of a compact row
    pub fn compact_region(
        &self,
        index: usize,
        mapping: &FrameMapping,
        bounds: FrameBounds,
    ) -> Option<CompactDrawRegion> {
        let row = self.rows.get(index)?;
        let top = row.top;
        let bottom = top + row.height;
        let (left, right) = self.span_x(mapping, bounds);
        Some(CompactDrawRegion {
            content: Rect::from_min_max(Pos2::new(left, top), Pos2::new(right, bottom)),
            content_clip: Rect::from_min_max(
                Pos2::new(self.origin_x, top),
                Pos2::new(self.canvas.max.x, bottom),
            )
                .intersect(self.content_frame),
        })
    }

    /// Screen span of the whole sequence, half a frame of slack at the start
    /// and a frame and a half past the end
    fn span_x(&self, mapping: &FrameMapping, bounds: FrameBounds) -> (f32, f32) {
        let ppf = mapping.pixels_per_frame;
        let left = mapping.frame_to_pixel(bounds.min) + 0.5 * ppf;
        let right = mapping.frame_to_pixel(bounds.max) + 1.5 * ppf;
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(1200.0, 400.0))
    }

    #[test]
    fn test_collapsed_single_row() {
        let config = SequencerConfig::default();
        let layout = SequencerLayout::compute(canvas(), &config, &[], true);
        assert!(layout.collapsed);
        assert!(layout.rows.is_empty());
        assert_eq!(layout.content_frame.height(), config.item_height);

        let layout = SequencerLayout::compute(canvas(), &config, &[0.0, 0.0], false);
        assert!(layout.collapsed);
    }

    #[test]
    fn test_rows_stack_with_extra_height() {
        let config = SequencerConfig::default();
        let layout = SequencerLayout::compute(canvas(), &config, &[0.0, 40.0, 0.0], true);
        assert_eq!(layout.rows.len(), 3);
        assert_eq!(layout.rows[0].top, 20.0);
        assert_eq!(layout.rows[1].top, 40.0);
        assert_eq!(layout.rows[2].top, 100.0);
        assert_eq!(layout.content.max.y, 120.0);
        assert_eq!(layout.row_at(70.0), Some(1));
        assert_eq!(layout.row_at(119.0), Some(2));
        assert_eq!(layout.row_at(121.0), None);
    }

    #[test]
    fn test_scrollbar_below_content_frame() {
        let config = SequencerConfig::default();
        let layout = SequencerLayout::compute(canvas(), &config, &[0.0], true);
        assert_eq!(layout.content_frame.height(), 400.0 - 8.0 - 20.0 - 14.0);
        assert!(layout.scrollbar.min.y > layout.content_frame.max.y);
        assert!(layout.scrollbar.max.y <= layout.canvas.max.y);
        assert_eq!(layout.scrollbar_track.min.x, 200.0);
        assert_eq!(layout.track_width, 1000.0);
    }

    #[test]
    fn test_item_bar_handles() {
        let mapping = FrameMapping::new(200.0, 0, 10.0);
        let row = RowLayout {
            top: 20.0,
            height: 20.0,
            extra: 0.0,
        };
        let bar = ItemBar::compute(&mapping, &row, 0, 10, 10.0);
        assert_eq!(bar.bar.min.x, 200.0);
        assert_eq!(bar.bar.max.x, 310.0);
        assert_eq!(bar.left_handle.width(), 10.0);
        assert_eq!(bar.hit(Pos2::new(205.0, 30.0)), Some(EdgeMask::Left));
        assert_eq!(bar.hit(Pos2::new(305.0, 30.0)), Some(EdgeMask::Right));
        assert_eq!(bar.hit(Pos2::new(250.0, 30.0)), Some(EdgeMask::Body));
        assert_eq!(bar.hit(Pos2::new(250.0, 45.0)), None);
    }

    #[test]
    fn test_item_handle_at_most_third() {
        let mapping = FrameMapping::new(0.0, 0, 2.0);
        let row = RowLayout {
            top: 0.0,
            height: 20.0,
            extra: 0.0,
        };
        let bar = ItemBar::compute(&mapping, &row, 0, 2, 10.0);
        assert_eq!(bar.bar.width(), 6.0);
        assert_eq!(bar.left_handle.width(), 2.0);
        assert_eq!(bar.right_handle.width(), 2.0);
    }

    #[test]
    fn test_edge_mask_bits() {
        assert!(EdgeMask::Left.moves_start() && !EdgeMask::Left.moves_end());
        assert!(!EdgeMask::Right.moves_start() && EdgeMask::Right.moves_end());
        assert_eq!(EdgeMask::Body.bits(), 3);
    }

    #[test]
    fn test_thumb_width() {
        let config = SequencerConfig::default();
        let track = Rect::from_min_size(Pos2::new(200.0, 0.0), Vec2::new(1000.0, 14.0));
        let bounds = FrameBounds::new(0, 400);
        let thumb = ScrollbarThumb::compute(track, bounds, 100, 100, &config);
        assert_eq!(thumb.thumb.width(), 250.0);
        assert_eq!(thumb.thumb.min.x, 450.0);
        assert_eq!(thumb.pixels_per_frame(100), 2.5);

        // Floor applies when the ratio is tiny
        let bounds = FrameBounds::new(0, 100_000);
        let thumb = ScrollbarThumb::compute(track, bounds, 0, 100, &config);
        assert_eq!(thumb.thumb.width(), config.min_thumb_width);
        assert!((thumb.ratio_width - 1.0).abs() < 1e-4);
        assert!((thumb.pixels_per_frame(100) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_custom_regions() {
        let config = SequencerConfig::default();
        let layout = SequencerLayout::compute(canvas(), &config, &[50.0, 0.0], true);
        let mapping = layout.mapping(0, 10.0);
        let bounds = FrameBounds::new(0, 100);
        let region = layout.custom_region(0, &mapping, bounds).unwrap();
        assert_eq!(region.content.min.y, 40.0);
        assert_eq!(region.content.height(), 50.0);
        assert_eq!(region.legend.width(), 200.0);
        assert_eq!(region.content_clip.min.x, 200.0);
        let compact = layout.compact_region(1, &mapping, bounds).unwrap();
        assert_eq!(compact.content.min.y, 90.0);
        assert_eq!(compact.content.height(), 20.0);
    }
}
