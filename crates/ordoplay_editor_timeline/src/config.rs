// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline widget configuration.
//!
//! Metrics, zoom limits and palette. Every field has a default so partial
//! RON documents load cleanly.

use crate::error::{Result, TimelineError};
use egui::Color32;
use serde::{Deserialize, Serialize};

/// Widget metrics and behaviour constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Width of the legend column on the left
    pub legend_width: f32,
    /// Height of one item row (without custom extra height)
    pub item_height: f32,
    /// Height of the header ruler
    pub header_height: f32,
    /// Height of the horizontal scrollbar
    pub scrollbar_height: f32,
    /// Gap kept below the content frame
    pub content_bottom_padding: f32,
    /// Gap between content frame and scrollbar
    pub scrollbar_spacing: f32,
    /// Smallest scrollbar thumb width
    pub min_thumb_width: f32,
    /// Width of the scrollbar resize handles
    pub thumb_handle_width: f32,
    /// Preferred minimum width of item edge handles
    pub item_handle_min_width: f32,
    /// Lowest zoom (pixels per frame)
    pub min_pixels_per_frame: f32,
    /// Highest zoom (pixels per frame)
    pub max_pixels_per_frame: f32,
    /// Zoom at construction
    pub initial_pixels_per_frame: f32,
    /// Fraction of the remaining distance covered by each zoom step
    pub zoom_smoothing: f32,
    /// Relative zoom change per wheel notch
    pub wheel_zoom_step: f32,
    /// Minimum pixel distance between labelled ruler ticks
    pub tick_min_spacing: f32,
    /// Labelled tick interval before auto-doubling
    pub base_tick_interval: i32,
    /// Playhead line width
    pub cursor_width: f32,
    /// Font scale of the playhead frame label
    pub cursor_label_scale: f32,
    /// Side of the add/delete/expand buttons
    pub button_size: f32,
    /// Palette
    pub colors: SequencerColors,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            legend_width: 200.0,
            item_height: 20.0,
            header_height: 20.0,
            scrollbar_height: 14.0,
            content_bottom_padding: 8.0,
            scrollbar_spacing: 4.0,
            min_thumb_width: 44.0,
            thumb_handle_width: 14.0,
            item_handle_min_width: 10.0,
            min_pixels_per_frame: 0.1,
            max_pixels_per_frame: 50.0,
            initial_pixels_per_frame: 10.0,
            zoom_smoothing: 0.33,
            wheel_zoom_step: 0.1,
            tick_min_spacing: 150.0,
            base_tick_interval: 10,
            cursor_width: 3.0,
            cursor_label_scale: 0.8,
            button_size: 16.0,
            colors: SequencerColors::default(),
        }
    }
}

impl SequencerConfig {
    /// Load from a RON document, rejecting unusable zoom limits
    pub fn from_ron(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the zoom limits form a positive, finite, ordered range
    pub fn validate(&self) -> Result<()> {
        let min = self.min_pixels_per_frame;
        let max = self.max_pixels_per_frame;
        if !(min.is_finite() && max.is_finite() && min > 0.0) {
            return Err(TimelineError::InvalidConfig(format!(
                "zoom limits must be positive and finite (min {min}, max {max})"
            )));
        }
        if min > max {
            return Err(TimelineError::InvalidConfig(format!(
                "min_pixels_per_frame {min} exceeds max_pixels_per_frame {max}"
            )));
        }
        if !self.initial_pixels_per_frame.is_finite() {
            return Err(TimelineError::InvalidConfig(format!(
                "initial_pixels_per_frame {} is not finite",
                self.initial_pixels_per_frame
            )));
        }
        Ok(())
    }

    /// Zoom limits as `(min, max)`, falling back to the defaults when the
    /// configured pair is unusable
    pub fn zoom_limits(&self) -> (f32, f32) {
        if self.validate().is_ok() {
            (self.min_pixels_per_frame, self.max_pixels_per_frame)
        } else {
            tracing::warn!(
                "Unusable zoom limits {}..{}, using defaults",
                self.min_pixels_per_frame,
                self.max_pixels_per_frame
            );
            let defaults = Self::default();
            (defaults.min_pixels_per_frame, defaults.max_pixels_per_frame)
        }
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Pixel width available to frames (canvas minus legend)
    pub fn track_width(&self, canvas_width: f32) -> f32 {
        (canvas_width - self.legend_width).max(0.0)
    }
}

/// Colors as RGBA bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerColors {
    /// Widget background
    pub background: [u8; 4],
    /// Legend column background
    pub legend: [u8; 4],
    /// Header strip background
    pub header: [u8; 4],
    /// Collapsed placeholder row
    pub collapsed: [u8; 4],
    /// Even rows
    pub row_even: [u8; 4],
    /// Odd rows
    pub row_odd: [u8; 4],
    /// Hovered row
    pub row_hovered: [u8; 4],
    /// Band under the selected row
    pub selection: [u8; 4],
    /// Ruler ticks
    pub tick: [u8; 4],
    /// Frame lines across the content area
    pub tick_faint: [u8; 4],
    /// Ruler labels
    pub tick_label: [u8; 4],
    /// Legend labels and buttons
    pub text: [u8; 4],
    /// Playhead arrow and label text
    pub cursor: [u8; 4],
    /// Playhead label background
    pub cursor_label_bg: [u8; 4],
    /// Playhead line
    pub cursor_line: [u8; 4],
    /// Hovered item edge handle
    pub item_handle: [u8; 4],
    /// Scrollbar track
    pub scrollbar_track: [u8; 4],
    /// Scrollbar thumb
    pub scrollbar_thumb: [u8; 4],
    /// Scrollbar thumb while hovered or dragged
    pub scrollbar_thumb_active: [u8; 4],
    /// Scrollbar resize handle
    pub scrollbar_handle: [u8; 4],
    /// Scrollbar resize handle while hovered or dragged
    pub scrollbar_handle_active: [u8; 4],
    /// Copy/paste labels
    pub clipboard_label: [u8; 4],
    /// Copy/paste labels while hovered
    pub clipboard_label_hovered: [u8; 4],
}

impl Default for SequencerColors {
    fn default() -> Self {
        Self {
            background: [36, 36, 36, 255],
            legend: [18, 18, 18, 255],
            header: [0, 0, 0, 255],
            collapsed: [55, 56, 61, 255],
            row_even: [61, 61, 65, 255],
            row_odd: [54, 54, 58, 255],
            row_hovered: [69, 77, 93, 255],
            selection: [64, 64, 255, 128],
            tick: [96, 96, 96, 255],
            tick_faint: [96, 96, 96, 48],
            tick_label: [187, 187, 187, 255],
            text: [255, 255, 255, 255],
            cursor: [0, 255, 0, 255],
            cursor_label_bg: [0, 128, 0, 191],
            cursor_line: [0, 255, 0, 128],
            item_handle: [255, 255, 255, 255],
            scrollbar_track: [16, 16, 16, 255],
            scrollbar_thumb: [80, 80, 80, 255],
            scrollbar_thumb_active: [96, 96, 96, 255],
            scrollbar_handle: [102, 102, 102, 255],
            scrollbar_handle_active: [170, 170, 170, 255],
            clipboard_label: [0, 0, 0, 255],
            clipboard_label_hovered: [255, 128, 16, 255],
        }
    }
}

/// Convert RGBA bytes to an egui color
pub fn color32(rgba: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}
