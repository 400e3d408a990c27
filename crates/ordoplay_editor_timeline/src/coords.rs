// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame ↔ pixel mapping and zoom.

use crate::config::SequencerConfig;

/// Integer timeline position
pub type Frame = i32;

/// Inclusive frame range of the whole sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBounds {
    /// First frame
    pub min: Frame,
    /// Last frame
    pub max: Frame,
}

impl FrameBounds {
    /// Create bounds, swapping the ends if given reversed
    pub fn new(min: Frame, max: Frame) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Number of frames between the ends
    pub fn span(&self) -> Frame {
        self.max - self.min
    }

    /// Span used as a divisor, never zero
    pub fn span_nonzero(&self) -> Frame {
        self.span().max(1)
    }

    /// Clamp a frame into the bounds
    pub fn clamp(&self, frame: Frame) -> Frame {
        frame.clamp(self.min, self.max)
    }

    /// Highest first frame that still fills the view
    pub fn last_first_frame(&self, visible_frames: Frame) -> Frame {
        (self.max - visible_frames).max(self.min)
    }

    /// Clamp a first visible frame so the view stays inside the sequence.
    ///
    /// When every frame fits, the only valid value is `min`.
    pub fn clamp_first_frame(&self, first_frame: Frame, visible_frames: Frame) -> Frame {
        first_frame.clamp(self.min, self.last_first_frame(visible_frames))
    }

    /// Whether `visible_frames` covers the whole sequence
    pub fn fits(&self, visible_frames: Frame) -> bool {
        visible_frames >= self.span()
    }
}

/// Horizontal mapping between frames and screen pixels for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMapping {
    /// Screen x of `first_frame`
    pub origin_x: f32,
    /// Frame drawn at `origin_x`
    pub first_frame: Frame,
    /// Zoom
    pub pixels_per_frame: f32,
}

impl FrameMapping {
    /// Create a mapping
    pub fn new(origin_x: f32, first_frame: Frame, pixels_per_frame: f32) -> Self {
        Self {
            origin_x,
            first_frame,
            pixels_per_frame,
        }
    }

    /// Screen x of the left edge of `frame`
    pub fn frame_to_pixel(&self, frame: Frame) -> f32 {
        self.origin_x + (frame - self.first_frame) as f32 * self.pixels_per_frame
    }

    /// Continuous frame position under screen x
    pub fn pixel_to_frame(&self, x: f32) -> f32 {
        self.first_frame as f32 + (x - self.origin_x) / self.pixels_per_frame
    }

    /// Nearest whole frame to screen x
    pub fn frame_at_pixel(&self, x: f32) -> Frame {
        self.first_frame + self.frames_for_pixels(x - self.origin_x)
    }

    /// Frame whose cell contains screen x
    pub fn frame_cell_at(&self, x: f32) -> Frame {
        self.first_frame + ((x - self.origin_x) / self.pixels_per_frame).floor() as Frame
    }

    /// Pixel distance converted to whole frames, rounded
    pub fn frames_for_pixels(&self, dx: f32) -> Frame {
        (dx / self.pixels_per_frame).round() as Frame
    }

    /// Whole frames converted back to pixels
    pub fn pixels_for_frames(&self, frames: Frame) -> f32 {
        frames as f32 * self.pixels_per_frame
    }
}

/// Smoothed zoom level (pixels per frame).
///
/// Wheel input moves `target`; `actual` follows it a fixed fraction per
/// tick. Layout always uses `actual`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    actual: f32,
    target: f32,
    min: f32,
    max: f32,
    smoothing: f32,
}

impl Zoom {
    /// Create a zoom from config, at rest on the initial value
    pub fn new(config: &SequencerConfig) -> Self {
        let (min, max) = config.zoom_limits();
        let initial = if config.initial_pixels_per_frame.is_finite() {
            config.initial_pixels_per_frame.clamp(min, max)
        } else {
            min
        };
        Self {
            actual: initial,
            target: initial,
            min,
            max,
            smoothing: config.zoom_smoothing,
        }
    }

    /// Current pixels per frame
    pub fn actual(&self) -> f32 {
        self.actual
    }

    /// Value `actual` is moving toward
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Clamp the target and move `actual` toward it
    pub fn step(&mut self) {
        self.target = self.target.clamp(self.min, self.max);
        self.actual += (self.target - self.actual) * self.smoothing;
    }

    /// Set the target without touching `actual`
    pub fn set_target(&mut self, pixels_per_frame: f32) {
        self.target = pixels_per_frame.clamp(self.min, self.max);
    }

    /// Multiply the target
    pub fn scale_target(&mut self, factor: f32) {
        self.set_target(self.target * factor);
    }

    /// Jump both values, skipping the smoothing
    pub fn set_immediate(&mut self, pixels_per_frame: f32) {
        let value = pixels_per_frame.clamp(self.min, self.max);
        self.actual = value;
        self.target = value;
    }

    /// Whether `actual` has caught up with `target`
    pub fn is_settled(&self) -> bool {
        (self.target - self.actual).abs() < 1e-3
    }

    /// Whole frames that fit in `track_width` at the actual zoom
    pub fn visible_frame_count(&self, track_width: f32) -> Frame {
        (track_width / self.actual).floor().max(0.0) as Frame
    }
}

/// Ruler tick classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// Labelled, tallest
    Major,
    /// Half way between majors
    Half,
    /// Every other drawn frame
    Minor,
}

/// Ruler tick spacing for a zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSpacing {
    /// Frames between labelled ticks
    pub major: Frame,
    /// Frames between drawn ticks
    pub step: Frame,
}

impl TickSpacing {
    /// Double the base interval until labels are at least `min_spacing` apart
    pub fn for_zoom(pixels_per_frame: f32, base_interval: Frame, min_spacing: f32) -> Self {
        let mut major = base_interval.max(2);
        let mut step = 1;
        if pixels_per_frame > 0.0 {
            while (major as f32 * pixels_per_frame) < min_spacing {
                major *= 2;
                step *= 2;
            }
        }
        Self { major, step }
    }

    /// Classify a frame; the sequence ends are always major
    pub fn kind(&self, frame: Frame, bounds: FrameBounds) -> TickKind {
        if frame.rem_euclid(self.major) == 0 || frame == bounds.min || frame == bounds.max {
            TickKind::Major
        } else if frame.rem_euclid(self.major / 2) == 0 {
            TickKind::Half
        } else {
            TickKind::Minor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_over_visible_window() {
        for &ppf in &[0.1_f32, 0.37, 1.0, 3.3, 10.0, 50.0] {
            for &first in &[0, 7, 250] {
                let mapping = FrameMapping::new(213.5, first, ppf);
                let visible = (1000.0 / ppf) as Frame;
                for frame in first..=first + visible {
                    let x = mapping.frame_to_pixel(frame);
                    assert_eq!(mapping.frame_at_pixel(x), frame, "ppf {ppf} first {first}");
                }
            }
        }
    }

    #[test]
    fn test_frame_cell_floors() {
        let mapping = FrameMapping::new(200.0, 10, 10.0);
        assert_eq!(mapping.frame_cell_at(200.0), 10);
        assert_eq!(mapping.frame_cell_at(209.9), 10);
        assert_eq!(mapping.frame_cell_at(210.0), 11);
        assert_eq!(mapping.frame_cell_at(195.0), 9);
    }

    #[test]
    fn test_clamp_first_frame() {
        let bounds = FrameBounds::new(0, 100);
        assert_eq!(bounds.clamp_first_frame(-5, 50), 0);
        assert_eq!(bounds.clamp_first_frame(70, 50), 50);
        assert_eq!(bounds.clamp_first_frame(20, 50), 20);
        // Everything fits: pinned to min
        assert_eq!(bounds.clamp_first_frame(20, 150), 0);
        assert!(bounds.fits(100));
        assert!(!bounds.fits(99));
    }

    #[test]
    fn test_reversed_bounds() {
        let bounds = FrameBounds::new(40, 10);
        assert_eq!(bounds.min, 10);
        assert_eq!(bounds.max, 40);
        assert_eq!(FrameBounds::new(5, 5).span_nonzero(), 1);
    }

    #[test]
    fn test_zoom_smoothing() {
        let mut zoom = Zoom::new(&SequencerConfig::default());
        assert_eq!(zoom.actual(), 10.0);
        zoom.set_target(20.0);
        zoom.step();
        assert!((zoom.actual() - 13.3).abs() < 1e-4);
        for _ in 0..100 {
            zoom.step();
        }
        assert!((zoom.actual() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut zoom = Zoom::new(&SequencerConfig::default());
        zoom.set_target(500.0);
        assert_eq!(zoom.target(), 50.0);
        zoom.set_immediate(0.001);
        assert_eq!(zoom.actual(), 0.1);
        assert_eq!(zoom.target(), 0.1);
    }

    #[test]
    fn test_zoom_from_inverted_limits() {
        let config = SequencerConfig {
            min_pixels_per_frame: 60.0,
            initial_pixels_per_frame: f32::NAN,
            ..SequencerConfig::default()
        };
        let mut zoom = Zoom::new(&config);
        assert_eq!(zoom.actual(), 0.1);
        zoom.set_immediate(1000.0);
        assert_eq!(zoom.actual(), 50.0);
    }

    #[test]
    fn test_visible_frame_count_uses_actual() {
        let mut zoom = Zoom::new(&SequencerConfig::default());
        zoom.set_target(20.0);
        assert_eq!(zoom.visible_frame_count(1000.0), 100);
        zoom.set_immediate(20.0);
        assert_eq!(zoom.visible_frame_count(1000.0), 50);
    }

    #[test]
    fn test_tick_spacing_doubles() {
        let spacing = TickSpacing::for_zoom(10.0, 10, 150.0);
        assert_eq!(spacing, TickSpacing { major: 20, step: 2 });
        for &ppf in &[0.1_f32, 1.0, 4.2, 15.0, 50.0] {
            let spacing = TickSpacing::for_zoom(ppf, 10, 150.0);
            assert!(spacing.major as f32 * ppf >= 150.0);
        }
    }

    #[test]
    fn test_tick_kind() {
        let bounds = FrameBounds::new(0, 95);
        let spacing = TickSpacing { major: 20, step: 2 };
        assert_eq!(spacing.kind(40, bounds), TickKind::Major);
        assert_eq!(spacing.kind(30, bounds), TickKind::Half);
        assert_eq!(spacing.kind(32, bounds), TickKind::Minor);
        assert_eq!(spacing.kind(95, bounds), TickKind::Major);
    }
}
