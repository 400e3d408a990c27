// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-tick input snapshot.
//!
//! The widget polls this once per tick; there are no input events.

use crate::item::MediaDescriptor;
use egui::{InputState, PointerButton, Pos2, Rect, Vec2};

/// Pointer, wheel and modifier state for one tick
#[derive(Debug, Clone, Default)]
pub struct SequencerInput {
    /// Pointer position, `None` when outside the window
    pub pointer: Option<Pos2>,
    /// Pointer movement since the previous tick
    pub pointer_delta: Vec2,
    /// Primary button held
    pub primary_down: bool,
    /// Primary button went down this tick
    pub primary_pressed: bool,
    /// Primary button went up this tick
    pub primary_released: bool,
    /// Primary button double-clicked this tick
    pub primary_double_clicked: bool,
    /// Middle button held
    pub middle_down: bool,
    /// Wheel: `x > 0` pans toward later frames, `y > 0` zooms in
    pub wheel: Vec2,
    /// Alt held
    pub alt: bool,
    /// Media released over the widget this tick
    pub dropped: Option<MediaDescriptor>,
}

impl SequencerInput {
    /// Snapshot egui's input state
    pub fn from_egui(input: &InputState) -> Self {
        let pointer = &input.pointer;
        let raw = input.raw_scroll_delta;
        Self {
            pointer: pointer.latest_pos(),
            pointer_delta: pointer.delta(),
            primary_down: pointer.primary_down(),
            primary_pressed: pointer.primary_pressed(),
            primary_released: pointer.primary_released(),
            primary_double_clicked: pointer.button_double_clicked(PointerButton::Primary),
            middle_down: pointer.middle_down(),
            wheel: Vec2::new(-raw.x, raw.y),
            alt: input.modifiers.alt,
            dropped: None,
        }
    }

    /// Pointer resting at `pos`, no buttons
    pub fn hover(pos: Pos2) -> Self {
        Self {
            pointer: Some(pos),
            ..Self::default()
        }
    }

    /// Primary button pressed at `pos`
    pub fn press(pos: Pos2) -> Self {
        Self {
            primary_down: true,
            primary_pressed: true,
            ..Self::hover(pos)
        }
    }

    /// Primary button held while the pointer moved by `delta` to `pos`
    pub fn drag(pos: Pos2, delta: Vec2) -> Self {
        Self {
            primary_down: true,
            pointer_delta: delta,
            ..Self::hover(pos)
        }
    }

    /// Primary button released at `pos`
    pub fn release(pos: Pos2) -> Self {
        Self {
            primary_released: true,
            ..Self::hover(pos)
        }
    }

    /// Builder: wheel movement
    pub fn with_wheel(mut self, wheel: Vec2) -> Self {
        self.wheel = wheel;
        self
    }

    /// Builder: dropped media
    pub fn with_drop(mut self, descriptor: MediaDescriptor) -> Self {
        self.dropped = Some(descriptor);
        self
    }

    /// Whether the pointer is inside `rect`
    pub fn over(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|pos| rect.contains(pos))
    }

    /// Pointer x, if the pointer is known
    pub fn x(&self) -> Option<f32> {
        self.pointer.map(|pos| pos.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        let pos = Pos2::new(10.0, 20.0);
        let press = SequencerInput::press(pos);
        assert!(press.primary_down && press.primary_pressed);
        let release = SequencerInput::release(pos);
        assert!(!release.primary_down && release.primary_released);
        let drag = SequencerInput::drag(pos, Vec2::new(3.0, 0.0));
        assert_eq!(drag.pointer_delta.x, 3.0);
        assert_eq!(drag.x(), Some(10.0));
    }

    #[test]
    fn test_over_without_pointer() {
        let rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(100.0, 100.0));
        assert!(!SequencerInput::default().over(rect));
        assert!(SequencerInput::hover(Pos2::new(5.0, 5.0)).over(rect));
    }
}
