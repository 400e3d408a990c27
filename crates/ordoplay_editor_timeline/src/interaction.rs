// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer interaction state machine.
//!
//! One mode is active at a time. A mode is only entered from
//! [`Interaction::Idle`], and only releasing the button that started it
//! leaves it. Per tick, in order:
//! 1. zoom smoothing and the fits-on-screen rule
//! 2. Alt + middle button panning
//! 3. playhead scrubbing in the header
//! 4. item edge/body hit test and drag
//! 5. scrollbar thumb drag and resize
//! 6. wheel zoom (over the scrollbar) and wheel pan
//! 7. final clamp of the first visible frame

use crate::config::SequencerConfig;
use crate::coords::{Frame, FrameBounds, FrameMapping, Zoom};
use crate::input::SequencerInput;
use crate::layout::{EdgeMask, ScrollbarThumb, SequencerLayout};
use crate::options::SequencerOptions;
use crate::selection::EditSession;
use crate::sequencer::SequencerView;
use crate::store::{SequenceProvider, FRAME_MAX_MARGIN};

const EPSILON: f32 = f32::EPSILON;

/// Active pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// Nothing in progress
    #[default]
    Idle,
    /// Dragging the playhead in the header
    ScrubbingCursor,
    /// Alt + middle button pan
    PanningView {
        /// Pointer x when the pan started
        anchor_x: f32,
        /// First visible frame when the pan started
        anchor_first_frame: Frame,
    },
    /// Moving or resizing an item
    DraggingItem {
        /// Row being edited
        index: usize,
        /// Pointer x the next frame delta is measured from
        anchor_x: f32,
        /// Which ends move
        mask: EdgeMask,
        /// Frames moved so far
        net_frames: Frame,
    },
    /// Dragging the scrollbar thumb
    DraggingScrollbarThumb {
        /// Pointer x when the drag started
        anchor_x: f32,
        /// First visible frame when the drag started
        anchor_first_frame: Frame,
    },
    /// Dragging the thumb's left resize handle
    ResizingScrollbarLeft,
    /// Dragging the thumb's right resize handle
    ResizingScrollbarRight,
}

/// Interaction state kept between ticks
#[derive(Debug, Clone)]
pub struct InteractionState {
    mode: Interaction,
    zoom: Zoom,
    edit: EditSession,
}

impl InteractionState {
    /// Create an idle state with the configured zoom
    pub fn new(config: &SequencerConfig) -> Self {
        Self {
            mode: Interaction::Idle,
            zoom: Zoom::new(config),
            edit: EditSession::default(),
        }
    }

    /// Active mode
    pub fn mode(&self) -> Interaction {
        self.mode
    }

    /// Whether no interaction is in progress
    pub fn is_idle(&self) -> bool {
        self.mode == Interaction::Idle
    }

    /// Zoom state
    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    /// Mutable zoom state
    pub fn zoom_mut(&mut self) -> &mut Zoom {
        &mut self.zoom
    }

    /// Open edit bracket
    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    /// Row being dragged, if any
    pub fn dragged_item(&self) -> Option<usize> {
        match self.mode {
            Interaction::DraggingItem { index, .. } => Some(index),
            _ => None,
        }
    }

    fn set_mode(&mut self, mode: Interaction) {
        if self.mode != mode {
            tracing::debug!("Sequencer interaction {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Run one tick of interaction. Returns `true` when a drag release
    /// resolved into a pure selection.
    pub fn update(
        &mut self,
        provider: &mut dyn SequenceProvider,
        view: &mut SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
        options: SequencerOptions,
        config: &SequencerConfig,
    ) -> bool {
        self.zoom.step();
        let bounds = provider.bounds();
        let visible = self.zoom.visible_frame_count(layout.track_width);
        if bounds.fits(visible) {
            view.first_frame = bounds.min;
        }
        tracing::trace!(
            "Sequencer tick: first {} visible {} ppf {:.3}",
            view.first_frame,
            visible,
            self.zoom.actual()
        );

        self.update_pan(view, layout, input, bounds, visible);
        self.update_scrub(view, layout, input, options, bounds);
        let changed = self.update_item_drag(provider, view, layout, input, options, config);
        self.update_scrollbar(view, layout, input, provider.bounds(), visible, config);
        self.update_wheel(view, layout, input, provider.bounds(), visible, config);

        let bounds = provider.bounds();
        let visible = self.zoom.visible_frame_count(layout.track_width);
        view.first_frame = bounds.clamp_first_frame(view.first_frame, visible);
        view.last_frame = view.first_frame + visible;
        changed
    }

    fn update_pan(
        &mut self,
        view: &mut SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
        bounds: FrameBounds,
        visible: Frame,
    ) {
        match self.mode {
            Interaction::Idle if input.alt && input.middle_down && input.over(layout.canvas) => {
                if let Some(x) = input.x() {
                    self.set_mode(Interaction::PanningView {
                        anchor_x: x,
                        anchor_first_frame: view.first_frame,
                    });
                }
            }
            Interaction::PanningView {
                anchor_x,
                anchor_first_frame,
            } => {
                if !input.middle_down {
                    self.set_mode(Interaction::Idle);
                } else if let Some(x) = input.x() {
                    let delta = ((x - anchor_x) / self.zoom.actual()).round() as Frame;
                    view.first_frame =
                        bounds.clamp_first_frame(anchor_first_frame - delta, visible);
                }
            }
            _ => {}
        }
    }

    fn update_scrub(
        &mut self,
        view: &mut SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
        options: SequencerOptions,
        bounds: FrameBounds,
    ) {
        if self.is_idle()
            && !layout.collapsed
            && options.contains(SequencerOptions::CHANGE_FRAME)
            && view.current_frame.is_some_and(|frame| frame >= 0)
            && input.primary_pressed
            && input.over(layout.cursor_strip)
        {
            self.set_mode(Interaction::ScrubbingCursor);
        }

        if self.mode == Interaction::ScrubbingCursor {
            if let Some(x) = input.x() {
                let mapping = layout.mapping(view.first_frame, self.zoom.actual());
                view.current_frame = Some(bounds.clamp(mapping.frame_cell_at(x)));
            }
            if !input.primary_down {
                self.set_mode(Interaction::Idle);
            }
        }
    }

    fn update_item_drag(
        &mut self,
        provider: &mut dyn SequenceProvider,
        view: &mut SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
        options: SequencerOptions,
        config: &SequencerConfig,
    ) -> bool {
        let mapping = layout.mapping(view.first_frame, self.zoom.actual());

        if self.is_idle()
            && options.contains(SequencerOptions::EDIT_STARTEND)
            && input.primary_pressed
            && input.over(layout.content_frame)
        {
            self.try_grab_item(provider, layout, &mapping, input, config);
        }

        let Interaction::DraggingItem {
            index,
            anchor_x,
            mask,
            net_frames,
        } = self.mode
        else {
            return false;
        };

        if index >= provider.item_count() {
            tracing::warn!("Dragged row {index} vanished from the store");
            self.finish_edit(provider);
            self.set_mode(Interaction::Idle);
            return false;
        }

        let mut anchor_x = anchor_x;
        let mut net_frames = net_frames;
        if let Some(x) = input.x() {
            let diff = mapping.frames_for_pixels(x - anchor_x);
            if diff != 0 {
                let mut range = provider.get(index);
                let (start, end) =
                    drag_range(range.start, range.end, diff, mask, provider.frame_min());
                if end > provider.frame_max() {
                    provider.set_frame_max(end + FRAME_MAX_MARGIN);
                    tracing::debug!("Sequence grew to frame {}", provider.frame_max());
                }
                range.start = start;
                range.end = end;
                provider.set(index, range);
                view.selected.select(index);
                anchor_x += mapping.pixels_for_frames(diff);
                net_frames += diff;
            }
        }

        if !input.primary_down {
            let mut changed = false;
            if net_frames == 0 && mask.bits() != 0 {
                view.selected.select(index);
                changed = true;
            }
            self.finish_edit(provider);
            self.set_mode(Interaction::Idle);
            return changed;
        }

        self.mode = Interaction::DraggingItem {
            index,
            anchor_x,
            mask,
            net_frames,
        };
        false
    }

    fn try_grab_item(
        &mut self,
        provider: &mut dyn SequenceProvider,
        layout: &SequencerLayout,
        mapping: &FrameMapping,
        input: &SequencerInput,
        config: &SequencerConfig,
    ) {
        let Some(pos) = input.pointer else {
            return;
        };
        if pos.x < layout.origin_x {
            return;
        }

        // Last row is drawn last, so it wins overlapping hit zones
        let count = provider.item_count().min(layout.rows.len());
        for index in (0..count).rev() {
            let range = provider.get(index);
            let Some(bar) = layout.item_bar(index, mapping, range.start, range.end, config) else {
                continue;
            };
            let Some(mask) = bar.hit(pos) else {
                continue;
            };
            if let Err(e) = self.edit.begin(index) {
                tracing::warn!("Item drag refused: {e}");
                return;
            }
            provider.begin_edit(index);
            self.set_mode(Interaction::DraggingItem {
                index,
                anchor_x: pos.x,
                mask,
                net_frames: 0,
            });
            return;
        }
    }

    fn finish_edit(&mut self, provider: &mut dyn SequenceProvider) {
        if self.edit.end().is_some() {
            provider.end_edit();
        }
    }

    fn update_scrollbar(
        &mut self,
        view: &mut SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
        bounds: FrameBounds,
        visible: Frame,
        config: &SequencerConfig,
    ) {
        let scrollbar_mode = matches!(
            self.mode,
            Interaction::ResizingScrollbarLeft
                | Interaction::ResizingScrollbarRight
                | Interaction::DraggingScrollbarThumb { .. }
        );
        if scrollbar_mode && !input.primary_down {
            self.set_mode(Interaction::Idle);
            return;
        }
        if layout.collapsed {
            return;
        }

        let thumb = ScrollbarThumb::compute(
            layout.scrollbar_track,
            bounds,
            view.first_frame,
            visible,
            config,
        );
        let track_width = layout.track_width;
        let bar_width = thumb.thumb.width();
        let dx = input.pointer_delta.x;

        match self.mode {
            Interaction::ResizingScrollbarRight => {
                if dx.abs() > EPSILON && bar_width > 0.0 {
                    let new_width = (bar_width + dx).max(config.min_thumb_width);
                    self.zoom.set_immediate(self.zoom.actual() * bar_width / new_width);
                    let new_visible = self.zoom.visible_frame_count(track_width);
                    if view.first_frame + new_visible > bounds.max {
                        let span = (bounds.max - view.first_frame).max(1);
                        self.zoom.set_immediate(track_width / span as f32);
                    }
                }
            }
            Interaction::ResizingScrollbarLeft => {
                if dx.abs() > EPSILON && bar_width > 0.0 {
                    let new_width = (bar_width - dx).max(config.min_thumb_width);
                    let previous = self.zoom;
                    self.zoom.set_immediate(self.zoom.actual() * bar_width / new_width);
                    let new_visible = self.zoom.visible_frame_count(track_width);
                    // Keep the last visible frame where it is
                    let new_first = bounds.clamp_first_frame(
                        view.first_frame - (new_visible - visible),
                        visible,
                    );
                    if new_first == view.first_frame {
                        self.zoom = previous;
                    } else {
                        view.first_frame = new_first;
                    }
                }
            }
            Interaction::DraggingScrollbarThumb {
                anchor_x,
                anchor_first_frame,
            } => {
                if let Some(x) = input.x() {
                    let bar_ppf = thumb.pixels_per_frame(visible);
                    let delta = ((x - anchor_x) / bar_ppf) as Frame;
                    view.first_frame =
                        bounds.clamp_first_frame(anchor_first_frame + delta, visible);
                }
            }
            Interaction::Idle if input.primary_pressed => {
                if input.over(thumb.right_handle) {
                    self.set_mode(Interaction::ResizingScrollbarRight);
                } else if input.over(thumb.left_handle) {
                    self.set_mode(Interaction::ResizingScrollbarLeft);
                } else if input.over(thumb.thumb) {
                    if let Some(x) = input.x() {
                        self.set_mode(Interaction::DraggingScrollbarThumb {
                            anchor_x: x,
                            anchor_first_frame: view.first_frame,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    fn update_wheel(
        &mut self,
        view: &mut SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
        bounds: FrameBounds,
        visible: Frame,
        config: &SequencerConfig,
    ) {
        if !self.is_idle() || !input.over(layout.canvas) {
            return;
        }

        if !layout.collapsed && input.over(layout.scrollbar) {
            let (Some(x), true) = (input.x(), input.wheel.y.abs() > EPSILON) else {
                return;
            };
            let zoom_in = input.wheel.y > 0.0;
            if !zoom_in && bounds.fits(visible) {
                return;
            }
            let track_width = layout.track_width.max(1.0);
            let pointer_fraction = (x - layout.origin_x) / track_width;
            let frame_under_pointer =
                view.first_frame + (visible as f32 * pointer_fraction) as Frame;
            let before = self.zoom.target();
            let factor = if zoom_in {
                1.0 + config.wheel_zoom_step
            } else {
                1.0 - config.wheel_zoom_step
            };
            self.zoom.scale_target(factor);
            let scale = before / self.zoom.target();
            let offset = ((view.first_frame - frame_under_pointer) as f32 * scale).round() as Frame;
            view.first_frame = frame_under_pointer + offset;
            tracing::trace!(
                "Wheel zoom about frame {} -> ppf {:.3}",
                frame_under_pointer,
                self.zoom.target(),
            );
        } else if input.wheel.x.abs() > EPSILON {
            let step = visible / 4;
            let delta = if input.wheel.x > 0.0 { step } else { -step };
            view.first_frame = bounds.clamp_first_frame(view.first_frame + delta, visible);
        }
    }
}

/// Apply a frame delta to an item range per edge mask.
///
/// The start never drops below `frame_min` (a body drag keeps its length)
/// and a single moving edge never crosses the fixed one.
pub fn drag_range(
    start: Frame,
    end: Frame,
    diff: Frame,
    mask: EdgeMask,
    frame_min: Frame,
) -> (Frame, Frame) {
    let mut left = start;
    let mut right = end;
    if mask.moves_start() {
        left += diff;
    }
    if mask.moves_end() {
        right += diff;
    }
    if left < frame_min {
        if mask.moves_end() {
            right += frame_min - left;
        }
        left = frame_min;
    }
    if mask.moves_start() && left > right {
        left = right;
    }
    if mask.moves_end() && right < left {
        right = left;
    }
    (left, right)
}
