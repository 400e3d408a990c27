// SPDX-License-Identifier: MIT OR Apache-2.0
//! The sequencer widget.
//!
//! [`Sequencer`] owns everything that persists between ticks (config,
//! zoom, the active interaction). The host owns the item store and a
//! [`SequencerView`] with the playhead, selection and visible window.
//! Each tick the host calls [`Sequencer::update`] (or [`Sequencer::show`]
//! inside egui), which runs interaction, draws, and applies deferred edits.

use crate::config::SequencerConfig;
use crate::coords::Frame;
use crate::draw::{render_timeline, CustomDrawRequest, DrawFrame};
use crate::input::SequencerInput;
use crate::interaction::{Interaction, InteractionState};
use crate::item::MediaDescriptor;
use crate::layout::SequencerLayout;
use crate::options::SequencerOptions;
use crate::render::{PainterSurface, Surface};
use crate::selection::Selection;
use crate::store::{SequenceProvider, FRAME_MAX_MARGIN};
use egui::{Rect, Sense, Vec2};

/// Host-owned widget state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerView {
    /// Playhead frame, `None` hides the playhead and disables scrubbing
    pub current_frame: Option<Frame>,
    /// Rows shown; `false` shows the single collapsed row
    pub expanded: bool,
    /// Selected row
    pub selected: Selection,
    /// First visible frame
    pub first_frame: Frame,
    /// Last visible frame, written back every tick
    pub last_frame: Frame,
}

impl SequencerView {
    /// Expanded view with the playhead at `current_frame`
    pub fn new(current_frame: Option<Frame>) -> Self {
        Self {
            current_frame,
            expanded: true,
            selected: Selection::NONE,
            first_frame: 0,
            last_frame: 0,
        }
    }
}

impl Default for SequencerView {
    fn default() -> Self {
        Self::new(Some(0))
    }
}

/// Legend edits applied after drawing so the rows stay stable for the tick
#[derive(Debug, Clone, Copy, Default)]
struct DeferredEdits {
    delete: Option<usize>,
    duplicate: Option<usize>,
}

/// Timeline sequencer widget
#[derive(Debug, Clone)]
pub struct Sequencer {
    config: SequencerConfig,
    state: InteractionState,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}

impl Sequencer {
    /// Create a widget with the given config
    pub fn new(config: SequencerConfig) -> Self {
        let state = InteractionState::new(&config);
        Self { config, state }
    }

    /// Active config
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Active interaction
    pub fn interaction(&self) -> Interaction {
        self.state.mode()
    }

    /// Current zoom in pixels per frame
    pub fn pixels_per_frame(&self) -> f32 {
        self.state.zoom().actual()
    }

    /// Jump to a zoom level without smoothing
    pub fn set_pixels_per_frame(&mut self, pixels_per_frame: f32) {
        self.state.zoom_mut().set_immediate(pixels_per_frame);
    }

    /// Whether the widget still animates without input
    pub fn is_animating(&self) -> bool {
        !self.state.is_idle() || !self.state.zoom().is_settled()
    }

    fn layout(
        &self,
        provider: &dyn SequenceProvider,
        view: &SequencerView,
        canvas: Rect,
    ) -> SequencerLayout {
        let extras: Vec<f32> = (0..provider.item_count())
            .map(|index| provider.custom_height(index))
            .collect();
        SequencerLayout::compute(canvas, &self.config, &extras, view.expanded)
    }

    /// Run one tick: interaction, drawing onto `surface`, custom draw
    /// dispatch, then deferred deletes and duplicates.
    ///
    /// Returns `true` exactly when a drag release resolved into a pure
    /// selection of the dragged item.
    pub fn update(
        &mut self,
        provider: &mut dyn SequenceProvider,
        view: &mut SequencerView,
        options: SequencerOptions,
        input: &SequencerInput,
        canvas: Rect,
        surface: &mut dyn Surface,
    ) -> bool {
        let was_idle = self.state.is_idle();
        if view.selected.get().is_some_and(|index| index >= provider.item_count()) {
            tracing::debug!("Selection {:?} past the last row, cleared", view.selected.get());
            view.selected.clear();
        }

        let mut layout = self.layout(provider, view, canvas);
        if let Some(descriptor) = &input.dropped {
            if self.accept_drop(provider, view, &layout, input, descriptor) {
                layout = self.layout(provider, view, canvas);
            }
        }

        let changed = self
            .state
            .update(provider, view, &layout, input, options, &self.config);

        let mut deferred = DeferredEdits::default();
        if was_idle && input.primary_released {
            deferred = self.handle_clicks(provider, view, &layout, input, options);
        }
        if input.primary_double_clicked {
            self.handle_double_click(provider, view, &layout, input);
        }

        let frame = DrawFrame {
            layout: &layout,
            config: &self.config,
            view: &*view,
            options,
            pixels_per_frame: self.state.zoom().actual(),
            pointer: input.pointer,
            interaction: self.state.mode(),
        };
        let requests = render_timeline(surface, &*provider, &frame);
        for request in requests {
            match request {
                CustomDrawRequest::Expanded { index, region } => {
                    provider.custom_draw(index, surface, &region);
                }
                CustomDrawRequest::Compact { index, region } => {
                    provider.custom_draw_compact(index, surface, &region);
                }
            }
        }

        if let Some(index) = deferred.delete {
            provider.del(index);
            view.selected.on_removed(index, provider.item_count());
            tracing::debug!("Deleted row {index}, selection now {:?}", view.selected.get());
        }
        if let Some(index) = deferred.duplicate {
            provider.duplicate(index);
        }

        changed
    }

    fn accept_drop(
        &self,
        provider: &mut dyn SequenceProvider,
        view: &SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
        descriptor: &MediaDescriptor,
    ) -> bool {
        if !input.over(layout.content_frame) {
            return false;
        }

        let (start, end) = if layout.collapsed {
            (descriptor.start, descriptor.end)
        } else {
            let start = match view.current_frame {
                Some(frame) if frame >= view.first_frame && frame <= provider.frame_max() => frame,
                _ => view.first_frame,
            };
            (start, start + descriptor.length())
        };

        if !provider.insert_from_external(descriptor, start, end) {
            tracing::debug!("Provider refused dropped media '{}'", descriptor.name);
            return false;
        }
        if end > provider.frame_max() {
            provider.set_frame_max(end + FRAME_MAX_MARGIN);
        }
        tracing::debug!("Dropped '{}' at {start}..={end}", descriptor.name);
        true
    }

    fn handle_clicks(
        &self,
        provider: &mut dyn SequenceProvider,
        view: &mut SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
        options: SequencerOptions,
    ) -> DeferredEdits {
        let mut deferred = DeferredEdits::default();

        if input.over(layout.expand_button(&self.config)) {
            view.expanded = !view.expanded;
            tracing::debug!("Sequencer expanded: {}", view.expanded);
            return deferred;
        }
        if layout.collapsed {
            return deferred;
        }

        if options.contains(SequencerOptions::COPYPASTE) {
            if input.over(layout.clipboard_button(false, &self.config)) {
                provider.copy();
                return deferred;
            }
            if input.over(layout.clipboard_button(true, &self.config)) {
                provider.paste();
                return deferred;
            }
        }

        for index in 0..layout.rows.len() {
            if options.contains(SequencerOptions::DEL)
                && layout
                    .legend_button(index, 0, &self.config)
                    .is_some_and(|rect| input.over(rect))
            {
                deferred.delete = Some(index);
                break;
            }
            if options.contains(SequencerOptions::ADD)
                && layout
                    .legend_button(index, 1, &self.config)
                    .is_some_and(|rect| input.over(rect))
            {
                deferred.duplicate = Some(index);
                break;
            }
        }
        deferred
    }

    fn handle_double_click(
        &self,
        provider: &mut dyn SequenceProvider,
        view: &SequencerView,
        layout: &SequencerLayout,
        input: &SequencerInput,
    ) {
        let Some(pos) = input.pointer else {
            return;
        };
        if layout.collapsed || pos.x < layout.origin_x || !layout.content_frame.contains(pos) {
            return;
        }
        let mapping = layout.mapping(view.first_frame, self.state.zoom().actual());
        let count = provider.item_count().min(layout.rows.len());
        let hit = (0..count).rev().find(|&index| {
            let range = provider.get(index);
            layout
                .item_bar(index, &mapping, range.start, range.end, &self.config)
                .is_some_and(|bar| bar.bar.contains(pos))
        });
        if let Some(index) = hit {
            provider.double_click(index);
        }
    }

    /// Allocate the widget in `ui`, run one tick and paint it.
    ///
    /// Media dragged with a [`MediaDescriptor`] payload is inserted where it
    /// is released.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        provider: &mut dyn SequenceProvider,
        view: &mut SequencerView,
        options: SequencerOptions,
    ) -> bool {
        let available = ui.available_size();
        let collapsed = !view.expanded || provider.item_count() == 0;
        let height = if collapsed {
            self.config.item_height
        } else {
            available.y.max(self.config.header_height + self.config.item_height * 2.0)
        };
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(available.x, height), Sense::click_and_drag());

        let mut input = ui.input(SequencerInput::from_egui);
        input.dropped = response
            .dnd_release_payload::<MediaDescriptor>()
            .map(|payload| (*payload).clone());

        let mut surface = PainterSurface::new(ui.painter_at(rect));
        let changed = self.update(provider, view, options, &input, rect, &mut surface);
        if self.is_animating() {
            ui.ctx().request_repaint();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::FrameBounds;
    use crate::item::{ItemRange, MediaKind, TrackItem};
    use crate::render::{CompactDrawRegion, CustomDrawRegion, DrawList};
    use crate::store::MediaSequence;
    use egui::Pos2;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(1200.0, 300.0))
    }

    fn sequence(items: &[(Frame, Frame)], frame_max: Frame) -> MediaSequence {
        let mut sequence = MediaSequence::new("Test").with_bounds(0, frame_max);
        for (i, &(start, end)) in items.iter().enumerate() {
            sequence.push(TrackItem::new(format!("item {i}"), start, end));
        }
        sequence
    }

    /// Feed inputs one tick each, returning the last result
    fn run(
        sequencer: &mut Sequencer,
        provider: &mut dyn SequenceProvider,
        view: &mut SequencerView,
        options: SequencerOptions,
        inputs: &[SequencerInput],
    ) -> bool {
        let mut surface = DrawList::new();
        let mut changed = false;
        for input in inputs {
            surface.clear();
            changed = sequencer.update(provider, view, options, input, canvas(), &mut surface);
            assert_eq!(surface.clip_depth(), 0);
        }
        changed
    }

    fn click(pos: Pos2) -> [SequencerInput; 2] {
        [SequencerInput::press(pos), SequencerInput::release(pos)]
    }

    #[derive(Default)]
    struct Recorder {
        inner: MediaSequence,
        copies: usize,
        pastes: usize,
        expanded_draws: Vec<usize>,
        compact_draws: Vec<usize>,
    }

    impl SequenceProvider for Recorder {
        fn frame_min(&self) -> Frame {
            self.inner.frame_min()
        }

        fn frame_max(&self) -> Frame {
            self.inner.frame_max()
        }

        fn set_frame_max(&mut self, frame: Frame) {
            self.inner.set_frame_max(frame);
        }

        fn item_count(&self) -> usize {
            self.inner.item_count()
        }

        fn get(&self, index: usize) -> ItemRange {
            self.inner.get(index)
        }

        fn set(&mut self, index: usize, range: ItemRange) {
            self.inner.set(index, range);
        }

        fn del(&mut self, index: usize) {
            self.inner.del(index);
        }

        fn custom_height(&self, index: usize) -> f32 {
            self.inner.custom_height(index)
        }

        fn copy(&mut self) {
            self.copies += 1;
        }

        fn paste(&mut self) {
            self.pastes += 1;
        }

        fn custom_draw(
            &mut self,
            index: usize,
            surface: &mut dyn Surface,
            region: &CustomDrawRegion,
        ) {
            surface.push_clip(region.content_clip);
            surface.text(region.content.min, "custom", 1.0, egui::Color32::WHITE);
            surface.pop_clip();
            self.expanded_draws.push(index);
        }

        fn custom_draw_compact(
            &mut self,
            index: usize,
            _surface: &mut dyn Surface,
            _region: &CompactDrawRegion,
        ) {
            self.compact_draws.push(index);
        }
    }

    #[test]
    fn test_right_edge_drag_scenario() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10), (5, 20)], 100);
        let mut view = SequencerView::default();
        let grab = Pos2::new(305.0, 30.0);
        let target = grab + Vec2::new(150.0, 0.0);

        let changed = run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[
                SequencerInput::press(grab),
                SequencerInput::drag(target, Vec2::new(150.0, 0.0)),
                SequencerInput::release(target),
            ],
        );

        assert!(!changed);
        let range = provider.get(0);
        assert_eq!((range.start, range.end), (0, 25));
        assert_eq!(provider.frame_max(), 100);
        assert_eq!(provider.get(1).start, 5);
    }

    #[test]
    fn test_drag_past_end_grows_sequence() {
        let mut sequencer = Sequencer::default();
        sequencer.set_pixels_per_frame(5.0);
        let mut provider = sequence(&[(90, 100)], 100);
        let mut view = SequencerView::default();
        // Right handle spans x 695..705
        let grab = Pos2::new(700.0, 30.0);
        let target = grab + Vec2::new(100.0, 0.0);

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[
                SequencerInput::press(grab),
                SequencerInput::drag(target, Vec2::new(100.0, 0.0)),
                SequencerInput::release(target),
            ],
        );

        let range = provider.get(0);
        assert_eq!((range.start, range.end), (90, 120));
        assert_eq!(provider.frame_max(), 120 + FRAME_MAX_MARGIN);
    }

    #[test]
    fn test_everything_visible_pins_view() {
        let mut sequencer = Sequencer::default();
        sequencer.set_pixels_per_frame(20.0);
        let mut provider = sequence(&[(0, 10)], 40);
        let mut view = SequencerView::default();
        view.first_frame = 10;

        let pan = SequencerInput::hover(Pos2::new(600.0, 100.0)).with_wheel(Vec2::new(1.0, 0.0));
        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[pan.clone(), pan],
        );

        assert_eq!(view.first_frame, 0);
        assert_eq!(view.last_frame, 50);
    }

    #[test]
    fn test_click_without_motion_selects() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(10, 20)], 100);
        let mut view = SequencerView::default();

        let changed = run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &click(Pos2::new(350.0, 30.0)),
        );

        assert!(changed);
        assert_eq!(view.selected.get(), Some(0));
        let range = provider.get(0);
        assert_eq!((range.start, range.end), (10, 20));
    }

    #[test]
    fn test_left_edge_overshoot_collapses_item() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(10, 20)], 100);
        let mut view = SequencerView::default();
        let grab = Pos2::new(305.0, 30.0);
        let target = grab + Vec2::new(300.0, 0.0);

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[
                SequencerInput::press(grab),
                SequencerInput::drag(target, Vec2::new(300.0, 0.0)),
                SequencerInput::release(target),
            ],
        );

        let range = provider.get(0);
        assert_eq!(range.start, range.end);
        assert_eq!(range.end, 20);
    }

    #[test]
    fn test_first_frame_stays_in_bounds() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 30), (100, 180), (300, 420)], 500);
        let mut view = SequencerView::default();
        let mut surface = DrawList::new();
        let scrollbar_y = 289.0;

        let mut seed: u32 = 0x2545_f491;
        let mut next = move |limit: u32| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (seed >> 8) % limit
        };

        for _ in 0..600 {
            let pos = Pos2::new(next(1300) as f32, next(320) as f32);
            let input = match next(8) {
                0 => SequencerInput::press(pos),
                1 => SequencerInput::drag(pos, Vec2::new(next(200) as f32 - 100.0, 0.0)),
                2 => SequencerInput::release(pos),
                3 => SequencerInput::hover(Pos2::new(pos.x, scrollbar_y))
                    .with_wheel(Vec2::new(0.0, 1.0)),
                4 => SequencerInput::hover(Pos2::new(pos.x, scrollbar_y))
                    .with_wheel(Vec2::new(0.0, -1.0)),
                5 => SequencerInput::hover(pos).with_wheel(Vec2::new(next(3) as f32 - 1.0, 0.0)),
                6 => SequencerInput::press(Pos2::new(pos.x, scrollbar_y)),
                _ => {
                    let mut input = SequencerInput::hover(pos);
                    input.alt = true;
                    input.middle_down = next(2) == 0;
                    input
                }
            };
            surface.clear();
            sequencer.update(
                &mut provider,
                &mut view,
                SequencerOptions::EDIT_ALL,
                &input,
                canvas(),
                &mut surface,
            );

            let bounds: FrameBounds = provider.bounds();
            let visible = view.last_frame - view.first_frame;
            assert!(view.first_frame >= bounds.min);
            assert!(view.first_frame <= bounds.min.max(bounds.max - visible));
            assert_eq!(surface.clip_depth(), 0);
            for index in 0..provider.item_count() {
                let range = provider.get(index);
                assert!(range.start >= bounds.min && range.start <= range.end);
            }
        }
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10), (20, 30), (40, 50)], 100);
        let mut view = SequencerView::default();
        view.selected.select(1);

        // Delete button of row 1: x 172..188, y 44..60
        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &click(Pos2::new(180.0, 50.0)),
        );

        assert_eq!(provider.item_count(), 2);
        assert_eq!(provider.get(1).label, "item 2");
        assert_eq!(view.selected.get(), None);
    }

    #[test]
    fn test_delete_earlier_row_shifts_selection() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10), (20, 30), (40, 50)], 100);
        let mut view = SequencerView::default();
        view.selected.select(2);

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &click(Pos2::new(180.0, 30.0)),
        );

        assert_eq!(provider.item_count(), 2);
        assert_eq!(view.selected.get(), Some(1));
        assert_eq!(provider.get(1).label, "item 2");
    }

    #[test]
    fn test_host_removal_clears_stale_selection() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10), (20, 30), (40, 50)], 100);
        let mut view = SequencerView::default();
        view.selected.select(2);

        provider.remove(2).unwrap();
        provider.remove(1).unwrap();
        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[SequencerInput::default()],
        );

        assert_eq!(view.selected.get(), None);
    }

    #[test]
    fn test_selection_in_range_survives_tick() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10), (20, 30)], 100);
        let mut view = SequencerView::default();
        view.selected.select(1);

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[SequencerInput::default()],
        );

        assert_eq!(view.selected.get(), Some(1));
    }

    #[test]
    fn test_delete_requires_option() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10), (20, 30)], 100);
        let mut view = SequencerView::default();

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_STARTEND,
            &click(Pos2::new(180.0, 30.0)),
        );

        assert_eq!(provider.item_count(), 2);
    }

    #[test]
    fn test_duplicate_button() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10), (20, 30)], 100);
        let mut view = SequencerView::default();

        // Duplicate button of row 0: x 152..168
        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &click(Pos2::new(160.0, 30.0)),
        );

        assert_eq!(provider.item_count(), 3);
        assert_eq!(provider.get(2).label, "item 0");
        assert_ne!(provider.item(2).map(|item| item.id), provider.item(0).map(|item| item.id));
    }

    #[test]
    fn test_expand_toggle() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10)], 100);
        let mut view = SequencerView::default();

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::NONE,
            &click(Pos2::new(10.0, 10.0)),
        );
        assert!(!view.expanded);
        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::NONE,
            &click(Pos2::new(10.0, 10.0)),
        );
        assert!(view.expanded);
    }

    #[test]
    fn test_copy_paste_labels() {
        let mut sequencer = Sequencer::default();
        let mut provider = Recorder::default();
        provider.inner.push(TrackItem::new("a", 0, 10));
        let mut view = SequencerView::default();
        let options = SequencerOptions::EDIT_ALL | SequencerOptions::COPYPASTE;

        run(&mut sequencer, &mut provider, &mut view, options, &click(Pos2::new(115.0, 10.0)));
        run(&mut sequencer, &mut provider, &mut view, options, &click(Pos2::new(155.0, 10.0)));
        assert_eq!((provider.copies, provider.pastes), (1, 1));

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &click(Pos2::new(115.0, 10.0)),
        );
        assert_eq!(provider.copies, 1);
    }

    #[test]
    fn test_custom_draw_dispatch() {
        let mut sequencer = Sequencer::default();
        let mut provider = Recorder::default();
        provider.inner.push(TrackItem::new("a", 0, 10));
        let mut tall = TrackItem::new("b", 5, 15).with_extra_height(40.0);
        tall.expanded = true;
        provider.inner.push(tall);
        let mut view = SequencerView::default();

        let mut surface = DrawList::new();
        sequencer.update(
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &SequencerInput::default(),
            canvas(),
            &mut surface,
        );

        assert_eq!(provider.compact_draws, vec![0]);
        assert_eq!(provider.expanded_draws, vec![1]);
        assert_eq!(surface.texts().last(), Some("custom"));
        assert_eq!(surface.clip_depth(), 0);
    }

    #[test]
    fn test_drop_on_collapsed_row_appends() {
        let mut sequencer = Sequencer::default();
        let mut provider = MediaSequence::new("Empty");
        let mut view = SequencerView::default();
        let descriptor = MediaDescriptor::new("clip.mp4", 0, 160, MediaKind::Video);

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[SequencerInput::hover(Pos2::new(400.0, 10.0)).with_drop(descriptor)],
        );

        assert_eq!(provider.item_count(), 1);
        let range = provider.get(0);
        assert_eq!((range.start, range.end), (0, 160));
        assert_eq!(provider.frame_max(), 260);
    }

    #[test]
    fn test_drop_on_content_uses_playhead() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10)], 100);
        let mut view = SequencerView::new(Some(30));
        let descriptor = MediaDescriptor::new("music.wav", 0, 60, MediaKind::Audio);

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[SequencerInput::hover(Pos2::new(500.0, 30.0)).with_drop(descriptor.clone())],
        );
        let range = provider.get(1);
        assert_eq!((range.start, range.end), (30, 90));

        // Playhead beyond the sequence: placed at the first visible frame
        view.current_frame = Some(5000);
        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[SequencerInput::hover(Pos2::new(500.0, 30.0)).with_drop(descriptor)],
        );
        let range = provider.get(2);
        assert_eq!((range.start, range.end), (view.first_frame, view.first_frame + 60));
    }

    #[test]
    fn test_drop_outside_ignored() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10)], 100);
        let mut view = SequencerView::default();
        let descriptor = MediaDescriptor::new("clip", 0, 20, MediaKind::Image);

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[SequencerInput::hover(Pos2::new(500.0, 2000.0)).with_drop(descriptor)],
        );
        assert_eq!(provider.item_count(), 1);
    }

    #[test]
    fn test_double_click_reaches_provider() {
        let mut sequencer = Sequencer::default();
        let mut provider = MediaSequence::new("Test");
        provider.push(TrackItem::new("a", 10, 20).with_extra_height(30.0));
        let mut view = SequencerView::default();
        assert_eq!(provider.custom_height(0), 0.0);

        let pos = Pos2::new(350.0, 30.0);
        let mut double = SequencerInput::press(pos);
        double.primary_double_clicked = true;
        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &[double, SequencerInput::release(pos)],
        );

        assert_eq!(provider.custom_height(0), 30.0);
    }

    #[test]
    fn test_scrub_moves_playhead() {
        let mut sequencer = Sequencer::default();
        let mut provider = sequence(&[(0, 10)], 100);
        let mut view = SequencerView::default();

        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &click(Pos2::new(477.0, 8.0)),
        );
        assert_eq!(view.current_frame, Some(27));

        view.current_frame = None;
        run(
            &mut sequencer,
            &mut provider,
            &mut view,
            SequencerOptions::EDIT_ALL,
            &click(Pos2::new(477.0, 8.0)),
        );
        assert_eq!(view.current_frame, None);
    }
}
