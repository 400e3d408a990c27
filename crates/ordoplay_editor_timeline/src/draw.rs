// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render driver.
//!
//! Turns a [`SequencerLayout`] and the provider's items into surface
//! primitives. Custom row content is not drawn here; the driver returns a
//! [`CustomDrawRequest`] per row and the caller dispatches them to the
//! provider once the clip stack is unwound.

use crate::config::{color32, SequencerConfig};
use crate::coords::{Frame, FrameBounds, FrameMapping, TickKind, TickSpacing};
use crate::interaction::Interaction;
use crate::layout::{EdgeMask, ScrollbarThumb, SequencerLayout};
use crate::options::SequencerOptions;
use crate::render::{CompactDrawRegion, CustomDrawRegion, Surface};
use crate::sequencer::SequencerView;
use crate::store::SequenceProvider;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

/// Custom content a row asks for after the frame is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomDrawRequest {
    /// Row with extra height
    Expanded {
        /// Row index
        index: usize,
        /// Where to draw
        region: CustomDrawRegion,
    },
    /// Row without extra height
    Compact {
        /// Row index
        index: usize,
        /// Where to draw
        region: CompactDrawRegion,
    },
}

/// Everything the driver reads for one frame
#[derive(Debug, Clone, Copy)]
pub struct DrawFrame<'a> {
    /// Geometry
    pub layout: &'a SequencerLayout,
    /// Metrics and colors
    pub config: &'a SequencerConfig,
    /// Host-visible state after this tick's interaction
    pub view: &'a SequencerView,
    /// Enabled features
    pub options: SequencerOptions,
    /// Zoom this tick
    pub pixels_per_frame: f32,
    /// Pointer position, for hover feedback
    pub pointer: Option<Pos2>,
    /// Active interaction, for hover feedback
    pub interaction: Interaction,
}

impl DrawFrame<'_> {
    fn mapping(&self) -> FrameMapping {
        self.layout.mapping(self.view.first_frame, self.pixels_per_frame)
    }

    fn hovered(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|pos| rect.contains(pos))
    }

    fn track_clip(&self, rect: Rect) -> Rect {
        Rect::from_min_max(Pos2::new(self.layout.origin_x.max(rect.min.x), rect.min.y), rect.max)
    }
}

/// Draw the whole widget and collect the custom draw requests
pub fn render_timeline(
    surface: &mut dyn Surface,
    provider: &dyn SequenceProvider,
    frame: &DrawFrame<'_>,
) -> Vec<CustomDrawRequest> {
    let layout = frame.layout;
    let colors = &frame.config.colors;
    surface.rect_filled(layout.canvas, 0.0, color32(colors.background));

    if layout.collapsed {
        draw_collapsed(surface, provider, frame);
        return Vec::new();
    }

    let bounds = provider.bounds();
    let mapping = frame.mapping();

    surface.rect_filled(layout.header, 0.0, color32(colors.header));
    draw_ruler(surface, frame, &mapping, bounds);
    if frame.options.contains(SequencerOptions::COPYPASTE) {
        draw_clipboard_labels(surface, frame);
    }
    draw_sign_button(surface, frame, layout.expand_button(frame.config), false);

    surface.push_clip(layout.content_frame);
    surface.rect_filled(layout.legend, 0.0, color32(colors.legend));
    draw_rows(surface, provider, frame);
    draw_frame_lines(surface, frame, &mapping, bounds);
    if let Some(band) = frame.view.selected.get().and_then(|index| layout.row_band(index)) {
        surface.rect_filled(band, 0.0, color32(colors.selection));
    }
    surface.push_clip(frame.track_clip(layout.content_frame));
    draw_items(surface, provider, frame, &mapping);
    surface.pop_clip();
    surface.pop_clip();

    draw_cursor(surface, frame, &mapping);
    draw_scrollbar(surface, frame, bounds);

    (0..layout.rows.len())
        .filter_map(|index| {
            let row = layout.rows[index];
            if row.extra > 0.0 {
                layout
                    .custom_region(index, &mapping, bounds)
                    .map(|region| CustomDrawRequest::Expanded { index, region })
            } else {
                layout
                    .compact_region(index, &mapping, bounds)
                    .map(|region| CustomDrawRequest::Compact { index, region })
            }
        })
        .collect()
}

fn draw_collapsed(
    surface: &mut dyn Surface,
    provider: &dyn SequenceProvider,
    frame: &DrawFrame<'_>,
) {
    let layout = frame.layout;
    let row = layout.content_frame;
    surface.rect_filled(row, 0.0, color32(frame.config.colors.collapsed));
    let label = provider.collapse_label(provider.bounds().span(), provider.item_count());
    let button = layout.expand_button(frame.config);
    surface.text(
        Pos2::new(button.max.x + 8.0, row.min.y + 2.0),
        &label,
        1.0,
        color32(frame.config.colors.text),
    );
    draw_sign_button(surface, frame, button, true);
}

/// Plus (`add`) or minus sign in a small square button
fn draw_sign_button(surface: &mut dyn Surface, frame: &DrawFrame<'_>, rect: Rect, add: bool) {
    let colors = &frame.config.colors;
    let color = if frame.hovered(rect) {
        color32(colors.text)
    } else {
        color32(colors.tick_label).gamma_multiply(0.6)
    };
    let stroke = Stroke::new(1.0, color);
    surface.rect_stroke(rect, 2.0, stroke);
    let center = rect.center();
    let arm = rect.width() * 0.25;
    surface.line(center - Vec2::new(arm, 0.0), center + Vec2::new(arm, 0.0), stroke);
    if add {
        surface.line(center - Vec2::new(0.0, arm), center + Vec2::new(0.0, arm), stroke);
    }
}

fn draw_ruler(
    surface: &mut dyn Surface,
    frame: &DrawFrame<'_>,
    mapping: &FrameMapping,
    bounds: FrameBounds,
) {
    let layout = frame.layout;
    let config = frame.config;
    let colors = &config.colors;
    let spacing = TickSpacing::for_zoom(
        mapping.pixels_per_frame,
        config.base_tick_interval,
        config.tick_min_spacing,
    );
    let tick_stroke = Stroke::new(1.0, color32(colors.tick));
    let top = layout.header.min.y;
    let bottom = layout.header.max.y;

    surface.push_clip(frame.track_clip(layout.header));
    for tick in visible_ticks(frame.view, bounds, spacing.step) {
        let x = mapping.frame_to_pixel(tick);
        let kind = spacing.kind(tick, bounds);
        let tick_top = match kind {
            TickKind::Major => 4.0,
            TickKind::Half => 10.0,
            TickKind::Minor => 14.0,
        };
        surface.line(Pos2::new(x, top + tick_top), Pos2::new(x, bottom), tick_stroke);
        if kind == TickKind::Major && x >= layout.origin_x {
            surface.text(
                Pos2::new(x + 3.0, top),
                &tick.to_string(),
                1.0,
                color32(colors.tick_label),
            );
        }
    }
    surface.pop_clip();
}

/// Stepped frames inside the view, plus both sequence ends when visible
fn visible_ticks(view: &SequencerView, bounds: FrameBounds, step: Frame) -> Vec<Frame> {
    let step = step.max(1);
    let first = view.first_frame.max(bounds.min);
    let last = view.last_frame.min(bounds.max);
    let mut ticks = Vec::new();
    if first > last {
        return ticks;
    }
    let mut tick = bounds.min + ((first - bounds.min) / step) * step;
    while tick <= last {
        if tick >= first {
            ticks.push(tick);
        }
        tick += step;
    }
    if ticks.first() != Some(&bounds.min) && bounds.min >= first {
        ticks.insert(0, bounds.min);
    }
    if ticks.last() != Some(&bounds.max) && bounds.max <= last {
        ticks.push(bounds.max);
    }
    ticks
}

fn draw_clipboard_labels(surface: &mut dyn Surface, frame: &DrawFrame<'_>) {
    let colors = &frame.config.colors;
    for (paste, label) in [(false, "Copy"), (true, "Paste")] {
        let rect = frame.layout.clipboard_button(paste, frame.config);
        let fill = if frame.hovered(rect) {
            colors.clipboard_label_hovered
        } else {
            colors.clipboard_label
        };
        surface.rect_filled(rect, 0.0, color32(fill));
        surface.text(rect.min + Vec2::new(2.0, 0.0), label, 1.0, color32(colors.text));
    }
}

fn draw_rows(surface: &mut dyn Surface, provider: &dyn SequenceProvider, frame: &DrawFrame<'_>) {
    let layout = frame.layout;
    let config = frame.config;
    let colors = &config.colors;
    let dragging = matches!(frame.interaction, Interaction::DraggingItem { .. });
    let hovered_row = frame
        .pointer
        .filter(|pos| layout.content_frame.contains(*pos))
        .and_then(|pos| layout.row_at(pos.y));

    for index in 0..layout.rows.len() {
        let Some(background) = layout.row_background(index) else {
            continue;
        };
        let fill = if index % 2 == 0 { colors.row_even } else { colors.row_odd };
        surface.rect_filled(background, 0.0, color32(fill));

        if !dragging && hovered_row == Some(index) {
            let row = layout.rows[index];
            let highlight = Rect::from_min_max(
                Pos2::new(layout.canvas.min.x, row.top),
                Pos2::new(layout.canvas.max.x, row.bottom()),
            );
            surface.rect_filled(highlight, 0.0, color32(colors.row_hovered));
        }

        let label = provider.get(index).label;
        if let Some(pos) = layout.label_pos(index) {
            surface.text(pos, &label, 1.0, color32(colors.text));
        }
        if frame.options.contains(SequencerOptions::DEL) {
            if let Some(rect) = layout.legend_button(index, 0, config) {
                draw_sign_button(surface, frame, rect, false);
            }
        }
        if frame.options.contains(SequencerOptions::ADD) {
            if let Some(rect) = layout.legend_button(index, 1, config) {
                draw_sign_button(surface, frame, rect, true);
            }
        }
    }
}

fn draw_frame_lines(
    surface: &mut dyn Surface,
    frame: &DrawFrame<'_>,
    mapping: &FrameMapping,
    bounds: FrameBounds,
) {
    let layout = frame.layout;
    let config = frame.config;
    let spacing = TickSpacing::for_zoom(
        mapping.pixels_per_frame,
        config.base_tick_interval,
        config.tick_min_spacing,
    );
    let stroke = Stroke::new(1.0, color32(config.colors.tick_faint));
    let (top, bottom) = (layout.content.min.y, layout.content.max.y);

    surface.push_clip(frame.track_clip(layout.content_frame));
    for tick in visible_ticks(frame.view, bounds, spacing.step) {
        let x = mapping.frame_to_pixel(tick);
        surface.line(Pos2::new(x, top), Pos2::new(x, bottom), stroke);
    }
    surface.pop_clip();
}

fn draw_items(
    surface: &mut dyn Surface,
    provider: &dyn SequenceProvider,
    frame: &DrawFrame<'_>,
    mapping: &FrameMapping,
) {
    let layout = frame.layout;
    let config = frame.config;
    let left = layout.origin_x;
    let right = layout.canvas.max.x;

    for index in 0..layout.rows.len() {
        let range = provider.get(index);
        let Some(bar) = layout.item_bar(index, mapping, range.start, range.end, config) else {
            continue;
        };
        if !bar.overlaps_x(left, right) {
            continue;
        }
        let [r, g, b, _] = range.color;
        surface.rect_filled(bar.bar, 2.0, Color32::from_rgb(r, g, b));
        if bar.extended.height() > bar.bar.height() {
            let extra =
                Rect::from_min_max(Pos2::new(bar.bar.min.x, bar.bar.max.y), bar.extended.max);
            surface.rect_filled(extra, 0.0, Color32::from_rgba_unmultiplied(r, g, b, 64));
        }

        let active = match frame.interaction {
            Interaction::Idle => frame.pointer.and_then(|pos| bar.hit(pos)),
            Interaction::DraggingItem { index: dragged, mask, .. } if dragged == index => {
                Some(mask)
            }
            _ => None,
        };
        match active {
            Some(EdgeMask::Body) => {
                let lighter = Color32::from_rgb(
                    r.saturating_add(32),
                    g.saturating_add(32),
                    b.saturating_add(32),
                );
                surface.rect_filled(bar.bar, 2.0, lighter);
            }
            Some(mask) => {
                surface.rect_filled(bar.zone(mask), 2.0, color32(config.colors.item_handle));
            }
            None => {}
        }
    }
}

fn draw_cursor(surface: &mut dyn Surface, frame: &DrawFrame<'_>, mapping: &FrameMapping) {
    let view = frame.view;
    let Some(current) = view.current_frame else {
        return;
    };
    if current < view.first_frame || current > view.last_frame {
        return;
    }
    let layout = frame.layout;
    let config = frame.config;
    let colors = &config.colors;
    let x = mapping.frame_to_pixel(current) + mapping.pixels_per_frame * 0.5;

    surface.push_clip(frame.track_clip(layout.canvas));
    surface.line(
        Pos2::new(x, layout.header.min.y),
        Pos2::new(x, layout.content_frame.max.y),
        Stroke::new(config.cursor_width, color32(colors.cursor_line)),
    );
    let arrow = surface.font_size();
    surface.arrow_down(
        Pos2::new(x - arrow * 0.5, layout.header.min.y),
        arrow,
        color32(colors.cursor),
    );

    let label = current.to_string();
    let size = surface.text_size(&label, config.cursor_label_scale);
    let label_rect = Rect::from_min_size(
        Pos2::new(x + arrow * 0.5 + 2.0, layout.header.min.y + 2.0),
        size + Vec2::new(4.0, 2.0),
    );
    surface.rect_filled(label_rect, 2.0, color32(colors.cursor_label_bg));
    surface.text(
        label_rect.min + Vec2::new(2.0, 1.0),
        &label,
        config.cursor_label_scale,
        color32(colors.cursor),
    );
    surface.pop_clip();
}

fn draw_scrollbar(surface: &mut dyn Surface, frame: &DrawFrame<'_>, bounds: FrameBounds) {
    let layout = frame.layout;
    let config = frame.config;
    let colors = &config.colors;
    let visible = frame.view.last_frame - frame.view.first_frame;
    let thumb = ScrollbarThumb::compute(
        layout.scrollbar_track,
        bounds,
        frame.view.first_frame,
        visible,
        config,
    );

    surface.rect_filled(layout.scrollbar, 0.0, color32(colors.legend));
    surface.rect_filled(layout.scrollbar_track, 0.0, color32(colors.scrollbar_track));

    let thumb_active = matches!(frame.interaction, Interaction::DraggingScrollbarThumb { .. })
        || (frame.interaction == Interaction::Idle && frame.hovered(thumb.thumb));
    let thumb_fill = if thumb_active {
        colors.scrollbar_thumb_active
    } else {
        colors.scrollbar_thumb
    };
    surface.rect_filled(thumb.thumb, 6.0, color32(thumb_fill));

    for (handle, resizing) in [
        (thumb.left_handle, Interaction::ResizingScrollbarLeft),
        (thumb.right_handle, Interaction::ResizingScrollbarRight),
    ] {
        let active = frame.interaction == resizing
            || (frame.interaction == Interaction::Idle && frame.hovered(handle));
        let fill = if active {
            colors.scrollbar_handle_active
        } else {
            colors.scrollbar_handle
        };
        surface.rect_filled(handle, 6.0, color32(fill));
    }
}
