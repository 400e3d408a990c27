// SPDX-License-Identifier: MIT OR Apache-2.0
//! Passive drawing surface.
//!
//! The widget only ever issues primitives through [`Surface`]. Two
//! implementations ship with the crate:
//! - [`PainterSurface`] paints through an `egui::Painter`
//! - [`DrawList`] records the primitives, for tests and headless hosts

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

/// Base font size at scale 1.0
pub const BASE_FONT_SIZE: f32 = 13.0;

/// Drawing primitives consumed by the widget
pub trait Surface {
    /// Filled rectangle
    fn rect_filled(&mut self, rect: Rect, rounding: f32, color: Color32);

    /// Rectangle outline
    fn rect_stroke(&mut self, rect: Rect, rounding: f32, stroke: Stroke);

    /// Line segment
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    /// Left-top anchored text
    fn text(&mut self, pos: Pos2, text: &str, scale: f32, color: Color32);

    /// Downward triangle whose top edge starts at `pos`
    fn arrow_down(&mut self, pos: Pos2, size: f32, color: Color32);

    /// Intersect the clip region with `rect` until the matching `pop_clip`
    fn push_clip(&mut self, rect: Rect);

    /// Restore the previous clip region
    fn pop_clip(&mut self);

    /// Size `text` takes at `scale`
    fn text_size(&self, text: &str, scale: f32) -> Vec2;

    /// Font size at scale 1.0
    fn font_size(&self) -> f32 {
        BASE_FONT_SIZE
    }
}

/// Region handed to the custom draw callback of a row with extra height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomDrawRegion {
    /// Whole sequence span under the row's bar
    pub content: Rect,
    /// Legend area under the row label
    pub legend: Rect,
    /// Visible part of `content`
    pub content_clip: Rect,
    /// Visible part of `legend`
    pub legend_clip: Rect,
}

/// Region handed to the custom draw callback of a compact row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactDrawRegion {
    /// Whole sequence span on the row
    pub content: Rect,
    /// Visible part of `content`
    pub content_clip: Rect,
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle
    RectFilled {
        /// Rectangle
        rect: Rect,
        /// Corner radius
        rounding: f32,
        /// Fill
        color: Color32,
    },
    /// Rectangle outline
    RectStroke {
        /// Rectangle
        rect: Rect,
        /// Corner radius
        rounding: f32,
        /// Outline
        stroke: Stroke,
    },
    /// Line segment
    Line {
        /// Start
        from: Pos2,
        /// End
        to: Pos2,
        /// Stroke
        stroke: Stroke,
    },
    /// Text
    Text {
        /// Left-top anchor
        pos: Pos2,
        /// Content
        text: String,
        /// Font scale
        scale: f32,
        /// Color
        color: Color32,
    },
    /// Downward arrow
    ArrowDown {
        /// Top-left of the arrow box
        pos: Pos2,
        /// Arrow box side
        size: f32,
        /// Fill
        color: Color32,
    },
    /// Clip push
    PushClip(Rect),
    /// Clip pop
    PopClip,
}

/// Surface that records primitives instead of painting them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Recorded primitives, in issue order
    pub commands: Vec<DrawCommand>,
    depth: usize,
}

impl DrawList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded primitives
    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    /// Current clip nesting depth
    pub fn clip_depth(&self) -> usize {
        self.depth
    }

    /// Recorded text strings, in issue order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Filled rectangles of a given color
    pub fn filled_with(&self, color: Color32) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(move |command| match command {
            DrawCommand::RectFilled { rect, color: c, .. } if *c == color => Some(*rect),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn rect_filled(&mut self, rect: Rect, rounding: f32, color: Color32) {
        self.commands.push(DrawCommand::RectFilled { rect, rounding, color });
    }

    fn rect_stroke(&mut self, rect: Rect, rounding: f32, stroke: Stroke) {
        self.commands.push(DrawCommand::RectStroke { rect, rounding, stroke });
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn text(&mut self, pos: Pos2, text: &str, scale: f32, color: Color32) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_owned(),
            scale,
            color,
        });
    }

    fn arrow_down(&mut self, pos: Pos2, size: f32, color: Color32) {
        self.commands.push(DrawCommand::ArrowDown { pos, size, color });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.depth += 1;
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }

    fn text_size(&self, text: &str, scale: f32) -> Vec2 {
        // Monospace estimate, good enough for layout checks
        let size = BASE_FONT_SIZE * scale;
        Vec2::new(text.chars().count() as f32 * size * 0.55, size)
    }
}

/// Surface painting through egui with a clip stack
pub struct PainterSurface {
    root: Painter,
    clips: Vec<Painter>,
}

impl PainterSurface {
    /// Wrap a painter; its clip rect is the outermost clip
    pub fn new(painter: Painter) -> Self {
        Self {
            root: painter,
            clips: Vec::new(),
        }
    }

    fn painter(&self) -> &Painter {
        self.clips.last().unwrap_or(&self.root)
    }

    fn font(scale: f32) -> FontId {
        FontId::proportional(BASE_FONT_SIZE * scale)
    }
}

impl Surface for PainterSurface {
    fn rect_filled(&mut self, rect: Rect, rounding: f32, color: Color32) {
        self.painter().rect_filled(rect, rounding, color);
    }

    fn rect_stroke(&mut self, rect: Rect, rounding: f32, stroke: Stroke) {
        self.painter().rect_stroke(rect, rounding, stroke);
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter().line_segment([from, to], stroke);
    }

    fn text(&mut self, pos: Pos2, text: &str, scale: f32, color: Color32) {
        self.painter().text(pos, Align2::LEFT_TOP, text, Self::font(scale), color);
    }

    fn arrow_down(&mut self, pos: Pos2, size: f32, color: Color32) {
        let half = size * 0.5;
        let center_x = pos.x + half;
        let top = pos.y + size * 0.25;
        let points = vec![
            Pos2::new(center_x - half * 0.75, top),
            Pos2::new(center_x + half * 0.75, top),
            Pos2::new(center_x, top + half * 1.3),
        ];
        self.painter()
            .add(Shape::convex_polygon(points, color, Stroke::NONE));
    }

    fn push_clip(&mut self, rect: Rect) {
        let clipped = self.painter().with_clip_rect(rect);
        self.clips.push(clipped);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    fn text_size(&self, text: &str, scale: f32) -> Vec2 {
        self.painter()
            .layout_no_wrap(text.to_owned(), Self::font(scale), Color32::WHITE)
            .size()
    }
}
