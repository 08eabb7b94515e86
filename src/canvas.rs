//! The drawing surface the drawers paint on.
//!
//! Coordinates are device pixels with the origin at the top left of the layer. Drawers record into a
//! [`RenderList`]; the view replays it with gpui. Layers are additive, nothing is ever erased.

use crate::geometry::Rect;
use crate::theme::{Color, FontWeight};
use glam::DVec2;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// The side of a fade that turns fully transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeSide {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: Rc<str>,
    /// Device pixels.
    pub size: f64,
    pub weight: FontWeight,
}

impl Font {
    pub fn new(family: Rc<str>, size: f64, weight: FontWeight) -> Self {
        Self { family, size, weight }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub fn all(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn left(radius: f64) -> Self {
        Self {
            top_left: radius,
            bottom_left: radius,
            ..Self::default()
        }
    }

    pub fn right(radius: f64) -> Self {
        Self {
            top_right: radius,
            bottom_right: radius,
            ..Self::default()
        }
    }

    /// Shrinks the radii so they fit in a `width` by `height` box.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        let max = (width.min(height) / 2.0).max(0.0);
        Self {
            top_left: self.top_left.clamp(0.0, max),
            top_right: self.top_right.clamp(0.0, max),
            bottom_right: self.bottom_right.clamp(0.0, max),
            bottom_left: self.bottom_left.clamp(0.0, max),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
        opacity: f64,
    },
    FillRoundedRect {
        rect: Rect,
        radii: CornerRadii,
        color: Color,
        opacity: f64,
    },
    StrokePolyline {
        points: Vec<DVec2>,
        width: f64,
        color: Color,
        opacity: f64,
    },
    Circle {
        center: DVec2,
        radius: f64,
        fill: Color,
        fill_opacity: f64,
        stroke: Color,
        stroke_opacity: f64,
        stroke_width: f64,
    },
    Text {
        text: String,
        position: DVec2,
        font: Font,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
        opacity: f64,
    },
    /// Fades whatever lies under `rect` into `color`, fully covered at `side`.
    Fade {
        rect: Rect,
        side: FadeSide,
        color: Color,
    },
    PushClip(Rect),
    PopClip,
}

pub trait TextMeasurer {
    /// Width of `text` in device pixels.
    fn measure_text(&self, text: &str, font: &Font) -> f64;
}

/// Estimates text width from the character count. Good enough for layout in tests and headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproximateTextMeasurer;

impl TextMeasurer for ApproximateTextMeasurer {
    fn measure_text(&self, text: &str, font: &Font) -> f64 {
        let em = match font.weight {
            FontWeight::Regular => 0.55,
            FontWeight::Bold => 0.6,
        };
        text.chars().count() as f64 * font.size * em
    }
}

pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color, opacity: f64);
    fn fill_rounded_rect(&mut self, rect: Rect, radii: CornerRadii, color: Color, opacity: f64);
    fn stroke_polyline(&mut self, points: Vec<DVec2>, width: f64, color: Color, opacity: f64);
    fn circle(
        &mut self,
        center: DVec2,
        radius: f64,
        fill: (Color, f64),
        stroke: (Color, f64),
        stroke_width: f64,
    );
    #[allow(clippy::too_many_arguments)]
    fn fill_text(
        &mut self,
        text: &str,
        position: DVec2,
        font: &Font,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
        opacity: f64,
    );
    fn measure_text(&self, text: &str, font: &Font) -> f64;
    fn fade(&mut self, rect: Rect, side: FadeSide, color: Color);
    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);
}

/// Paints recorded commands onto another canvas.
pub fn replay(canvas: &mut dyn Canvas, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::FillRect { rect, color, opacity } => canvas.fill_rect(*rect, *color, *opacity),
            DrawCommand::FillRoundedRect {
                rect,
                radii,
                color,
                opacity,
            } => canvas.fill_rounded_rect(*rect, *radii, *color, *opacity),
            DrawCommand::StrokePolyline {
                points,
                width,
                color,
                opacity,
            } => canvas.stroke_polyline(points.clone(), *width, *color, *opacity),
            DrawCommand::Circle {
                center,
                radius,
                fill,
                fill_opacity,
                stroke,
                stroke_opacity,
                stroke_width,
            } => canvas.circle(
                *center,
                *radius,
                (*fill, *fill_opacity),
                (*stroke, *stroke_opacity),
                *stroke_width,
            ),
            DrawCommand::Text {
                text,
                position,
                font,
                align,
                baseline,
                color,
                opacity,
            } => canvas.fill_text(text, *position, font, *align, *baseline, *color, *opacity),
            DrawCommand::Fade { rect, side, color } => canvas.fade(*rect, *side, *color),
            DrawCommand::PushClip(rect) => canvas.push_clip(*rect),
            DrawCommand::PopClip => canvas.pop_clip(),
        }
    }
}

/// Records draw commands for later replay.
#[derive(Clone)]
pub struct RenderList {
    commands: Vec<DrawCommand>,
    measurer: Rc<dyn TextMeasurer>,
}

impl RenderList {
    pub fn new(measurer: Rc<dyn TextMeasurer>) -> Self {
        Self {
            commands: Vec::new(),
            measurer,
        }
    }

    /// A list that measures text with [`ApproximateTextMeasurer`].
    pub fn approximate() -> Self {
        Self::new(Rc::new(ApproximateTextMeasurer))
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn measurer(&self) -> Rc<dyn TextMeasurer> {
        self.measurer.clone()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl fmt::Debug for RenderList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderList").field("commands", &self.commands).finish()
    }
}

impl PartialEq for RenderList {
    fn eq(&self, other: &Self) -> bool {
        self.commands == other.commands
    }
}

impl Canvas for RenderList {
    fn fill_rect(&mut self, rect: Rect, color: Color, opacity: f64) {
        if opacity <= 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::FillRect { rect, color, opacity });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radii: CornerRadii, color: Color, opacity: f64) {
        if opacity <= 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::FillRoundedRect {
            rect,
            radii: radii.clamped(rect.width, rect.height),
            color,
            opacity,
        });
    }

    fn stroke_polyline(&mut self, points: Vec<DVec2>, width: f64, color: Color, opacity: f64) {
        if opacity <= 0.0 || points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::StrokePolyline {
            points,
            width,
            color,
            opacity,
        });
    }

    fn circle(
        &mut self,
        center: DVec2,
        radius: f64,
        fill: (Color, f64),
        stroke: (Color, f64),
        stroke_width: f64,
    ) {
        if radius <= 0.0 || (fill.1 <= 0.0 && stroke.1 <= 0.0) {
            return;
        }
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill: fill.0,
            fill_opacity: fill.1,
            stroke: stroke.0,
            stroke_opacity: stroke.1,
            stroke_width,
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        position: DVec2,
        font: &Font,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
        opacity: f64,
    ) {
        if opacity <= 0.0 || text.is_empty() || font.size <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font: font.clone(),
            align,
            baseline,
            color,
            opacity,
        });
    }

    fn measure_text(&self, text: &str, font: &Font) -> f64 {
        self.measurer.measure_text(text, font)
    }

    fn fade(&mut self, rect: Rect, side: FadeSide, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::Fade { rect, side, color });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }
}
