//! Paints recorded chart layers with gpui.
//!
//! Layers are recorded in device pixels. gpui paints in logical pixels, so every coordinate is divided by
//! the pixel ratio the layer was recorded with.

use crate::canvas::{
    ApproximateTextMeasurer, DrawCommand, FadeSide, Font, TextAlign, TextBaseline, TextMeasurer,
};
use crate::drawers::ChartLayers;
use crate::geometry::Rect;
use crate::layout::ChartLayout;
use crate::theme::{ChartTheme, FontWeight};
use crate::utils::PixelsExt;
use glam::DVec2;
use gpui::{
    fill, font, point, px, quad, size, transparent_black, App, BorderStyle, Bounds, ContentMask,
    Corners, Edges, PathBuilder, Pixels, Point, SharedString, TextRun, TextSystem, Window,
};
use std::sync::Arc;

/// Number of flat strips a fade is painted with.
const FADE_STEPS: usize = 8;

pub(crate) fn gpui_font(family: &str, weight: FontWeight) -> gpui::Font {
    let mut gpui_font = font(SharedString::from(family.to_string()));
    gpui_font.weight = match weight {
        FontWeight::Regular => gpui::FontWeight::NORMAL,
        FontWeight::Bold => gpui::FontWeight::BOLD,
    };
    gpui_font
}

/// Measures with the platform text system, falling back to [`ApproximateTextMeasurer`] for glyphs it
/// can't resolve.
pub struct GpuiTextMeasurer {
    text_system: Arc<TextSystem>,
}

impl GpuiTextMeasurer {
    pub fn new(cx: &App) -> Self {
        Self {
            text_system: cx.text_system().clone(),
        }
    }
}

impl TextMeasurer for GpuiTextMeasurer {
    fn measure_text(&self, text: &str, font: &Font) -> f64 {
        let font_id = self.text_system.resolve_font(&gpui_font(&font.family, font.weight));
        let font_size = px(font.size as f32);
        let mut width = 0.0;
        for ch in text.chars() {
            match self.text_system.advance(font_id, font_size, ch) {
                Ok(advance) => width += advance.width.as_f32() as f64,
                Err(_) => return ApproximateTextMeasurer.measure_text(text, font),
            }
        }
        width
    }
}

/// Maps device pixels of one layer to window coordinates.
struct LayerPainter {
    origin: Point<Pixels>,
    pixel_ratio: f64,
}

impl LayerPainter {
    fn new(origin: Point<Pixels>, pixel_ratio: f64) -> Self {
        Self { origin, pixel_ratio }
    }

    fn length(&self, value: f64) -> Pixels {
        px((value / self.pixel_ratio) as f32)
    }

    fn point(&self, position: DVec2) -> Point<Pixels> {
        point(
            self.origin.x + self.length(position.x),
            self.origin.y + self.length(position.y),
        )
    }

    fn bounds(&self, rect: Rect) -> Bounds<Pixels> {
        Bounds::new(
            self.point(DVec2::new(rect.x, rect.y)),
            size(self.length(rect.width.max(0.0)), self.length(rect.height.max(0.0))),
        )
    }

    fn paint(&self, command: &DrawCommand, window: &mut Window, cx: &mut App) {
        match command {
            DrawCommand::FillRect { rect, color, opacity } => {
                window.paint_quad(fill(self.bounds(*rect), color.to_hsla(*opacity as f32)));
            }
            DrawCommand::FillRoundedRect {
                rect,
                radii,
                color,
                opacity,
            } => {
                let radii = radii.clamped(rect.width, rect.height);
                window.paint_quad(quad(
                    self.bounds(*rect),
                    Corners {
                        top_left: self.length(radii.top_left),
                        top_right: self.length(radii.top_right),
                        bottom_right: self.length(radii.bottom_right),
                        bottom_left: self.length(radii.bottom_left),
                    },
                    color.to_hsla(*opacity as f32),
                    Edges::all(px(0.0)),
                    transparent_black(),
                    BorderStyle::default(),
                ));
            }
            DrawCommand::StrokePolyline {
                points,
                width,
                color,
                opacity,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                if rest.is_empty() {
                    return;
                }
                let mut builder = PathBuilder::stroke(self.length(*width));
                builder.move_to(self.point(*first));
                for p in rest {
                    builder.line_to(self.point(*p));
                }
                if let Ok(path) = builder.build() {
                    window.paint_path(path, color.to_hsla(*opacity as f32));
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                fill_opacity,
                stroke,
                stroke_opacity,
                stroke_width,
            } => {
                // The stroke is centered on the radius, the quad border grows inwards
                let outer = radius + stroke_width / 2.0;
                let rect = Rect::new(center.x - outer, center.y - outer, outer * 2.0, outer * 2.0);
                window.paint_quad(quad(
                    self.bounds(rect),
                    Corners::all(self.length(outer)),
                    fill.to_hsla(*fill_opacity as f32),
                    Edges::all(self.length(*stroke_width)),
                    stroke.to_hsla(*stroke_opacity as f32),
                    BorderStyle::default(),
                ));
            }
            DrawCommand::Text {
                text,
                position,
                font,
                align,
                baseline,
                color,
                opacity,
            } => {
                if text.is_empty() {
                    return;
                }
                let run = TextRun {
                    len: text.len(),
                    font: gpui_font(&font.family, font.weight),
                    color: color.to_hsla(*opacity as f32),
                    background_color: None,
                    underline: None,
                    strikethrough: None,
                };
                let shaped = window.text_system().shape_line(
                    SharedString::from(text.clone()),
                    self.length(font.size),
                    &[run],
                    None,
                );
                let line_height = shaped.ascent + shaped.descent;
                let anchor = self.point(*position);
                let x = match align {
                    TextAlign::Left => anchor.x,
                    TextAlign::Center => anchor.x - shaped.width / 2.0,
                    TextAlign::Right => anchor.x - shaped.width,
                };
                let y = match baseline {
                    TextBaseline::Top => anchor.y,
                    TextBaseline::Middle => anchor.y - line_height / 2.0,
                    TextBaseline::Alphabetic => anchor.y - shaped.ascent,
                    TextBaseline::Bottom => anchor.y - line_height,
                };
                let _ = shaped.paint(point(x, y), line_height, window, cx);
            }
            DrawCommand::Fade { rect, side, color } => {
                for step in 0..FADE_STEPS {
                    let from = step as f64 / FADE_STEPS as f64;
                    let to = (step + 1) as f64 / FADE_STEPS as f64;
                    let strip = fade_strip(*rect, *side, from, to);
                    window.paint_quad(fill(self.bounds(strip), color.to_hsla((1.0 - from) as f32)));
                }
            }
            DrawCommand::PushClip(_) | DrawCommand::PopClip => {}
        }
    }
}

/// The part of `rect` between `from` and `to`, measured as shares from the covered side.
fn fade_strip(rect: Rect, side: FadeSide, from: f64, to: f64) -> Rect {
    let share = to - from;
    match side {
        FadeSide::Top => Rect::new(rect.x, rect.y + rect.height * from, rect.width, rect.height * share),
        FadeSide::Bottom => Rect::new(rect.x, rect.bottom() - rect.height * to, rect.width, rect.height * share),
        FadeSide::Left => Rect::new(rect.x + rect.width * from, rect.y, rect.width * share, rect.height),
        FadeSide::Right => Rect::new(rect.right() - rect.width * to, rect.y, rect.width * share, rect.height),
    }
}

/// Index of the `PopClip` closing the `PushClip` at `push`, or the slice length when it's missing.
fn matching_pop(commands: &[DrawCommand], push: usize) -> usize {
    let mut depth = 0usize;
    for (offset, command) in commands[push..].iter().enumerate() {
        match command {
            DrawCommand::PushClip(_) => depth += 1,
            DrawCommand::PopClip => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return push + offset;
                }
            }
            _ => {}
        }
    }
    commands.len()
}

fn paint_commands(painter: &LayerPainter, commands: &[DrawCommand], window: &mut Window, cx: &mut App) {
    let mut i = 0;
    while i < commands.len() {
        if let DrawCommand::PushClip(rect) = &commands[i] {
            let end = matching_pop(commands, i);
            let inner = &commands[i + 1..end];
            let bounds = painter.bounds(*rect);
            window.with_content_mask(Some(ContentMask { bounds }), |window| {
                paint_commands(painter, inner, window, cx)
            });
            i = end + 1;
            continue;
        }
        painter.paint(&commands[i], window, cx);
        i += 1;
    }
}

/// Paints every layer of a frame into `bounds`, the container the layers were laid out for.
pub fn paint_layers(
    window: &mut Window,
    cx: &mut App,
    bounds: Bounds<Pixels>,
    layers: &ChartLayers,
    theme: &ChartTheme,
    layout: ChartLayout,
) {
    let pixel_ratio = layout.pixel_ratio;
    let map = layout.map_bounds(theme);
    let map_painter = LayerPainter::new(
        point(bounds.origin.x + px(map.x as f32), bounds.origin.y + px(map.y as f32)),
        pixel_ratio,
    );
    let map_bounds = map_painter.bounds(Rect::new(0.0, 0.0, map.width * pixel_ratio, map.height * pixel_ratio));
    window.with_content_mask(Some(ContentMask { bounds: map_bounds }), |window| {
        paint_commands(&map_painter, layers.map.commands(), window, cx)
    });

    let painter = LayerPainter::new(bounds.origin, pixel_ratio);
    window.with_content_mask(Some(ContentMask { bounds }), |window| {
        for layer in [&layers.main, &layers.x, &layers.popup] {
            paint_commands(&painter, layer.commands(), window, cx);
        }
    });
}
