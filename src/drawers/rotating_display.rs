use crate::canvas::{Canvas, Font, TextAlign, TextBaseline};
use crate::theme::Color;
use glam::DVec2;

const EDGE_SCALE: f64 = 0.5;
const EDGE_Y_RELATIVE_OFFSET: f64 = 0.7;

/// A text that rolls like an odometer while `position` moves between integers.
#[derive(Clone, Debug, PartialEq)]
pub struct RotatingDisplayOptions {
    pub x: f64,
    pub y: f64,
    pub position: f64,
    pub container_align: TextAlign,
    pub baseline: TextBaseline,
    pub font: Font,
    pub line_height: f64,
    /// Where the shrunk outgoing item sits in its slot, from 0 (leading edge) to 1.
    pub top_align: f64,
    /// Same for the incoming item.
    pub bottom_align: f64,
    pub color: Color,
    pub opacity: f64,
}

/// Draws the items around `position` and returns the width of the display, blended between them.
pub fn draw_rotating_display(
    canvas: &mut dyn Canvas,
    options: &RotatingDisplayOptions,
    item_text: impl Fn(i64) -> String,
) -> f64 {
    let base = options.position.floor();
    let mut average_width = 0.0;

    for item in [base, base + 1.0] {
        let distance_to_center = (item - options.position).abs();
        if distance_to_center >= 1.0 {
            break;
        }

        let text = item_text(item as i64);
        let full_font = Font {
            size: options.font.size.round(),
            ..options.font.clone()
        };
        let item_width = canvas.measure_text(&text, &full_font);
        average_width += item_width * (1.0 - distance_to_center);

        let scale = 1.0 - distance_to_center * (1.0 - EDGE_SCALE);
        let free_space_width = (1.0 - scale) * item_width;
        let align = if item > options.position {
            options.bottom_align
        } else {
            options.top_align
        };
        let align_shift = match options.container_align {
            TextAlign::Left => align,
            TextAlign::Right => align - 1.0,
            TextAlign::Center => align - 0.5,
        };

        let item_x = options.x + free_space_width * align_shift;
        let item_y = options.y
            + (item - options.position) * options.font.size * options.line_height * EDGE_Y_RELATIVE_OFFSET;
        let font = Font {
            size: (options.font.size * scale).round(),
            ..options.font.clone()
        };
        canvas.fill_text(
            &text,
            DVec2::new(item_x.round(), item_y.round()),
            &font,
            options.container_align,
            options.baseline,
            options.color,
            options.opacity * (1.0 - distance_to_center),
        );
    }

    average_width
}
