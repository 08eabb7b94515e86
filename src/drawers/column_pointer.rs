//! Markers of the hovered column: a vertical line and a circle on every line.

use crate::canvas::Canvas;
use crate::data_types::LineSet;
use crate::geometry::Rect;
use crate::scales::ChartScale;
use crate::theme::ChartTheme;
use crate::utils::series::interpolate_linear;
use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerLineOptions {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub opacity: f64,
    pub draw_from_x: f64,
    pub draw_to_x: f64,
    pub pixel_ratio: f64,
}

pub fn draw_pointer_line(canvas: &mut dyn Canvas, theme: &ChartTheme, options: &PointerLineOptions) {
    if options.opacity <= 0.0 {
        return;
    }

    let style = &theme.scale;
    let line_width = style.line_width * options.pixel_ratio;
    let line_x = (options.x - line_width / 2.0).round();
    if line_x + line_width <= options.draw_from_x || line_x >= options.draw_to_x {
        return;
    }

    canvas.fill_rect(
        Rect::new(line_x, options.y, line_width, options.height),
        style.line_color,
        style.line_opacity * options.opacity,
    );
}

/// `index` may be fractional, the values are interpolated then. `[from_y, to_y]` maps to
/// `[from_value, to_value]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerCirclesOptions {
    pub lines: LineSet,
    pub line_opacities: Vec<f64>,
    pub x: f64,
    pub index: f64,
    pub opacity: f64,
    pub from_y: f64,
    pub to_y: f64,
    pub from_value: f64,
    pub to_value: f64,
    pub draw_from_x: f64,
    pub draw_to_x: f64,
    pub pixel_ratio: f64,
}

pub fn draw_pointer_circles(canvas: &mut dyn Canvas, theme: &ChartTheme, options: &PointerCirclesOptions) {
    if options.opacity <= 0.0 || options.from_value == options.to_value {
        return;
    }

    let radius = theme.layout.line_pointer_radius * options.pixel_ratio;
    let border_width = theme.layout.main_line_width * options.pixel_ratio;
    let x = options.x.round();
    if x + radius + border_width / 2.0 <= options.draw_from_x
        || x - radius - border_width / 2.0 >= options.draw_to_x
    {
        return;
    }

    let value_scale = ChartScale::new_linear(
        (options.from_value, options.to_value),
        (options.from_y, options.to_y),
    );
    let scale = 0.3 + options.opacity * 0.7;

    // Backwards so the first line ends up on top
    for (key, line) in options.lines.iter().enumerate().rev() {
        let Some(value) = interpolate_linear(&line.values, options.index) else {
            continue;
        };
        if value.is_nan() {
            continue;
        }
        let line_opacity = options.line_opacities.get(key).copied().unwrap_or(0.0) * options.opacity;
        let y = value_scale.map(value);
        canvas.circle(
            DVec2::new(x, y),
            radius * scale,
            (theme.background_color, line_opacity),
            (line.color, line_opacity),
            border_width,
        );
    }
}
