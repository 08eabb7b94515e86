use crate::canvas::Canvas;
use crate::drawers::or_one;
use crate::theme::Color;
use glam::DVec2;

/// Places a line in the anchor box `[from_x, to_x] × [from_y, to_y]`, which maps to
/// `[from_index, to_index] × [from_value, to_value]`. Only the part within `[draw_from_x, draw_to_x]` is
/// drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineOptions<'a> {
    pub values: &'a [f64],
    pub from_x: f64,
    pub to_x: f64,
    pub from_index: f64,
    pub to_index: f64,
    pub from_y: f64,
    pub to_y: f64,
    pub from_value: f64,
    pub to_value: f64,
    pub draw_from_x: f64,
    pub draw_to_x: f64,
    pub color: Color,
    pub line_width: f64,
    pub opacity: f64,
}

/// Draws a polyline through the samples, linearly interpolated. A NaN sample breaks the line.
pub fn draw_line(canvas: &mut dyn Canvas, options: &LineOptions) {
    let LineOptions {
        values,
        from_x,
        to_x,
        from_index,
        to_index,
        from_y,
        to_y,
        from_value,
        to_value,
        draw_from_x,
        draw_to_x,
        color,
        line_width,
        opacity,
    } = *options;

    if opacity <= 0.0 || from_index == to_index || from_value == to_value || values.is_empty() {
        return;
    }

    let x_per_index = (to_x - from_x) / (to_index - from_index);
    let y_per_value = (to_y - from_y) / (to_value - from_value);
    let x_offset = from_x - from_index * x_per_index;
    let y_offset = from_y - from_value * y_per_value;
    let real_from = (from_index - (from_x - draw_from_x + line_width / 2.0) / or_one(x_per_index))
        .max(0.0)
        .floor();
    let real_to = (to_index + (draw_to_x - to_x + line_width / 2.0) / or_one(x_per_index))
        .min((values.len() - 1) as f64)
        .ceil();
    if real_from.is_nan() || real_to.is_nan() || real_from > real_to {
        return;
    }

    let mut points = Vec::with_capacity((real_to - real_from) as usize + 1);
    for i in real_from as usize..=real_to as usize {
        let value = values[i];
        if value.is_nan() {
            canvas.stroke_polyline(std::mem::take(&mut points), line_width, color, opacity);
            continue;
        }
        points.push(DVec2::new(
            x_offset + i as f64 * x_per_index,
            y_offset + value * y_per_value,
        ));
    }
    canvas.stroke_polyline(points, line_width, color, opacity);
}
