use crate::canvas::Canvas;
use crate::data_types::LineSet;
use crate::drawers::line::{draw_line, LineOptions};
use crate::theme::ChartTheme;

/// Every line of a set in one anchor box. Lines are drawn where `[x, x + width]` is visible.
#[derive(Clone, Debug, PartialEq)]
pub struct LinesGroupOptions {
    pub lines: LineSet,
    pub line_opacities: Vec<f64>,
    pub x: f64,
    pub width: f64,
    pub from_x: f64,
    pub to_x: f64,
    pub from_index: f64,
    pub to_index: f64,
    pub from_y: f64,
    pub to_y: f64,
    pub from_value: f64,
    pub to_value: f64,
    pub line_width: f64,
}

pub fn draw_lines_group(canvas: &mut dyn Canvas, _theme: &ChartTheme, options: &LinesGroupOptions) {
    for (key, line) in options.lines.iter().enumerate() {
        draw_line(
            canvas,
            &LineOptions {
                values: &line.values,
                from_x: options.from_x,
                to_x: options.to_x,
                from_index: options.from_index,
                to_index: options.to_index,
                from_y: options.from_y,
                to_y: options.to_y,
                from_value: options.from_value,
                to_value: options.to_value,
                draw_from_x: options.x,
                draw_to_x: options.x + options.width,
                color: line.color,
                line_width: options.line_width,
                opacity: options.line_opacities.get(key).copied().unwrap_or(0.0),
            },
        );
    }
}
