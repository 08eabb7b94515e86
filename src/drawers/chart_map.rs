use crate::canvas::Canvas;
use crate::data_types::LineSet;
use crate::drawers::lines_group::{draw_lines_group, LinesGroupOptions};
use crate::theme::ChartTheme;

/// The overview strip with every line over the whole domain. Coordinates are relative to the map canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartMapOptions {
    pub lines: LineSet,
    pub line_opacities: Vec<f64>,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub min_index: f64,
    pub max_index: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub pixel_ratio: f64,
}

pub fn draw_chart_map(canvas: &mut dyn Canvas, theme: &ChartTheme, options: &ChartMapOptions) {
    let style = &theme.map;
    let pixel_ratio = options.pixel_ratio;
    let horizontal_margin = style.lines_horizontal_margin * pixel_ratio;
    let vertical_margin = style.lines_vertical_margin * pixel_ratio;

    draw_lines_group(
        canvas,
        theme,
        &LinesGroupOptions {
            lines: options.lines.clone(),
            line_opacities: options.line_opacities.clone(),
            x: 0.0,
            width: options.canvas_width,
            from_x: horizontal_margin,
            to_x: options.canvas_width - horizontal_margin,
            from_index: options.min_index,
            to_index: options.max_index,
            from_y: options.canvas_height - vertical_margin,
            to_y: vertical_margin,
            from_value: options.min_value,
            to_value: options.max_value,
            line_width: style.line_width * pixel_ratio,
        },
    );
}
