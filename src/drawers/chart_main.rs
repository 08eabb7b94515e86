use crate::canvas::{Canvas, FadeSide, TextMeasurer};
use crate::data_types::LineSet;
use crate::drawers::column_pointer::{
    draw_pointer_circles, draw_pointer_line, PointerCirclesOptions, PointerLineOptions,
};
use crate::drawers::fade::draw_fade;
use crate::drawers::lines_group::{draw_lines_group, LinesGroupOptions};
use crate::drawers::value_scale::{draw_value_scale, ValueScaleOptions};
use crate::drawers::MemoizedDrawer;
use crate::geometry::Rect;
use crate::theme::ChartTheme;
use std::rc::Rc;

/// The zoomed part of the chart without the index axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartMainOptions {
    pub lines: LineSet,
    pub line_opacities: Vec<f64>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub value_notch_scale: f64,
    pub start_index: f64,
    pub end_index: f64,
    pub details_index: f64,
    pub details_opacity: f64,
    pub pixel_ratio: f64,
}

pub struct ChartMainDrawer {
    lines: MemoizedDrawer<LinesGroupOptions>,
    value_scale: MemoizedDrawer<ValueScaleOptions>,
}

impl ChartMainDrawer {
    pub fn new(measurer: Rc<dyn TextMeasurer>) -> Self {
        Self {
            lines: MemoizedDrawer::new(measurer.clone(), draw_lines_group),
            value_scale: MemoizedDrawer::new(measurer, draw_value_scale),
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &ChartTheme, options: &ChartMainOptions) {
        let ChartMainOptions {
            x,
            y,
            width,
            height,
            pixel_ratio,
            ..
        } = *options;
        let side_padding = theme.layout.side_padding * pixel_ratio;
        let lines_x = x + side_padding;
        let lines_y = y + theme.layout.main_lines_top_margin * pixel_ratio;
        let lines_width = width - side_padding * 2.0;
        let lines_height = height - theme.layout.main_lines_top_margin * pixel_ratio;

        canvas.push_clip(Rect::new(x, y, width, height));

        self.lines.draw(
            canvas,
            theme,
            LinesGroupOptions {
                lines: options.lines.clone(),
                line_opacities: options.line_opacities.clone(),
                x,
                width,
                from_x: lines_x,
                to_x: lines_x + lines_width,
                from_index: options.start_index,
                to_index: options.end_index,
                from_y: lines_y + lines_height,
                to_y: lines_y,
                from_value: options.min_value,
                to_value: options.max_value,
                line_width: theme.layout.main_line_width * pixel_ratio,
            },
        );

        self.value_scale.draw(
            canvas,
            theme,
            ValueScaleOptions {
                x: lines_x,
                y,
                width: lines_width,
                height,
                top_padding: lines_y - y,
                from_value: options.min_value,
                to_value: options.max_value,
                notch_scale: options.value_notch_scale,
                pixel_ratio,
            },
        );

        let side_fade_width = x + width - lines_x - lines_width;
        draw_fade(
            canvas,
            theme,
            Rect::new(x, y, width, theme.layout.main_fade_height * pixel_ratio),
            FadeSide::Top,
        );
        draw_fade(canvas, theme, Rect::new(x, y, side_fade_width, height), FadeSide::Left);
        draw_fade(
            canvas,
            theme,
            Rect::new(lines_x + lines_width, y, side_fade_width, height),
            FadeSide::Right,
        );

        canvas.pop_clip();

        if options.details_opacity > 0.0 {
            let index_span = options.end_index - options.start_index;
            let details_x = lines_x
                + lines_width * (options.details_index - options.start_index)
                    / if index_span == 0.0 { 1.0 } else { index_span };

            draw_pointer_line(
                canvas,
                theme,
                &PointerLineOptions {
                    x: details_x,
                    y: lines_y,
                    height: lines_height,
                    opacity: options.details_opacity,
                    draw_from_x: x,
                    draw_to_x: x + width,
                    pixel_ratio,
                },
            );
            draw_pointer_circles(
                canvas,
                theme,
                &PointerCirclesOptions {
                    lines: options.lines.clone(),
                    line_opacities: options.line_opacities.clone(),
                    x: details_x,
                    index: options.details_index,
                    opacity: options.details_opacity,
                    from_y: lines_y + lines_height,
                    to_y: lines_y,
                    from_value: options.min_value,
                    to_value: options.max_value,
                    draw_from_x: x,
                    draw_to_x: x + width,
                    pixel_ratio,
                },
            );
        }
    }
}
