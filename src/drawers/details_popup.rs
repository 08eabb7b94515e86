use crate::canvas::{Canvas, CornerRadii, TextAlign, TextBaseline};
use crate::data_types::{Line, LineSet};
use crate::drawers::rotating_display::{draw_rotating_display, RotatingDisplayOptions};
use crate::drawers::theme_font;
use crate::geometry::Rect;
use crate::theme::ChartTheme;
use crate::utils::number::{format_with_thousand_groups, remove_float_artifact};
use glam::DVec2;

#[derive(Clone, Debug, PartialEq)]
pub struct DetailsPopupOptions {
    pub lines: LineSet,
    /// Row opacities, one per line. A row at 0 is skipped and takes no space.
    pub line_opacities: Vec<f64>,
    pub x: f64,
    pub y: f64,
    /// Logical pixels.
    pub width: f64,
    /// May be fractional while the popup moves.
    pub index: f64,
    pub opacity: f64,
    pub index_name_offset: f64,
    pub value_precision: Option<u32>,
    pub pixel_ratio: f64,
}

/// The height of the popup in device pixels. Rows that fade out shrink it gradually.
pub fn details_popup_height(theme: &ChartTheme, line_opacities: &[f64], pixel_ratio: f64) -> f64 {
    let style = &theme.popup;
    let rows: f64 = line_opacities.iter().sum();
    (style.first_row_baseline_y + (rows - 1.0) * style.row_height + style.bottom_padding) * pixel_ratio
}

pub fn draw_details_popup(canvas: &mut dyn Canvas, theme: &ChartTheme, options: &DetailsPopupOptions) {
    if options.opacity == 0.0 {
        return;
    }

    let style = &theme.popup;
    let pixel_ratio = options.pixel_ratio;
    let width = options.width * pixel_ratio;
    let height = details_popup_height(theme, &options.line_opacities, pixel_ratio);
    let side_padding = style.side_padding * pixel_ratio;

    draw_background(canvas, theme, options, width, height);
    draw_header(
        canvas,
        theme,
        options,
        options.x + side_padding,
        options.y + style.header_baseline_y * pixel_ratio,
    );

    let mut row_y = options.y + style.first_row_baseline_y * pixel_ratio;
    for (key, line) in options.lines.iter().enumerate() {
        let row_opacity = options.line_opacities.get(key).copied().unwrap_or(0.0);
        if row_opacity <= 0.0 {
            continue;
        }
        draw_row(
            canvas,
            theme,
            options,
            line,
            Rect::new(options.x + side_padding, row_y, width - side_padding * 2.0, 0.0),
            options.opacity * row_opacity,
        );
        row_y += style.row_height * pixel_ratio * row_opacity;
    }
}

// A few translucent rounded rects stacked around the popup stand in for a blurred shadow.
fn draw_background(
    canvas: &mut dyn Canvas,
    theme: &ChartTheme,
    options: &DetailsPopupOptions,
    width: f64,
    height: f64,
) {
    let style = &theme.popup;
    let pixel_ratio = options.pixel_ratio;

    if style.shadow_opacity > 0.0 && style.shadow_blur > 0.0 {
        let steps = style.shadow_blur.ceil() as usize;
        let step_opacity =
            1.0 - (1.0 - style.shadow_opacity * options.opacity / 2.0).powf(1.0 / steps as f64);

        for i in 0..steps {
            let offset = ((i + 1) as f64 / steps as f64) * style.shadow_blur * pixel_ratio;
            canvas.fill_rounded_rect(
                Rect::new(
                    options.x - offset + style.shadow_x_offset * pixel_ratio,
                    options.y - offset + style.shadow_y_offset * pixel_ratio,
                    width + offset * 2.0,
                    height + offset * 2.0,
                ),
                CornerRadii::all(offset + style.corner_radius * pixel_ratio),
                style.shadow_color,
                step_opacity,
            );
        }
    }

    canvas.fill_rounded_rect(
        Rect::new(options.x, options.y, width, height),
        CornerRadii::all(style.corner_radius * pixel_ratio),
        style.background_color,
        options.opacity,
    );
}

fn draw_header(canvas: &mut dyn Canvas, theme: &ChartTheme, options: &DetailsPopupOptions, x: f64, y: f64) {
    let style = &theme.popup;
    let font = theme_font(
        theme,
        style.header_font_size * options.pixel_ratio,
        style.header_font_weight,
    );

    canvas.fill_text(
        &style.header_prefix,
        DVec2::new(x, y),
        &font,
        TextAlign::Left,
        TextBaseline::Alphabetic,
        theme.text_color,
        options.opacity,
    );
    let prefix_width = canvas.measure_text(&style.header_prefix, &font);

    let index_name_offset = options.index_name_offset;
    draw_rotating_display(
        canvas,
        &RotatingDisplayOptions {
            x: x + prefix_width,
            y,
            position: options.index,
            container_align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            font,
            line_height: 1.0,
            top_align: 0.1,
            bottom_align: 0.0,
            color: theme.text_color,
            opacity: options.opacity,
        },
        |index| format_with_thousand_groups(index as f64 + index_name_offset, " "),
    );
}

/// `row` carries the left edge, the baseline and the width of the row.
fn draw_row(
    canvas: &mut dyn Canvas,
    theme: &ChartTheme,
    options: &DetailsPopupOptions,
    line: &Line,
    row: Rect,
    opacity: f64,
) {
    let style = &theme.popup;
    let font_size = style.font_size * options.pixel_ratio;

    canvas.fill_text(
        &line.name,
        DVec2::new(row.x, row.y),
        &theme_font(theme, font_size, style.font_weight),
        TextAlign::Left,
        TextBaseline::Alphabetic,
        theme.text_color,
        opacity,
    );

    let values = &line.values;
    let precision = options.value_precision;
    draw_rotating_display(
        canvas,
        &RotatingDisplayOptions {
            x: row.right(),
            y: row.y,
            position: options.index,
            container_align: TextAlign::Right,
            baseline: TextBaseline::Alphabetic,
            font: theme_font(theme, font_size, style.value_font_weight),
            line_height: 1.0,
            top_align: 1.0,
            bottom_align: 0.8,
            color: line.color,
            opacity,
        },
        |index| {
            let value = usize::try_from(index).ok().and_then(|index| values.get(index));
            match value {
                Some(value) if value.is_finite() => {
                    format_with_thousand_groups(remove_float_artifact(*value, precision), " ")
                }
                _ => style.missing_value_text.clone(),
            }
        },
    );
}
