use crate::canvas::{Canvas, TextAlign, TextBaseline};
use crate::drawers::theme_font;
use crate::geometry::Rect;
use crate::scales::list_notches_for_range;
use crate::theme::{ChartTheme, FontWeight};
use crate::utils::number::format_short;
use glam::DVec2;

/// Horizontal gridlines with value labels. `[from_value, to_value]` spans the box below `top_padding`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScaleOptions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub top_padding: f64,
    pub from_value: f64,
    pub to_value: f64,
    /// May be fractional, the neighbouring rungs crossfade then.
    pub notch_scale: f64,
    pub pixel_ratio: f64,
}

pub fn draw_value_scale(canvas: &mut dyn Canvas, theme: &ChartTheme, options: &ValueScaleOptions) {
    let ValueScaleOptions {
        x,
        y,
        width,
        height,
        top_padding,
        from_value,
        to_value,
        notch_scale,
        pixel_ratio,
    } = *options;

    if !from_value.is_finite() || !to_value.is_finite() || height == top_padding {
        return;
    }

    let style = &theme.scale;
    let line_width = style.line_width * pixel_ratio;
    let font = theme_font(theme, (style.label_font_size * pixel_ratio).round(), FontWeight::Regular);
    let label_offset = style.value_label_margin * pixel_ratio;
    let label_bottom_extra_space = font.size + label_offset;

    let span = to_value - from_value;
    let y_per_value = (height - top_padding) / if span == 0.0 { 1.0 } else { span };
    let (real_from, real_to) = if y_per_value == 0.0 {
        (from_value, to_value)
    } else {
        (
            from_value - label_bottom_extra_space / y_per_value,
            to_value + top_padding / y_per_value,
        )
    };

    canvas.fill_rect(
        Rect::new(x, y + height - line_width, width, line_width),
        style.line_color,
        style.line_opacity,
    );

    for notch in list_notches_for_range(real_from, real_to, notch_scale) {
        let notch_y = (y + height - (notch.value - from_value) * y_per_value).round();

        if notch_y < y + height {
            canvas.fill_rect(
                Rect::new(x, notch_y - line_width, width, line_width),
                style.line_color,
                style.line_opacity * notch.opacity,
            );
        }

        if notch_y > y + label_offset {
            canvas.fill_text(
                &format_short(notch.value),
                DVec2::new(x, notch_y - label_offset),
                &font,
                TextAlign::Left,
                TextBaseline::Bottom,
                style.label_color,
                notch.opacity,
            );
        }
    }
}
