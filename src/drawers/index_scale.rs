use crate::canvas::{Canvas, TextAlign, TextBaseline};
use crate::drawers::theme_font;
use crate::scales::list_notches_for_range;
use crate::theme::{ChartTheme, FontWeight};
use crate::utils::number::format_with_thousand_groups;
use glam::DVec2;

/// Index labels along the top edge `y`. `[from_x, to_x]` maps to `[from_index, to_index]`; labels are
/// drawn while they touch `[x, x + width]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexScaleOptions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub from_x: f64,
    pub to_x: f64,
    pub from_index: f64,
    pub to_index: f64,
    pub notch_scale: f64,
    pub index_name_offset: f64,
    pub pixel_ratio: f64,
}

pub fn draw_index_scale(canvas: &mut dyn Canvas, theme: &ChartTheme, options: &IndexScaleOptions) {
    let IndexScaleOptions {
        x,
        y,
        width,
        from_x,
        to_x,
        from_index,
        to_index,
        notch_scale,
        index_name_offset,
        pixel_ratio,
    } = *options;

    if from_index == to_index {
        return;
    }

    let style = &theme.scale;
    let approximate_label_max_width = style.min_space_for_notch * 0.9;
    let font = theme_font(theme, (style.label_font_size * pixel_ratio).round(), FontWeight::Regular);

    let real_from_x = x - approximate_label_max_width / 2.0;
    let real_to_x = x + width + approximate_label_max_width / 2.0;
    let index_span = to_index - from_index;
    let x_per_index = (to_x - from_x) / if index_span == 0.0 { 1.0 } else { index_span };
    let (real_from_index, real_to_index) = if x_per_index == 0.0 {
        (from_index, to_index)
    } else {
        (
            from_index - (from_x - real_from_x) / x_per_index,
            to_index + (real_to_x - to_x) / x_per_index,
        )
    };

    // Notches align to the displayed numbers, not to the raw indices
    let notches = list_notches_for_range(
        real_from_index + index_name_offset,
        real_to_index + index_name_offset,
        notch_scale,
    );
    for notch in notches {
        let index = notch.value - index_name_offset;
        let notch_x = from_x + (index - from_index) * x_per_index;
        canvas.fill_text(
            &format_with_thousand_groups(notch.value, " "),
            DVec2::new(notch_x.round(), y),
            &font,
            TextAlign::Center,
            TextBaseline::Top,
            style.label_color,
            notch.opacity,
        );
    }
}
