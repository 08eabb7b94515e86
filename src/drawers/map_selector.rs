use crate::canvas::{Canvas, CornerRadii};
use crate::geometry::Rect;
use crate::theme::ChartTheme;

/// The selection window over the map. `from` and `to` are the window bounds relative to `width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapSelectorOptions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub from: f64,
    pub to: f64,
    pub pixel_ratio: f64,
}

/// Draws the mask outside the window, the grips at both window edges and the thin frame between them.
///
/// The window interior is never painted so the map shows through.
pub fn draw_map_selector(canvas: &mut dyn Canvas, theme: &ChartTheme, options: &MapSelectorOptions) {
    let MapSelectorOptions {
        x,
        y,
        width,
        height,
        from,
        to,
        pixel_ratio,
    } = *options;
    let style = &theme.selector;

    let grip_width = style.grip_width * pixel_ratio;
    let outside_radius = theme.map.corner_radius * pixel_ratio;
    let border_radius = style.border_corner_radius * pixel_ratio;
    let vertical_padding = style.vertical_padding * pixel_ratio;

    let left_offset = (from * width).round() - grip_width;
    let right_offset = (to * width).round() + grip_width;
    let inner_left = x + left_offset + grip_width;
    let inner_right = x + right_offset - grip_width;

    canvas.fill_rounded_rect(
        Rect::new(x, y, inner_left - x, height),
        CornerRadii::left(outside_radius),
        style.outside_color,
        style.outside_opacity,
    );
    canvas.fill_rounded_rect(
        Rect::new(inner_right, y, x + width - inner_right, height),
        CornerRadii::right(outside_radius),
        style.outside_color,
        style.outside_opacity,
    );

    let border_y = y + vertical_padding;
    let border_height = height - vertical_padding * 2.0;
    canvas.fill_rounded_rect(
        Rect::new(x + left_offset, border_y, grip_width, border_height),
        CornerRadii::left(border_radius),
        style.border_color,
        1.0,
    );
    canvas.fill_rounded_rect(
        Rect::new(inner_right, border_y, grip_width, border_height),
        CornerRadii::right(border_radius),
        style.border_color,
        1.0,
    );

    let frame_thickness = (-vertical_padding).max(0.0);
    let inner_width = inner_right - inner_left;
    canvas.fill_rect(
        Rect::new(inner_left, border_y, inner_width, frame_thickness),
        style.border_color,
        1.0,
    );
    canvas.fill_rect(
        Rect::new(inner_left, y + height, inner_width, frame_thickness),
        style.border_color,
        1.0,
    );

    draw_notch(canvas, theme, x + left_offset + grip_width / 2.0, y + height / 2.0, pixel_ratio);
    draw_notch(canvas, theme, x + right_offset - grip_width / 2.0, y + height / 2.0, pixel_ratio);
}

fn draw_notch(canvas: &mut dyn Canvas, theme: &ChartTheme, center_x: f64, center_y: f64, pixel_ratio: f64) {
    let style = &theme.selector;
    let width = style.notch_width * pixel_ratio;
    let height = style.notch_height * pixel_ratio;
    canvas.fill_rounded_rect(
        Rect::new(center_x - width / 2.0, center_y - height / 2.0, width, height),
        CornerRadii::all(style.notch_corner_radius * pixel_ratio),
        style.notch_color,
        1.0,
    );
}
