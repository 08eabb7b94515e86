use crate::canvas::{Canvas, FadeSide};
use crate::geometry::Rect;
use crate::theme::ChartTheme;

/// Fades the chart out into the background towards `side` of `rect`.
pub fn draw_fade(canvas: &mut dyn Canvas, theme: &ChartTheme, rect: Rect, side: FadeSide) {
    canvas.fade(rect, side, theme.background_color);
}
