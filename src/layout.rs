//! Chart regions derived from the container size and the theme.

use crate::geometry::Rect;
use crate::theme::ChartTheme;
use serde::{Deserialize, Serialize};

/// The chart container in logical pixels, plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
        }
    }
}

impl ChartLayout {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
                pixel_ratio
            } else {
                1.0
            },
        }
    }

    /// The overview strip, relative to the container.
    pub fn map_bounds(&self, theme: &ChartTheme) -> Rect {
        let side = theme.layout.side_padding;
        Rect::new(
            side,
            self.height - theme.map.height - theme.map.bottom,
            self.width - side * 2.0,
            theme.map.height,
        )
    }

    /// The zoomed plot area where hovering shows the details popup.
    pub fn main_lines_bounds(&self, theme: &ChartTheme) -> Rect {
        let side = theme.layout.side_padding;
        let y = theme.layout.main_top_margin + theme.layout.main_lines_top_margin;
        Rect::new(
            side,
            y,
            self.width - side * 2.0,
            self.height - y - theme.layout.main_lines_bottom_margin - theme.map.height,
        )
    }

    /// Size of the main canvas in device pixels. It covers the whole container.
    pub fn main_canvas_size(&self) -> (f64, f64) {
        (self.width * self.pixel_ratio, self.height * self.pixel_ratio)
    }

    /// Size of the map canvas in device pixels. It covers [`Self::map_bounds`].
    pub fn map_canvas_size(&self, theme: &ChartTheme) -> (f64, f64) {
        let bounds = self.map_bounds(theme);
        (
            bounds.width.max(0.0) * self.pixel_ratio,
            bounds.height.max(0.0) * self.pixel_ratio,
        )
    }
}
