use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: DVec2) -> bool {
        is_in_rectangle(point, self.x, self.y, self.width, self.height)
    }

    /// Grows the rectangle by `dx` on both horizontal sides and `dy` on both vertical sides.
    pub fn inflate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x - dx, self.y - dy, self.width + dx * 2.0, self.height + dy * 2.0)
    }
}

pub fn is_in_rectangle(target: DVec2, x: f64, y: f64, width: f64, height: f64) -> bool {
    target.x >= x && target.x < x + width && target.y >= y && target.y < y + height
}

pub fn is_in_circle(target: DVec2, center: DVec2, radius: f64) -> bool {
    target.distance_squared(center) <= radius * radius
}
