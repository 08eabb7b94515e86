//! Canvas drawers.
//!
//! Every drawer is a plain function of an options struct. Coordinates are device pixels. The expensive
//! ones are wrapped in a [`MemoizedDrawer`] so an unchanged input replays the commands recorded last time
//! instead of recomputing them.

pub mod chart;
pub mod chart_main;
pub mod chart_map;
pub mod chart_x;
pub mod column_pointer;
pub mod details_popup;
pub mod fade;
pub mod index_scale;
pub mod line;
pub mod lines_group;
pub mod map_selector;
pub mod rotating_display;
pub mod value_scale;

pub use chart::{ChartDrawer, ChartFrame, ChartLayers};

use crate::canvas::{replay, Canvas, Font, RenderList, TextMeasurer};
use crate::memoize::MemoizeLast;
use crate::theme::{ChartTheme, FontWeight};
use std::rc::Rc;

pub type DrawFn<O> = fn(&mut dyn Canvas, &ChartTheme, &O);

/// Caches the commands of the last call of a drawer.
pub struct MemoizedDrawer<O> {
    memo: MemoizeLast<O, RenderList>,
    measurer: Rc<dyn TextMeasurer>,
    draw: DrawFn<O>,
}

impl<O: PartialEq> MemoizedDrawer<O> {
    pub fn new(measurer: Rc<dyn TextMeasurer>, draw: DrawFn<O>) -> Self {
        Self {
            memo: MemoizeLast::new(),
            measurer,
            draw,
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &ChartTheme, options: O) {
        let measurer = self.measurer.clone();
        let draw = self.draw;
        let recorded = self.memo.get(options, |options| {
            let mut list = RenderList::new(measurer);
            draw(&mut list, theme, options);
            list
        });
        replay(canvas, recorded.commands());
    }
}

pub(crate) fn theme_font(theme: &ChartTheme, size: f64, weight: FontWeight) -> Font {
    Font::new(Rc::from(theme.font_family.as_str()), size, weight)
}

/// `value` or 1 when it is zero, for divisions by spans that may collapse.
pub(crate) fn or_one(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}
