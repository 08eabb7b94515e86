use crate::canvas::{Canvas, TextMeasurer};
use crate::drawers::index_scale::{draw_index_scale, IndexScaleOptions};
use crate::drawers::map_selector::{draw_map_selector, MapSelectorOptions};
use crate::drawers::MemoizedDrawer;
use crate::theme::ChartTheme;
use std::rc::Rc;

/// The strip under the main lines: the index axis and the map selector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartXOptions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub min_index: f64,
    pub max_index: f64,
    pub start_index: f64,
    pub end_index: f64,
    pub index_notch_scale: f64,
    pub index_name_offset: f64,
    pub pixel_ratio: f64,
}

pub struct ChartXDrawer {
    index_scale: MemoizedDrawer<IndexScaleOptions>,
    map_selector: MemoizedDrawer<MapSelectorOptions>,
}

impl ChartXDrawer {
    pub fn new(measurer: Rc<dyn TextMeasurer>) -> Self {
        Self {
            index_scale: MemoizedDrawer::new(measurer.clone(), draw_index_scale),
            map_selector: MemoizedDrawer::new(measurer, draw_map_selector),
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &ChartTheme, options: &ChartXOptions) {
        let pixel_ratio = options.pixel_ratio;
        let side_padding = theme.layout.side_padding * pixel_ratio;

        self.index_scale.draw(
            canvas,
            theme,
            IndexScaleOptions {
                x: options.x,
                y: options.y + theme.scale.index_label_margin * pixel_ratio,
                width: options.width,
                from_x: options.x + side_padding,
                to_x: options.x + options.width - side_padding,
                from_index: options.start_index,
                to_index: options.end_index,
                notch_scale: options.index_notch_scale,
                index_name_offset: options.index_name_offset,
                pixel_ratio,
            },
        );

        if options.min_index != options.max_index {
            let domain = options.max_index - options.min_index;
            self.map_selector.draw(
                canvas,
                theme,
                MapSelectorOptions {
                    x: options.x + side_padding,
                    y: options.y + options.height - (theme.map.height + theme.map.bottom) * pixel_ratio,
                    width: options.width - side_padding * 2.0,
                    height: theme.map.height * pixel_ratio,
                    from: (options.start_index - options.min_index) / domain,
                    to: (options.end_index - options.min_index) / domain,
                    pixel_ratio,
                },
            );
        }
    }
}
