//! The whole chart, split into layers that are redrawn independently.

use crate::canvas::{RenderList, TextMeasurer};
use crate::data_types::{AnimatedState, LineSet, SelectionRange};
use crate::drawers::chart_main::{ChartMainDrawer, ChartMainOptions};
use crate::drawers::chart_map::{draw_chart_map, ChartMapOptions};
use crate::drawers::chart_x::{ChartXDrawer, ChartXOptions};
use crate::drawers::details_popup::{draw_details_popup, DetailsPopupOptions};
use crate::drawers::or_one;
use crate::layout::ChartLayout;
use crate::memoize::MemoizeLast;
use crate::theme::ChartTheme;
use std::rc::Rc;
use tracing::trace;

/// Everything a frame is drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    pub lines: LineSet,
    pub layout: ChartLayout,
    pub min_index: f64,
    pub max_index: f64,
    pub selection: SelectionRange,
    pub state: AnimatedState,
    pub index_name_offset: f64,
    pub details_popup_width: f64,
    pub details_popup_value_precision: Option<u32>,
}

/// The recorded layers of one frame, painted bottom to top: `map`, `main`, `x`, `popup`.
///
/// `main`, `x` and `popup` cover the whole container. `map` covers the map bounds only. A layer that
/// didn't change keeps the same allocation as in the previous frame.
#[derive(Clone, Debug)]
pub struct ChartLayers {
    pub main: Rc<RenderList>,
    pub x: Rc<RenderList>,
    pub popup: Rc<RenderList>,
    pub map: Rc<RenderList>,
}

impl ChartLayers {
    pub fn empty(measurer: Rc<dyn TextMeasurer>) -> Self {
        let empty = Rc::new(RenderList::new(measurer));
        Self {
            main: empty.clone(),
            x: empty.clone(),
            popup: empty.clone(),
            map: empty,
        }
    }
}

pub struct ChartDrawer {
    theme: Rc<ChartTheme>,
    measurer: Rc<dyn TextMeasurer>,
    main: ChartMainDrawer,
    x: ChartXDrawer,
    main_layer: MemoizeLast<ChartMainOptions, Rc<RenderList>>,
    x_layer: MemoizeLast<ChartXOptions, Rc<RenderList>>,
    popup_layer: MemoizeLast<Option<DetailsPopupOptions>, Rc<RenderList>>,
    map_layer: MemoizeLast<ChartMapOptions, Rc<RenderList>>,
}

impl ChartDrawer {
    /// Fails when the theme can't be rendered with.
    pub fn new(theme: Rc<ChartTheme>, measurer: Rc<dyn TextMeasurer>) -> eyre::Result<Self> {
        theme.validate()?;
        Ok(Self {
            main: ChartMainDrawer::new(measurer.clone()),
            x: ChartXDrawer::new(measurer.clone()),
            theme,
            measurer,
            main_layer: MemoizeLast::new(),
            x_layer: MemoizeLast::new(),
            popup_layer: MemoizeLast::new(),
            map_layer: MemoizeLast::new(),
        })
    }

    pub fn theme(&self) -> &Rc<ChartTheme> {
        &self.theme
    }

    pub fn draw(&mut self, frame: &ChartFrame) -> ChartLayers {
        let theme = &*self.theme;
        let pixel_ratio = frame.layout.pixel_ratio;
        let (canvas_width, canvas_height) = frame.layout.main_canvas_size();
        let (map_width, map_height) = frame.layout.map_canvas_size(theme);
        let state = &frame.state;

        let main_section_y = theme.layout.main_top_margin * pixel_ratio;
        let main_section_height = canvas_height
            - (theme.layout.main_lines_bottom_margin + theme.map.height + theme.map.bottom) * pixel_ratio
            - main_section_y;

        let main_options = ChartMainOptions {
            lines: frame.lines.clone(),
            line_opacities: state.line_opacities.clone(),
            x: 0.0,
            y: main_section_y,
            width: canvas_width,
            height: main_section_height,
            min_value: state.main_value.min(),
            max_value: state.main_value.max(),
            value_notch_scale: state.main_value_notch_scale,
            start_index: frame.selection.start_index,
            end_index: frame.selection.end_index,
            details_index: state.details_position.index,
            details_opacity: state.details_opacity,
            pixel_ratio,
        };
        let main_drawer = &mut self.main;
        let measurer = self.measurer.clone();
        let main = self.main_layer.get(main_options, |options| {
            trace!("redrawing the main layer");
            let mut list = RenderList::new(measurer);
            main_drawer.draw(&mut list, theme, options);
            Rc::new(list)
        });
        let main = main.clone();

        let x_options = ChartXOptions {
            x: 0.0,
            y: main_section_y + main_section_height,
            width: canvas_width,
            height: canvas_height - main_section_y - main_section_height,
            min_index: frame.min_index,
            max_index: frame.max_index,
            start_index: frame.selection.start_index,
            end_index: frame.selection.end_index,
            index_notch_scale: state.index_notch_scale,
            index_name_offset: frame.index_name_offset,
            pixel_ratio,
        };
        let x_drawer = &mut self.x;
        let measurer = self.measurer.clone();
        let x = self
            .x_layer
            .get(x_options, |options| {
                trace!("redrawing the index layer");
                let mut list = RenderList::new(measurer);
                x_drawer.draw(&mut list, theme, options);
                Rc::new(list)
            })
            .clone();

        let popup_options = (state.details_opacity > 0.0).then(|| DetailsPopupOptions {
            lines: frame.lines.clone(),
            line_opacities: state.details_line_opacities.clone(),
            x: details_popup_x(theme, frame, canvas_width).round(),
            y: theme.popup.y * pixel_ratio,
            width: frame.details_popup_width,
            index: state.details_position.index,
            opacity: state.details_opacity,
            index_name_offset: frame.index_name_offset,
            value_precision: frame.details_popup_value_precision,
            pixel_ratio,
        });
        let measurer = self.measurer.clone();
        let popup = self
            .popup_layer
            .get(popup_options, |options| {
                let mut list = RenderList::new(measurer);
                if let Some(options) = options {
                    draw_details_popup(&mut list, theme, options);
                }
                Rc::new(list)
            })
            .clone();

        let map_options = ChartMapOptions {
            lines: frame.lines.clone(),
            line_opacities: state.line_opacities.clone(),
            canvas_width: map_width,
            canvas_height: map_height,
            min_index: frame.min_index,
            max_index: frame.max_index,
            min_value: state.map_value.min(),
            max_value: state.map_value.max(),
            pixel_ratio,
        };
        let measurer = self.measurer.clone();
        let map = self
            .map_layer
            .get(map_options, |options| {
                trace!("redrawing the map layer");
                let mut list = RenderList::new(measurer);
                draw_chart_map(&mut list, theme, options);
                Rc::new(list)
            })
            .clone();

        ChartLayers { main, x, popup, map }
    }
}

/// The left edge of the popup in device pixels.
///
/// The popup sits left of the pointer line at `align` 0 and right of it at 1, never closer to the
/// canvas edges than the theme allows.
pub fn details_popup_x(theme: &ChartTheme, frame: &ChartFrame, canvas_width: f64) -> f64 {
    let pixel_ratio = frame.layout.pixel_ratio;
    let style = &theme.popup;
    let side_padding = theme.layout.side_padding * pixel_ratio;
    let selection = frame.selection;
    let position = frame.state.details_position;

    let pointer_x = side_padding
        + (canvas_width - side_padding * 2.0) * (position.index - selection.start_index)
            / or_one(selection.length());
    let x_on_left_align = (style.min_distance_to_edge * pixel_ratio)
        .max(pointer_x - (frame.details_popup_width + style.x_margin) * pixel_ratio);
    let x_on_right_align = (canvas_width
        - (style.min_distance_to_edge + frame.details_popup_width) * pixel_ratio)
        .min(pointer_x + style.x_margin * pixel_ratio);

    x_on_left_align * (1.0 - position.align) + x_on_right_align * position.align
}
