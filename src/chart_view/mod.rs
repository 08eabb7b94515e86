pub mod input;
pub mod renderer;

use crate::animation_group::{QueuedFrameScheduler, SystemClock};
use crate::controller::{ChartController, ChartHost};
use crate::data_types::{ChartOptions, ChartOptionsPatch, LineSet};
use crate::gesture::InputEvent;
use crate::layout::ChartLayout;
use crate::theme::ChartTheme;
use crate::utils::PixelsExt;
use gpui::prelude::*;
use gpui::{
    canvas, div, App, Bounds, Context, DispatchPhase, MouseButton, MouseDownEvent, MouseExitEvent,
    MouseMoveEvent, MouseUpEvent, Pixels, WeakEntity, Window,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

pub use input::ChartInputHandler;
pub use renderer::{paint_layers, GpuiTextMeasurer};

use self::input::to_dvec;

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// A gpui view hosting one interactive chart.
///
/// The view owns the controller and pumps its frame requests through `on_next_frame`. Mouse events are
/// taken from window listeners so that a drag keeps working outside the chart.
pub struct ChartView {
    controller: ChartController,
    frames: QueuedFrameScheduler,
    input: ChartInputHandler,
    // Container bounds measured during the last paint
    bounds: Rc<Cell<Option<Bounds<Pixels>>>>,
    frame_scheduled: bool,
}

impl ChartView {
    /// Fails when the theme can't be rendered with.
    pub fn new(lines: LineSet, options: ChartOptions, theme: ChartTheme, cx: &App) -> eyre::Result<Self> {
        let element = NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed);
        let frames = QueuedFrameScheduler::new();
        let host = ChartHost {
            theme: Rc::new(theme),
            scheduler: Box::new(frames.clone()),
            clock: Rc::new(SystemClock),
            measurer: Rc::new(GpuiTextMeasurer::new(cx)),
        };
        let controller = ChartController::new(element, lines, options, host)?;
        debug!(element, lines = controller.lines().len(), "chart view created");

        Ok(Self {
            controller,
            frames,
            input: ChartInputHandler::new(element),
            bounds: Rc::new(Cell::new(None)),
            frame_scheduled: false,
        })
    }

    pub fn controller(&self) -> &ChartController {
        &self.controller
    }

    pub fn set_lines(
        &mut self,
        lines: LineSet,
        index_name_offset: f64,
        min_selection_length: f64,
        max_selection_length: f64,
        cx: &mut Context<Self>,
    ) -> eyre::Result<()> {
        self.controller
            .set_lines(lines, index_name_offset, min_selection_length, max_selection_length)?;
        cx.notify();
        Ok(())
    }

    pub fn set_options(&mut self, patch: ChartOptionsPatch, cx: &mut Context<Self>) {
        self.controller.set_options(patch);
        cx.notify();
    }

    /// Feeds already translated events to the controller.
    pub fn handle_input_events(&mut self, events: &[InputEvent], window: &mut Window, cx: &mut Context<Self>) {
        let mut prevent_default = false;
        for event in events {
            prevent_default |= self.controller.handle_input(event).prevent_default;
        }
        if prevent_default {
            cx.stop_propagation();
        }
        self.schedule_frames(window, cx);
    }

    fn sync_layout(&mut self, window: &Window) {
        let Some(bounds) = self.bounds.get() else {
            return;
        };
        self.controller.set_origin(to_dvec(bounds.origin));
        self.controller.set_layout(ChartLayout::new(
            bounds.size.width.as_f32() as f64,
            bounds.size.height.as_f32() as f64,
            window.scale_factor() as f64,
        ));
    }

    /// Hands the pending frame requests to gpui. At most one callback is outstanding.
    fn schedule_frames(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.frame_scheduled || !self.frames.has_pending() {
            return;
        }
        self.frame_scheduled = true;
        cx.on_next_frame(window, |this, window, cx| {
            this.frame_scheduled = false;
            let mut redrawn = false;
            for handle in this.frames.drain() {
                redrawn |= this.controller.handle_frame(handle);
            }
            if redrawn {
                cx.notify();
            }
            this.schedule_frames(window, cx);
        });
    }
}

fn register_mouse_listeners(view: WeakEntity<ChartView>, bounds: Bounds<Pixels>, window: &mut Window) {
    window.on_mouse_event({
        let view = view.clone();
        move |event: &MouseDownEvent, phase, window, cx| {
            if phase != DispatchPhase::Bubble || event.button != MouseButton::Left {
                return;
            }
            let _ = view.update(cx, |this, cx| {
                let events = this.input.mouse_down_at(event.position, bounds);
                this.handle_input_events(&events, window, cx);
            });
        }
    });
    window.on_mouse_event({
        let view = view.clone();
        move |event: &MouseMoveEvent, phase, window, cx| {
            if phase != DispatchPhase::Bubble {
                return;
            }
            let _ = view.update(cx, |this, cx| {
                let events = this.input.mouse_move_at(event.position, bounds);
                this.handle_input_events(&events, window, cx);
            });
        }
    });
    window.on_mouse_event({
        let view = view.clone();
        move |event: &MouseUpEvent, phase, window, cx| {
            if phase != DispatchPhase::Bubble || event.button != MouseButton::Left {
                return;
            }
            let _ = view.update(cx, |this, cx| {
                let events = this.input.mouse_up_at(event.position, bounds);
                this.handle_input_events(&events, window, cx);
            });
        }
    });
    window.on_mouse_event(move |event: &MouseExitEvent, phase, window, cx| {
        if phase != DispatchPhase::Bubble {
            return;
        }
        let _ = view.update(cx, |this, cx| {
            let events = this.input.mouse_exit(to_dvec(event.position));
            this.handle_input_events(&events, window, cx);
        });
    });
}

impl Render for ChartView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.sync_layout(window);
        self.schedule_frames(window, cx);

        let layers = self.controller.layers().clone();
        let theme = self.controller.theme().clone();
        let layout = self.controller.layout();
        let measured = self.bounds.clone();
        let view = cx.entity().downgrade();
        let entity_id = cx.entity_id();

        div()
            .id(("chart-view", entity_id))
            .size_full()
            .relative()
            .bg(theme.background_color.to_hsla(1.0))
            .child(
                canvas(
                    move |_, _, _| {},
                    move |bounds, (), window, cx| {
                        if measured.replace(Some(bounds)) != Some(bounds) {
                            // Laid out for another size, the next render picks the new one up
                            window.refresh();
                        }
                        paint_layers(window, cx, bounds, &layers, &theme, layout);
                        register_mouse_listeners(view.clone(), bounds, window);
                    },
                )
                .size_full(),
            )
    }
}
