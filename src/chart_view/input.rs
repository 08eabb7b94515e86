use crate::gesture::{ElementId, InputEvent, InputKind};
use crate::utils::PixelsExt;
use glam::DVec2;
use gpui::{Bounds, Pixels, Point};

pub(crate) fn to_dvec(position: Point<Pixels>) -> DVec2 {
    DVec2::new(position.x.as_f32() as f64, position.y.as_f32() as f64)
}

/// Turns window mouse events into chart input events.
///
/// gpui reports every mouse event to window listeners, so whether the pointer is over the chart is
/// decided here and enter/leave events are synthesized from it.
#[derive(Clone, Debug)]
pub struct ChartInputHandler {
    element: ElementId,
    hovered: bool,
}

impl ChartInputHandler {
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            hovered: false,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn event(&self, inside: bool, kind: InputKind) -> InputEvent {
        if inside {
            InputEvent::on_element(self.element, kind)
        } else {
            InputEvent::on_window(kind)
        }
    }

    /// Emits the enter or leave event when the pointer crossed the chart edge.
    fn track_hover(&mut self, position: DVec2, inside: bool, events: &mut Vec<InputEvent>) {
        match (self.hovered, inside) {
            (false, true) => events.push(InputEvent::on_element(self.element, InputKind::MouseEnter(position))),
            (true, false) => events.push(InputEvent::on_element(self.element, InputKind::MouseLeave(position))),
            _ => {}
        }
        self.hovered = inside;
    }

    pub fn mouse_down(&mut self, position: DVec2, inside: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();
        self.track_hover(position, inside, &mut events);
        events.push(self.event(inside, InputKind::MouseDown(position)));
        events
    }

    pub fn mouse_move(&mut self, position: DVec2, inside: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if inside {
            self.track_hover(position, inside, &mut events);
            events.push(self.event(inside, InputKind::MouseMove(position)));
        } else {
            events.push(self.event(inside, InputKind::MouseMove(position)));
            self.track_hover(position, inside, &mut events);
        }
        events
    }

    pub fn mouse_up(&mut self, position: DVec2, inside: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();
        self.track_hover(position, inside, &mut events);
        events.push(self.event(inside, InputKind::MouseUp(position)));
        events
    }

    /// The pointer left the window.
    pub fn mouse_exit(&mut self, position: DVec2) -> Vec<InputEvent> {
        let mut events = Vec::new();
        self.track_hover(position, false, &mut events);
        events.push(InputEvent::on_window(InputKind::MouseLeave(position)));
        events
    }

    pub fn mouse_down_at(&mut self, position: Point<Pixels>, bounds: Bounds<Pixels>) -> Vec<InputEvent> {
        self.mouse_down(to_dvec(position), bounds.contains(&position))
    }

    pub fn mouse_move_at(&mut self, position: Point<Pixels>, bounds: Bounds<Pixels>) -> Vec<InputEvent> {
        self.mouse_move(to_dvec(position), bounds.contains(&position))
    }

    pub fn mouse_up_at(&mut self, position: Point<Pixels>, bounds: Bounds<Pixels>) -> Vec<InputEvent> {
        self.mouse_up(to_dvec(position), bounds.contains(&position))
    }
}
