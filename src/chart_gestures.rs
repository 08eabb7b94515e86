//! Chart specific gestures: dragging the map selector and hovering the lines.

use crate::geometry::{is_in_rectangle, Rect};
use crate::gesture::{
    DragEvent, DragSession, ElementId, EventResponse, EventTarget, HoverEvent, HoverWatcher, InputEvent,
    InputKind,
};
use crate::layout::ChartLayout;
use crate::theme::ChartTheme;
use glam::DVec2;
use std::rc::Rc;
use tracing::debug;

/// How far the boundary grips reach outside the selection, in logical pixels.
pub const MAP_GRIP_OUTSIDE_OFFSET: f64 = 30.0;
/// How far the boundary grips reach inside the selection.
pub const MAP_GRIP_INSIDE_OFFSET: f64 = 0.0;
/// Extra height of the map hit zones above and below the map.
pub const MAP_GRIP_VERTICAL_OFFSET: f64 = 10.0;
/// Extra width of the lines hover zone on both sides.
pub const MAP_LINES_SIDE_OFFSET: f64 = 10.0;

/// Selection bounds relative to the whole domain, from 0 to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartGestureState {
    pub map_selector_start: f64,
    pub map_selector_end: f64,
}

/// What the user asked for. The relative positions may fall outside `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartGestureAction {
    MapSelectorStart(f64),
    MapSelectorMiddle(f64),
    MapSelectorEnd(f64),
    /// The pointer position over the lines relative to their width, `None` when the hover ends.
    DetailsPosition(Option<f64>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MapZone {
    Start,
    Middle,
    End,
}

struct MapDrag {
    session: DragSession,
    x_offset: f64,
}

pub struct ChartGestures {
    element: ElementId,
    theme: Rc<ChartTheme>,
    origin: DVec2,
    layout: ChartLayout,
    state: ChartGestureState,
    start_drag: Option<MapDrag>,
    middle_drag: Option<MapDrag>,
    end_drag: Option<MapDrag>,
    hover: HoverWatcher,
    destroyed: bool,
}

impl ChartGestures {
    pub fn new(element: ElementId, theme: Rc<ChartTheme>, state: ChartGestureState) -> Self {
        Self {
            element,
            theme,
            origin: DVec2::ZERO,
            layout: ChartLayout::default(),
            state,
            start_drag: None,
            middle_drag: None,
            end_drag: None,
            hover: HoverWatcher::new(EventTarget::Element(element)),
            destroyed: false,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn set_chart_state(&mut self, state: ChartGestureState) {
        self.state = state;
    }

    pub fn chart_state(&self) -> ChartGestureState {
        self.state
    }

    /// Places the container. `origin` is its top left corner in event coordinates.
    pub fn set_bounds(&mut self, origin: DVec2, layout: ChartLayout) {
        self.origin = origin;
        self.layout = layout;
    }

    pub fn is_dragging(&self) -> bool {
        self.start_drag.is_some() || self.middle_drag.is_some() || self.end_drag.is_some()
    }

    /// Drops every drag session and the hover. Later events are ignored.
    pub fn destroy(&mut self) {
        self.start_drag = None;
        self.middle_drag = None;
        self.end_drag = None;
        self.hover = HoverWatcher::new(EventTarget::Element(self.element));
        self.destroyed = true;
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> (Vec<ChartGestureAction>, EventResponse) {
        let mut actions = Vec::new();
        let mut response = EventResponse::default();
        if self.destroyed {
            return (actions, response);
        }

        self.feed_drags(event, &mut actions);

        if event.target == EventTarget::Element(self.element) {
            match &event.kind {
                InputKind::MouseDown(position) => {
                    let relative = self.relative(*position);
                    if let Some(zone) = self.hit_test(relative) {
                        self.start_map_drag(zone, relative.x, DragSession::mouse());
                    }
                }
                InputKind::TouchStart(touches) => {
                    for touch in touches {
                        let relative = self.relative(touch.position);
                        if let Some(zone) = self.hit_test(relative) {
                            let session = DragSession::touch(touch.identifier, EventTarget::Window);
                            if self.start_map_drag(zone, relative.x, session) {
                                response.prevent_default = true;
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        let lines = self.layout.main_lines_bounds(&self.theme);
        let hover_zone = lines.inflate(MAP_LINES_SIDE_OFFSET, 0.0);
        let origin = self.origin;
        let (hover_events, hover_response) = self
            .hover
            .handle_event(event, |position| hover_zone.contains(position - origin));
        response = response.merge(hover_response);

        for hover in hover_events {
            let action = match hover {
                HoverEvent::Move(position) => {
                    let x = position.x - origin.x;
                    ChartGestureAction::DetailsPosition(Some((x - lines.x) / non_zero(lines.width)))
                }
                HoverEvent::End(_) => ChartGestureAction::DetailsPosition(None),
            };
            actions.push(action);
        }

        (actions, response)
    }

    fn relative(&self, position: DVec2) -> DVec2 {
        position - self.origin
    }

    fn map_bounds(&self) -> Rect {
        self.layout.map_bounds(&self.theme)
    }

    fn hit_test(&self, point: DVec2) -> Option<MapZone> {
        let map = self.map_bounds();
        let y = map.y - MAP_GRIP_VERTICAL_OFFSET;
        let height = map.height + MAP_GRIP_VERTICAL_OFFSET * 2.0;
        let start_x = map.x + map.width * self.state.map_selector_start;
        let end_x = map.x + map.width * self.state.map_selector_end;
        let grip_width = MAP_GRIP_INSIDE_OFFSET + MAP_GRIP_OUTSIDE_OFFSET;

        if is_in_rectangle(point, start_x - MAP_GRIP_OUTSIDE_OFFSET, y, grip_width, height) {
            Some(MapZone::Start)
        } else if is_in_rectangle(point, end_x - MAP_GRIP_INSIDE_OFFSET, y, grip_width, height) {
            Some(MapZone::End)
        } else if is_in_rectangle(point, start_x, y, end_x - start_x, height) {
            Some(MapZone::Middle)
        } else {
            None
        }
    }

    /// Returns false when a drag of that zone is already running.
    fn start_map_drag(&mut self, zone: MapZone, x: f64, session: DragSession) -> bool {
        let map = self.map_bounds();
        let boundary = match zone {
            MapZone::Start => self.state.map_selector_start,
            MapZone::End => self.state.map_selector_end,
            MapZone::Middle => (self.state.map_selector_start + self.state.map_selector_end) / 2.0,
        };
        let slot = match zone {
            MapZone::Start => &mut self.start_drag,
            MapZone::Middle => &mut self.middle_drag,
            MapZone::End => &mut self.end_drag,
        };
        if slot.is_some() {
            return false;
        }
        debug!(?zone, pointer = ?session.pointer(), "map selector drag started");
        *slot = Some(MapDrag {
            session,
            x_offset: x - (map.x + boundary * map.width),
        });
        true
    }

    fn feed_drags(&mut self, event: &InputEvent, actions: &mut Vec<ChartGestureAction>) {
        let map = self.map_bounds();
        let origin = self.origin;
        let slots = [
            (MapZone::Start, &mut self.start_drag),
            (MapZone::Middle, &mut self.middle_drag),
            (MapZone::End, &mut self.end_drag),
        ];

        for (zone, slot) in slots {
            let Some(drag) = slot.as_mut() else {
                continue;
            };
            match drag.session.handle_event(event) {
                Some(DragEvent::Move(position)) => {
                    let x = position.x - origin.x;
                    let relative = (x - drag.x_offset - map.x) / non_zero(map.width);
                    actions.push(match zone {
                        MapZone::Start => ChartGestureAction::MapSelectorStart(relative),
                        MapZone::Middle => ChartGestureAction::MapSelectorMiddle(relative),
                        MapZone::End => ChartGestureAction::MapSelectorEnd(relative),
                    });
                }
                Some(DragEvent::End(_)) => {
                    debug!(?zone, "map selector drag ended");
                    *slot = None;
                }
                None => {}
            }
        }
    }
}

fn non_zero(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}
