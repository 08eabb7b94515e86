//! Pointer and touch gesture tracking.
//!
//! Watchers are fed raw [`InputEvent`]s by the owner and report what happened as return values. A watcher
//! never holds callbacks, so dropping it detaches it.

use crate::geometry::is_in_circle;
use glam::DVec2;
use std::time::{Duration, Instant};
use tracing::trace;

pub type ElementId = u64;

/// Where an event was dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTarget {
    /// Anywhere in the window, outside any tracked element.
    Window,
    Element(ElementId),
}

impl EventTarget {
    /// Whether a listener registered on `scope` receives events dispatched to `self`.
    pub fn is_within(&self, scope: EventTarget) -> bool {
        match scope {
            EventTarget::Window => true,
            EventTarget::Element(id) => *self == EventTarget::Element(id),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub identifier: i64,
    pub position: DVec2,
}

impl Touch {
    pub fn new(identifier: i64, x: f64, y: f64) -> Self {
        Self {
            identifier,
            position: DVec2::new(x, y),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    MouseDown(DVec2),
    MouseMove(DVec2),
    MouseUp(DVec2),
    MouseEnter(DVec2),
    MouseLeave(DVec2),
    /// Carries the touches that changed in this event.
    TouchStart(Vec<Touch>),
    TouchMove(Vec<Touch>),
    TouchEnd(Vec<Touch>),
    TouchCancel(Vec<Touch>),
    ContextMenu,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    pub target: EventTarget,
    pub kind: InputKind,
}

/// Identity of a pointer across events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(i64),
}

impl InputEvent {
    pub fn new(target: EventTarget, kind: InputKind) -> Self {
        Self { target, kind }
    }

    pub fn on_element(id: ElementId, kind: InputKind) -> Self {
        Self::new(EventTarget::Element(id), kind)
    }

    pub fn on_window(kind: InputKind) -> Self {
        Self::new(EventTarget::Window, kind)
    }

    pub fn is_mouse(&self) -> bool {
        matches!(
            self.kind,
            InputKind::MouseDown(_)
                | InputKind::MouseMove(_)
                | InputKind::MouseUp(_)
                | InputKind::MouseEnter(_)
                | InputKind::MouseLeave(_)
        )
    }

    /// Splits the event into one `(pointer, position)` entry per pointer it concerns.
    pub fn sub_events(&self) -> Vec<(PointerId, DVec2)> {
        match &self.kind {
            InputKind::MouseDown(p)
            | InputKind::MouseMove(p)
            | InputKind::MouseUp(p)
            | InputKind::MouseEnter(p)
            | InputKind::MouseLeave(p) => vec![(PointerId::Mouse, *p)],
            InputKind::TouchStart(touches)
            | InputKind::TouchMove(touches)
            | InputKind::TouchEnd(touches)
            | InputKind::TouchCancel(touches) => touches
                .iter()
                .map(|t| (PointerId::Touch(t.identifier), t.position))
                .collect(),
            InputKind::ContextMenu => Vec::new(),
        }
    }
}

/// What the host should do with the native event after the watchers saw it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
}

impl EventResponse {
    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
        }
    }

    pub fn merge(self, other: EventResponse) -> EventResponse {
        EventResponse {
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    Move(DVec2),
    End(DVec2),
}

/// Follows one pointer from press to release.
///
/// A mouse session listens globally, so the drag survives leaving the element. A touch session only
/// reacts to its own touch identifier within `scope`. The session reports a single `End` and goes quiet.
#[derive(Clone, Debug)]
pub struct DragSession {
    pointer: PointerId,
    scope: EventTarget,
    finished: bool,
}

impl DragSession {
    pub fn mouse() -> Self {
        Self {
            pointer: PointerId::Mouse,
            scope: EventTarget::Window,
            finished: false,
        }
    }

    pub fn touch(identifier: i64, scope: EventTarget) -> Self {
        Self {
            pointer: PointerId::Touch(identifier),
            scope,
            finished: false,
        }
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Option<DragEvent> {
        if self.finished {
            return None;
        }

        let result = match (self.pointer, &event.kind) {
            (PointerId::Mouse, InputKind::MouseMove(p)) => Some(DragEvent::Move(*p)),
            (PointerId::Mouse, InputKind::MouseUp(p)) => Some(DragEvent::End(*p)),
            (PointerId::Mouse, InputKind::MouseLeave(p)) if event.target == EventTarget::Window => {
                Some(DragEvent::End(*p))
            }
            (PointerId::Touch(id), InputKind::TouchMove(touches)) if event.target.is_within(self.scope) => {
                find_touch(touches, id).map(DragEvent::Move)
            }
            (PointerId::Touch(id), InputKind::TouchEnd(touches) | InputKind::TouchCancel(touches))
                if event.target.is_within(self.scope) =>
            {
                find_touch(touches, id).map(DragEvent::End)
            }
            _ => None,
        };

        if let Some(DragEvent::End(_)) = result {
            trace!(pointer = ?self.pointer, "drag session ended");
            self.finished = true;
        }
        result
    }
}

fn find_touch(touches: &[Touch], identifier: i64) -> Option<DVec2> {
    touches
        .iter()
        .find(|t| t.identifier == identifier)
        .map(|t| t.position)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoverEvent {
    Move(DVec2),
    End(DVec2),
}

/// Tracks at most one hovering pointer over an element.
#[derive(Clone, Debug)]
pub struct HoverWatcher {
    scope: EventTarget,
    hover_id: Option<PointerId>,
}

impl HoverWatcher {
    pub fn new(scope: EventTarget) -> Self {
        Self {
            scope,
            hover_id: None,
        }
    }

    pub fn hover_id(&self) -> Option<PointerId> {
        self.hover_id
    }

    /// `check_hover` decides per position whether it counts as hovering.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        mut check_hover: impl FnMut(DVec2) -> bool,
    ) -> (Vec<HoverEvent>, EventResponse) {
        let mut events = Vec::new();
        let mut response = EventResponse::default();
        if !event.target.is_within(self.scope) {
            return (events, response);
        }

        match event.kind {
            InputKind::MouseEnter(_)
            | InputKind::MouseMove(_)
            | InputKind::TouchStart(_)
            | InputKind::TouchMove(_) => {
                for (id, position) in event.sub_events() {
                    if self.hover_id.is_none() || self.hover_id == Some(id) {
                        if check_hover(position) {
                            self.hover_id = Some(id);
                            events.push(HoverEvent::Move(position));
                        } else if self.hover_id.is_some() {
                            self.hover_id = None;
                            events.push(HoverEvent::End(position));
                        }
                    }
                }
            }
            InputKind::MouseLeave(_) | InputKind::TouchEnd(_) | InputKind::TouchCancel(_) => {
                for (id, position) in event.sub_events() {
                    if self.hover_id == Some(id) {
                        // Keeps touch devices from synthesizing a mouse hover that never ends
                        response.prevent_default = true;
                        self.hover_id = None;
                        events.push(HoverEvent::End(position));
                    }
                }
            }
            _ => {}
        }

        (events, response)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapEvent {
    Short,
    Long,
}

pub const DEFAULT_LONG_TAP_TIME: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_TAP_DISTANCE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum TapState {
    Idle,
    Pressing {
        pointer: PointerId,
        start: DVec2,
        deadline: Instant,
    },
}

/// Tells short taps from long presses.
///
/// The long tap fires from [`LongTapWatcher::poll`], which the owner calls when
/// [`LongTapWatcher::deadline`] passes. Moving further than the tap distance abandons the tap silently.
#[derive(Clone, Debug)]
pub struct LongTapWatcher {
    scope: EventTarget,
    long_tap_time: Duration,
    max_tap_distance: f64,
    state: TapState,
}

impl LongTapWatcher {
    pub fn new(scope: EventTarget) -> Self {
        Self::with_limits(scope, DEFAULT_LONG_TAP_TIME, DEFAULT_MAX_TAP_DISTANCE)
    }

    pub fn with_limits(scope: EventTarget, long_tap_time: Duration, max_tap_distance: f64) -> Self {
        Self {
            scope,
            long_tap_time,
            max_tap_distance,
            state: TapState::Idle,
        }
    }

    pub fn is_pressing(&self) -> bool {
        matches!(self.state, TapState::Pressing { .. })
    }

    /// When the pending long tap fires, if a press is in progress.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TapState::Pressing { deadline, .. } => Some(deadline),
            TapState::Idle => None,
        }
    }

    /// Fires the long tap once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<TapEvent> {
        match self.state {
            TapState::Pressing { deadline, .. } if now >= deadline => {
                self.state = TapState::Idle;
                Some(TapEvent::Long)
            }
            _ => None,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: Instant) -> (Option<TapEvent>, EventResponse) {
        // A timer that expired before this event was delivered wins over it.
        let expired = self.poll(now);
        let mut tap = None;
        let mut response = EventResponse::default();
        let in_scope = event.target.is_within(self.scope);
        let pressing_mouse = matches!(
            self.state,
            TapState::Pressing {
                pointer: PointerId::Mouse,
                ..
            }
        );

        match event.kind {
            InputKind::MouseDown(_) | InputKind::TouchStart(_) if in_scope => {
                for (pointer, position) in event.sub_events() {
                    self.state = TapState::Pressing {
                        pointer,
                        start: position,
                        deadline: now + self.long_tap_time,
                    };
                    if pointer == PointerId::Mouse {
                        response.prevent_default = true;
                    }
                }
            }
            InputKind::TouchMove(_) if in_scope => self.handle_move(event),
            InputKind::MouseMove(_) if pressing_mouse => self.handle_move(event),
            InputKind::TouchEnd(_) | InputKind::TouchCancel(_) if in_scope => {
                response.prevent_default = true;
                tap = self.handle_end(event);
            }
            InputKind::MouseUp(_) if pressing_mouse => {
                response.prevent_default = true;
                tap = self.handle_end(event);
            }
            // Suppresses the OS menu a long press would open
            InputKind::ContextMenu if in_scope => response.prevent_default = true,
            _ => {}
        }

        (expired.or(tap), response)
    }

    fn handle_move(&mut self, event: &InputEvent) {
        if let TapState::Pressing { pointer, start, .. } = self.state {
            for (id, position) in event.sub_events() {
                if id == pointer && !is_in_circle(position, start, self.max_tap_distance) {
                    self.state = TapState::Idle;
                    break;
                }
            }
        }
    }

    fn handle_end(&mut self, event: &InputEvent) -> Option<TapEvent> {
        if let TapState::Pressing { pointer, .. } = self.state {
            if event.sub_events().iter().any(|(id, _)| *id == pointer) {
                self.state = TapState::Idle;
                return Some(TapEvent::Short);
            }
        }
        None
    }

    pub fn cancel(&mut self) {
        self.state = TapState::Idle;
    }
}
