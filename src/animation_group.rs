//! Drives an [`Animation`] on the host's display refresh loop.

use crate::transition::Animation;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::trace;

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Identifies one frame request. Handles are never reused by a scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// The host's "call me on the next refresh" primitive.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Default)]
struct FrameQueue {
    next_id: u64,
    requested: Vec<FrameHandle>,
}

/// A scheduler that only records requests. The host drains it once per refresh and hands every handle
/// back to the owner of the animation group. Clones share the same queue.
#[derive(Clone, Debug, Default)]
pub struct QueuedFrameScheduler {
    queue: Rc<RefCell<FrameQueue>>,
}

impl QueuedFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().requested.is_empty()
    }

    /// Removes and returns the frames requested since the last drain.
    pub fn drain(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.queue.borrow_mut().requested)
    }
}

impl FrameScheduler for QueuedFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle(queue.next_id);
        queue.requested.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.borrow_mut().requested.retain(|h| *h != handle);
    }
}

/// Runs a set of animations with at most one outstanding frame request.
///
/// A frame is requested while anything is still moving. Frames other than the one currently awaited are
/// ignored, which makes a tick that was already in flight at teardown harmless.
pub struct AnimationGroup<A: Animation> {
    animations: A,
    scheduler: Box<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
    pending: Option<FrameHandle>,
    destroyed: bool,
}

impl<A: Animation> AnimationGroup<A> {
    pub fn new(animations: A, scheduler: Box<dyn FrameScheduler>, clock: Rc<dyn Clock>) -> Self {
        Self {
            animations,
            scheduler,
            clock,
            pending: None,
            destroyed: false,
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Sets new targets. `is_initial` applies them instantly and requests no frame.
    pub fn move_to(&mut self, targets: A::Target, is_initial: bool) {
        if self.destroyed {
            return;
        }
        let now = self.clock.now();
        self.animations.move_to(targets, is_initial, now);
        if !is_initial && self.pending.is_none() && !self.animations.is_finished(now) {
            self.update_on_next_frame();
        }
    }

    /// Requests a frame even if nothing moves, e.g. after a resize.
    pub fn update_on_next_frame(&mut self) {
        if self.destroyed || self.pending.is_some() {
            return;
        }
        let handle = self.scheduler.request_frame();
        trace!(frame = handle.0, "animation frame requested");
        self.pending = Some(handle);
    }

    pub fn state(&self) -> A::State {
        self.animations.state(self.clock.now())
    }

    pub fn is_finished(&self) -> bool {
        self.animations.is_finished(self.clock.now())
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Handles a refresh tick. Returns the state to render, or `None` when the tick is stale.
    ///
    /// The next frame is requested before the state is handed out, so an unfinished animation keeps
    /// ticking.
    pub fn take_frame(&mut self, handle: FrameHandle) -> Option<A::State> {
        if self.destroyed || self.pending != Some(handle) {
            return None;
        }
        self.pending = None;

        let now = self.clock.now();
        if !self.animations.is_finished(now) {
            self.update_on_next_frame();
        }
        Some(self.animations.state(now))
    }

    /// [`Self::take_frame`] followed by `on_update` when the tick was live.
    pub fn run_frame(&mut self, handle: FrameHandle, on_update: impl FnOnce(&A::State)) -> bool {
        match self.take_frame(handle) {
            Some(state) => {
                on_update(&state);
                true
            }
            None => false,
        }
    }

    /// Cancels the pending frame. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.pending.take() {
            trace!(frame = handle.0, "animation frame cancelled");
            self.scheduler.cancel_frame(handle);
        }
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
