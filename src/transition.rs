//! Passive, time based interpolators.
//!
//! Nothing here owns a timer. Every call takes the `now` of the current tick so a whole frame is computed
//! from one timestamp.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Easing curves applied to the linear progress of a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInCubic,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// A value that moves towards a target over time.
pub trait Animation {
    type State;
    type Target;

    /// The interpolated state at `now`.
    fn state(&self, now: Instant) -> Self::State;

    /// True when the animation no longer needs frames.
    fn is_finished(&self, now: Instant) -> bool;

    /// Sets a new target. The motion starts from the state at `now` unless `instantly` is set.
    fn move_to(&mut self, target: Self::Target, instantly: bool, now: Instant);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionOptions {
    pub duration: Duration,
    pub easing: Easing,
    /// The start value is pulled to at most this distance from the target.
    pub max_distance: f64,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(400),
            easing: Easing::EaseOutCubic,
            max_distance: f64::INFINITY,
        }
    }
}

impl TransitionOptions {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }
}

/// A scalar transition from one value to another.
#[derive(Clone, Debug)]
pub struct Transition {
    start_value: f64,
    start_time: Instant,
    target_value: f64,
    options: TransitionOptions,
}

impl Transition {
    pub fn new(initial_value: f64, now: Instant) -> Self {
        Self::with_options(initial_value, TransitionOptions::default(), now)
    }

    pub fn with_options(initial_value: f64, options: TransitionOptions, now: Instant) -> Self {
        Self {
            start_value: initial_value,
            start_time: now,
            target_value: initial_value,
            options,
        }
    }

    pub fn target(&self) -> f64 {
        self.target_value
    }

    fn stage(&self, now: Instant) -> f64 {
        let duration = self.options.duration.as_secs_f64();
        if duration <= 0.0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time).as_secs_f64();
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

impl Animation for Transition {
    type State = f64;
    type Target = f64;

    fn state(&self, now: Instant) -> f64 {
        let stage = self.stage(now);
        if stage >= 1.0 {
            return self.target_value;
        }
        self.start_value + (self.target_value - self.start_value) * self.options.easing.apply(stage)
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.start_value == self.target_value || self.stage(now) >= 1.0
    }

    fn move_to(&mut self, value: f64, instantly: bool, now: Instant) {
        if value == self.target_value {
            return;
        }

        let start_value = if instantly { value } else { self.state(now) };
        let max_distance = self.options.max_distance;
        self.start_value = if start_value < value {
            start_value.max(value - max_distance)
        } else {
            start_value.min(value + max_distance)
        };
        self.start_time = now;
        self.target_value = value;
    }
}

/// A homogeneous set of animations addressed by position.
#[derive(Clone, Debug)]
pub struct TransitionGroup<A> {
    members: Vec<A>,
}

impl<A: Animation> TransitionGroup<A> {
    pub fn new(members: Vec<A>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<A: Animation> Animation for TransitionGroup<A> {
    type State = Vec<A::State>;
    /// `(key, target)` pairs. Unknown keys are ignored.
    type Target = Vec<(usize, A::Target)>;

    fn state(&self, now: Instant) -> Self::State {
        self.members.iter().map(|member| member.state(now)).collect()
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.members.iter().all(|member| member.is_finished(now))
    }

    fn move_to(&mut self, targets: Self::Target, instantly: bool, now: Instant) {
        for (key, target) in targets {
            if let Some(member) = self.members.get_mut(key) {
                member.move_to(target, instantly, now);
            }
        }
    }
}

/// A pair of animations moved together. Either side of the target may be omitted.
impl<A: Animation, B: Animation> Animation for (A, B) {
    type State = (A::State, B::State);
    type Target = (Option<A::Target>, Option<B::Target>);

    fn state(&self, now: Instant) -> Self::State {
        (self.0.state(now), self.1.state(now))
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.0.is_finished(now) && self.1.is_finished(now)
    }

    fn move_to(&mut self, (first, second): Self::Target, instantly: bool, now: Instant) {
        if let Some(first) = first {
            self.0.move_to(first, instantly, now);
        }
        if let Some(second) = second {
            self.1.move_to(second, instantly, now);
        }
    }
}

const EXPONENTIAL_MIN_VALUE: f64 = 1e-12;

/// Animates the power of a value, a good fit for zoom levels and spans.
#[derive(Clone, Debug)]
pub struct ExponentialTransition {
    power: Transition,
    min_value: f64,
}

impl ExponentialTransition {
    pub fn new(initial_value: f64, now: Instant) -> Self {
        Self::with_options(initial_value, TransitionOptions::default(), now)
    }

    pub fn with_options(initial_value: f64, options: TransitionOptions, now: Instant) -> Self {
        let min_value = EXPONENTIAL_MIN_VALUE;
        Self {
            power: Transition::with_options(initial_value.max(min_value).ln(), options, now),
            min_value,
        }
    }
}

impl Animation for ExponentialTransition {
    type State = f64;
    type Target = f64;

    fn state(&self, now: Instant) -> f64 {
        self.power.state(now).exp()
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.power.is_finished(now)
    }

    fn move_to(&mut self, value: f64, instantly: bool, now: Instant) {
        self.power.move_to(value.max(self.min_value).ln(), instantly, now);
    }
}

/// The inverse of [`ExponentialTransition`]: animates `e^value` linearly and reads back its logarithm.
#[derive(Clone, Debug)]
pub struct LogarithmicTransition {
    powered: Transition,
}

impl LogarithmicTransition {
    pub fn new(initial_value: f64, now: Instant) -> Self {
        Self::with_options(initial_value, TransitionOptions::default(), now)
    }

    pub fn with_options(initial_value: f64, options: TransitionOptions, now: Instant) -> Self {
        Self {
            powered: Transition::with_options(initial_value.exp(), options, now),
        }
    }
}

impl Animation for LogarithmicTransition {
    type State = f64;
    type Target = f64;

    fn state(&self, now: Instant) -> f64 {
        self.powered.state(now).ln()
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.powered.is_finished(now)
    }

    fn move_to(&mut self, value: f64, instantly: bool, now: Instant) {
        self.powered.move_to(value.exp(), instantly, now);
    }
}

/// Pairs a value with an opacity. The value jumps instead of animating while the opacity is at zero.
#[derive(Clone, Debug)]
pub struct InstantWhenHiddenTransition<A> {
    value: A,
    opacity: Transition,
}

impl<A: Animation> InstantWhenHiddenTransition<A> {
    pub fn new(value: A, opacity: Transition) -> Self {
        Self { value, opacity }
    }
}

impl<A: Animation> Animation for InstantWhenHiddenTransition<A> {
    type State = (A::State, f64);
    /// A `None` value keeps the current value target.
    type Target = (Option<A::Target>, f64);

    fn state(&self, now: Instant) -> Self::State {
        (self.value.state(now), self.opacity.state(now))
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.value.is_finished(now) && self.opacity.is_finished(now)
    }

    fn move_to(&mut self, (value, opacity): Self::Target, instantly: bool, now: Instant) {
        if let Some(value) = value {
            let hidden = self.opacity.state(now) <= 0.0;
            self.value.move_to(value, instantly || hidden, now);
        }
        self.opacity.move_to(opacity, instantly, now);
    }
}
