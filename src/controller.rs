//! The chart state manager.
//!
//! Data flow: input → state and caches → animation targets → animation frame → drawers.
//!
//! "Index" is the X axis semantic and "value" the Y axis semantic, never pixels.

use crate::animation_group::{AnimationGroup, Clock, FrameHandle, FrameScheduler};
use crate::canvas::TextMeasurer;
use crate::chart_gestures::{ChartGestureAction, ChartGestureState, ChartGestures};
use crate::data_types::{
    AnimatedState, AnimatedTarget, ChartOptions, ChartOptionsPatch, DetailsPosition, LineSet,
    LinesMinMaxCache, SelectionRange, ValueRange, INITIAL_SELECTION_SHARE,
};
use crate::drawers::{ChartDrawer, ChartFrame, ChartLayers};
use crate::gesture::{ElementId, EventResponse, InputEvent};
use crate::layout::ChartLayout;
use crate::scales::{scale_to_fit_range, sub_decimal_scale, value_range_for_fixed_bottom};
use crate::theme::ChartTheme;
use crate::transition::{
    Animation, Easing, ExponentialTransition, InstantWhenHiddenTransition, Transition, TransitionGroup,
    TransitionOptions,
};
use crate::utils::number::in_range;
use crate::utils::series::{fit_range_keeping_length, min_max_on_range, MinMax};
use eyre::bail;
use glam::DVec2;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// The value range the axes show before any line is known.
const DEFAULT_VALUE_MIDDLE: f64 = 0.0;
const DEFAULT_VALUE_SIZE: f64 = 2.0;
const DETAILS_DURATION: Duration = Duration::from_millis(300);

/// What the host provides to a controller.
pub struct ChartHost {
    pub theme: Rc<ChartTheme>,
    pub scheduler: Box<dyn FrameScheduler>,
    pub clock: Rc<dyn Clock>,
    pub measurer: Rc<dyn TextMeasurer>,
}

type DetailsTransition = InstantWhenHiddenTransition<(Transition, Transition)>;

/// Every animated property of a chart.
pub struct ChartAnimations {
    line_opacities: TransitionGroup<Transition>,
    details_line_opacities: TransitionGroup<Transition>,
    map_value_middle: Transition,
    map_value_size: ExponentialTransition,
    main_value_middle: Transition,
    main_value_size: ExponentialTransition,
    main_value_notch_scale: Transition,
    index_notch_scale: Transition,
    details: DetailsTransition,
}

impl ChartAnimations {
    pub fn new(lines_count: usize, max_value_notch_count: f64, now: Instant) -> Self {
        let opacities = || TransitionGroup::new((0..lines_count).map(|_| Transition::new(1.0, now)).collect());
        let main = value_range_for_fixed_bottom(
            DEFAULT_VALUE_MIDDLE - DEFAULT_VALUE_SIZE / 2.0,
            DEFAULT_VALUE_MIDDLE + DEFAULT_VALUE_SIZE / 2.0,
            max_value_notch_count,
        );
        let details_index = TransitionOptions::default()
            .with_duration(DETAILS_DURATION)
            .with_easing(Easing::EaseOutCubic);

        Self {
            line_opacities: opacities(),
            details_line_opacities: opacities(),
            map_value_middle: Transition::new(DEFAULT_VALUE_MIDDLE, now),
            map_value_size: ExponentialTransition::new(DEFAULT_VALUE_SIZE, now),
            main_value_middle: Transition::new((main.min + main.max) / 2.0, now),
            main_value_size: ExponentialTransition::new(main.max - main.min, now),
            main_value_notch_scale: Transition::new(main.notch_scale, now),
            index_notch_scale: Transition::new(0.0, now),
            details: InstantWhenHiddenTransition::new(
                (
                    Transition::with_options(0.0, details_index, now),
                    Transition::new(0.0, now),
                ),
                Transition::with_options(
                    0.0,
                    TransitionOptions::default().with_duration(DETAILS_DURATION),
                    now,
                ),
            ),
        }
    }
}

impl Animation for ChartAnimations {
    type State = AnimatedState;
    type Target = AnimatedTarget;

    fn state(&self, now: Instant) -> AnimatedState {
        let ((index, align), details_opacity) = self.details.state(now);
        AnimatedState {
            line_opacities: self.line_opacities.state(now),
            details_line_opacities: self.details_line_opacities.state(now),
            map_value: ValueRange {
                middle: self.map_value_middle.state(now),
                size: self.map_value_size.state(now),
            },
            main_value: ValueRange {
                middle: self.main_value_middle.state(now),
                size: self.main_value_size.state(now),
            },
            main_value_notch_scale: self.main_value_notch_scale.state(now),
            index_notch_scale: self.index_notch_scale.state(now),
            details_position: DetailsPosition { index, align },
            details_opacity,
        }
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.line_opacities.is_finished(now)
            && self.details_line_opacities.is_finished(now)
            && self.map_value_middle.is_finished(now)
            && self.map_value_size.is_finished(now)
            && self.main_value_middle.is_finished(now)
            && self.main_value_size.is_finished(now)
            && self.main_value_notch_scale.is_finished(now)
            && self.index_notch_scale.is_finished(now)
            && self.details.is_finished(now)
    }

    fn move_to(&mut self, target: AnimatedTarget, instantly: bool, now: Instant) {
        self.line_opacities
            .move_to(target.line_opacities.into_iter().enumerate().collect(), instantly, now);
        self.details_line_opacities.move_to(
            target.details_line_opacities.into_iter().enumerate().collect(),
            instantly,
            now,
        );

        let scalars = [
            (&mut self.map_value_middle, target.map_value_middle),
            (&mut self.main_value_middle, target.main_value_middle),
            (&mut self.main_value_notch_scale, target.main_value_notch_scale),
            (&mut self.index_notch_scale, target.index_notch_scale),
        ];
        for (transition, value) in scalars {
            if let Some(value) = value {
                transition.move_to(value, instantly, now);
            }
        }
        if let Some(size) = target.map_value_size {
            self.map_value_size.move_to(size, instantly, now);
        }
        if let Some(size) = target.main_value_size {
            self.main_value_size.move_to(size, instantly, now);
        }

        let position = target
            .details_position
            .map(|position| (Some(position.index), Some(position.align)));
        self.details.move_to((position, target.details_opacity), instantly, now);
    }
}

pub struct ChartController {
    lines: LineSet,
    options: ChartOptions,
    theme: Rc<ChartTheme>,
    layout: ChartLayout,
    origin: DVec2,
    // User input state
    selection: SelectionRange,
    details_index: Option<f64>,
    // Caches
    lines_min_max: LinesMinMaxCache,
    layers: ChartLayers,
    animations: AnimationGroup<ChartAnimations>,
    gestures: ChartGestures,
    drawer: ChartDrawer,
    destroyed: bool,
}

impl ChartController {
    /// Builds the controller and draws the first frame. Fails when the theme can't be rendered with or a
    /// selection length limit is NaN.
    pub fn new(element: ElementId, lines: LineSet, options: ChartOptions, host: ChartHost) -> eyre::Result<Self> {
        let ChartHost {
            theme,
            scheduler,
            clock,
            measurer,
        } = host;
        check_selection_limits(options.min_selection_length, options.max_selection_length)?;
        let drawer = ChartDrawer::new(theme.clone(), measurer.clone())?;
        let now = clock.now();
        let animations = AnimationGroup::new(
            ChartAnimations::new(lines.len(), theme.scale.max_value_notch_count, now),
            scheduler,
            clock,
        );

        let mut controller = Self {
            lines: LineSet::default(),
            options,
            layout: ChartLayout::default(),
            origin: DVec2::ZERO,
            selection: SelectionRange::default(),
            details_index: None,
            lines_min_max: LinesMinMaxCache::default(),
            layers: ChartLayers::empty(measurer),
            animations,
            gestures: ChartGestures::new(element, theme.clone(), ChartGestureState::default()),
            drawer,
            theme,
            destroyed: false,
        };
        controller.set_lines_state(lines, true);
        let target = controller.animated_target();
        controller.animations.move_to(target, true);
        controller.gestures.set_chart_state(controller.gesture_state());
        let state = controller.animations.state();
        controller.render(&state);
        Ok(controller)
    }

    /// Replaces the lines. The selection keeps its length, clamped to the new length limits, and moves into
    /// the new domain.
    ///
    /// The number of lines must stay the same for the life of the controller.
    pub fn set_lines(
        &mut self,
        lines: LineSet,
        index_name_offset: f64,
        min_selection_length: f64,
        max_selection_length: f64,
    ) -> eyre::Result<()> {
        if self.lines.len() != lines.len() {
            bail!(
                "changing the number of lines is not supported: had {}, got {}",
                self.lines.len(),
                lines.len()
            );
        }
        check_selection_limits(min_selection_length, max_selection_length)?;
        self.options.index_name_offset = index_name_offset;
        self.options.min_selection_length = min_selection_length;
        self.options.max_selection_length = max_selection_length;
        self.set_lines_state(lines, false);
        self.handle_state_change();
        Ok(())
    }

    pub fn set_options(&mut self, patch: ChartOptionsPatch) {
        self.options.apply(patch);
        self.handle_state_change();
    }

    /// The container size in logical pixels and the pixel ratio.
    pub fn set_layout(&mut self, layout: ChartLayout) {
        if layout == self.layout {
            return;
        }
        debug!(width = layout.width, height = layout.height, pixel_ratio = layout.pixel_ratio, "chart resized");
        self.layout = layout;
        self.gestures.set_bounds(self.origin, layout);
        self.handle_state_change();
    }

    /// The top left corner of the container in event coordinates.
    pub fn set_origin(&mut self, origin: DVec2) {
        self.origin = origin;
        self.gestures.set_bounds(origin, self.layout);
    }

    /// Feeds a pointer event to the gestures.
    pub fn handle_input(&mut self, event: &InputEvent) -> EventResponse {
        if self.destroyed {
            return EventResponse::default();
        }
        let (actions, response) = self.gestures.handle_event(event);
        for action in actions {
            match action {
                ChartGestureAction::MapSelectorStart(relative) => self.handle_start_index_move(relative),
                ChartGestureAction::MapSelectorMiddle(relative) => self.handle_index_move(relative),
                ChartGestureAction::MapSelectorEnd(relative) => self.handle_end_index_move(relative),
                ChartGestureAction::DetailsPosition(relative) => self.handle_details_position_move(relative),
            }
        }
        response
    }

    /// Handles a refresh tick. Returns true when the layers were redrawn.
    pub fn handle_frame(&mut self, handle: FrameHandle) -> bool {
        match self.animations.take_frame(handle) {
            Some(state) => {
                self.render(&state);
                true
            }
            None => false,
        }
    }

    /// Moves the selection start to `relative_x` of the domain. The end follows to keep the length
    /// limits.
    pub fn handle_start_index_move(&mut self, relative_x: f64) {
        if self.destroyed {
            return;
        }
        let (min, max) = self.lines.index_range();
        let (min_length, max_length) = self.selection_length_limits();
        let index = min + relative_x * (max - min);
        let start = in_range(min, index, max - min_length);
        let end = in_range(start + min_length, self.selection.end_index, start + max_length);
        self.selection = SelectionRange::new(start, end);
        self.handle_state_change();
    }

    /// Moves the selection end to `relative_x` of the domain. The start follows to keep the length
    /// limits.
    pub fn handle_end_index_move(&mut self, relative_x: f64) {
        if self.destroyed {
            return;
        }
        let (min, max) = self.lines.index_range();
        let (min_length, max_length) = self.selection_length_limits();
        let index = min + relative_x * (max - min);
        let end = in_range(min + min_length, index, max);
        let start = in_range(end - max_length, self.selection.start_index, end - min_length);
        self.selection = SelectionRange::new(start, end);
        self.handle_state_change();
    }

    /// Moves the whole selection so its middle is at `relative_middle_x` of the domain.
    pub fn handle_index_move(&mut self, relative_middle_x: f64) {
        if self.destroyed {
            return;
        }
        let (min, max) = self.lines.index_range();
        let index = min + relative_middle_x * (max - min);
        let length = self.selection.length();
        let start = in_range(min, index - length / 2.0, max - length);
        self.selection = SelectionRange::new(start, start + length);
        self.handle_state_change();
    }

    /// Points the details popup to the sample nearest to `relative_x` of the selection. `None` hides it.
    pub fn handle_details_position_move(&mut self, relative_x: Option<f64>) {
        if self.destroyed {
            return;
        }
        self.details_index = relative_x.map(|relative_x| {
            let (min, max) = self.lines.index_range();
            let index = self.selection.start_index + self.selection.length() * relative_x;
            let lower = self.selection.start_index.ceil().max(min);
            let upper = self.selection.end_index.floor().min(max).max(lower);
            in_range(lower, index.round(), upper)
        });
        self.handle_state_change();
    }

    /// Cancels the pending frame and stops listening to input. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        debug!("chart controller destroyed");
        self.animations.destroy();
        self.gestures.destroy();
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn lines(&self) -> &LineSet {
        &self.lines
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn theme(&self) -> &Rc<ChartTheme> {
        &self.theme
    }

    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    pub fn details_index(&self) -> Option<f64> {
        self.details_index
    }

    /// `(min, max)` of the index domain.
    pub fn index_range(&self) -> (f64, f64) {
        self.lines.index_range()
    }

    pub fn gesture_state(&self) -> ChartGestureState {
        let (min, max) = self.lines.index_range();
        let span = if max - min == 0.0 { 1.0 } else { max - min };
        ChartGestureState {
            map_selector_start: (self.selection.start_index - min) / span,
            map_selector_end: (self.selection.end_index - min) / span,
        }
    }

    /// The value range of the visible lines over the whole domain, `None` when no line is visible.
    pub fn map_value_range(&mut self) -> Option<ValueRange> {
        let lines = self.lines.clone();
        let min_max = self.lines_min_max.get(&lines);
        let total = lines
            .iter()
            .zip(min_max)
            .filter(|(line, _)| line.draw)
            .filter_map(|(_, min_max)| *min_max)
            .reduce(MinMax::merge)?;
        let total = self.clamp_value_range(total);
        Some(ValueRange::from_bounds(total.min, total.max))
    }

    /// The value range of the visible lines within the selection, aligned to the value notches. `None`
    /// when no line is visible. The third item is the notch scale.
    pub fn main_value_range(&self) -> Option<(ValueRange, f64)> {
        let total = self
            .lines
            .iter()
            .filter(|line| line.draw)
            .filter_map(|line| {
                min_max_on_range(&line.values, self.selection.start_index, self.selection.end_index)
            })
            .reduce(MinMax::merge)?;
        let total = self.clamp_value_range(total);
        let fixed = value_range_for_fixed_bottom(total.min, total.max, self.theme.scale.max_value_notch_count);
        Some((ValueRange::from_bounds(fixed.min, fixed.max), fixed.notch_scale))
    }

    pub fn animated_state(&self) -> AnimatedState {
        self.animations.state()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.animations.has_pending_frame()
    }

    /// The layers of the last drawn frame.
    pub fn layers(&self) -> &ChartLayers {
        &self.layers
    }

    fn set_lines_state(&mut self, lines: LineSet, is_initial: bool) {
        debug!(count = lines.len(), is_initial, "lines replaced");
        self.lines = lines;

        let (min, max) = self.lines.index_range();
        let (start, end) = if is_initial {
            let (min_length, max_length) = self.selection_length_limits();
            let default_length = (max - min) * INITIAL_SELECTION_SHARE;
            let length = in_range(
                min_length,
                self.options.initial_selection_length.unwrap_or(default_length),
                max_length,
            );
            (max - length, max)
        } else {
            // The limits may have changed with the lines
            let (min_length, max_length) = self.selection_length_limits();
            let end = self.selection.end_index;
            let length = in_range(min_length, self.selection.length(), max_length);
            fit_range_keeping_length(min, max, end - length, end)
        };
        self.selection = SelectionRange::new(start, end);
        if let Some(index) = self.details_index {
            self.details_index = Some(in_range(min, index, max));
        }
    }

    /// The selection length limits, shrunk to fit the domain.
    fn selection_length_limits(&self) -> (f64, f64) {
        let (min, max) = self.lines.index_range();
        let domain = max - min;
        let min_length = in_range(0.0, self.options.min_selection_length, domain);
        let max_length = in_range(min_length, self.options.max_selection_length, domain);
        (min_length, max_length)
    }

    fn clamp_value_range(&self, range: MinMax) -> MinMax {
        let mut range = range;
        if let Some(max_bottom) = self.options.max_bottom_value {
            range.min = range.min.min(max_bottom);
        }
        if let Some(min_top) = self.options.min_top_value {
            range.max = range.max.max(min_top);
        }
        range
    }

    /// Must be called whenever something the chart shows changes.
    fn handle_state_change(&mut self) {
        if self.destroyed {
            return;
        }
        trace!(
            start = self.selection.start_index,
            end = self.selection.end_index,
            details = ?self.details_index,
            "chart state changed"
        );
        let target = self.animated_target();
        self.animations.move_to(target, false);
        // Nothing may be moving, e.g. after a resize
        self.animations.update_on_next_frame();
        self.gestures.set_chart_state(self.gesture_state());
    }

    fn animated_target(&mut self) -> AnimatedTarget {
        let mut target = AnimatedTarget {
            line_opacities: self.lines.iter().map(|line| opacity(line.draw)).collect(),
            details_line_opacities: self
                .lines
                .iter()
                .map(|line| opacity(line.draw && line.show_in_popup))
                .collect(),
            index_notch_scale: Some(self.index_notch_scale()),
            details_position: self.details_position(),
            ..AnimatedTarget::default()
        };
        target.details_opacity = opacity(target.details_position.is_some());

        if let Some(range) = self.map_value_range() {
            target.map_value_middle = Some(range.middle);
            // Don't shrink the chart when every line is disabled or flat
            if range.size != 0.0 {
                target.map_value_size = Some(range.size);
            }
        }

        if let Some((range, notch_scale)) = self.main_value_range() {
            target.main_value_middle = Some(range.middle);
            if range.size != 0.0 {
                target.main_value_size = Some(range.size);
                target.main_value_notch_scale = Some(notch_scale);
            }
        }

        target
    }

    fn index_notch_scale(&self) -> f64 {
        let style = &self.theme.scale;
        let available_width = self.layout.width - self.theme.layout.side_padding * 2.0;
        let max_notch_count = (available_width / style.min_space_for_notch).max(1.0);
        // Notches are never closer than one index apart
        sub_decimal_scale(1.0, true).max(scale_to_fit_range(self.selection.length(), max_notch_count))
    }

    fn details_position(&self) -> Option<DetailsPosition> {
        let index = self.details_index?;
        let span = self.selection.length();
        let relative = (index - self.selection.start_index) / if span == 0.0 { 1.0 } else { span };
        Some(DetailsPosition {
            index,
            align: if relative > 0.5 { 0.0 } else { 1.0 },
        })
    }

    fn render(&mut self, state: &AnimatedState) {
        let (min_index, max_index) = self.lines.index_range();
        let frame = ChartFrame {
            lines: self.lines.clone(),
            layout: self.layout,
            min_index,
            max_index,
            selection: self.selection,
            state: state.clone(),
            index_name_offset: self.options.index_name_offset,
            details_popup_width: self.options.details_popup_width,
            details_popup_value_precision: self.options.details_popup_value_precision,
        };
        self.layers = self.drawer.draw(&frame);
    }
}

fn check_selection_limits(min_length: f64, max_length: f64) -> eyre::Result<()> {
    if min_length.is_nan() || max_length.is_nan() {
        bail!("selection length limits must be numbers, got {min_length} and {max_length}");
    }
    Ok(())
}

fn opacity(visible: bool) -> f64 {
    if visible {
        1.0
    } else {
        0.0
    }
}

impl Drop for ChartController {
    fn drop(&mut self) {
        self.destroy();
    }
}
