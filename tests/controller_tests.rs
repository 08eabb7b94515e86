use glam::DVec2;
use gpui_line_chart::animation_group::{Clock, ManualClock, QueuedFrameScheduler};
use gpui_line_chart::canvas::ApproximateTextMeasurer;
use gpui_line_chart::gesture::{InputEvent, InputKind};
use gpui_line_chart::theme::palette_color;
use gpui_line_chart::{
    ChartController, ChartHost, ChartLayout, ChartOptions, ChartOptionsPatch, ChartTheme, Line, LineSet,
};
use rand::Rng;
use std::rc::Rc;
use std::time::Duration;

const CHART: u64 = 3;
const EPSILON: f64 = 1e-9;

struct Harness {
    controller: ChartController,
    frames: QueuedFrameScheduler,
    clock: ManualClock,
}

impl Harness {
    fn new(lines: Vec<Line>, options: ChartOptions) -> Self {
        let frames = QueuedFrameScheduler::new();
        let clock = ManualClock::new();
        let host = ChartHost {
            theme: Rc::new(ChartTheme::default()),
            scheduler: Box::new(frames.clone()),
            clock: Rc::new(clock.clone()),
            measurer: Rc::new(ApproximateTextMeasurer),
        };
        let controller = ChartController::new(CHART, LineSet::new(lines), options, host).unwrap();
        Self {
            controller,
            frames,
            clock,
        }
    }

    /// Plays frames until every animation has settled.
    fn settle(&mut self) {
        for _ in 0..200 {
            let handles = self.frames.drain();
            if handles.is_empty() {
                return;
            }
            self.clock.advance(Duration::from_millis(50));
            for handle in handles {
                self.controller.handle_frame(handle);
            }
        }
        panic!("animations never settled");
    }
}

fn line(name: &str, key: usize, values: Vec<f64>) -> Line {
    Line::new(name, palette_color(key), values)
}

fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

fn limited(min: f64, max: f64) -> ChartOptions {
    ChartOptions {
        min_selection_length: min,
        max_selection_length: max,
        ..ChartOptions::default()
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
}

#[test]
fn test_initial_selection_covers_the_end_of_the_domain() {
    let harness = Harness::new(vec![line("a", 0, ramp(100))], ChartOptions::default());
    let selection = harness.controller.selection();
    assert_close(selection.start_index, 99.0 - 99.0 * 0.27);
    assert_eq!(selection.end_index, 99.0);
    assert_eq!(harness.controller.index_range(), (0.0, 99.0));
    // The first frame is drawn without animation
    assert!(!harness.frames.has_pending());
}

#[test]
fn test_initial_selection_length_option() {
    let options = ChartOptions {
        initial_selection_length: Some(10.0),
        ..ChartOptions::default()
    };
    let harness = Harness::new(vec![line("a", 0, ramp(100))], options);
    let selection = harness.controller.selection();
    assert_eq!((selection.start_index, selection.end_index), (89.0, 99.0));
}

#[test]
fn test_selection_edges_respect_length_limits() {
    let mut harness = Harness::new(
        vec![line("a", 0, vec![0.0, 10.0, 0.0, 10.0, 0.0])],
        limited(1.0, 4.0),
    );

    harness.controller.handle_end_index_move(1.0);
    assert_eq!(harness.controller.selection().end_index, 4.0);

    harness.controller.handle_start_index_move(0.0);
    let selection = harness.controller.selection();
    assert_eq!(selection.start_index, 0.0);
    assert_eq!(selection.end_index, 4.0);

    // The end can't come closer to the start than the minimum length
    harness.controller.handle_end_index_move(0.0);
    assert_eq!(harness.controller.selection().end_index, 1.0);
    assert_eq!(harness.controller.selection().start_index, 0.0);
}

#[test]
fn test_start_move_drags_the_end_past_the_maximum_length() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(100))], limited(5.0, 20.0));
    // Starts at (79, 99)
    harness.controller.handle_start_index_move(0.0);
    let selection = harness.controller.selection();
    assert_eq!((selection.start_index, selection.end_index), (0.0, 20.0));
}

#[test]
fn test_index_move_keeps_the_length() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(101))], limited(5.0, 500.0));
    let length = harness.controller.selection().length();

    harness.controller.handle_index_move(0.5);
    let selection = harness.controller.selection();
    assert_close(selection.middle(), 50.0);
    assert_close(selection.length(), length);

    harness.controller.handle_index_move(-1.0);
    assert_eq!(harness.controller.selection().start_index, 0.0);
    assert_close(harness.controller.selection().length(), length);
}

#[test]
fn test_selection_stays_valid_under_random_moves() {
    let mut rng = rand::rng();
    let values: Vec<f64> = (0..1000).map(|_| rng.random_range(-100.0..100.0)).collect();
    let mut harness = Harness::new(vec![line("a", 0, values)], limited(5.0, 500.0));

    for _ in 0..500 {
        let relative = rng.random_range(-0.5..1.5);
        match rng.random_range(0..3) {
            0 => harness.controller.handle_start_index_move(relative),
            1 => harness.controller.handle_end_index_move(relative),
            _ => harness.controller.handle_index_move(relative),
        }
        let selection = harness.controller.selection();
        assert!(selection.start_index >= -EPSILON, "{selection:?}");
        assert!(selection.end_index <= 999.0 + EPSILON, "{selection:?}");
        assert!(selection.start_index <= selection.end_index, "{selection:?}");
        assert!(selection.length() >= 5.0 - EPSILON, "{selection:?}");
        assert!(selection.length() <= 500.0 + EPSILON, "{selection:?}");
    }
}

#[test]
fn test_value_ranges_follow_visible_lines() {
    let mut harness = Harness::new(
        vec![
            line("a", 0, vec![0.0, 10.0, 0.0, 10.0, 0.0]),
            line("b", 1, vec![5.0, 20.0, 5.0, 20.0, 5.0]),
        ],
        limited(1.0, 4.0),
    );
    let map = harness.controller.map_value_range().unwrap();
    assert_eq!((map.min(), map.max()), (0.0, 20.0));
    let state = harness.controller.animated_state();
    assert_close(state.map_value.middle, 10.0);
    assert_close(state.map_value.size, 20.0);
}

#[test]
fn test_disabled_lines_have_no_value_range() {
    let lines = vec![
        line("a", 0, vec![0.0, 10.0, 0.0, 10.0, 0.0]),
        line("b", 1, vec![5.0, 20.0, 5.0, 20.0, 5.0]),
    ];
    let mut harness = Harness::new(lines.clone(), limited(1.0, 4.0));

    let disabled = LineSet::new(lines.into_iter().map(|line| line.with_draw(false)).collect());
    harness.controller.set_lines(disabled, 0.0, 1.0, 4.0).unwrap();
    assert_eq!(harness.controller.map_value_range(), None);
    assert_eq!(harness.controller.main_value_range(), None);

    harness.settle();
    let state = harness.controller.animated_state();
    assert_eq!(state.line_opacities, vec![0.0, 0.0]);
    assert_eq!(state.details_line_opacities, vec![0.0, 0.0]);
    // The scales keep the last known range
    assert_close(state.map_value.middle, 10.0);
    assert_close(state.map_value.size, 20.0);
}

#[test]
fn test_value_clamps_widen_the_ranges() {
    let mut harness = Harness::new(vec![line("a", 0, vec![10.0, 20.0, 15.0])], limited(1.0, 2.0));
    harness.controller.set_options(ChartOptionsPatch {
        max_bottom_value: Some(Some(0.0)),
        min_top_value: Some(Some(50.0)),
        ..ChartOptionsPatch::default()
    });
    let map = harness.controller.map_value_range().unwrap();
    assert_eq!((map.min(), map.max()), (0.0, 50.0));
    let (main, _) = harness.controller.main_value_range().unwrap();
    assert!(main.min() <= 0.0 && main.max() >= 50.0, "{main:?}");
}

#[test]
fn test_main_value_range_is_aligned_to_notches() {
    let mut harness = Harness::new(vec![line("a", 0, vec![0.0, 10.0, 0.0, 10.0, 0.0])], limited(1.0, 4.0));
    harness.controller.handle_start_index_move(0.0);
    let (range, _) = harness.controller.main_value_range().unwrap();
    assert_eq!(range.min(), 0.0);
    assert!(range.max() >= 10.0);
}

#[test]
fn test_set_lines_keeps_the_selection_length() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(100))], ChartOptions::default());
    let length = harness.controller.selection().length();

    harness
        .controller
        .set_lines(LineSet::new(vec![line("a", 0, ramp(50))]), 0.0, 5.0, 500.0)
        .unwrap();
    let selection = harness.controller.selection();
    assert_eq!(selection.end_index, 49.0);
    assert_close(selection.length(), length);
}

#[test]
fn test_set_lines_rejects_another_line_count() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(10))], ChartOptions::default());
    let result = harness.controller.set_lines(
        LineSet::new(vec![line("a", 0, ramp(10)), line("b", 1, ramp(10))]),
        0.0,
        5.0,
        500.0,
    );
    assert!(result.is_err());
    assert_eq!(harness.controller.lines().len(), 1);
}

#[test]
fn test_set_lines_refits_the_selection_to_new_limits() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(1001))], ChartOptions::default());
    assert!(harness.controller.selection().length() > 50.0);

    harness
        .controller
        .set_lines(LineSet::new(vec![line("a", 0, ramp(1001))]), 0.0, 5.0, 50.0)
        .unwrap();
    let selection = harness.controller.selection();
    assert_eq!(selection.end_index, 1000.0);
    assert_close(selection.length(), 50.0);

    // Moves keep the refitted length
    harness.controller.handle_index_move(0.5);
    let selection = harness.controller.selection();
    assert_close(selection.length(), 50.0);
    assert_close(selection.start_index, 475.0);
}

#[test]
fn test_set_lines_grows_the_selection_to_the_new_minimum() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(100))], limited(5.0, 10.0));
    assert_close(harness.controller.selection().length(), 10.0);

    harness
        .controller
        .set_lines(LineSet::new(vec![line("a", 0, ramp(100))]), 0.0, 30.0, 60.0)
        .unwrap();
    let selection = harness.controller.selection();
    assert_eq!(selection.end_index, 99.0);
    assert_close(selection.length(), 30.0);
}

#[test]
fn test_nan_selection_limits_are_rejected() {
    let frames = QueuedFrameScheduler::new();
    let host = ChartHost {
        theme: Rc::new(ChartTheme::default()),
        scheduler: Box::new(frames.clone()),
        clock: Rc::new(ManualClock::new()),
        measurer: Rc::new(ApproximateTextMeasurer),
    };
    let result = ChartController::new(
        CHART,
        LineSet::new(vec![line("a", 0, ramp(10))]),
        limited(f64::NAN, 5.0),
        host,
    );
    assert!(result.is_err());

    let mut harness = Harness::new(vec![line("a", 0, ramp(10))], limited(2.0, 5.0));
    let lines = || LineSet::new(vec![line("a", 0, ramp(10))]);
    assert!(harness.controller.set_lines(lines(), 0.0, f64::NAN, 5.0).is_err());
    assert!(harness.controller.set_lines(lines(), 0.0, 2.0, f64::NAN).is_err());
    assert_eq!(harness.controller.options().min_selection_length, 2.0);
    assert_eq!(harness.controller.options().max_selection_length, 5.0);
    assert_close(harness.controller.selection().length(), 5.0);
}

#[test]
fn test_details_index_is_rounded_into_the_selection() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(100))], ChartOptions::default());
    // Selection is (72.27, 99)
    harness.controller.handle_details_position_move(Some(0.5));
    assert_eq!(harness.controller.details_index(), Some(86.0));

    harness.controller.handle_details_position_move(Some(-1.0));
    assert_eq!(harness.controller.details_index(), Some(73.0));

    harness.controller.handle_details_position_move(Some(2.0));
    assert_eq!(harness.controller.details_index(), Some(99.0));

    harness.controller.handle_details_position_move(None);
    assert_eq!(harness.controller.details_index(), None);
}

#[test]
fn test_details_popup_shows_after_frames() {
    let mut harness = Harness::new(
        vec![line("Alpha", 0, ramp(100)), line("Beta", 1, ramp(100)).with_show_in_popup(false)],
        ChartOptions::default(),
    );
    harness.controller.set_layout(ChartLayout::new(400.0, 300.0, 2.0));
    harness.controller.handle_details_position_move(Some(0.5));
    assert!(harness.controller.has_pending_frame());

    harness.settle();
    let state = harness.controller.animated_state();
    assert_eq!(state.details_opacity, 1.0);
    assert_eq!(state.details_position.index, 86.0);
    assert_eq!(state.details_line_opacities, vec![1.0, 0.0]);

    let texts: Vec<&str> = harness.controller.layers().popup.texts().collect();
    assert!(texts.contains(&"Sample #"), "{texts:?}");
    assert!(texts.contains(&"Alpha"), "{texts:?}");
    assert!(!texts.contains(&"Beta"), "{texts:?}");

    harness.controller.handle_details_position_move(None);
    harness.settle();
    assert!(harness.controller.layers().popup.is_empty());
}

#[test]
fn test_layout_draws_every_layer() {
    let mut harness = Harness::new(vec![line("a", 0, vec![0.0, 10.0, 0.0, 10.0, 0.0])], limited(1.0, 4.0));
    harness.controller.set_layout(ChartLayout::new(400.0, 300.0, 2.0));
    assert!(harness.frames.has_pending());
    harness.settle();

    let layers = harness.controller.layers();
    assert!(!layers.main.is_empty());
    assert!(!layers.x.is_empty());
    assert!(!layers.map.is_empty());
    assert!(layers.main.texts().any(|text| text == "0"));

    // Same layout, nothing to do
    harness.controller.set_layout(ChartLayout::new(400.0, 300.0, 2.0));
    assert!(!harness.frames.has_pending());
}

#[test]
fn test_unchanged_layers_are_reused() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(100))], ChartOptions::default());
    harness.controller.set_layout(ChartLayout::new(400.0, 300.0, 1.0));
    harness.settle();
    let map = harness.controller.layers().map.clone();

    // Moving the details pointer doesn't touch the map
    harness.controller.handle_details_position_move(Some(0.3));
    harness.settle();
    assert!(Rc::ptr_eq(&map, &harness.controller.layers().map));
}

#[test]
fn test_map_drag_moves_the_selection() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(100))], ChartOptions::default());
    harness.controller.set_origin(DVec2::new(20.0, 10.0));
    harness.controller.set_layout(ChartLayout::new(400.0, 300.0, 1.0));
    let length = harness.controller.selection().length();

    // The window spans x 286.48..388 of the map, grab its middle
    harness
        .controller
        .handle_input(&InputEvent::on_element(CHART, InputKind::MouseDown(DVec2::new(350.0, 280.0))));
    harness
        .controller
        .handle_input(&InputEvent::on_window(InputKind::MouseMove(DVec2::new(220.0, 280.0))));
    harness
        .controller
        .handle_input(&InputEvent::on_window(InputKind::MouseUp(DVec2::new(220.0, 280.0))));

    let selection = harness.controller.selection();
    assert!(selection.start_index < 50.0, "{selection:?}");
    assert_close(selection.length(), length);
    assert!(harness.frames.has_pending());
}

#[test]
fn test_destroy_stops_frames_and_input() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(100))], ChartOptions::default());
    harness.controller.handle_details_position_move(Some(0.5));
    let handles = harness.frames.drain();
    assert_eq!(handles.len(), 1);

    harness.controller.destroy();
    harness.controller.destroy();
    assert!(harness.controller.is_destroyed());
    assert!(!harness.controller.handle_frame(handles[0]));

    let before = harness.controller.selection();
    harness.controller.handle_start_index_move(0.0);
    assert_eq!(harness.controller.selection(), before);
    let response = harness
        .controller
        .handle_input(&InputEvent::on_element(CHART, InputKind::MouseMove(DVec2::new(100.0, 100.0))));
    assert!(!response.prevent_default);
    assert!(!harness.frames.has_pending());
}

#[test]
fn test_frames_redraw_with_the_clock() {
    let mut harness = Harness::new(vec![line("a", 0, ramp(100))], ChartOptions::default());
    let now = harness.clock.now();
    harness.controller.handle_details_position_move(Some(0.5));
    let handles = harness.frames.drain();
    harness.clock.advance(Duration::from_millis(16));
    assert!(harness.controller.handle_frame(handles[0]));
    assert!(harness.clock.now() > now);
    // Still moving, so another frame is asked for
    assert!(harness.frames.has_pending());
}

#[test]
fn test_config_from_json_fills_defaults() {
    let config = gpui_line_chart::ChartConfig::from_json(r#"{"minSelectionLength": 2, "minTopValue": 100}"#).unwrap();
    let options = ChartOptions::from(config);
    assert_eq!(options.min_selection_length, 2.0);
    assert_eq!(options.max_selection_length, ChartOptions::default().max_selection_length);
    assert_eq!(options.min_top_value, Some(100.0));
    assert!(gpui_line_chart::ChartConfig::from_json("[]").is_err());
}
