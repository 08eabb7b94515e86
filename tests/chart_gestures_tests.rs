use glam::DVec2;
use gpui_line_chart::chart_gestures::{ChartGestureAction, ChartGestureState, ChartGestures};
use gpui_line_chart::gesture::{InputEvent, InputKind, Touch};
use gpui_line_chart::{ChartLayout, ChartTheme};
use std::rc::Rc;

const CHART: u64 = 1;
const ORIGIN: DVec2 = DVec2::new(100.0, 50.0);

// Default theme on a 400x300 container: the map spans x 12..388 and y 259..299.
fn gestures() -> ChartGestures {
    let mut gestures = ChartGestures::new(
        CHART,
        Rc::new(ChartTheme::default()),
        ChartGestureState {
            map_selector_start: 0.5,
            map_selector_end: 0.75,
        },
    );
    gestures.set_bounds(ORIGIN, ChartLayout::new(400.0, 300.0, 1.0));
    gestures
}

fn at(x: f64, y: f64) -> DVec2 {
    ORIGIN + DVec2::new(x, y)
}

fn on_chart(kind: InputKind) -> InputEvent {
    InputEvent::on_element(CHART, kind)
}

#[test]
fn test_drag_selection_start() {
    let mut gestures = gestures();
    let (actions, _) = gestures.handle_event(&on_chart(InputKind::MouseDown(at(185.0, 270.0))));
    assert!(actions.is_empty());
    assert!(gestures.is_dragging());

    let (actions, _) = gestures.handle_event(&InputEvent::on_window(InputKind::MouseMove(at(205.0, 320.0))));
    // The grip was grabbed 15px left of the boundary
    assert_eq!(actions, vec![ChartGestureAction::MapSelectorStart(208.0 / 376.0)]);

    gestures.handle_event(&InputEvent::on_window(InputKind::MouseUp(at(205.0, 320.0))));
    assert!(!gestures.is_dragging());
    let (actions, _) = gestures.handle_event(&InputEvent::on_window(InputKind::MouseMove(at(250.0, 320.0))));
    assert!(actions.is_empty());
}

#[test]
fn test_drag_selection_middle() {
    let mut gestures = gestures();
    gestures.handle_event(&on_chart(InputKind::MouseDown(at(250.0, 270.0))));
    let (actions, _) = gestures.handle_event(&on_chart(InputKind::MouseMove(at(260.0, 280.0))));
    assert!(actions.contains(&ChartGestureAction::MapSelectorMiddle(245.0 / 376.0)));
}

#[test]
fn test_drag_selection_end() {
    let mut gestures = gestures();
    gestures.handle_event(&on_chart(InputKind::MouseDown(at(300.0, 270.0))));
    let (actions, _) = gestures.handle_event(&InputEvent::on_window(InputKind::MouseMove(at(100.0, 270.0))));
    assert_eq!(actions, vec![ChartGestureAction::MapSelectorEnd(82.0 / 376.0)]);
}

#[test]
fn test_press_outside_the_map_starts_nothing() {
    let mut gestures = gestures();
    gestures.handle_event(&on_chart(InputKind::MouseDown(at(50.0, 270.0))));
    gestures.handle_event(&on_chart(InputKind::MouseDown(at(250.0, 100.0))));
    assert!(!gestures.is_dragging());
}

#[test]
fn test_touch_drag_prevents_default() {
    let mut gestures = gestures();
    let start = at(190.0, 270.0);
    let (_, response) =
        gestures.handle_event(&on_chart(InputKind::TouchStart(vec![Touch::new(4, start.x, start.y)])));
    assert!(response.prevent_default);

    let moved = at(150.0, 270.0);
    let (actions, _) =
        gestures.handle_event(&on_chart(InputKind::TouchMove(vec![Touch::new(4, moved.x, moved.y)])));
    assert_eq!(actions, vec![ChartGestureAction::MapSelectorStart(148.0 / 376.0)]);
}

#[test]
fn test_hover_reports_details_position() {
    let mut gestures = gestures();
    let (actions, _) = gestures.handle_event(&on_chart(InputKind::MouseMove(at(200.0, 100.0))));
    assert_eq!(actions, vec![ChartGestureAction::DetailsPosition(Some(188.0 / 376.0))]);

    let (actions, _) = gestures.handle_event(&on_chart(InputKind::MouseLeave(at(200.0, 100.0))));
    assert_eq!(actions, vec![ChartGestureAction::DetailsPosition(None)]);
}

#[test]
fn test_hover_ends_below_the_lines() {
    let mut gestures = gestures();
    gestures.handle_event(&on_chart(InputKind::MouseMove(at(200.0, 100.0))));
    let (actions, _) = gestures.handle_event(&on_chart(InputKind::MouseMove(at(200.0, 280.0))));
    assert_eq!(actions, vec![ChartGestureAction::DetailsPosition(None)]);
}

#[test]
fn test_destroyed_gestures_ignore_events() {
    let mut gestures = gestures();
    gestures.handle_event(&on_chart(InputKind::MouseDown(at(185.0, 270.0))));
    gestures.destroy();
    assert!(!gestures.is_dragging());
    let (actions, _) = gestures.handle_event(&on_chart(InputKind::MouseMove(at(200.0, 100.0))));
    assert!(actions.is_empty());
}
