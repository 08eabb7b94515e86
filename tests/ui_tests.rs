use glam::DVec2;
use gpui::{px, size, Bounds, Point, TestAppContext};
use gpui_line_chart::gesture::{InputEvent, InputKind};
use gpui_line_chart::theme::palette_color;
use gpui_line_chart::{
    ChartInputHandler, ChartOptions, ChartOptionsPatch, ChartTheme, ChartView, Line, LineSet,
};

fn sample_lines() -> LineSet {
    LineSet::new(vec![
        Line::new("Joined", palette_color(0), vec![3.0, 8.0, 2.0, 9.0, 4.0, 7.0, 1.0]),
        Line::new("Left", palette_color(1), vec![1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0]),
    ])
}

fn short_selection() -> ChartOptions {
    ChartOptions {
        min_selection_length: 1.0,
        max_selection_length: 6.0,
        ..ChartOptions::default()
    }
}

#[gpui::test]
fn test_chart_view_holds_the_lines(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| {
        ChartView::new(sample_lines(), short_selection(), ChartTheme::default(), cx)
            .expect("default theme is valid")
    });
    cx.run_until_parked();

    window
        .update(cx, |view, _window, _cx| {
            let controller = view.controller();
            assert_eq!(controller.lines().len(), 2);
            assert_eq!(controller.index_range(), (0.0, 6.0));
            assert_eq!(controller.selection().end_index, 6.0);
            assert!(!controller.is_destroyed());
        })
        .unwrap();
}

#[gpui::test]
fn test_chart_view_rejects_an_invalid_theme(cx: &mut TestAppContext) {
    let theme = ChartTheme {
        font_family: String::new(),
        ..ChartTheme::default()
    };
    let result = cx.update(|cx| ChartView::new(sample_lines(), short_selection(), theme, cx));
    assert!(result.is_err());
}

#[gpui::test]
fn test_chart_view_updates_options_and_lines(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| {
        ChartView::new(sample_lines(), short_selection(), ChartTheme::default(), cx)
            .expect("default theme is valid")
    });

    window
        .update(cx, |view, _window, cx| {
            view.set_options(
                ChartOptionsPatch {
                    details_popup_width: Some(180.0),
                    max_bottom_value: Some(Some(0.0)),
                    ..ChartOptionsPatch::default()
                },
                cx,
            );
            assert_eq!(view.controller().options().details_popup_width, 180.0);
            assert_eq!(view.controller().options().max_bottom_value, Some(0.0));

            let longer: Vec<Line> = sample_lines()
                .iter()
                .map(|line| Line::new(line.name.clone(), line.color, vec![5.0; 20]))
                .collect();
            view.set_lines(LineSet::new(longer), 100.0, 2.0, 10.0, cx).unwrap();
            assert_eq!(view.controller().index_range(), (0.0, 19.0));
            assert_eq!(view.controller().options().index_name_offset, 100.0);

            let fewer = LineSet::new(vec![Line::new("Only", palette_color(2), vec![1.0, 2.0])]);
            assert!(view.set_lines(fewer, 0.0, 1.0, 2.0, cx).is_err());
        })
        .unwrap();
    cx.run_until_parked();
}

#[gpui::test]
fn test_chart_view_accepts_input_events(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| {
        ChartView::new(sample_lines(), short_selection(), ChartTheme::default(), cx)
            .expect("default theme is valid")
    });
    cx.run_until_parked();

    window
        .update(cx, |view, window, cx| {
            let element = 0;
            let events = [InputEvent::on_element(element, InputKind::MouseMove(DVec2::new(5.0, 5.0)))];
            // Events of another element pass through untouched
            view.handle_input_events(&events, window, cx);
            assert_eq!(view.controller().details_index(), None);
        })
        .unwrap();
}

fn chart_bounds() -> Bounds<gpui::Pixels> {
    Bounds::new(Point::new(px(10.0), px(10.0)), size(px(100.0), px(50.0)))
}

#[test]
fn test_input_handler_synthesizes_enter_and_leave() {
    let mut input = ChartInputHandler::new(9);
    let inside = Point::new(px(20.0), px(20.0));
    let outside = Point::new(px(200.0), px(20.0));

    let events = input.mouse_move_at(inside, chart_bounds());
    assert_eq!(
        events,
        vec![
            InputEvent::on_element(9, InputKind::MouseEnter(DVec2::new(20.0, 20.0))),
            InputEvent::on_element(9, InputKind::MouseMove(DVec2::new(20.0, 20.0))),
        ]
    );
    assert!(input.is_hovered());

    let events = input.mouse_move_at(inside, chart_bounds());
    assert_eq!(events.len(), 1);

    // The window move comes first so a drag sees it before the chart is left
    let events = input.mouse_move_at(outside, chart_bounds());
    assert_eq!(
        events,
        vec![
            InputEvent::on_window(InputKind::MouseMove(DVec2::new(200.0, 20.0))),
            InputEvent::on_element(9, InputKind::MouseLeave(DVec2::new(200.0, 20.0))),
        ]
    );
    assert!(!input.is_hovered());
}

#[test]
fn test_input_handler_presses_and_window_exit() {
    let mut input = ChartInputHandler::new(9);
    let inside = Point::new(px(30.0), px(40.0));

    let events = input.mouse_down_at(inside, chart_bounds());
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1],
        InputEvent::on_element(9, InputKind::MouseDown(DVec2::new(30.0, 40.0)))
    );

    let events = input.mouse_exit(DVec2::new(-1.0, 40.0));
    assert_eq!(
        events,
        vec![
            InputEvent::on_element(9, InputKind::MouseLeave(DVec2::new(-1.0, 40.0))),
            InputEvent::on_window(InputKind::MouseLeave(DVec2::new(-1.0, 40.0))),
        ]
    );

    // Released outside the chart
    let events = input.mouse_up_at(Point::new(px(500.0), px(40.0)), chart_bounds());
    assert_eq!(events, vec![InputEvent::on_window(InputKind::MouseUp(DVec2::new(500.0, 40.0)))]);
}
