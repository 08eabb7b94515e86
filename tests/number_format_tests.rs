use gpui_line_chart::data_types::{LineSet, LinesMinMaxCache};
use gpui_line_chart::theme::{parse_color, Color};
use gpui_line_chart::utils::number::{
    ceil_with_base, floor_with_base, format_short, format_with_thousand_groups, in_range, modulo,
    remove_float_artifact, round_with_base,
};
use gpui_line_chart::utils::series::{
    fit_range_keeping_length, interpolate_linear, min_max, min_max_on_range, MinMax,
};
use gpui_line_chart::Line;

#[test]
fn test_in_range() {
    assert_eq!(in_range(0.0, 5.0, 10.0), 5.0);
    assert_eq!(in_range(0.0, -1.0, 10.0), 0.0);
    assert_eq!(in_range(0.0, 11.0, 10.0), 10.0);
    // The lower bound wins when the bounds cross
    assert_eq!(in_range(10.0, 5.0, 0.0), 10.0);
}

#[test]
fn test_modulo_is_non_negative() {
    assert_eq!(modulo(-1.0, 3.0), 2.0);
    assert_eq!(modulo(7.0, 3.0), 1.0);
    assert_eq!(modulo(-3.0, 3.0), 0.0);
}

#[test]
fn test_align_with_base() {
    assert_eq!(round_with_base(7.0, 5.0), 5.0);
    assert_eq!(round_with_base(8.0, 5.0), 10.0);
    assert_eq!(floor_with_base(0.37, 0.1), 0.3);
    assert_eq!(ceil_with_base(0.31, 0.1), 0.4);
    assert_eq!(ceil_with_base(15.0, 20.0), 20.0);
}

#[test]
fn test_format_short() {
    assert_eq!(format_short(3000.0), "3K");
    assert_eq!(format_short(2500.0), "2500");
    assert_eq!(format_short(4_000_000.0), "4M");
    assert_eq!(format_short(1_500_000.0), "1500K");
    assert_eq!(format_short(1e9), "1B");
    assert_eq!(format_short(0.0), "0");
    assert_eq!(format_short(-0.0), "0");
    assert_eq!(format_short(-2000.0), "-2K");
    assert_eq!(format_short(0.5), "0.5");
}

#[test]
fn test_format_with_thousand_groups() {
    assert_eq!(format_with_thousand_groups(1_234_567.0, " "), "1 234 567");
    assert_eq!(format_with_thousand_groups(-1234.5, ","), "-1,234.5");
    assert_eq!(format_with_thousand_groups(999.0, " "), "999");
    assert_eq!(format_with_thousand_groups(1000.0, " "), "1 000");
}

#[test]
fn test_remove_float_artifact() {
    assert_eq!(remove_float_artifact(0.1 + 0.2, None), 0.3);
    assert_eq!(remove_float_artifact(1.23456, Some(2)), 1.23);
    assert_eq!(remove_float_artifact(2.5, Some(0)), 3.0);
    assert!(remove_float_artifact(f64::NAN, None).is_nan());
}

#[test]
fn test_min_max_skips_nan() {
    assert_eq!(min_max(&[]), None);
    assert_eq!(
        min_max(&[3.0, f64::NAN, -2.0, 8.0]),
        Some(MinMax { min: -2.0, max: 8.0 })
    );
}

#[test]
fn test_interpolate_linear() {
    let values = [0.0, 10.0, 20.0];
    assert_eq!(interpolate_linear(&values, 0.5), Some(5.0));
    assert_eq!(interpolate_linear(&values, 2.0), Some(20.0));
    assert_eq!(interpolate_linear(&values, 2.5), None);
    assert_eq!(interpolate_linear(&values, -0.1), None);
    assert_eq!(interpolate_linear(&[], 0.0), None);
}

#[test]
fn test_min_max_on_range_interpolates_edges() {
    let values = [0.0, 10.0, 0.0, 10.0, 0.0];
    assert_eq!(
        min_max_on_range(&values, 0.5, 1.5),
        Some(MinMax { min: 5.0, max: 10.0 })
    );
    assert_eq!(
        min_max_on_range(&values, -5.0, 100.0),
        Some(MinMax { min: 0.0, max: 10.0 })
    );
    assert_eq!(min_max_on_range(&values, 5.0, 6.0), None);
}

#[test]
fn test_min_max_on_range_skips_missing_samples() {
    let nan = f64::NAN;
    assert_eq!(
        min_max_on_range(&[nan, 1.0, 2.0, 3.0, 4.0, 5.0], 0.0, 5.0),
        Some(MinMax { min: 1.0, max: 5.0 })
    );
    assert_eq!(
        min_max_on_range(&[0.0, nan, 10.0], 0.0, 2.0),
        Some(MinMax { min: 0.0, max: 10.0 })
    );
    // The left edge falls in the gap
    assert_eq!(
        min_max_on_range(&[0.0, nan, 10.0], 0.5, 2.0),
        Some(MinMax { min: 10.0, max: 10.0 })
    );
    assert_eq!(min_max_on_range(&[1.0, nan], 0.5, 1.0), None);
    assert_eq!(min_max_on_range(&[nan, nan, nan], 0.0, 2.0), None);
}

#[test]
fn test_fit_range_keeping_length() {
    assert_eq!(fit_range_keeping_length(0.0, 10.0, -2.0, 3.0), (0.0, 5.0));
    assert_eq!(fit_range_keeping_length(0.0, 10.0, 8.0, 12.0), (6.0, 10.0));
    assert_eq!(fit_range_keeping_length(0.0, 10.0, -5.0, 20.0), (0.0, 10.0));
    assert_eq!(fit_range_keeping_length(0.0, 10.0, 2.0, 4.0), (2.0, 4.0));
}

#[test]
fn test_lines_min_max_cache_reuses_unchanged_lines() {
    let kept = Line::new("a", Color(0xff0000), vec![1.0, 5.0, 3.0]);
    let lines = LineSet::new(vec![kept.clone(), Line::new("b", Color(0x00ff00), vec![-1.0, 2.0])]);
    let mut cache = LinesMinMaxCache::default();
    assert_eq!(
        cache.get(&lines),
        &[Some(MinMax { min: 1.0, max: 5.0 }), Some(MinMax { min: -1.0, max: 2.0 })]
    );

    let replaced = LineSet::new(vec![kept, Line::new("b", Color(0x00ff00), Vec::<f64>::new())]);
    assert_eq!(cache.get(&replaced), &[Some(MinMax { min: 1.0, max: 5.0 }), None]);
}

#[test]
fn test_line_set_index_range() {
    assert_eq!(LineSet::default().index_range(), (0.0, 1.0));
    let lines = LineSet::new(vec![
        Line::new("a", Color::BLACK, vec![1.0; 4]),
        Line::new("b", Color::BLACK, vec![1.0; 7]),
    ]);
    assert_eq!(lines.index_range(), (0.0, 6.0));
}

#[test]
fn test_line_set_from_json() {
    let lines = LineSet::from_json(
        r##"[{"name": "Joined", "color": "#3cc23f", "values": [1, 2, 3]},
            {"name": "Left", "color": 15158332, "values": [4, 5], "draw": false}]"##,
    )
    .unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].color, Color(0x3cc23f));
    assert!(lines[0].draw && lines[0].show_in_popup);
    assert_eq!(lines[1].color, Color(15158332));
    assert!(!lines[1].draw);
    assert!(LineSet::from_json("{}").is_err());
}

#[test]
fn test_parse_color() {
    assert_eq!(parse_color("#fff").unwrap(), (Color(0xffffff), 1.0));
    assert_eq!(parse_color("rgba(18, 52, 86, 0.5)").unwrap(), (Color(0x123456), 0.5));
    assert_eq!(parse_color("rgb(0,0,255)").unwrap(), (Color(0x0000ff), 1.0));
    assert!(parse_color("hsl(0, 0%, 0%)").is_err());
    assert!(parse_color("rgb(256, 0, 0)").is_err());
    assert_eq!(Color(0x123456).to_string(), "#123456");
}
