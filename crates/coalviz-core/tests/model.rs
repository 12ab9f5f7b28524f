// File: crates/coalviz-core/tests/model.rs
// Purpose: Building blocks: observations, series, palette, axis padding, projection, themes, ticks.

use approx::assert_relative_eq;
use coalviz_core::geometry::{PlotRect, Projection};
use coalviz_core::grid::{linspace, tick_label};
use coalviz_core::{
    assign_colors, theme, AnimationContext, AxisRange, ChartError, HostSignal, Observation, Palette, Rgb,
    Selection, Series, SourceTable,
};

#[test]
fn observation_validation() {
    assert!(Observation::try_new("Chile", 2000, 12.0, 3000.0).is_ok());
    let err = Observation::try_new("  ", 2000, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, ChartError::InvalidObservation(_)));
    assert!(Observation::try_new("Chile", 2000, 1.0, f64::INFINITY).is_err());
}

#[test]
fn series_from_rows_sorts_and_keeps_last() {
    let s = Series::from_rows(
        "Poland",
        vec![
            Observation::new("Poland", 2002, 3.0, 30.0),
            Observation::new("Poland", 2000, 1.0, 10.0),
            Observation::new("Poland", 2002, 4.0, 40.0),
        ],
    )
    .unwrap();
    assert_eq!(s.country(), "Poland");
    assert_eq!(s.years().collect::<Vec<_>>(), vec![2000, 2002]);
    assert_eq!(s.observations()[1].point(), (4.0, 40.0));

    assert_eq!(s.history_until(1999).len(), 0);
    assert_eq!(s.history_until(2001).len(), 1);
    assert_eq!(s.history_until(2002).len(), 2);
}

#[test]
fn series_rejects_foreign_rows() {
    let err = Series::from_rows("Poland", vec![Observation::new("Chile", 2000, 1.0, 1.0)]).unwrap_err();
    assert_eq!(err.signal(), HostSignal::Fatal);
}

#[test]
fn palette_must_not_be_empty() {
    let err = Palette::new(Vec::new()).unwrap_err();
    assert!(matches!(err, ChartError::InvalidPalette(_)));

    let two = Palette::new(vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]).unwrap();
    let map = assign_colors(["a", "b", "c", "a"], &two);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("a"), Some(Rgb::new(1, 2, 3)));
    assert_eq!(map.get("c"), Some(Rgb::new(1, 2, 3)));
    let listed: Vec<_> = map.iter().map(|(c, _)| c).collect();
    assert_eq!(listed, vec!["a", "b", "c"]);
}

#[test]
fn rgb_displays_as_css() {
    assert_eq!(Rgb::new(17, 119, 51).to_string(), "rgb(17, 119, 51)");
    assert_eq!(Palette::safe().len(), 11);
}

#[test]
fn axis_range_padding_and_span() {
    let r = AxisRange::padded(10.0, 20.0);
    assert_relative_eq!(r.min, 9.5);
    assert_relative_eq!(r.max, 21.0);
    assert!(r.contains(10.0) && r.contains(20.0));
    assert!(!r.contains(21.5));

    // single point: zero span is floored for pixel mapping
    let flat = AxisRange::padded(0.0, 0.0);
    assert_eq!(flat.min, 0.0);
    assert!(flat.span() > 0.0);
}

#[test]
fn context_shares_colors_and_ranges() {
    let source = SourceTable::new(vec![
        Observation::new("Chile", 2000, 40.0, 3000.0),
        Observation::new("Chile", 2001, 42.0, 3100.0),
        Observation::new("Poland", 2001, 90.0, 3500.0),
    ])
    .unwrap();
    let ctx = AnimationContext::new(source.filter(&Selection::all()), &Palette::safe()).unwrap();
    assert_eq!(ctx.years(), &[2000, 2001]);
    assert_eq!(ctx.countries().collect::<Vec<_>>(), vec!["Chile", "Poland"]);
    assert_eq!(ctx.colors().get("Poland"), Some(Palette::safe().cycled(1)));
    assert_eq!(ctx.series("Chile").map(Series::len), Some(2));
    assert_eq!(ctx.table().len(), 3);
    assert_relative_eq!(ctx.x_range().max, 90.0 * 1.05);
    assert_eq!(ctx.frames().unwrap().len(), 2);

    let empty = source.filter(&Selection::countries(["Peru"]));
    assert!(AnimationContext::new(empty, &Palette::safe()).unwrap_err().is_no_data());
}

#[test]
fn frame_at_skips_countries_without_history() {
    let source = SourceTable::new(vec![
        Observation::new("Chile", 2000, 40.0, 3000.0),
        Observation::new("Poland", 2003, 90.0, 3500.0),
    ])
    .unwrap();
    let table = source.filter(&Selection::all());
    let frames = coalviz_core::TrajectoryFrames::new(&table).unwrap();
    assert_eq!(frames.years(), &[2000, 2003]);
    let f = frames.frame_at(2001);
    assert_eq!(f.countries().collect::<Vec<_>>(), vec!["Chile"]);
}

#[test]
fn projection_maps_corners() {
    let rect = PlotRect::from_ltrb(10.0, 20.0, 110.0, 220.0);
    let proj = Projection::new(rect, AxisRange::new(0.0, 10.0), AxisRange::new(0.0, 100.0));
    assert_eq!(proj.project((0.0, 0.0)), (10.0, 220.0));
    assert_eq!(proj.project((10.0, 100.0)), (110.0, 20.0));
    assert!(PlotRect::from_ltrb(5.0, 5.0, 5.0, 10.0).is_degenerate());
}

#[test]
fn ticks_and_themes() {
    assert_eq!(linspace(0.0, 10.0, 6), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(tick_label(1234.4, 5000.0), "1234");
    assert_eq!(tick_label(12.34, 50.0), "12.3");
    assert_eq!(tick_label(1.234, 5.0), "1.23");

    assert_eq!(theme::find("DARK").map(|t| t.name), Some("dark"));
    assert!(theme::find("neon").is_none());
    assert_eq!(theme::presets().len(), 3);
}
