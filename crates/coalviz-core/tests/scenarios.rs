// File: crates/coalviz-core/tests/scenarios.rs
// Purpose: End-to-end builds over small tables: frames, legend, placeholder, dedup, determinism.

use coalviz_core::layer::Layer;
use coalviz_core::{
    build_chart, ChartError, HostSignal, Observation, SceneOptions, Selection, SourceTable, TrajectoryFrames,
};

fn obs(c: &str, year: i32, x: f64, y: f64) -> Observation {
    Observation::new(c, year, x, y)
}

fn abc_source() -> SourceTable {
    SourceTable::new(vec![
        obs("A", 2000, 10.0, 100.0),
        obs("A", 2001, 20.0, 200.0),
        obs("B", 2000, 5.0, 50.0),
    ])
    .expect("valid rows")
}

fn markers(layers: &[Layer]) -> Vec<(&str, (f64, f64))> {
    layers
        .iter()
        .filter_map(|l| match l {
            Layer::CurrentPointMarker(m) => Some((m.country.as_str(), m.point)),
            _ => None,
        })
        .collect()
}

fn lines(layers: &[Layer]) -> Vec<(&str, &[(f64, f64)])> {
    layers
        .iter()
        .filter_map(|l| match l {
            Layer::TrajectoryLine(t) => Some((t.country.as_str(), t.points.as_slice())),
            _ => None,
        })
        .collect()
}

#[test]
fn two_countries_two_years() {
    let source = abc_source();
    let table = source.filter(&Selection::all());
    let frames: Vec<_> = TrajectoryFrames::new(&table).expect("frames").collect();

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].year, 2000);
    assert_eq!(frames[1].year, 2001);

    let a0 = frames[0].entry("A").expect("A in 2000");
    assert_eq!(a0.current().point(), (10.0, 100.0));
    let b0 = frames[0].entry("B").expect("B in 2000");
    assert_eq!(b0.current().point(), (5.0, 50.0));

    let a1 = frames[1].entry("A").expect("A in 2001");
    let hist: Vec<_> = a1.history.iter().map(Observation::point).collect();
    assert_eq!(hist, vec![(10.0, 100.0), (20.0, 200.0)]);
    assert_eq!(a1.current().point(), (20.0, 200.0));
    let b1 = frames[1].entry("B").expect("B carried into 2001");
    assert_eq!(b1.history.len(), 1);
    assert_eq!(b1.current().point(), (5.0, 50.0));
}

#[test]
fn scene_frames_match_trajectory_frames() {
    let build = build_chart(&abc_source(), &Selection::all(), &SceneOptions::default()).expect("build");
    let scene = &build.scene;

    assert!(build.has_data());
    assert_eq!(scene.frames.len(), 2);
    assert_eq!(scene.frames[0].name, "2000");
    assert_eq!(scene.data, scene.frames[0].layers);

    let last = &scene.frames[1].layers;
    assert_eq!(markers(last), vec![("A", (20.0, 200.0)), ("B", (5.0, 50.0))]);
    assert_eq!(lines(last)[0], ("A", &[(10.0, 100.0), (20.0, 200.0)][..]));

    let controls = scene.controls.as_ref().expect("controls");
    assert_eq!(controls.play.frame_duration_ms, 400);
    assert_eq!(controls.play.transition_duration_ms, 100);
    assert!(controls.play.from_current);
    assert_eq!(controls.pause.frame_duration_ms, 0);
    let steps: Vec<_> = controls.slider.steps.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(steps, vec!["2000", "2001"]);
    assert_eq!(controls.slider.current_value_prefix, "Year: ");

    assert_eq!(scene.title, "Electricity Consumption vs. Coal Percentage (A, B)");
}

#[test]
fn legend_lists_each_country_once() {
    let build = build_chart(&abc_source(), &Selection::all(), &SceneOptions::default()).expect("build");
    let names: Vec<_> = build.scene.legend.iter().map(|e| e.country.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    let ctx = build.context.expect("context");
    for entry in &build.scene.legend {
        assert_eq!(Some(entry.color), ctx.colors().get(&entry.country));
    }
}

#[test]
fn selection_restricts_every_frame() {
    let build = build_chart(&abc_source(), &Selection::countries(["B"]), &SceneOptions::default())
        .expect("build");
    let scene = &build.scene;

    assert_eq!(scene.frames.len(), 1);
    for frame in &scene.frames {
        assert!(frame.layers.iter().all(|l| l.country() == Some("B")));
    }
    let names: Vec<_> = scene.legend.iter().map(|e| e.country.as_str()).collect();
    assert_eq!(names, vec!["B"]);
    assert_eq!(scene.title, "Electricity Consumption vs. Coal Percentage (B)");

    let ctx = build.context.expect("context");
    assert!(ctx.colors().get("A").is_none());
}

#[test]
fn empty_selection_yields_placeholder_and_no_context() {
    let source = abc_source();
    let selection = Selection::countries(["Atlantis"]);

    let build = build_chart(&source, &selection, &SceneOptions::default()).expect("build");
    assert!(!build.has_data());
    assert!(build.scene.is_placeholder());
    assert!(build.scene.controls.is_none());
    assert!(build.scene.legend.is_empty());
    assert_eq!(build.scene.title, "No data available for the selected filters");
    match build.scene.data.as_slice() {
        [Layer::PlaceholderText(p)] => assert_eq!(p.text, "No data for selection"),
        other => panic!("unexpected placeholder layers: {other:?}"),
    }

    let table = source.filter(&selection);
    let err = TrajectoryFrames::new(&table).expect_err("no data");
    assert!(err.is_no_data());
    assert_eq!(err.signal(), HostSignal::NoData);
}

#[test]
fn year_window_is_inclusive() {
    let source = SourceTable::new(vec![
        obs("A", 1999, 1.0, 1.0),
        obs("A", 2000, 2.0, 2.0),
        obs("A", 2001, 3.0, 3.0),
        obs("A", 2002, 4.0, 4.0),
    ])
    .unwrap();
    let table = source.filter(&Selection::all().with_years(2000, 2001));
    assert_eq!(table.years(), &[2000, 2001]);

    let build = build_chart(&source, &Selection::all().with_years(2003, 2010), &SceneOptions::default())
        .unwrap();
    assert!(build.context.is_none());
}

#[test]
fn duplicate_year_keeps_last_row() {
    let source = SourceTable::new(vec![
        obs("A", 2000, 1.0, 10.0),
        obs("B", 2000, 7.0, 70.0),
        obs("A", 2000, 2.0, 20.0),
    ])
    .unwrap();
    let table = source.filter(&Selection::all());
    let a = table.series("A").expect("series A");
    assert_eq!(a.len(), 1);
    assert_eq!(a.observations()[0].point(), (2.0, 20.0));
}

#[test]
fn hover_text_formats_values() {
    let source = SourceTable::new(vec![obs("India", 2010, 68.4567, 641.5)]).unwrap();
    let build = build_chart(&source, &Selection::all(), &SceneOptions::default()).unwrap();
    let hover = build.scene.frames[0]
        .layers
        .iter()
        .find_map(|l| match l {
            Layer::CurrentPointMarker(m) => Some(m.hover.clone()),
            _ => None,
        })
        .expect("marker");
    assert_eq!(
        hover,
        "Country: India<br>Year: 2010<br>Coal from electricity: 68.46%<br>Consumption: 642 kWh"
    );
}

#[test]
fn rebuild_is_byte_identical() {
    let source = abc_source();
    let opts = SceneOptions::default();
    let first = build_chart(&source, &Selection::all(), &opts).unwrap();
    let second = build_chart(&source, &Selection::all(), &opts).unwrap();
    assert_eq!(first.scene.to_json().unwrap(), second.scene.to_json().unwrap());
    assert_eq!(first.context, second.context);
}

#[test]
fn scene_json_carries_fixed_ranges() {
    let build = build_chart(&abc_source(), &Selection::all(), &SceneOptions::default()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&build.scene.to_json().unwrap()).unwrap();

    let xr = json["x_axis"]["range"].as_array().expect("x range");
    approx::assert_relative_eq!(xr[0].as_f64().unwrap(), 5.0 * 0.95);
    approx::assert_relative_eq!(xr[1].as_f64().unwrap(), 20.0 * 1.05);
    assert_eq!(json["frames"][0]["layers"][0]["kind"], "trajectory_line");
    assert_eq!(json["frames"][0]["layers"][1]["kind"], "current_point_marker");
    assert_eq!(json["frames"][0]["layers"][1]["color"], "rgb(136, 204, 238)");
}

#[test]
fn malformed_rows_are_fatal() {
    let err = SourceTable::new(vec![obs("A", 2000, f64::NAN, 1.0)]).expect_err("nan rejected");
    assert!(matches!(err, ChartError::InvalidObservation(_)));
    assert_eq!(err.signal(), HostSignal::Fatal);
}
