// File: crates/coalviz-core/src/layer.rs
// Summary: Closed set of drawable layers shared by the interactive scene and the GIF renderer.

use serde::Serialize;

use crate::color::{ColorMap, Rgb};
use crate::error::ChartResult;
use crate::frames::Frame;
use crate::series::Observation;

/// Cumulative path of one country up to the frame year. Hidden from the
/// legend and from hover.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrajectoryLine {
    pub country: String,
    pub color: Rgb,
    pub width: f32,
    pub points: Vec<(f64, f64)>,
}

/// Marker at a country's most recent observation. Carries the legend entry
/// and hover text for its country.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurrentPointMarker {
    pub country: String,
    pub color: Rgb,
    pub size: f32,
    pub year: i32,
    pub point: (f64, f64),
    pub hover: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaceholderText {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    TrajectoryLine(TrajectoryLine),
    CurrentPointMarker(CurrentPointMarker),
    PlaceholderText(PlaceholderText),
}

impl Layer {
    /// Country this layer belongs to, if any.
    pub fn country(&self) -> Option<&str> {
        match self {
            Layer::TrajectoryLine(l) => Some(&l.country),
            Layer::CurrentPointMarker(m) => Some(&m.country),
            Layer::PlaceholderText(_) => None,
        }
    }
}

/// Stroke and marker sizes, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerStyle {
    pub line_width: f32,
    pub marker_size: f32,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self { line_width: 2.0, marker_size: 10.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub country: String,
    pub color: Rgb,
}

/// Hover text for a current-point marker.
pub fn hover_text(obs: &Observation) -> String {
    format!(
        "Country: {}<br>Year: {}<br>Coal from electricity: {:.2}%<br>Consumption: {:.0} kWh",
        obs.country,
        obs.year,
        obs.x,
        obs.y.round()
    )
}

/// Line + marker for every country present in `frame`, in frame order.
pub fn frame_layers(frame: &Frame<'_>, colors: &ColorMap, style: &LayerStyle) -> ChartResult<Vec<Layer>> {
    let mut layers = Vec::with_capacity(frame.entries.len() * 2);
    for entry in &frame.entries {
        let color = colors.get(entry.country).ok_or_else(|| {
            anyhow::anyhow!("no color assigned to '{}'", entry.country)
        })?;
        let current = entry.current();
        layers.push(Layer::TrajectoryLine(TrajectoryLine {
            country: entry.country.to_string(),
            color,
            width: style.line_width,
            points: entry.history.iter().map(Observation::point).collect(),
        }));
        layers.push(Layer::CurrentPointMarker(CurrentPointMarker {
            country: entry.country.to_string(),
            color,
            size: style.marker_size,
            year: current.year,
            point: current.point(),
            hover: hover_text(current),
        }));
    }
    Ok(layers)
}

/// One legend entry per country, in first-seen order, no matter how many
/// layers a country contributes.
pub fn legend_entries(layers: &[Layer]) -> Vec<LegendEntry> {
    let mut out: Vec<LegendEntry> = Vec::new();
    for layer in layers {
        let (country, color) = match layer {
            Layer::TrajectoryLine(l) => (&l.country, l.color),
            Layer::CurrentPointMarker(m) => (&m.country, m.color),
            Layer::PlaceholderText(_) => continue,
        };
        if !out.iter().any(|e| e.country == *country) {
            out.push(LegendEntry { country: country.clone(), color });
        }
    }
    out
}
