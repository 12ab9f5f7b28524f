// File: crates/coalviz-core/src/scene.rs
// Summary: Assembles frames, colors and ranges into a serializable animated scene.
// Notes:
// - The scene is a description for an interactive charting surface: an
//   initial layer set, one layer set per year, and play/pause + slider
//   metadata. Axis ranges are fixed for the whole animation.

use serde::Serialize;

use crate::axis::AxisRange;
use crate::color::Palette;
use crate::context::AnimationContext;
use crate::error::{ChartError, ChartResult};
use crate::layer::{frame_layers, legend_entries, Layer, LayerStyle, LegendEntry, PlaceholderText};
use crate::table::{Selection, SourceTable};

/// Text shown on both renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub no_data_title: String,
    pub no_data_text: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title: "Electricity Consumption vs. Coal Percentage".to_string(),
            x_title: "Electricity from Coal (% of total)".to_string(),
            y_title: "Electricity consumption per capita (kWh)".to_string(),
            no_data_title: "No data available for the selected filters".to_string(),
            no_data_text: "No data for selection".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneOptions {
    pub labels: ChartLabels,
    pub palette: Palette,
    pub style: LayerStyle,
    /// Display time per frame while playing.
    pub frame_duration_ms: u64,
    pub transition_duration_ms: u64,
    pub height: u32,
    pub tick_font_size: u32,
    pub title_font_size: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            labels: ChartLabels::default(),
            palette: Palette::default(),
            style: LayerStyle::default(),
            frame_duration_ms: 400,
            transition_duration_ms: 100,
            height: 700,
            tick_font_size: 14,
            title_font_size: 18,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisSpec {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<AxisRange>,
    pub tick_font_size: u32,
    pub title_font_size: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneFrame {
    /// Year label, also the slider step target.
    pub name: String,
    pub year: i32,
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayButton {
    pub label: String,
    pub frame_duration_ms: u64,
    pub transition_duration_ms: u64,
    pub redraw: bool,
    pub from_current: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PauseButton {
    pub label: String,
    pub frame_duration_ms: u64,
    pub immediate: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SliderStep {
    pub label: String,
    pub frame: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slider {
    pub active: usize,
    pub current_value_prefix: String,
    pub steps: Vec<SliderStep>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaybackControls {
    pub play: PlayButton,
    pub pause: PauseButton,
    pub slider: Slider,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    /// Layers visible before playback starts (the first frame).
    pub data: Vec<Layer>,
    pub frames: Vec<SceneFrame>,
    pub legend: Vec<LegendEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<PlaybackControls>,
    pub hover_mode: String,
    pub height: u32,
}

impl Scene {
    pub fn is_placeholder(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, year: i32) -> Option<&SceneFrame> {
        self.frames.iter().find(|f| f.year == year)
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChartError::Other(e.into()))
    }
}

/// Output of one build. `context` is `None` when the selection had no data;
/// the host should then show an informational message and disable export.
#[derive(Clone, Debug)]
pub struct ChartBuild {
    pub scene: Scene,
    pub context: Option<AnimationContext>,
}

impl ChartBuild {
    pub fn has_data(&self) -> bool {
        self.context.is_some()
    }
}

/// Filter the source, then assemble the animated scene and its export context.
#[tracing::instrument(skip_all, fields(rows = source.len(), selected = selection.selected_countries().len()))]
pub fn build_chart(source: &SourceTable, selection: &Selection, opts: &SceneOptions) -> ChartResult<ChartBuild> {
    let table = source.filter(selection);
    let context = match AnimationContext::new(table, &opts.palette) {
        Ok(ctx) => ctx,
        Err(e) if e.is_no_data() => {
            tracing::debug!(reason = %e, "building placeholder scene");
            return Ok(ChartBuild { scene: placeholder_scene(opts), context: None });
        }
        Err(e) => return Err(e),
    };
    let scene = assemble_scene(&context, selection, opts)?;
    Ok(ChartBuild { scene, context: Some(context) })
}

/// Scene for a non-empty context.
pub fn assemble_scene(ctx: &AnimationContext, selection: &Selection, opts: &SceneOptions) -> ChartResult<Scene> {
    let mut frames = Vec::with_capacity(ctx.years().len());
    for frame in ctx.frames()? {
        frames.push(SceneFrame {
            name: frame.year.to_string(),
            year: frame.year,
            layers: frame_layers(&frame, ctx.colors(), &opts.style)?,
        });
    }

    let data = frames.first().map(|f| f.layers.clone()).unwrap_or_default();
    let legend = legend_entries(frames.last().map(|f| f.layers.as_slice()).unwrap_or_default());

    let names: Vec<&str> = if selection.is_all_countries() {
        ctx.countries().collect()
    } else {
        selection.selected_countries().iter().map(String::as_str).collect()
    };

    let controls = PlaybackControls {
        play: PlayButton {
            label: "Play".to_string(),
            frame_duration_ms: opts.frame_duration_ms,
            transition_duration_ms: opts.transition_duration_ms,
            redraw: true,
            from_current: true,
        },
        pause: PauseButton { label: "Pause".to_string(), frame_duration_ms: 0, immediate: true },
        slider: Slider {
            active: 0,
            current_value_prefix: "Year: ".to_string(),
            steps: frames
                .iter()
                .map(|f| SliderStep { label: f.name.clone(), frame: f.name.clone() })
                .collect(),
        },
    };

    tracing::debug!(frames = frames.len(), legend = legend.len(), "scene assembled");

    Ok(Scene {
        title: format!("{} ({})", opts.labels.title, names.join(", ")),
        x_axis: axis_spec(&opts.labels.x_title, Some(ctx.x_range()), opts),
        y_axis: axis_spec(&opts.labels.y_title, Some(ctx.y_range()), opts),
        data,
        frames,
        legend,
        controls: Some(controls),
        hover_mode: "closest".to_string(),
        height: opts.height,
    })
}

/// Scene shown when the selection matched nothing: a single text layer, no
/// frames, no playback controls.
pub fn placeholder_scene(opts: &SceneOptions) -> Scene {
    Scene {
        title: opts.labels.no_data_title.clone(),
        x_axis: axis_spec(&opts.labels.x_title, None, opts),
        y_axis: axis_spec(&opts.labels.y_title, None, opts),
        data: vec![Layer::PlaceholderText(PlaceholderText { text: opts.labels.no_data_text.clone() })],
        frames: Vec::new(),
        legend: Vec::new(),
        controls: None,
        hover_mode: "closest".to_string(),
        height: opts.height,
    }
}

fn axis_spec(title: &str, range: Option<AxisRange>, opts: &SceneOptions) -> AxisSpec {
    AxisSpec {
        title: title.to_string(),
        range,
        tick_font_size: opts.tick_font_size,
        title_font_size: opts.title_font_size,
    }
}
