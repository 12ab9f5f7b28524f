// File: crates/coalviz-core/src/lib.rs
// Summary: Core library entry point; builds animated trajectory scenes and their GIF exports.

pub mod axis;
pub mod color;
pub mod context;
pub mod error;
pub mod export;
pub mod frames;
pub mod geometry;
pub mod grid;
pub mod layer;
pub mod render;
pub mod scene;
pub mod series;
pub mod table;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::{compute_axis_ranges, Axis, AxisRange};
pub use color::{assign_colors, ColorMap, Palette, Rgb};
pub use context::AnimationContext;
pub use error::{ChartError, ChartResult, HostSignal};
pub use export::{encode_gif, ExportOptions, FrameRasterizer, GifExport, GifExporter, StillFrame};
pub use frames::{Frame, FrameEntry, TrajectoryFrames};
pub use layer::{legend_entries, Layer, LayerStyle, LegendEntry};
pub use render::{RenderOptions, SkiaRasterizer};
pub use scene::{build_chart, ChartBuild, ChartLabels, Scene, SceneOptions};
pub use series::{Observation, Series};
pub use table::{FilteredTable, Selection, SourceTable};
pub use theme::Theme;
