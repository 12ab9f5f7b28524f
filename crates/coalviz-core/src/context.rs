// File: crates/coalviz-core/src/context.rs
// Summary: Immutable bundle handed from scene assembly to raster export.

use crate::axis::{compute_axis_ranges, AxisRange};
use crate::color::{assign_colors, ColorMap, Palette};
use crate::error::{ChartError, ChartResult};
use crate::frames::TrajectoryFrames;
use crate::series::Series;
use crate::table::FilteredTable;

/// Years, countries, series, colors and fixed ranges of one build. Both the
/// interactive scene and the GIF export read from the same context, so they
/// agree on scale and color.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationContext {
    table: FilteredTable,
    colors: ColorMap,
    x_range: AxisRange,
    y_range: AxisRange,
}

impl AnimationContext {
    /// Assign colors and compute ranges for a filtered table. An empty table
    /// is reported as `NoData` before any range math runs.
    pub fn new(table: FilteredTable, palette: &Palette) -> ChartResult<Self> {
        if table.is_empty() {
            return Err(ChartError::no_data("selection matched no rows"));
        }
        let colors = assign_colors(table.countries(), palette);
        let (x_range, y_range) = compute_axis_ranges(&table)?;
        tracing::debug!(
            countries = colors.len(),
            years = table.years().len(),
            observations = table.len(),
            "animation context built"
        );
        Ok(Self { table, colors, x_range, y_range })
    }

    pub fn years(&self) -> &[i32] {
        self.table.years()
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.table.countries()
    }

    pub fn series(&self, country: &str) -> Option<&Series> {
        self.table.series(country)
    }

    pub fn table(&self) -> &FilteredTable {
        &self.table
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn x_range(&self) -> AxisRange {
        self.x_range
    }

    pub fn y_range(&self) -> AxisRange {
        self.y_range
    }

    /// Fresh frame sequence over the context's table.
    pub fn frames(&self) -> ChartResult<TrajectoryFrames<'_>> {
        TrajectoryFrames::new(&self.table)
    }
}
