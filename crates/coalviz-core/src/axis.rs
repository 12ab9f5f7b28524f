// File: crates/coalviz-core/src/axis.rs
// Summary: Axis model with labels and the padded data ranges shared by both renderers.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::error::{ChartError, ChartResult};
use crate::table::FilteredTable;

/// Padding applied below the observed minimum.
pub const MIN_PAD: f64 = 0.95;
/// Padding applied above the observed maximum.
pub const MAX_PAD: f64 = 1.05;

/// Fixed `[min, max]` for one axis. Serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scale observed extremes by the fixed 5% visual pad.
    pub fn padded(observed_min: f64, observed_max: f64) -> Self {
        Self { min: observed_min * MIN_PAD, max: observed_max * MAX_PAD }
    }

    /// Width of the range, floored so pixel mapping never divides by zero.
    #[inline]
    pub fn span(&self) -> f64 {
        (self.max - self.min).max(1e-9)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

impl Serialize for AxisRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut t = serializer.serialize_tuple(2)?;
        t.serialize_element(&self.min)?;
        t.serialize_element(&self.max)?;
        t.end()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub range: AxisRange,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), range: AxisRange::new(min, max) }
    }

    pub fn with_range(label: impl Into<String>, range: AxisRange) -> Self {
        Self { label: label.into(), range }
    }
}

/// Padded x and y ranges over every retained observation.
///
/// Callers handle the empty selection before getting here; an empty table
/// still reports `NoData` rather than producing infinite bounds.
pub fn compute_axis_ranges(table: &FilteredTable) -> ChartResult<(AxisRange, AxisRange)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut any = false;
    for o in table.observations() {
        x_min = x_min.min(o.x);
        x_max = x_max.max(o.x);
        y_min = y_min.min(o.y);
        y_max = y_max.max(o.y);
        any = true;
    }
    if !any {
        return Err(ChartError::no_data("cannot compute axis ranges over an empty table"));
    }
    Ok((AxisRange::padded(x_min, x_max), AxisRange::padded(y_min, y_max)))
}
