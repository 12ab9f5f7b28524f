// File: crates/coalviz-core/src/series.rs
// Summary: Observation rows and per-country series sorted by year.
// Notes:
// - A `Series` never holds two observations for the same year; when the input
//   repeats a year, the row that came last wins.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ChartError, ChartResult};

/// One (country, year, x, y) row. `x` is the coal share of generation in
/// percent, `y` the per-capita consumption in kWh.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    pub x: f64,
    pub y: f64,
}

impl Observation {
    pub fn new(country: impl Into<String>, year: i32, x: f64, y: f64) -> Self {
        Self { country: country.into(), year, x, y }
    }

    /// Construct an observation, rejecting empty country names and non-finite metrics.
    pub fn try_new(country: impl Into<String>, year: i32, x: f64, y: f64) -> ChartResult<Self> {
        let obs = Self::new(country, year, x, y);
        obs.validate()?;
        Ok(obs)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.country.trim().is_empty() {
            return Err(ChartError::invalid_observation(format!(
                "empty country name for year {}",
                self.year
            )));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::invalid_observation(format!(
                "non-finite metric for '{}' in {}: x={}, y={}",
                self.country, self.year, self.x, self.y
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn point(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// All observations of one country, strictly ascending by year.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    country: String,
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series from rows in their original order. Rows for other
    /// countries are the caller's bug and are rejected.
    pub fn from_rows(
        country: impl Into<String>,
        rows: impl IntoIterator<Item = Observation>,
    ) -> ChartResult<Self> {
        let country = country.into();
        let mut by_year: BTreeMap<i32, Observation> = BTreeMap::new();
        for row in rows {
            if row.country != country {
                return Err(ChartError::invalid_observation(format!(
                    "row for '{}' passed to series '{}'",
                    row.country, country
                )));
            }
            // later rows replace earlier ones
            by_year.insert(row.year, row);
        }
        Ok(Self::from_sorted_unique(&country, by_year.into_values().collect()))
    }

    pub(crate) fn from_sorted_unique(country: &str, observations: Vec<Observation>) -> Self {
        debug_assert!(observations.windows(2).all(|w| w[0].year < w[1].year));
        Self { country: country.to_string(), observations }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Prefix of the series with `year <= until`.
    pub fn history_until(&self, until: i32) -> &[Observation] {
        let n = self.observations.partition_point(|o| o.year <= until);
        &self.observations[..n]
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.observations.iter().map(|o| o.year)
    }
}
