// File: crates/coalviz-core/src/table.rs
// Summary: Read-only source table, filter selection and the deduplicated filtered view.
// Notes:
// - `SourceTable` is built once by the host and passed by reference into every
//   build. Filtering copies rows; the source is never mutated.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ChartResult;
use crate::series::{Observation, Series};

/// Immutable handle over every cleaned row, in original row order.
#[derive(Clone, Debug, Default)]
pub struct SourceTable {
    rows: Vec<Observation>,
}

impl SourceTable {
    /// Wrap cleaned rows. Any malformed row fails the whole table.
    pub fn new(rows: Vec<Observation>) -> ChartResult<Self> {
        for row in &rows {
            row.validate()?;
        }
        tracing::debug!(rows = rows.len(), "source table loaded");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct country names, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.country.as_str()).collect();
        set.into_iter().collect()
    }

    /// Apply `selection` and deduplicate (country, year) pairs, last row wins.
    pub fn filter(&self, selection: &Selection) -> FilteredTable {
        let mut grouped: BTreeMap<&str, Vec<Observation>> = BTreeMap::new();
        for row in self.rows.iter().filter(|r| selection.matches(r)) {
            grouped.entry(row.country.as_str()).or_default().push(row.clone());
        }

        let mut series = BTreeMap::new();
        let mut years = BTreeSet::new();
        for (country, rows) in grouped {
            let mut by_year: BTreeMap<i32, Observation> = BTreeMap::new();
            for row in rows {
                by_year.insert(row.year, row);
            }
            years.extend(by_year.keys().copied());
            series.insert(
                country.to_string(),
                Series::from_sorted_unique(country, by_year.into_values().collect()),
            );
        }

        FilteredTable { series, years: years.into_iter().collect() }
    }
}

/// Host filter state: selected countries (empty = all) and an optional
/// inclusive year window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    countries: Vec<String>,
    year_from: Option<i32>,
    year_to: Option<i32>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    /// Select the given countries, keeping their order and dropping repeats.
    pub fn countries<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for c in countries {
            let c = c.into();
            if !out.contains(&c) {
                out.push(c);
            }
        }
        Self { countries: out, year_from: None, year_to: None }
    }

    pub fn with_year_from(mut self, year: i32) -> Self {
        self.year_from = Some(year);
        self
    }

    pub fn with_year_to(mut self, year: i32) -> Self {
        self.year_to = Some(year);
        self
    }

    pub fn with_years(self, from: i32, to: i32) -> Self {
        self.with_year_from(from).with_year_to(to)
    }

    pub fn selected_countries(&self) -> &[String] {
        &self.countries
    }

    pub fn is_all_countries(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn year_bounds(&self) -> (Option<i32>, Option<i32>) {
        (self.year_from, self.year_to)
    }

    pub fn matches(&self, obs: &Observation) -> bool {
        let country_ok = self.countries.is_empty() || self.countries.iter().any(|c| *c == obs.country);
        let from_ok = self.year_from.map_or(true, |y| obs.year >= y);
        let to_ok = self.year_to.map_or(true, |y| obs.year <= y);
        country_ok && from_ok && to_ok
    }
}

/// Rows surviving a selection, grouped into per-country series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredTable {
    series: BTreeMap<String, Series>,
    years: Vec<i32>,
}

impl FilteredTable {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of retained observations across all countries.
    pub fn len(&self) -> usize {
        self.series.values().map(Series::len).sum()
    }

    /// Countries in lexicographic order.
    pub fn countries(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.series.keys().map(String::as_str)
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn series(&self, country: &str) -> Option<&Series> {
        self.series.get(country)
    }

    pub fn iter_series(&self) -> impl Iterator<Item = &Series> + Clone + '_ {
        self.series.values()
    }

    pub fn observations(&self) -> impl Iterator<Item = &Observation> + '_ {
        self.series.values().flat_map(|s| s.observations().iter())
    }
}
