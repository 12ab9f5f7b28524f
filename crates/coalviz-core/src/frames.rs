// File: crates/coalviz-core/src/frames.rs
// Summary: Per-year animation frames holding each country's cumulative trajectory.
// Notes:
// - Frames borrow prefix slices of the filtered series; nothing is copied
//   until a scene or still image is assembled from them.

use crate::error::{ChartError, ChartResult};
use crate::series::{Observation, Series};
use crate::table::FilteredTable;

/// One country's contribution to a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEntry<'a> {
    pub country: &'a str,
    /// Observations with `year <= frame.year`, ascending. Never empty.
    pub history: &'a [Observation],
}

impl<'a> FrameEntry<'a> {
    /// Most recent observation within the history.
    pub fn current(&self) -> &'a Observation {
        // history is non-empty by construction
        &self.history[self.history.len() - 1]
    }
}

/// Drawable state of the animation at one year.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<'a> {
    pub year: i32,
    pub entries: Vec<FrameEntry<'a>>,
}

impl<'a> Frame<'a> {
    pub fn entry(&self, country: &str) -> Option<&FrameEntry<'a>> {
        self.entries.iter().find(|e| e.country == country)
    }

    pub fn countries(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|e| e.country)
    }
}

/// Lazy, restartable sequence of frames, one per year in ascending order.
#[derive(Clone, Debug)]
pub struct TrajectoryFrames<'a> {
    series: Vec<&'a Series>,
    years: &'a [i32],
    next: usize,
}

impl<'a> TrajectoryFrames<'a> {
    /// Fails with `NoData` when the table holds no rows or no years, so an
    /// empty selection is never mistaken for an animation with no history.
    pub fn new(table: &'a FilteredTable) -> ChartResult<Self> {
        if table.is_empty() {
            return Err(ChartError::no_data("filtered table is empty"));
        }
        if table.years().is_empty() {
            return Err(ChartError::no_data("no years in filtered table"));
        }
        Ok(Self { series: table.iter_series().collect(), years: table.years(), next: 0 })
    }

    pub fn years(&self) -> &'a [i32] {
        self.years
    }

    /// Build the frame for `year` directly, without walking earlier years.
    pub fn frame_at(&self, year: i32) -> Frame<'a> {
        let entries = self
            .series
            .iter()
            .filter_map(|s| {
                let history = s.history_until(year);
                if history.is_empty() {
                    None
                } else {
                    Some(FrameEntry { country: s.country(), history })
                }
            })
            .collect();
        Frame { year, entries }
    }
}

impl<'a> Iterator for TrajectoryFrames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let year = *self.years.get(self.next)?;
        self.next += 1;
        Some(self.frame_at(year))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.years.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for TrajectoryFrames<'_> {}
