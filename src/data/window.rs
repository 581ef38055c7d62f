//! Selection of the visible slice of a pre-recorded, time-sorted dataset.

use std::ops::Range;

/// Number of rows returned when fewer than two rows precede the cursor.
pub const MIN_WINDOW_ROWS: usize = 2;

/// Picks the most recent rows with `time < t_now`, bounded by `max_points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindowSelector {
    max_points: usize,
}

impl TimeWindowSelector {
    /// `max_points` below [`MIN_WINDOW_ROWS`] is raised to it so the result is
    /// never a single-point series.
    pub fn new(max_points: usize) -> Self {
        Self {
            max_points: max_points.max(MIN_WINDOW_ROWS),
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Row indices visible at `t_now`.
    ///
    /// `times` must be sorted ascending. The result is contiguous; when fewer
    /// than two rows qualify it falls back to the first two rows (or fewer if
    /// the dataset itself is that small).
    pub fn select(&self, times: &[f64], t_now: f64) -> Range<usize> {
        let end = times.partition_point(|&t| t < t_now);
        if end < MIN_WINDOW_ROWS {
            return 0..times.len().min(MIN_WINDOW_ROWS);
        }
        end.saturating_sub(self.max_points)..end
    }
}
