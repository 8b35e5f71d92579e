//! Memento mori grid: one cell per week of an assumed average lifespan,
//! one row per year.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::calc::{age_in_years, days_alive};
use crate::constants::{AVERAGE_LIFESPAN_YEARS, DAYS_PER_WEEK, WEEKS_PER_YEAR};
use crate::error::{CoreError, Result};

pub const X_TITLE: &str = "Weeks in the year";
pub const Y_TITLE: &str = "Years in your life";

/// Lifespan assumptions behind the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LifespanSettings {
    pub average_years: u32,
    pub weeks_per_year: u32,
}

impl Default for LifespanSettings {
    fn default() -> Self {
        Self {
            average_years: AVERAGE_LIFESPAN_YEARS,
            weeks_per_year: WEEKS_PER_YEAR,
        }
    }
}

impl LifespanSettings {
    pub fn total_weeks(&self) -> usize {
        self.average_years as usize * self.weeks_per_year as usize
    }

    pub fn total_days(&self) -> usize {
        self.total_weeks() * DAYS_PER_WEEK as usize
    }
}

/// Row-major lived/unlived matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifespanGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl LifespanGrid {
    /// Mark the first `weeks lived` cells, clamped to the grid size.
    pub fn build(dob: NaiveDate, today: NaiveDate, settings: LifespanSettings) -> Self {
        let rows = settings.average_years as usize;
        let cols = settings.weeks_per_year as usize;
        let total = rows * cols;

        let weeks = days_alive(dob, today).div_euclid(DAYS_PER_WEEK);
        let lived = weeks.clamp(0, total as i64) as usize;

        let mut cells = vec![false; total];
        cells[..lived].fill(true);
        Self { rows, cols, cells }
    }

    /// Reshape a flat sequence into `rows` x `cols`.
    pub fn from_flat(rows: usize, cols: usize, cells: Vec<bool>) -> Result<Self> {
        if rows * cols != cells.len() {
            return Err(CoreError::GridShape {
                rows,
                cols,
                cells: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Iterate over years, each a slice of weeks.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics; an empty grid has no rows anyway
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    pub fn lived_count(&self) -> usize {
        self.cells.iter().filter(|&&lived| lived).count()
    }

    pub fn flatten(&self) -> Vec<bool> {
        self.cells.clone()
    }

    /// 1-based week numbers for the column axis.
    pub fn x_labels(&self) -> Vec<usize> {
        (1..=self.cols).collect()
    }

    /// 1-based year numbers for the row axis.
    pub fn y_labels(&self) -> Vec<usize> {
        (1..=self.rows).collect()
    }
}

/// Years remaining until the average lifespan, never negative.
pub fn years_left(dob: NaiveDate, today: NaiveDate, settings: LifespanSettings) -> f64 {
    (settings.average_years as f64 - age_in_years(dob, today)).max(0.0)
}
