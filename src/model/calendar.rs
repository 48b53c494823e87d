use chrono::{Datelike, Days, Duration, NaiveDate};

use super::error::PlannerError;

pub const GRID_COLUMNS: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// The 42 consecutive dates shown for a month, starting on the Sunday on or
/// before the 1st. Leading and trailing cells spill into adjacent months.
pub fn month_dates(year: i32, month: u32) -> Result<[NaiveDate; GRID_CELLS], PlannerError> {
    let invalid = || PlannerError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let start = first.checked_sub_days(Days::new(lead)).ok_or_else(invalid)?;
    // Bounds-check the last cell once so the fill below cannot overflow.
    start
        .checked_add_days(Days::new(GRID_CELLS as u64 - 1))
        .ok_or_else(invalid)?;
    Ok(std::array::from_fn(|i| start + Duration::days(i as i64)))
}

/// Inclusive, ascending run of days between `a` and `b` in either order.
pub fn date_range(a: NaiveDate, b: NaiveDate) -> Vec<NaiveDate> {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Signed whole days from `b` to `a`.
pub fn difference_in_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}

/// True when the dates, in any order, form a gap-free run of days.
pub fn is_consecutive(dates: &[NaiveDate]) -> bool {
    let mut sorted = dates.to_vec();
    sorted.sort();
    sorted
        .windows(2)
        .all(|pair| difference_in_days(pair[1], pair[0]) == 1)
}

/// The fixed six-week grid for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    dates: [NaiveDate; GRID_CELLS],
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Result<Self, PlannerError> {
        Ok(Self {
            year,
            month,
            dates: month_dates(year, month)?,
        })
    }

    /// Grid for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, PlannerError> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn first(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.dates[GRID_CELLS - 1]
    }

    /// Grid index (0..42) of an exact day, or `None` when it is not visible.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.first()).num_days();
        (0..GRID_CELLS as i64)
            .contains(&offset)
            .then_some(offset as usize)
    }

    /// `(row, col)` of a grid index.
    pub fn position(index: usize) -> (usize, usize) {
        (index / GRID_COLUMNS, index % GRID_COLUMNS)
    }

    pub fn date_at(&self, row: usize, col: usize) -> Option<NaiveDate> {
        if row >= GRID_ROWS || col >= GRID_COLUMNS {
            return None;
        }
        Some(self.dates[row * GRID_COLUMNS + col])
    }

    /// False for the muted spill-over cells of the neighbouring months.
    pub fn is_in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Result<Self, PlannerError> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn previous(&self) -> Result<Self, PlannerError> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// e.g. "June 2024".
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

/// Pixel geometry of the rendered grid, used to project pointer positions
/// back onto cells while a resize is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub column_width: f32,
    pub row_height: f32,
}

impl GridGeometry {
    pub fn from_size(width: f32, row_height: f32) -> Self {
        Self {
            column_width: width / GRID_COLUMNS as f32,
            row_height,
        }
    }

    /// Clamped `(row, col)` under a point relative to the grid's top-left.
    /// Points outside the grid snap to the nearest edge cell.
    pub fn cell_at(&self, x: f32, y: f32) -> (usize, usize) {
        (
            clamp_axis(y, self.row_height, GRID_ROWS - 1),
            clamp_axis(x, self.column_width, GRID_COLUMNS - 1),
        )
    }

    pub fn date_at(&self, grid: &MonthGrid, x: f32, y: f32) -> NaiveDate {
        let (row, col) = self.cell_at(x, y);
        grid.dates()[row * GRID_COLUMNS + col]
    }
}

fn clamp_axis(pos: f32, cell: f32, max: usize) -> usize {
    if cell <= 0.0 {
        return 0;
    }
    let idx = (pos / cell).floor();
    if idx.is_nan() || idx <= 0.0 {
        0
    } else {
        (idx as usize).min(max)
    }
}
