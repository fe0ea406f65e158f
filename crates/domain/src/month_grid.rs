// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed six-week month layout for calendar screens.

use crate::date_key::DateKey;
use crate::error::DomainError;
use time::{Date, Duration};

/// Number of cells in a month grid (6 rows of 7 days).
pub const MONTH_GRID_CELLS: usize = 42;

/// One day cell in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    /// The day this cell shows.
    pub key: DateKey,
    /// Whether the day belongs to the reference month.
    pub in_month: bool,
}

/// Builds the 42-cell grid for the month containing `reference`.
///
/// The grid starts on the Sunday on or before the 1st of the month and
/// always spans six full weeks, whatever the month length or start weekday.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` when the grid would leave
/// the representable date range.
pub fn build_month_grid(reference: Date) -> Result<Vec<MonthCell>, DomainError> {
    let first: Date = Date::from_calendar_date(reference.year(), reference.month(), 1)
        .map_err(|e| DomainError::DateArithmeticOverflow {
            operation: format!("locating the first day of the month: {e}"),
        })?;
    let lead: i64 = i64::from(first.weekday().number_days_from_sunday());
    let start: Date =
        first
            .checked_sub(Duration::days(lead))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("locating the grid start"),
            })?;

    let mut cells: Vec<MonthCell> = Vec::with_capacity(MONTH_GRID_CELLS);
    let mut day: Date = start;
    for index in 0..MONTH_GRID_CELLS {
        cells.push(MonthCell {
            key: DateKey::from_date(day),
            in_month: day.month() == first.month() && day.year() == first.year(),
        });
        if index + 1 < MONTH_GRID_CELLS {
            day = day
                .next_day()
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: String::from("filling the month grid"),
                })?;
        }
    }
    Ok(cells)
}
