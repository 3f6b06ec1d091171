//! Day-offset windows relative to a reference day
//!
//! A window selects entries by the number of whole days between a fixed
//! reference day and the entry's date. The reference day is captured once
//! per query so results stay consistent even if the query spans real time.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Entry;

/// An inclusive day-offset range relative to a reference day
///
/// An entry is inside the window when
/// `min_offset <= (reference - entry.date).days <= max_offset`.
/// Negative offsets select dates after the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    reference: NaiveDate,
    min_offset: i64,
    max_offset: i64,
}

impl Window {
    /// Create a window with explicit offset bounds
    pub fn new(reference: NaiveDate, min_offset: i64, max_offset: i64) -> ExpenseResult<Self> {
        if min_offset > max_offset {
            return Err(ExpenseError::invalid_window(format!(
                "min offset {} is greater than max offset {}",
                min_offset, max_offset
            )));
        }
        Ok(Self {
            reference,
            min_offset,
            max_offset,
        })
    }

    /// A window covering the last `days` days up to and including the
    /// reference day
    pub fn last_days(reference: NaiveDate, days: i64) -> ExpenseResult<Self> {
        Self::new(reference, 0, days)
    }

    /// Day offset of a date from the reference day
    ///
    /// Calendar-date subtraction, so the offset is always a whole number of
    /// days regardless of any time-of-day the caller started from.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        (self.reference - date).num_days()
    }

    /// Whether the date falls inside the window
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        let offset = self.offset_of(date);
        self.min_offset <= offset && offset <= self.max_offset
    }

    /// Whether the entry's date falls inside the window
    pub fn contains(&self, entry: &Entry) -> bool {
        self.contains_date(entry.date)
    }
}
