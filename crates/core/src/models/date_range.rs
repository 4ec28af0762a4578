use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Longest custom reporting window accepted, in days (10 years).
pub const MAX_RANGE_DAYS: i64 = 3650;

/// The user-selected reporting window controlling which transactions are loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateRange {
    /// From the first day of the current month through today (default)
    #[default]
    ThisMonth,
    /// The 30 days ending today, inclusive
    Last30,
    /// The 60 days ending today, inclusive
    Last60,
    /// An explicit inclusive window
    Custom { from: NaiveDate, to: NaiveDate },
}

impl DateRange {
    /// Build a custom range, rejecting windows that could never resolve.
    pub fn custom(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        validate_window(from, to)?;
        Ok(DateRange::Custom { from, to })
    }

    /// Resolve the range to concrete dates relative to `today`.
    pub fn resolve(&self, today: NaiveDate) -> Result<DateWindow, CoreError> {
        let (from, to) = match *self {
            DateRange::ThisMonth => (today.with_day(1).unwrap_or(today), today),
            DateRange::Last30 => (today - Duration::days(29), today),
            DateRange::Last60 => (today - Duration::days(59), today),
            DateRange::Custom { from, to } => (from, to),
        };
        validate_window(from, to)?;
        Ok(DateWindow { from, to })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRange::ThisMonth => write!(f, "This Month"),
            DateRange::Last30 => write!(f, "Last 30 Days"),
            DateRange::Last60 => write!(f, "Last 60 Days"),
            DateRange::Custom { from, to } => write!(f, "{from} – {to}"),
        }
    }
}

/// A resolved, inclusive `[from, to]` date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

fn validate_window(from: NaiveDate, to: NaiveDate) -> Result<(), CoreError> {
    if from > to {
        return Err(CoreError::InvalidDateRange {
            from,
            to,
            reason: "start date is after end date".into(),
        });
    }
    let range_days = (to - from).num_days();
    if range_days > MAX_RANGE_DAYS {
        return Err(CoreError::InvalidDateRange {
            from,
            to,
            reason: format!("{range_days} days exceeds the maximum of {MAX_RANGE_DAYS} days"),
        });
    }
    Ok(())
}
