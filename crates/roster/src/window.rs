//! Event-time filtering for collection runs.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{Error, Result};

/// An inclusive `[start, end]` range over event timestamps.
///
/// Both bounds come from calendar dates (`YYYY-MM-DD`) interpreted as
/// midnight UTC, and both comparisons are inclusive. Because `end` is the
/// first instant of the end date, events later on that date fall outside
/// the window. A window only exists when both dates were supplied;
/// otherwise no filtering occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window from two `YYYY-MM-DD` dates.
    pub fn from_dates(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    /// Build a window only when both bounds are present.
    pub fn from_optional_dates(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Some(Self::from_dates(start, end)?)),
            _ => Ok(None),
        }
    }

    /// Whether `t` falls inside the window, bounds included.
    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }

    /// Start of the window.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the window.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|source| {
        Error::InvalidDate {
            input: input.to_string(),
            source,
        }
    })?;

    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
