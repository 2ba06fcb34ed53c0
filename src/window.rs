//! Half-open date windows used to scope a reconciliation run

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{ReconciliationError, ReconciliationResult};

/// Calendar date format accepted for window bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reconciliation window covering every instant from `start 00:00:00` up to,
/// but excluding, the midnight that follows `end`.
///
/// A single-day window (`start == end`) therefore still captures the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Create a window from inclusive calendar bounds
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start > end {
            log::warn!("Date window starts after it ends ({} > {}), nothing will match", start, end);
        }
        Self { start, end }
    }

    /// Parse `YYYY-MM-DD` bounds
    pub fn parse(start: &str, end: &str) -> ReconciliationResult<Self> {
        let parse_bound = |value: &str| {
            NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
                .map_err(|_| ReconciliationError::InvalidDateWindow(value.to_string()))
        };
        Ok(Self::new(parse_bound(start)?, parse_bound(end)?))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive lower bound
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.and_time(chrono::NaiveTime::MIN)
    }

    /// Exclusive upper bound, `None` when `end` is the last representable date
    pub fn effective_end(&self) -> Option<NaiveDateTime> {
        self.end
            .succ_opt()
            .map(|next| next.and_time(chrono::NaiveTime::MIN))
    }

    /// Whether `timestamp` falls inside `[start, end + 1 day)`
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        if *timestamp < self.start_instant() {
            return false;
        }
        self.effective_end().is_none_or(|upper| *timestamp < upper)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
        day.and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_single_day_window_covers_whole_day() {
        let day = date(2025, 1, 3);
        let window = DateWindow::new(day, day);

        assert!(window.contains(&at(day, 0, 0, 0)));
        assert!(window.contains(&at(day, 12, 30, 0)));
        assert!(window.contains(&at(day, 23, 59, 59)));

        assert!(!window.contains(&at(date(2025, 1, 2), 23, 59, 59)));
        assert!(!window.contains(&at(date(2025, 1, 4), 0, 0, 0)));
    }

    #[test]
    fn test_multi_day_window_bounds() {
        let window = DateWindow::new(date(2025, 1, 1), date(2025, 1, 31));
        assert!(window.contains(&at(date(2025, 1, 15), 8, 0, 0)));
        assert!(window.contains(&at(date(2025, 1, 31), 23, 0, 0)));
        assert!(!window.contains(&at(date(2025, 2, 1), 0, 0, 0)));
        assert!(!window.contains(&at(date(2024, 12, 31), 23, 59, 59)));
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let window = DateWindow::new(date(2025, 1, 5), date(2025, 1, 3));
        assert!(!window.contains(&at(date(2025, 1, 4), 10, 0, 0)));
        assert!(!window.contains(&at(date(2025, 1, 5), 10, 0, 0)));
    }

    #[test]
    fn test_window_ending_on_max_date_is_unbounded_above() {
        let window = DateWindow::new(date(2025, 1, 1), NaiveDate::MAX);
        assert_eq!(window.effective_end(), None);
        assert!(window.contains(&NaiveDate::MAX.and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn test_parse_window() {
        let window = DateWindow::parse("2025-01-03", "2025-01-04").unwrap();
        assert_eq!(window.start(), date(2025, 1, 3));
        assert_eq!(window.end(), date(2025, 1, 4));
        assert_eq!(window.to_string(), "2025-01-03 to 2025-01-04");
    }

    #[test]
    fn test_parse_window_rejects_bad_dates() {
        let err = DateWindow::parse("2025-13-01", "2025-01-04").unwrap_err();
        assert!(matches!(err, ReconciliationError::InvalidDateWindow(ref v) if v == "2025-13-01"));

        let err = DateWindow::parse("2025-01-01", "03/01/2025").unwrap_err();
        assert!(matches!(err, ReconciliationError::InvalidDateWindow(_)));
    }
}
