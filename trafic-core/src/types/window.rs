//! The trailing report window.
//!
//! The evaluation instant (`as_of`) is always an explicit parameter — the
//! core never reads the ambient clock, so a report is a pure function of
//! (`as_of`, input tables).

use chrono::{Days, NaiveDate, NaiveDateTime};

/// Default trailing window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Inclusive calendar-date window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// The trailing `window_days`-day window ending on `as_of`'s calendar
    /// date. Both boundary days are included: a summary dated exactly
    /// `window_days` days before `as_of` is in the window.
    pub fn trailing(as_of: NaiveDateTime, window_days: u32) -> Self {
        let end = as_of.date();
        // NaiveDate covers all dates Days::new(u32) can reach; fall back to
        // the earliest representable date rather than panicking.
        let start = end
            .checked_sub_days(Days::new(u64::from(window_days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn boundary_day_included_366th_excluded() {
        let window = ReportWindow::trailing(as_of(), DEFAULT_WINDOW_DAYS);
        let day_365 = as_of().date().checked_sub_days(Days::new(365)).unwrap();
        let day_366 = as_of().date().checked_sub_days(Days::new(366)).unwrap();
        assert!(window.contains(day_365));
        assert!(!window.contains(day_366));
    }

    #[test]
    fn as_of_day_included_future_excluded() {
        let window = ReportWindow::trailing(as_of(), DEFAULT_WINDOW_DAYS);
        assert!(window.contains(as_of().date()));
        let tomorrow = as_of().date().checked_add_days(Days::new(1)).unwrap();
        assert!(!window.contains(tomorrow));
    }

    #[test]
    fn time_of_day_does_not_move_the_window() {
        let morning = ReportWindow::trailing(as_of(), DEFAULT_WINDOW_DAYS);
        let midnight = ReportWindow::trailing(
            as_of().date().and_hms_opt(0, 0, 0).unwrap(),
            DEFAULT_WINDOW_DAYS,
        );
        assert_eq!(morning, midnight);
    }
}
