//! Run-history search windows

use chrono::{DateTime, Duration, Utc};

/// Closed time interval used to filter run history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the `days` days before `now`.
    ///
    /// Returns `None` when `days < 1`; callers skip the lookup entirely.
    pub fn lookback(days: i64, now: DateTime<Utc>) -> Option<Self> {
        if days < 1 {
            return None;
        }
        Some(Self {
            start: now - Duration::days(days),
            end: now,
        })
    }

    /// Whether `instant` falls inside the window (inclusive)
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_lookback_one_day() {
        let window = TimeWindow::lookback(1, noon()).unwrap();
        assert_eq!(window.end, noon());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_lookback_below_one_is_none() {
        assert!(TimeWindow::lookback(0, noon()).is_none());
        assert!(TimeWindow::lookback(-3, noon()).is_none());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = TimeWindow::lookback(2, noon()).unwrap();
        assert!(window.contains(noon()));
        assert!(window.contains(window.start));
        assert!(!window.contains(noon() + Duration::seconds(1)));
        assert!(!window.contains(window.start - Duration::seconds(1)));
    }
}
