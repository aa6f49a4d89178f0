use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Deserialize;

/// Half-open wall-clock interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole days starting at midnight of `first`.
    #[must_use]
    pub fn days(first: NaiveDate, count: u32) -> Self {
        let start = first.and_time(NaiveTime::MIN);
        Self::new(start, start + TimeDelta::days(i64::from(count)))
    }

    /// ## Summary
    /// Tests whether `[start, end)` intersects this range.
    ///
    /// An interval with `end <= start` is a point at `start` and overlaps
    /// when `self.start <= start < self.end`.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if end <= start {
            self.start <= start && start < self.end
        } else {
            start < self.end && end > self.start
        }
    }

    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}
