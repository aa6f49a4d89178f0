//! Per-day appointment counts for list (agenda) views.

use chrono::{NaiveDate, TimeDelta};

use crate::recurrence::Occurrence;
use crate::resource::ResourceResolver;
use crate::temporal::DateRange;

/// Counts occurrences per day of a fixed run of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaRowPacker {
    first_day: NaiveDate,
    day_count: u32,
}

impl AgendaRowPacker {
    #[must_use]
    pub const fn new(first_day: NaiveDate, day_count: u32) -> Self {
        Self {
            first_day,
            day_count,
        }
    }

    /// Half-open range from the first day's midnight over `day_count` days.
    #[must_use]
    pub fn range(self) -> DateRange {
        DateRange::days(self.first_day, self.day_count)
    }

    /// ## Summary
    /// Number of occurrences touching each day.
    ///
    /// An occurrence counts once on every calendar day from its start
    /// through the day of its last instant; a zero-length one counts on its
    /// start day. Exception occurrences are not counted.
    #[must_use]
    pub fn day_counts<'o, 'a: 'o>(
        self,
        occurrences: impl IntoIterator<Item = &'o Occurrence<'a>>,
    ) -> Vec<u32> {
        let mut counts = vec![0_u32; self.day_count as usize];
        for occurrence in occurrences {
            if occurrence.is_exception {
                continue;
            }
            let last_day = if occurrence.end > occurrence.start {
                (occurrence.end - TimeDelta::milliseconds(1)).date()
            } else {
                occurrence.start.date()
            };
            for date in occurrence
                .start
                .date()
                .iter_days()
                .take_while(|date| *date <= last_day)
            {
                if let Some(count) = self.slot(date).and_then(|index| counts.get_mut(index)) {
                    *count += 1;
                }
            }
        }
        counts
    }

    /// ## Summary
    /// One row of day counts per group of `resolver`.
    ///
    /// A group without any counted occurrence gets an empty row. Ungrouped
    /// resolvers produce a single row.
    #[must_use]
    pub fn pack(
        self,
        occurrences: &[Occurrence<'_>],
        resolver: &ResourceResolver<'_>,
    ) -> Vec<Vec<u32>> {
        let group_count = resolver.group_count();
        let mut buckets: Vec<Vec<&Occurrence<'_>>> = vec![Vec::new(); group_count];
        for occurrence in occurrences {
            for group in resolver.resolve_group_indices(occurrence.source) {
                if let Some(bucket) = buckets.get_mut(group) {
                    bucket.push(occurrence);
                }
            }
        }

        buckets
            .into_iter()
            .enumerate()
            .map(|(group, bucket)| {
                let counts = self.day_counts(bucket);
                if counts.iter().all(|count| *count == 0) {
                    tracing::trace!(group, "Agenda group has no appointments");
                    Vec::new()
                } else {
                    counts
                }
            })
            .collect()
    }

    fn slot(self, date: NaiveDate) -> Option<usize> {
        let offset = usize::try_from((date - self.first_day).num_days()).ok()?;
        (offset < self.day_count as usize).then_some(offset)
    }
}

impl From<DateRange> for AgendaRowPacker {
    /// Packer over every calendar day the range touches.
    fn from(range: DateRange) -> Self {
        let first_day = range.start.date();
        let last_day = if range.end > range.start {
            (range.end - TimeDelta::milliseconds(1)).date()
        } else {
            first_day
        };
        let days = (last_day - first_day).num_days() + 1;
        Self::new(first_day, u32::try_from(days).unwrap_or(0))
    }
}

/// ## Summary
/// Per-group day counts of `occurrences` over the days `day_range` touches.
#[must_use]
pub fn pack_rows(
    occurrences: &[Occurrence<'_>],
    day_range: DateRange,
    groups: &ResourceResolver<'_>,
) -> Vec<Vec<u32>> {
    AgendaRowPacker::from(day_range).pack(occurrences, groups)
}
