//! Series expansion using the `rrule` crate.

use chrono::{NaiveDateTime, TimeDelta};
use kairos_core::constants::DEFAULT_MAX_OCCURRENCES;
use rrule::{RRule, RRuleSet, Tz, Unvalidated};

use super::RecurrenceRule;
use crate::error::{LayoutError, LayoutResult};
use crate::temporal::DateRange;

/// One generated instance of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStep {
    pub start: NaiveDateTime,
    /// Start is listed among the series' exception dates.
    pub is_exception: bool,
}

/// A recurring (or single) appointment reduced to its anchor, duration and
/// stepping rule.
///
/// An unusable rule degrades the series to its anchor alone.
#[derive(Debug)]
pub struct RecurrenceSeries {
    anchor: NaiveDateTime,
    duration: TimeDelta,
    rule: Option<RecurrenceRule>,
    rrule_set: Option<RRuleSet>,
    exceptions: Vec<NaiveDateTime>,
    max_occurrences: usize,
}

impl RecurrenceSeries {
    /// ## Summary
    /// Builds a series anchored at `anchor` (used as `DTSTART`).
    ///
    /// ## Side Effects
    /// Logs at `debug` when `rule_text` is present but cannot be used.
    #[must_use]
    pub fn new(
        rule_text: Option<&str>,
        anchor: NaiveDateTime,
        duration: TimeDelta,
        exceptions: Vec<NaiveDateTime>,
    ) -> Self {
        let built = rule_text
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .and_then(|text| match build_rrule_set(text, anchor) {
                Ok(built) => Some(built),
                Err(err) => {
                    tracing::debug!(
                        rule = text,
                        error = %err,
                        "Recurrence rule rejected, treating appointment as non-recurring"
                    );
                    None
                }
            });
        let (rule, rrule_set) = built.map_or((None, None), |(rule, set)| (Some(rule), Some(set)));

        Self {
            anchor,
            duration,
            rule,
            rrule_set,
            exceptions,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }

    /// Caps the number of occurrences a single query yields.
    #[must_use]
    pub const fn with_max_occurrences(mut self, max: usize) -> Self {
        self.max_occurrences = max;
        self
    }

    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.rrule_set.is_some()
    }

    #[must_use]
    pub const fn rule(&self) -> Option<&RecurrenceRule> {
        self.rule.as_ref()
    }

    #[must_use]
    pub const fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    #[must_use]
    pub const fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// ## Summary
    /// Lazily yields steps whose `[start, start + duration)` overlaps `range`.
    ///
    /// Each call restarts from the anchor. Iteration stops at the rule's own
    /// bound, at the end of `range`, or after `max_occurrences` steps.
    pub fn occurrences(&self, range: DateRange) -> impl Iterator<Item = SeriesStep> + '_ {
        let steps: Box<dyn Iterator<Item = NaiveDateTime> + '_> = match &self.rrule_set {
            Some(set) => Box::new(set.into_iter().map(|step| step.naive_utc())),
            None => Box::new(std::iter::once(self.anchor)),
        };
        let duration = self.duration;
        let exceptions = &self.exceptions;

        steps
            .take_while(move |start| *start < range.end)
            .filter(move |start| range.overlaps(*start, *start + duration))
            .take(self.max_occurrences)
            .map(move |start| SeriesStep {
                start,
                is_exception: exceptions.contains(&start),
            })
            .inspect(|step| {
                tracing::trace!(start = %step.start, is_exception = step.is_exception, "Occurrence");
            })
    }
}

fn build_rrule_set(text: &str, anchor: NaiveDateTime) -> LayoutResult<(RecurrenceRule, RRuleSet)> {
    let rule = RecurrenceRule::parse(text)?;
    let dt_start = anchor.and_utc().with_timezone(&Tz::UTC);
    let rrule_set = rule
        .to_string()
        .parse::<RRule<Unvalidated>>()
        .map_err(|err| LayoutError::InvalidRule(err.to_string()))?
        .build(dt_start)
        .map_err(|err| LayoutError::InvalidRule(err.to_string()))?;
    Ok((rule, rrule_set))
}

/// ## Summary
/// Occurrence starts of `rule` anchored at `anchor_start` that overlap `range`.
///
/// Without a rule, or with an unusable one, the anchor alone is returned
/// when it overlaps.
#[must_use]
pub fn expand(
    rule: Option<&str>,
    anchor_start: NaiveDateTime,
    anchor_duration: TimeDelta,
    range: DateRange,
) -> Vec<NaiveDateTime> {
    RecurrenceSeries::new(rule, anchor_start, anchor_duration, Vec::new())
        .occurrences(range)
        .map(|step| step.start)
        .collect()
}
