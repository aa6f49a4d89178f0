use chrono::{NaiveDateTime, TimeDelta};
use kairos_core::constants::{DEFAULT_APPOINTMENT_DURATION_MINUTES, DEFAULT_MAX_OCCURRENCES};
use serde_json::Value;

use super::RecurrenceSeries;
use crate::field::{Field, FieldAccessor, parse_basic};
use crate::temporal::{DateRange, fix_end_date};

/// Concrete instance of an appointment, borrowed from its source record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occurrence<'a> {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub source: &'a Value,
    /// Listed in the appointment's recurrence exceptions; never laid out.
    pub is_exception: bool,
}

impl Occurrence<'_> {
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Options for turning appointments into occurrences.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionOptions {
    /// Length given to appointments without a usable end.
    pub default_duration: TimeDelta,
    /// Maximum number of occurrences generated per appointment.
    pub max_occurrences: usize,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            default_duration: TimeDelta::minutes(i64::from(DEFAULT_APPOINTMENT_DURATION_MINUTES)),
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// Start overrides supplied by the caller alongside an appointment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartOverrides {
    /// Displayed start; replaces the stored start of a single appointment.
    pub start: Option<NaiveDateTime>,
    /// Start of the series' first instance; anchors recurrence expansion.
    pub original_start: Option<NaiveDateTime>,
}

/// ## Summary
/// Expands one appointment into the occurrences overlapping `range`.
///
/// The end is repaired with `fix_end_date` first. Recurring appointments
/// are anchored on `overrides.original_start` when given, single ones are
/// moved to `overrides.start` when given.
///
/// ## Side Effects
/// Logs at `debug` when the appointment has no readable start.
#[must_use]
pub fn appointment_occurrences<'a>(
    accessor: &FieldAccessor,
    appointment: &'a Value,
    range: DateRange,
    overrides: StartOverrides,
    options: &ExpansionOptions,
) -> Vec<Occurrence<'a>> {
    let Some(start) = accessor
        .get_date(Field::StartDate, appointment)
        .or(overrides.start)
    else {
        tracing::debug!("Appointment has no readable start date, skipping");
        return Vec::new();
    };

    let all_day = accessor.get_bool(Field::AllDay, appointment);
    let end = fix_end_date(
        start,
        accessor.get_date(Field::EndDate, appointment),
        all_day,
        options.default_duration,
    );
    let duration = end - start;

    let rule = accessor
        .get_str(Field::RecurrenceRule, appointment)
        .map(str::trim)
        .filter(|rule| !rule.is_empty());
    let anchor = if rule.is_some() {
        overrides.original_start.unwrap_or(start)
    } else {
        overrides.start.unwrap_or(start)
    };

    let series = RecurrenceSeries::new(
        rule,
        anchor,
        duration,
        recurrence_exceptions(accessor, appointment),
    )
    .with_max_occurrences(options.max_occurrences);

    series
        .occurrences(range)
        .map(|step| Occurrence {
            start: step.start,
            end: step.start + duration,
            all_day,
            source: appointment,
            is_exception: step.is_exception,
        })
        .collect()
}

/// ## Summary
/// Reads the excluded instance starts of a series.
///
/// Accepts a comma-separated string or an array; items use the date
/// formats understood by the accessor or the iCalendar basic format.
#[must_use]
pub fn recurrence_exceptions(accessor: &FieldAccessor, appointment: &Value) -> Vec<NaiveDateTime> {
    let read_item = |item: &Value| {
        item.as_str()
            .and_then(parse_basic)
            .or_else(|| accessor.read_date(Field::RecurrenceException, item))
    };

    match accessor.get(Field::RecurrenceException, appointment) {
        Some(Value::String(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .filter_map(|item| read_item(&Value::String(item.to_string())))
            .collect(),
        Some(Value::Array(items)) => items.iter().filter_map(read_item).collect(),
        Some(other) => read_item(other).into_iter().collect(),
        None => Vec::new(),
    }
}
