use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

use crate::view::ViewGeometry;

/// Last representable millisecond of the day containing `date`.
#[must_use]
pub fn end_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

/// ## Summary
/// Repairs a missing or inverted end date.
///
/// Timed appointments get `start + default_duration`; all-day ones end at
/// the last millisecond of their start day.
#[must_use]
pub fn fix_end_date(
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    all_day: bool,
    default_duration: TimeDelta,
) -> NaiveDateTime {
    match end {
        Some(end) if end >= start => end,
        _ if all_day => end_of_day(start),
        _ => start + default_duration,
    }
}

/// ## Summary
/// Moves a start into the visible part of the view.
///
/// The candidate is first raised to `view_start` when it lies before it,
/// then its time of day is clamped to `[start_day_hour, end_day_hour]`
/// keeping the date.
#[must_use]
pub fn clamp_start(
    candidate: NaiveDateTime,
    geometry: &ViewGeometry,
    view_start: Option<NaiveDateTime>,
) -> NaiveDateTime {
    let candidate = view_start.map_or(candidate, |view_start| candidate.max(view_start));
    let day_start = geometry.day_start(candidate.date());
    let day_end = geometry.day_end(candidate.date());
    if candidate < day_start {
        day_start
    } else if candidate > day_end {
        day_end
    } else {
        candidate
    }
}

/// ## Summary
/// Pulls an end back inside the visible hours.
///
/// An end at or after `end_day_hour` stops at `end_day_hour` of its own day.
/// An end before `start_day_hour` on a later date than `start` falls back to
/// `end_day_hour` of the previous day.
#[must_use]
pub fn clamp_end(
    candidate: NaiveDateTime,
    start: NaiveDateTime,
    geometry: &ViewGeometry,
) -> NaiveDateTime {
    let date = candidate.date();
    let day_end = geometry.day_end(date);
    if candidate >= day_end {
        day_end
    } else if candidate < geometry.day_start(date) && date > start.date() {
        geometry.day_end(date - TimeDelta::days(1))
    } else {
        candidate
    }
}

/// ## Summary
/// Decides whether an appointment renders as all-day.
///
/// True for the explicit flag, for anything lasting at least a day, and for
/// appointments covering the whole visible window of their start day.
#[must_use]
pub fn takes_all_day(
    start: NaiveDateTime,
    end: NaiveDateTime,
    all_day_flag: bool,
    geometry: &ViewGeometry,
) -> bool {
    if all_day_flag || end - start >= TimeDelta::days(1) {
        return true;
    }
    let date = start.date();
    start <= geometry.day_start(date) && end >= geometry.day_end(date)
}

/// Start and end fall on different calendar dates.
#[must_use]
pub fn takes_several_days(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    start.date() != end.date()
}
