use chrono::{NaiveDateTime, TimeDelta};

use crate::view::ViewGeometry;

/// ## Summary
/// Duration of an appointment as drawn by the view.
///
/// Timed appointments count only the parts that fall inside each day's
/// `[start_day_hour, end_day_hour)` window. All-day appointments count one
/// full drawn day (whole cells) per started day. The result is never
/// shorter than one minute.
#[must_use]
pub fn visible_duration(
    start: NaiveDateTime,
    end: NaiveDateTime,
    all_day: bool,
    geometry: &ViewGeometry,
) -> TimeDelta {
    let total = if all_day {
        let day_ms = TimeDelta::days(1).num_milliseconds();
        let span_ms = (end - start).num_milliseconds().max(1);
        let days = (span_ms + day_ms - 1) / day_ms;
        geometry.day_span() * i32::try_from(days).unwrap_or(i32::MAX)
    } else {
        visible_overlap(start, end, geometry)
    };
    total.max(TimeDelta::minutes(1))
}

/// Raw overlap of `[start, end)` with the visible hours of every day it spans.
pub(crate) fn visible_overlap(
    start: NaiveDateTime,
    end: NaiveDateTime,
    geometry: &ViewGeometry,
) -> TimeDelta {
    start
        .date()
        .iter_days()
        .take_while(|date| *date <= end.date())
        .map(|date| {
            let from = start.max(geometry.day_start(date));
            let to = end.min(geometry.day_end(date));
            (to - from).max(TimeDelta::zero())
        })
        .fold(TimeDelta::zero(), |total, part| total + part)
}
