//! Cells of one group's table touched by an occurrence.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use kairos_core::types::ViewType;

use crate::temporal::{clamp_start, takes_all_day, visible_duration, visible_overlap};
use crate::view::{AxisOrder, ViewGeometry};

/// Position inside a single group's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    /// Cell of the all-day panel, or a whole-day cell of a timeline.
    pub all_day: bool,
}

impl GridCell {
    #[must_use]
    pub const fn new(row: usize, column: usize, all_day: bool) -> Self {
        Self {
            row,
            column,
            all_day,
        }
    }
}

/// ## Summary
/// Every cell of `days` the interval `[start, end)` is drawn over, in
/// date-axis order.
///
/// Cells outside the visible days are dropped. Timed intervals always touch
/// at least one cell of a visible day.
#[must_use]
pub fn touched_cells(
    start: NaiveDateTime,
    end: NaiveDateTime,
    all_day: bool,
    geometry: &ViewGeometry,
    days: &[NaiveDate],
) -> Vec<GridCell> {
    let Some(first_day) = days.first().copied() else {
        return Vec::new();
    };
    let day_index = |date: NaiveDate| {
        usize::try_from((date - first_day).num_days())
            .ok()
            .filter(|index| *index < days.len())
    };

    match geometry.view_type {
        ViewType::Month => touched_days(start, end)
            .filter_map(day_index)
            .map(|index| GridCell::new(index / 7, index % 7, all_day))
            .collect(),
        ViewType::TimelineMonth => touched_days(start, end)
            .filter_map(day_index)
            .map(|index| GridCell::new(0, index, all_day))
            .collect(),
        ViewType::Day | ViewType::Week if takes_all_day(start, end, all_day, geometry) => {
            spanned_days(start, end)
                .filter_map(day_index)
                .map(|index| GridCell::new(0, index, true))
                .collect()
        }
        ViewType::TimelineDay | ViewType::TimelineWeek if all_day => {
            let slots = geometry.slots_per_day() as usize;
            spanned_days(start, end)
                .filter_map(day_index)
                .flat_map(|index| {
                    (0..slots).map(move |slot| GridCell::new(0, index * slots + slot, true))
                })
                .collect()
        }
        ViewType::Day | ViewType::Week | ViewType::TimelineDay | ViewType::TimelineWeek => {
            timed_cells(start, end, geometry, first_day, days.len())
        }
        ViewType::Agenda => Vec::new(),
    }
}

/// ## Summary
/// Keeps the first cell of every visually contiguous run.
///
/// Consecutive rows of one column always join. Consecutive columns of one
/// row join only when each group owns a contiguous block of columns.
#[must_use]
pub fn segment_starts(cells: &[GridCell], order: AxisOrder) -> Vec<GridCell> {
    let mut starts = Vec::new();
    let mut previous: Option<GridCell> = None;
    for cell in cells {
        if !previous.is_some_and(|previous| is_continuation(previous, *cell, order)) {
            starts.push(*cell);
        }
        previous = Some(*cell);
    }
    starts
}

fn is_continuation(previous: GridCell, next: GridCell, order: AxisOrder) -> bool {
    if previous.all_day != next.all_day {
        return false;
    }
    let vertical = !next.all_day && previous.column == next.column && next.row == previous.row + 1;
    let horizontal = order == AxisOrder::GroupMajor
        && previous.row == next.row
        && next.column == previous.column + 1;
    vertical || horizontal
}

/// Every calendar date from `start` through the date of the last instant
/// before `end`.
fn touched_days(start: NaiveDateTime, end: NaiveDateTime) -> impl Iterator<Item = NaiveDate> {
    let last = if end > start {
        (end - TimeDelta::milliseconds(1)).date()
    } else {
        start.date()
    };
    start.date().iter_days().take_while(move |date| *date <= last)
}

/// Dates of an all-day appointment: one per started day of its duration.
fn spanned_days(start: NaiveDateTime, end: NaiveDateTime) -> impl Iterator<Item = NaiveDate> {
    let day_ms = TimeDelta::days(1).num_milliseconds();
    let span_ms = (end - start).num_milliseconds().max(1);
    let count = usize::try_from((span_ms + day_ms - 1) / day_ms).unwrap_or(1);
    start.date().iter_days().take(count)
}

/// Walks time cells from the slot containing the clamped start, across day
/// boundaries, for as many cells as the visible duration needs.
///
/// A start past the visible hours continues at the next visible day start.
/// An interval with no visible part keeps one cell at the nearest edge of
/// its own day.
fn timed_cells(
    start: NaiveDateTime,
    end: NaiveDateTime,
    geometry: &ViewGeometry,
    first_day: NaiveDate,
    day_count: usize,
) -> Vec<GridCell> {
    let clamped = clamp_start(start, geometry, Some(first_day.and_time(NaiveTime::MIN)));
    let Ok(day) = usize::try_from((clamped.date() - first_day).num_days()) else {
        return Vec::new();
    };

    let slots = geometry.slots_per_day() as usize;
    let cell_minutes = i64::from(geometry.cell_duration);
    let cells_needed = |offset: i64, from: NaiveDateTime| {
        let visible = visible_duration(from, end, false, geometry).num_minutes();
        usize::try_from((offset + visible + cell_minutes - 1) / cell_minutes)
            .unwrap_or(1)
            .max(1)
    };

    let (first, count) = if clamped >= geometry.day_end(clamped.date()) {
        let next_day = geometry.day_start(clamped.date() + TimeDelta::days(1));
        if day + 1 < day_count && !visible_overlap(next_day, end, geometry).is_zero() {
            ((day + 1) * slots, cells_needed(0, next_day))
        } else {
            tracing::trace!(%start, %end, "Interval lies in hidden hours");
            (day * slots + slots.saturating_sub(1), 1)
        }
    } else {
        let from_day_start = (clamped - geometry.day_start(clamped.date())).num_minutes();
        let slot = usize::try_from(from_day_start / cell_minutes).unwrap_or(0);
        let offset = from_day_start % cell_minutes;
        (day * slots + slot, cells_needed(offset, clamped))
    };

    let vertical = geometry.view_type.has_all_day_panel();
    (first..first + count)
        .take_while(|linear| *linear < day_count * slots)
        .map(|linear| {
            if vertical {
                GridCell::new(linear % slots, linear / slots, false)
            } else {
                GridCell::new(0, linear, false)
            }
        })
        .collect()
}
