//! Scheduler options, per-view overrides and the resolved view geometry.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use kairos_core::config::SchedulerConfig;
use kairos_core::constants::{
    DEFAULT_AGENDA_DURATION_DAYS, DEFAULT_ALL_DAY_PANEL_HEIGHT, DEFAULT_CELL_DURATION_MINUTES,
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_END_DAY_HOUR, DEFAULT_FIRST_DAY_OF_WEEK,
    DEFAULT_START_DAY_HOUR,
};
use kairos_core::types::{GroupOrientation, ViewType};
use serde::Deserialize;

use crate::error::{LayoutError, LayoutResult};
use crate::temporal::DateRange;

/// Session-level scheduler options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerOptions {
    pub current_view: ViewType,
    pub current_date: NaiveDate,
    pub start_day_hour: u32,
    pub end_day_hour: u32,
    pub cell_duration: u32,
    pub appointment_duration: u32,
    pub first_day_of_week: u32,
    pub interval_count: u32,
    pub group_orientation: Option<GroupOrientation>,
    pub group_by_date: bool,
    pub groups: Vec<String>,
    pub agenda_duration: u32,
    pub cell_width: f64,
    pub cell_height: f64,
    pub all_day_panel_height: f64,
    pub time_zone: Option<String>,
    pub date_serialization_format: Option<String>,
    pub max_occurrences: usize,
    pub views: Vec<ViewOptions>,
}

/// Overrides declared for a single view type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptions {
    #[serde(rename = "type")]
    pub view_type: ViewType,
    pub start_day_hour: Option<u32>,
    pub end_day_hour: Option<u32>,
    pub cell_duration: Option<u32>,
    pub interval_count: Option<u32>,
    pub group_orientation: Option<GroupOrientation>,
    pub group_by_date: Option<bool>,
    pub groups: Option<Vec<String>>,
    pub agenda_duration: Option<u32>,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}

impl SchedulerOptions {
    /// Seeds options from loaded settings; view-specific fields keep defaults.
    #[must_use]
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            current_view: ViewType::Week,
            current_date: NaiveDate::default(),
            start_day_hour: config.start_day_hour,
            end_day_hour: config.end_day_hour,
            cell_duration: config.cell_duration,
            appointment_duration: config.appointment_duration,
            first_day_of_week: config.first_day_of_week,
            interval_count: 1,
            group_orientation: None,
            group_by_date: false,
            groups: Vec::new(),
            agenda_duration: DEFAULT_AGENDA_DURATION_DAYS,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            all_day_panel_height: DEFAULT_ALL_DAY_PANEL_HEIGHT,
            time_zone: config.time_zone.clone(),
            date_serialization_format: config.date_serialization_format.clone(),
            max_occurrences: config.max_occurrences,
            views: Vec::new(),
        }
    }

    #[must_use]
    pub fn view_options(&self, view_type: ViewType) -> Option<&ViewOptions> {
        self.views.iter().find(|view| view.view_type == view_type)
    }

    /// Grouping dimensions in effect for `view_type`.
    #[must_use]
    pub fn groups_for(&self, view_type: ViewType) -> &[String] {
        self.view_options(view_type)
            .and_then(|view| view.groups.as_deref())
            .unwrap_or(&self.groups)
    }

    #[must_use]
    pub fn appointment_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.appointment_duration))
    }

    /// ## Summary
    /// Resolves the geometry of the current view.
    ///
    /// ## Errors
    /// Returns `LayoutError::InvalidGeometry` when the resolved values break
    /// the geometry invariants.
    pub fn geometry(&self) -> LayoutResult<ViewGeometry> {
        self.geometry_for(self.current_view)
    }

    /// ## Summary
    /// Resolves the geometry of `view_type`, applying its overrides.
    ///
    /// ## Errors
    /// Returns `LayoutError::InvalidGeometry` when the resolved values break
    /// the geometry invariants.
    pub fn geometry_for(&self, view_type: ViewType) -> LayoutResult<ViewGeometry> {
        let view = self.view_options(view_type);
        let pick = |field: fn(&ViewOptions) -> Option<u32>, fallback: u32| {
            view.and_then(field).unwrap_or(fallback)
        };

        let geometry = ViewGeometry {
            view_type,
            current_date: self.current_date,
            interval_count: pick(|v| v.interval_count, self.interval_count),
            start_day_hour: pick(|v| v.start_day_hour, self.start_day_hour),
            end_day_hour: pick(|v| v.end_day_hour, self.end_day_hour),
            cell_duration: pick(|v| v.cell_duration, self.cell_duration),
            group_orientation: view
                .and_then(|v| v.group_orientation)
                .or(self.group_orientation)
                .unwrap_or_else(|| view_type.default_group_orientation()),
            group_by_date: view
                .and_then(|v| v.group_by_date)
                .unwrap_or(self.group_by_date),
            first_day_of_week: self.first_day_of_week,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            all_day_panel_height: self.all_day_panel_height,
            agenda_duration: pick(|v| v.agenda_duration, self.agenda_duration),
        };
        geometry.validate()?;
        Ok(geometry)
    }
}

/// How the date axis and the group axis share the horizontal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// Each group owns a contiguous block of date cells.
    GroupMajor,
    /// Each date cell holds one sub-column per group.
    DateMajor,
}

/// Fully resolved layout parameters of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewGeometry {
    pub view_type: ViewType,
    pub current_date: NaiveDate,
    pub interval_count: u32,
    pub start_day_hour: u32,
    pub end_day_hour: u32,
    /// Minutes per cell.
    pub cell_duration: u32,
    pub group_orientation: GroupOrientation,
    pub group_by_date: bool,
    /// 0 is Sunday.
    pub first_day_of_week: u32,
    pub cell_width: f64,
    pub cell_height: f64,
    pub all_day_panel_height: f64,
    pub agenda_duration: u32,
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self {
            view_type: ViewType::Week,
            current_date: NaiveDate::default(),
            interval_count: 1,
            start_day_hour: DEFAULT_START_DAY_HOUR,
            end_day_hour: DEFAULT_END_DAY_HOUR,
            cell_duration: DEFAULT_CELL_DURATION_MINUTES,
            group_orientation: GroupOrientation::Horizontal,
            group_by_date: false,
            first_day_of_week: DEFAULT_FIRST_DAY_OF_WEEK,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            all_day_panel_height: DEFAULT_ALL_DAY_PANEL_HEIGHT,
            agenda_duration: DEFAULT_AGENDA_DURATION_DAYS,
        }
    }
}

impl ViewGeometry {
    /// ## Summary
    /// Checks the geometry invariants.
    ///
    /// ## Errors
    /// Returns `LayoutError::InvalidGeometry` naming the first broken invariant.
    pub fn validate(&self) -> LayoutResult<()> {
        let problem = if self.start_day_hour >= self.end_day_hour {
            Some(format!(
                "startDayHour {} must be before endDayHour {}",
                self.start_day_hour, self.end_day_hour
            ))
        } else if self.end_day_hour > 24 {
            Some(format!("endDayHour {} exceeds 24", self.end_day_hour))
        } else if self.cell_duration == 0 {
            Some("cellDuration must be positive".to_string())
        } else if self.interval_count == 0 {
            Some("intervalCount must be at least 1".to_string())
        } else if self.first_day_of_week > 6 {
            Some(format!("firstDayOfWeek {} is not a weekday", self.first_day_of_week))
        } else {
            None
        };
        problem.map_or(Ok(()), |reason| Err(LayoutError::InvalidGeometry(reason)))
    }

    #[must_use]
    pub const fn is_grid(&self) -> bool {
        !matches!(self.view_type, ViewType::Agenda)
    }

    #[must_use]
    pub fn cell_delta(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.cell_duration))
    }

    /// Number of time cells per day; the last one may overhang `end_day_hour`.
    #[must_use]
    pub fn slots_per_day(&self) -> u32 {
        ((self.end_day_hour - self.start_day_hour) * 60).div_ceil(self.cell_duration)
    }

    /// Date-axis cells per day in this view.
    #[must_use]
    pub fn cells_per_day(&self) -> u32 {
        if self.view_type.has_time_slots() {
            self.slots_per_day()
        } else {
            1
        }
    }

    /// Length of a day as drawn: whole cells, so a short last cell counts fully.
    #[must_use]
    pub fn day_span(&self) -> TimeDelta {
        self.cell_delta() * i32::try_from(self.slots_per_day()).unwrap_or(i32::MAX)
    }

    #[must_use]
    pub fn day_start(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(self.start_day_hour))
    }

    /// End of the visible hours; `end_day_hour` 24 is the next midnight.
    #[must_use]
    pub fn day_end(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(self.end_day_hour))
    }

    /// First day of the week containing `date`.
    #[must_use]
    pub fn week_start(&self, date: NaiveDate) -> NaiveDate {
        let offset = (date.weekday().num_days_from_sunday() + 7 - self.first_day_of_week) % 7;
        date - TimeDelta::days(i64::from(offset))
    }

    /// ## Summary
    /// Dates shown by the view, in date-axis order.
    ///
    /// Agenda views cover `agenda_duration` days from the current date.
    #[must_use]
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        let (first, count) = match self.view_type {
            ViewType::Day | ViewType::TimelineDay => (self.current_date, self.interval_count),
            ViewType::Week | ViewType::TimelineWeek => {
                (self.week_start(self.current_date), 7 * self.interval_count)
            }
            ViewType::Month => {
                let (month_start, month_end) = self.month_span();
                let first = self.week_start(month_start);
                let days = u32::try_from((month_end - first).num_days() + 1).unwrap_or(0);
                (first, days.div_ceil(7) * 7)
            }
            ViewType::TimelineMonth => {
                let (month_start, month_end) = self.month_span();
                let days = u32::try_from((month_end - month_start).num_days() + 1).unwrap_or(0);
                (month_start, days)
            }
            ViewType::Agenda => (self.current_date, self.agenda_duration),
        };
        first.iter_days().take(count as usize).collect()
    }

    /// Half-open range from the first visible midnight to the midnight after
    /// the last visible day.
    #[must_use]
    pub fn visible_range(&self) -> DateRange {
        let days = self.visible_days();
        let start = days.first().copied().unwrap_or(self.current_date);
        let end = days.last().copied().unwrap_or(start) + TimeDelta::days(1);
        DateRange::new(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    /// Rows of one group's table (all-day panel excluded).
    #[must_use]
    pub fn rows(&self) -> usize {
        match self.view_type {
            ViewType::Day | ViewType::Week => self.slots_per_day() as usize,
            ViewType::Month => self.visible_days().len() / 7,
            ViewType::TimelineDay
            | ViewType::TimelineWeek
            | ViewType::TimelineMonth
            | ViewType::Agenda => 1,
        }
    }

    /// Columns of one group's table.
    #[must_use]
    pub fn columns(&self) -> usize {
        match self.view_type {
            ViewType::Day | ViewType::Week => self.visible_days().len(),
            ViewType::Month => 7,
            ViewType::TimelineDay | ViewType::TimelineWeek | ViewType::TimelineMonth => {
                self.visible_days().len() * self.cells_per_day() as usize
            }
            ViewType::Agenda => 0,
        }
    }

    /// Height of the all-day panel, zero for views without one.
    #[must_use]
    pub fn panel_height(&self) -> f64 {
        if self.view_type.has_all_day_panel() {
            self.all_day_panel_height
        } else {
            0.0
        }
    }

    /// Grouping by date only applies to horizontal layouts with several groups.
    #[must_use]
    pub fn is_grouped_by_date(&self, group_count: usize) -> bool {
        self.group_by_date
            && self.group_orientation == GroupOrientation::Horizontal
            && group_count > 1
    }

    #[must_use]
    pub fn axis_order(&self, group_count: usize) -> AxisOrder {
        if self.is_grouped_by_date(group_count) {
            AxisOrder::DateMajor
        } else {
            AxisOrder::GroupMajor
        }
    }

    fn month_span(&self) -> (NaiveDate, NaiveDate) {
        let start = self.current_date.with_day(1).unwrap_or(self.current_date);
        let end = start
            .checked_add_months(Months::new(self.interval_count))
            .map_or(start, |next| next - TimeDelta::days(1));
        (start, end)
    }
}
