/// Scheduler defaults shared across crates
pub const DEFAULT_START_DAY_HOUR: u32 = 0;
pub const DEFAULT_END_DAY_HOUR: u32 = 24;
pub const DEFAULT_CELL_DURATION_MINUTES: u32 = 30;

/// Duration given to timed appointments that have no usable end date.
pub const DEFAULT_APPOINTMENT_DURATION_MINUTES: u32 = 30;

/// Sunday, matching `chrono::Weekday::num_days_from_sunday`.
pub const DEFAULT_FIRST_DAY_OF_WEEK: u32 = 0;

pub const DEFAULT_AGENDA_DURATION_DAYS: u32 = 7;

/// Upper bound on occurrences produced by a single series expansion.
pub const DEFAULT_MAX_OCCURRENCES: usize = 1000;

pub const DEFAULT_CELL_WIDTH: f64 = 75.0;
pub const DEFAULT_CELL_HEIGHT: f64 = 50.0;
pub const DEFAULT_ALL_DAY_PANEL_HEIGHT: f64 = 25.0;
