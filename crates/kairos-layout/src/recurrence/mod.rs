//! Recurrence rules and their expansion into concrete occurrences.

mod occurrence;
mod rule;
mod series;

pub use occurrence::{
    ExpansionOptions, Occurrence, StartOverrides, appointment_occurrences, recurrence_exceptions,
};
pub use rule::{Frequency, RecurrenceRule, RuleBound};
pub use series::{RecurrenceSeries, SeriesStep, expand};
