//! Locale-independent formatting and parsing used by field serialization.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Formatting service consumed for date (de)serialization.
///
/// Layout arithmetic never goes through this trait; it only converts between
/// stored text and wall-clock values.
pub trait DateFormatter {
    fn format(&self, date: NaiveDateTime, pattern: &str) -> String;

    /// Parses `text` with `pattern`. Date-only patterns yield midnight.
    fn parse(&self, text: &str, pattern: &str) -> Option<NaiveDateTime>;
}

/// `chrono` strftime-backed formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoFormatter;

impl DateFormatter for ChronoFormatter {
    fn format(&self, date: NaiveDateTime, pattern: &str) -> String {
        date.format(pattern).to_string()
    }

    fn parse(&self, text: &str, pattern: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text, pattern)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(text, pattern)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    }
}

/// ## Summary
/// Parses a decimal number.
///
/// Strings carrying more significant digits than an `f64` holds exactly
/// yield `NaN` instead of a silently rounded value, as does anything that is
/// not a number.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    let mantissa = trimmed.split(['e', 'E']).next().unwrap_or_default();
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_start_matches('0').trim_end_matches('0').len();
    if significant > f64::DIGITS as usize {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
