//! Stored date representations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use crate::error::{LayoutError, LayoutResult};
use crate::format::DateFormatter;

const ISO_DATE: &str = "%Y-%m-%d";
const ISO_LOCAL: &str = "%Y-%m-%dT%H:%M:%S%.f";
const ISO_UTC: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// How a date field is stored inside an appointment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSerialization {
    /// JSON number of epoch milliseconds, read as a UTC wall clock.
    EpochMillis,
    /// `2017-02-08`
    IsoDate,
    /// `2017-02-08T01:00:00`
    IsoLocal,
    /// `2017-02-08T01:00:00Z`
    IsoUtc,
    /// Any other `chrono` strftime pattern.
    Custom(String),
}

impl DateSerialization {
    /// ## Summary
    /// Resolves a configured format name.
    ///
    /// Accepts the keywords `native`, `date`, `iso`, `utc`, the common
    /// `yyyy-MM-dd…` patterns, or any strftime pattern containing `%`.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` for anything else.
    pub fn from_config(format: &str) -> LayoutResult<Self> {
        Ok(match format {
            "native" | "epoch" => Self::EpochMillis,
            "date" | "yyyy-MM-dd" => Self::IsoDate,
            "iso" | "yyyy-MM-ddTHH:mm:ss" => Self::IsoLocal,
            "utc" | "yyyy-MM-ddTHH:mm:ssZ" | "yyyy-MM-ddTHH:mm:ss'Z'" => Self::IsoUtc,
            custom if custom.contains('%') => Self::Custom(custom.to_string()),
            other => {
                return Err(LayoutError::CoreError(
                    kairos_core::error::CoreError::ConfigError(format!(
                        "unsupported date serialization format '{other}'"
                    )),
                ));
            }
        })
    }

    /// Infers the representation of a stored value.
    #[must_use]
    pub fn detect(value: &Value) -> Option<Self> {
        match value {
            Value::Number(_) => Some(Self::EpochMillis),
            Value::String(text) => [Self::IsoUtc, Self::IsoLocal, Self::IsoDate]
                .into_iter()
                .find(|candidate| candidate.parse_text(text).is_some()),
            _ => None,
        }
    }

    /// ## Summary
    /// Reads a stored value regardless of this representation.
    ///
    /// Numbers are always epoch milliseconds; strings are tried with this
    /// representation's pattern (`formatter` for custom ones).
    #[must_use]
    pub fn read(&self, value: &Value, formatter: &dyn DateFormatter) -> Option<NaiveDateTime> {
        match value {
            Value::Number(number) => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "fractional epoch milliseconds are dropped"
                )]
                let millis = number
                    .as_i64()
                    .or_else(|| number.as_f64().map(|ms| ms as i64))?;
                DateTime::from_timestamp_millis(millis).map(|instant| instant.naive_utc())
            }
            Value::String(text) => match self {
                Self::Custom(pattern) => formatter.parse(text, pattern),
                _ => self.parse_text(text),
            },
            _ => None,
        }
    }

    /// Renders `date` in this representation.
    #[must_use]
    pub fn write(&self, date: NaiveDateTime, formatter: &dyn DateFormatter) -> Value {
        match self {
            Self::EpochMillis => Value::from(date.and_utc().timestamp_millis()),
            Self::IsoDate => Value::String(date.format(ISO_DATE).to_string()),
            Self::IsoLocal => Value::String(date.format(ISO_LOCAL).to_string()),
            Self::IsoUtc => Value::String(date.format(ISO_UTC).to_string()),
            Self::Custom(pattern) => Value::String(formatter.format(date, pattern)),
        }
    }

    fn parse_text(&self, text: &str) -> Option<NaiveDateTime> {
        match self {
            Self::IsoDate => NaiveDate::parse_from_str(text, ISO_DATE)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN)),
            Self::IsoLocal => NaiveDateTime::parse_from_str(text, ISO_LOCAL).ok(),
            Self::IsoUtc => NaiveDateTime::parse_from_str(text, ISO_UTC).ok(),
            Self::EpochMillis | Self::Custom(_) => None,
        }
    }
}

/// ## Summary
/// Parses an iCalendar basic-format date-time (`20160201T010000[Z]`) or
/// date (`20160201`).
#[must_use]
pub fn parse_basic(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(text, "%Y%m%dT%H%M%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y%m%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
