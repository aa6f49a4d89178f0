//! Recurrence rule value and its dedicated parser.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::{LayoutError, LayoutResult};
use crate::field::{DateSerialization, parse_basic};
use crate::format::ChronoFormatter;

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a series terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleBound {
    Unbounded,
    Count(u32),
    Until(NaiveDateTime),
}

/// Parsed recurrence rule.
///
/// Parts other than `FREQ`, `INTERVAL`, `COUNT` and `UNTIL` are kept
/// verbatim (upper-cased) and passed through to the expansion backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub freq: Frequency,
    pub interval: u32,
    pub bound: RuleBound,
    pub parts: Vec<(String, String)>,
}

impl RecurrenceRule {
    /// ## Summary
    /// Parses `KEY=VALUE` pairs separated by `;`. Keys are case-insensitive
    /// and an `RRULE:` prefix is tolerated.
    ///
    /// ## Errors
    /// Returns `LayoutError::InvalidRule` for a missing or unsupported
    /// `FREQ`, a non-positive `INTERVAL` or `COUNT`, an unreadable `UNTIL`,
    /// `COUNT` combined with `UNTIL`, duplicate keys, or malformed pairs.
    pub fn parse(text: &str) -> LayoutResult<Self> {
        let trimmed = text.trim();
        let body = trimmed
            .get(..6)
            .filter(|prefix| prefix.eq_ignore_ascii_case("RRULE:"))
            .and_then(|_| trimmed.get(6..))
            .unwrap_or(trimmed);

        let mut freq = None;
        let mut interval = None;
        let mut count = None;
        let mut until = None;
        let mut parts: Vec<(String, String)> = Vec::new();

        for pair in body.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| invalid(text, &format!("'{pair}' is not KEY=VALUE")))?;
            let key = key.trim().to_ascii_uppercase();
            let value = value.trim();

            let duplicate = match key.as_str() {
                "FREQ" => freq
                    .replace(Frequency::parse(value).ok_or_else(|| {
                        invalid(text, &format!("unsupported FREQ '{value}'"))
                    })?)
                    .is_some(),
                "INTERVAL" => interval.replace(positive(text, "INTERVAL", value)?).is_some(),
                "COUNT" => count.replace(positive(text, "COUNT", value)?).is_some(),
                "UNTIL" => until
                    .replace(parse_until(value).ok_or_else(|| {
                        invalid(text, &format!("unreadable UNTIL '{value}'"))
                    })?)
                    .is_some(),
                _ => {
                    let seen = parts.iter().any(|(existing, _)| *existing == key);
                    parts.push((key.clone(), value.to_ascii_uppercase()));
                    seen
                }
            };
            if duplicate {
                return Err(invalid(text, &format!("duplicate {key}")));
            }
        }

        let freq = freq.ok_or_else(|| invalid(text, "missing FREQ"))?;
        let bound = match (count, until) {
            (Some(_), Some(_)) => return Err(invalid(text, "COUNT and UNTIL are exclusive")),
            (Some(count), None) => RuleBound::Count(count),
            (None, Some(until)) => RuleBound::Until(until),
            (None, None) => RuleBound::Unbounded,
        };

        Ok(Self {
            freq,
            interval: interval.unwrap_or(1),
            bound,
            parts,
        })
    }
}

impl FromStr for RecurrenceRule {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecurrenceRule {
    /// RFC 5545 text. `UNTIL` is written as a UTC basic date-time so that it
    /// matches a UTC `DTSTART`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.freq)?;
        if self.interval > 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        match self.bound {
            RuleBound::Unbounded => {}
            RuleBound::Count(count) => write!(f, ";COUNT={count}")?,
            RuleBound::Until(until) => write!(f, ";UNTIL={}", until.format("%Y%m%dT%H%M%SZ"))?,
        }
        for (key, value) in &self.parts {
            write!(f, ";{key}={value}")?;
        }
        Ok(())
    }
}

fn invalid(text: &str, reason: &str) -> LayoutError {
    LayoutError::InvalidRule(format!("{text}: {reason}"))
}

fn positive(text: &str, key: &str, value: &str) -> LayoutResult<u32> {
    value
        .parse::<u32>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(|| invalid(text, &format!("{key} must be a positive integer, got '{value}'")))
}

fn parse_until(value: &str) -> Option<NaiveDateTime> {
    parse_basic(value).or_else(|| {
        let value = Value::String(value.to_string());
        DateSerialization::detect(&value)?.read(&value, &ChronoFormatter)
    })
}
