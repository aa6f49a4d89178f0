//! Display timezone resolution and wall-clock conversion.

use chrono::{DateTime, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{LayoutError, LayoutResult};
use crate::format::parse_number;

/// Zone in which the scheduler displays dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayTimeZone {
    /// Fixed offset in fractional hours, e.g. `9.5`.
    Offset(f64),
    /// IANA zone, offset resolved at each instant.
    Named(Tz),
}

impl DisplayTimeZone {
    /// ## Summary
    /// Parses a configured zone: a numeric hour offset or a zone name.
    ///
    /// ## Errors
    /// Returns `LayoutError::UnknownTimezone` if the name cannot be resolved.
    ///
    /// ## Side Effects
    /// Caches the resolved zone in `resolver`.
    pub fn parse(text: &str, resolver: &mut TimeZoneResolver) -> LayoutResult<Self> {
        let hours = parse_number(text);
        if hours.is_finite() {
            return Ok(Self::Offset(hours));
        }
        resolver.resolve(text).map(Self::Named)
    }

    /// Offset from UTC in effect at the UTC instant `utc`.
    #[must_use]
    pub fn offset_at(&self, utc: NaiveDateTime) -> TimeDelta {
        match self {
            Self::Offset(hours) => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "offsets are a few hours expressed in milliseconds"
                )]
                let millis = (hours * 3_600_000.0).round() as i64;
                TimeDelta::milliseconds(millis)
            }
            Self::Named(tz) => {
                let seconds = tz.offset_from_utc_datetime(&utc).fix().local_minus_utc();
                TimeDelta::seconds(i64::from(seconds))
            }
        }
    }
}

/// ## Summary
/// Wall-clock time of `instant` in `zone`.
///
/// The result is the instant's local wall clock shifted by
/// `zone offset - local offset`. The input is not modified.
#[must_use]
pub fn convert_by_timezone<Z: TimeZone>(instant: &DateTime<Z>, zone: &DisplayTimeZone) -> NaiveDateTime {
    let utc = instant.naive_utc();
    utc + zone.offset_at(utc)
}

/// Resolver for timezone identifiers with a per-name cache.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Resolves a zone identifier to a `chrono_tz::Tz`.
    ///
    /// Vendor prefixes are stripped and common Windows names mapped to
    /// their IANA equivalents before lookup.
    ///
    /// ## Errors
    /// Returns `LayoutError::UnknownTimezone` if the identifier cannot be resolved.
    ///
    /// ## Side Effects
    /// Caches successful resolutions.
    pub fn resolve(&mut self, tzid: &str) -> LayoutResult<Tz> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(normalized)
            .map_err(|_e| LayoutError::UnknownTimezone(tzid.to_string()))?;

        tracing::trace!(tzid, resolved = %tz, "Resolved timezone");
        self.cache.insert(tzid.to_string(), tz);
        Ok(tz)
    }
}

fn normalize_tzid(tzid: &str) -> &str {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid)
        .trim();

    match stripped {
        "Eastern Standard Time" => "America/New_York",
        "Central Standard Time" => "America/Chicago",
        "Mountain Standard Time" => "America/Denver",
        "Pacific Standard Time" => "America/Los_Angeles",
        "GMT Standard Time" => "Europe/London",
        "W. Europe Standard Time" => "Europe/Berlin",
        "Romance Standard Time" => "Europe/Paris",
        "Russian Standard Time" => "Europe/Moscow",
        "Tokyo Standard Time" => "Asia/Tokyo",
        "AUS Eastern Standard Time" => "Australia/Sydney",
        "West Asia Standard Time" => "Asia/Tashkent",
        "Cen. Australia Standard Time" => "Australia/Adelaide",
        "UTC" | "Coordinated Universal Time" => "UTC",
        other => other,
    }
}
