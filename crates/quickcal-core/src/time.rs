//! Time handling for calendar deep links.
//!
//! This module provides:
//! - [`ClockZone`] for the zone that offset-less timestamps are read in
//! - [`parse_iso_like`] for lenient ISO-8601 style parsing
//! - [`compact_date`] for Google Calendar's compact UTC timestamp format
//! - [`add_hours_iso`] for wall-clock hour arithmetic
//!
//! Compaction always renders UTC fields while hour arithmetic runs on the
//! wall clock of the [`ClockZone`]. A timestamp without an offset is therefore
//! shifted by the zone's offset when it lands in the `dates` parameter.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime,
    SecondsFormat, TimeZone, Utc,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `strftime` pattern for the provider's `YYYYMMDDTHHMMSSZ` timestamps.
pub const COMPACT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Dash-delimited ISO dates, with optional time, fraction and offset.
static ISO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?)?(Z|[+-]\d{2}:?\d{2})?$",
    )
    .expect("Invalid ISO regex")
});

/// Slash-delimited dates (`2025/11/01 09:30`), always read on the wall clock.
static SLASH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})(?:[T ](\d{1,2}):(\d{2})(?::(\d{2}))?)?$")
        .expect("Invalid slash date regex")
});

/// Errors from parsing a [`ClockZone`] name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneError {
    /// The value is neither `utc`, `local`, nor a `±HH:MM` offset.
    #[error("invalid zone '{0}': expected \"utc\", \"local\" or an offset like \"+09:00\"")]
    Invalid(String),
}

/// The zone in which timestamps without an explicit offset are interpreted.
///
/// A browser reads such timestamps in the viewer's local zone; `Utc` is the
/// default here so that library results do not depend on the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClockZone {
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// The host's local zone, including its DST rules.
    Local,
    /// A fixed UTC offset.
    Fixed(FixedOffset),
}

impl ClockZone {
    /// Resolves a wall-clock datetime in this zone to a UTC instant.
    ///
    /// Ambiguous times (DST fall-back) take the earliest instant. Times that
    /// fall into a DST gap are moved forward by one hour.
    pub fn resolve(&self, wall: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Utc => Some(wall.and_utc()),
            Self::Local => resolve_in(&Local, wall),
            Self::Fixed(offset) => resolve_in(offset, wall),
        }
    }

    /// Returns the wall-clock reading of `instant` in this zone.
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Utc => instant.naive_utc(),
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

fn resolve_in<Tz: TimeZone>(tz: &Tz, wall: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(wall)
        .earliest()
        .or_else(|| {
            let shifted = wall.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}

impl FromStr for ClockZone {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "utc" | "z" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => trimmed
                .parse::<FixedOffset>()
                .map(Self::Fixed)
                .map_err(|_| ZoneError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<String> for ClockZone {
    type Error = ZoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockZone> for String {
    fn from(zone: ClockZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for ClockZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "utc"),
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Parses an ISO-like timestamp into a UTC instant.
///
/// Accepted shapes:
/// - `YYYY-MM-DD` (date only, read as UTC midnight)
/// - `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]` (read in `zone`)
/// - either of the above with a `Z` or `±HH:MM` suffix
/// - `YYYY/MM/DD[ HH:MM[:SS]]` (read in `zone`)
///
/// Returns `None` for anything else, including out-of-range fields.
pub fn parse_iso_like(input: &str, zone: ClockZone) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Some(caps) = ISO_REGEX.captures(input) {
        let date = NaiveDate::from_ymd_opt(
            number(&caps, 1)? as i32,
            number(&caps, 2)?,
            number(&caps, 3)?,
        )?;
        let has_time = caps.get(4).is_some();
        let time = if has_time {
            let nanos = match caps.get(7) {
                Some(frac) => format!("{:0<9}", frac.as_str()).parse().ok()?,
                None => 0,
            };
            NaiveTime::from_hms_nano_opt(
                number(&caps, 4)?,
                number(&caps, 5)?,
                number(&caps, 6).unwrap_or(0),
                nanos,
            )?
        } else {
            NaiveTime::from_hms_opt(0, 0, 0)?
        };
        let wall = date.and_time(time);

        return match caps.get(8).map(|m| m.as_str()) {
            Some("Z") => Some(wall.and_utc()),
            Some(offset) => {
                let offset = parse_offset(offset)?;
                offset
                    .from_local_datetime(&wall)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            // Date-only forms are UTC, date-time forms are wall-clock.
            None if has_time => zone.resolve(&wall),
            None => Some(wall.and_utc()),
        };
    }

    if let Some(caps) = SLASH_REGEX.captures(input) {
        let date = NaiveDate::from_ymd_opt(
            number(&caps, 1)? as i32,
            number(&caps, 2)?,
            number(&caps, 3)?,
        )?;
        let time = if caps.get(4).is_some() {
            NaiveTime::from_hms_opt(
                number(&caps, 4)?,
                number(&caps, 5)?,
                number(&caps, 6).unwrap_or(0),
            )?
        } else {
            NaiveTime::from_hms_opt(0, 0, 0)?
        };
        return zone.resolve(&date.and_time(time));
    }

    None
}

/// Converts an ISO-like timestamp into the compact `YYYYMMDDTHHMMSSZ` form.
///
/// The result is always rendered from UTC fields, regardless of the offset
/// the input was written in. Returns `None` when the input does not parse.
///
/// # Example
///
/// ```
/// use quickcal_core::time::{compact_date, ClockZone};
///
/// assert_eq!(
///     compact_date("2025-11-01T09:30:00", ClockZone::Utc).as_deref(),
///     Some("20251101T093000Z")
/// );
/// assert_eq!(compact_date("soon", ClockZone::Utc), None);
/// ```
pub fn compact_date(iso: &str, zone: ClockZone) -> Option<String> {
    let instant = parse_iso_like(iso, zone)?;
    if !(0..=9999).contains(&instant.year()) {
        return None;
    }
    Some(instant.format(COMPACT_FORMAT).to_string())
}

/// Advances an ISO-like timestamp by `hours` on the wall clock of `zone`.
///
/// The result is a UTC ISO string with millisecond precision
/// (`2025-11-01T10:30:00.000Z`). Returns `None` when the input does not parse.
pub fn add_hours_iso(iso: &str, hours: i64, zone: ClockZone) -> Option<String> {
    let instant = parse_iso_like(iso, zone)?;
    let wall = zone
        .wall_clock(instant)
        .checked_add_signed(Duration::try_hours(hours)?)?;
    let shifted = zone.resolve(&wall)?;
    Some(shifted.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn number(caps: &regex::Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let sign = if raw.starts_with('-') { -1 } else { 1 };
    let digits: String = raw[1..].chars().filter(|c| *c != ':').collect();
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4)?.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
