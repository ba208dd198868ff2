// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp codec for the `modified` field.
//!
//! Timestamps are always written as RFC 3339 in UTC with millisecond
//! precision. Reading is lenient and happens in two tiers:
//!
//! 1. ISO-8601: RFC 3339, `Z` or numeric offsets (with or without a colon,
//!    hour-only allowed) at second or minute precision, zone-less date-times
//!    and bare dates (zone-less values are taken as UTC)
//! 2. Generic date strings: RFC 2822 and the US medium form, with or without
//!    a comma after the year (`Feb 3, 2010 4:05:06 AM`, `Feb 3, 2010, 4:05:06 AM`)
//!
//! Servers have historically emitted both, so a value is only rejected when
//! neither tier accepts it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};

const ISO_OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

const ISO_LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

const GENERIC_LOCAL_FORMATS: &[&str] = &[
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y, %I:%M:%S %p",
    "%B %d, %Y %I:%M:%S %p",
    "%b %d, %Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Formats a timestamp the way it is sent on the wire.
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a wire timestamp, trying ISO-8601 first and generic date strings second.
pub fn parse(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    parse_iso8601(trimmed)
        .or_else(|| parse_generic(trimmed))
        .ok_or_else(|| Error::InvalidTimestamp(value.to_string()))
}

fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(with_offset) = normalize_offset(value) {
        for format in ISO_OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&with_offset, format) {
                return Some(dt.with_timezone(&Utc));
            }
        }
    }
    if let Some(dt) = parse_local(value, ISO_LOCAL_FORMATS) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Rewrites a trailing `Z`, `+hh`, `+hh:mm` or `+hhmm` as `+hhmm`.
///
/// Returns `None` for date-times without a zone designator.
fn normalize_offset(value: &str) -> Option<String> {
    let (_, time) = value.split_once('T')?;
    if let Some(head) = value.strip_suffix('Z') {
        return Some(format!("{head}+0000"));
    }
    let sign_at = time.rfind(['+', '-'])?;
    let offset = &time[sign_at + 1..];
    let digits: String = offset.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits = match digits.len() {
        2 => format!("{digits}00"),
        4 => digits,
        _ => return None,
    };
    let head = &value[..value.len() - offset.len()];
    Some(format!("{head}{digits}"))
}

fn parse_generic(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_local(value, GENERIC_LOCAL_FORMATS)
}

fn parse_local(value: &str, formats: &[&str]) -> Option<DateTime<Utc>> {
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Serde adapter for optional timestamps (`#[serde(with = "timestamp::option")]`).
///
/// `null` and missing values decode to `None`; the field should also carry
/// `#[serde(default, skip_serializing_if = "Option::is_none")]`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&super::format(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
