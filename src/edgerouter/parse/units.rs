// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Value normalizers for report fields
//!
//! All functions are pure and return `None` on failure after logging a
//! warning that names the report key. The `never` sentinel is not a failure
//! and stays silent.

use chrono::NaiveDateTime;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

const NEVER: &str = "never";

const BYTE_SUFFIXES: [(char, u32); 6] = [
    ('K', 1),
    ('M', 2),
    ('G', 3),
    ('T', 4),
    ('P', 5),
    ('E', 6),
];

/// Timestamp layouts found in router reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLayout {
    /// `Mon Jan  2 15:04:05 2006`
    Generic,
    /// `01/02/06 15:04`
    Build,
}

impl TimeLayout {
    fn format(self) -> &'static str {
        match self {
            Self::Generic => "%a %b %e %H:%M:%S %Y",
            Self::Build => "%m/%d/%y %H:%M",
        }
    }
}

fn is_never(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(NEVER)
}

/// Parses a decimal integer
pub fn parse_number<T>(key: &str, value: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value.trim().parse::<T>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!("Cannot parse {:?} to an integer (key {:?}): {}", value, key, e);
            None
        }
    }
}

/// Parses a byte count with an optional 1024-based suffix
///
/// `34.8K` is 35635: fractional results are truncated to whole bytes.
pub fn parse_bytes(key: &str, value: &str) -> Option<u64> {
    let parsed = split_byte_unit(value.trim());
    if parsed.is_none() {
        tracing::warn!("Cannot parse {:?} to a byte unit (key {:?})", value, key);
    }
    parsed
}

fn split_byte_unit(value: &str) -> Option<u64> {
    let (number, exponent) = match value.chars().last() {
        Some(last) if last.is_ascii_alphabetic() => {
            let upper = last.to_ascii_uppercase();
            let (_, exp) = BYTE_SUFFIXES.iter().find(|(c, _)| *c == upper)?;
            (&value[..value.len() - last.len_utf8()], *exp)
        }
        Some(_) => (value, 0),
        None => return None,
    };

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if exponent == 0 && !number.contains('.') {
        return number.parse::<u64>().ok();
    }

    let base: f64 = number.parse().ok()?;
    let bytes = base * 1024f64.powi(i32::try_from(exponent).ok()?);
    if !bytes.is_finite() || bytes < 0.0 || bytes >= u64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(bytes.trunc() as u64)
}

/// Parses `HH:MM:SS` or `MM:SS`
pub fn parse_clock_duration(key: &str, value: &str) -> Option<Duration> {
    let value = value.trim();
    if is_never(value) {
        return None;
    }
    let parsed = split_clock(value);
    if parsed.is_none() {
        tracing::warn!("Cannot parse {:?} to a duration (key {:?})", value, key);
    }
    parsed
}

fn split_clock(value: &str) -> Option<Duration> {
    let parts = value
        .split(':')
        .map(|p| {
            if p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()) {
                None
            } else {
                p.parse::<u64>().ok()
            }
        })
        .collect::<Option<Vec<u64>>>()?;

    let secs = match parts.as_slice() {
        [h, m, s] => h
            .checked_mul(3600)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(*s)?,
        [m, s] => m.checked_mul(60)?.checked_add(*s)?,
        _ => return None,
    };
    Some(Duration::from_secs(secs))
}

/// Parses a compact duration such as `1w2d`, `04d05h06m` or `01h02m03s`
///
/// Every number must carry one of the `w`, `d`, `h`, `m`, `s` units.
pub fn parse_compact_duration(key: &str, value: &str) -> Option<Duration> {
    let value = value.trim();
    if is_never(value) {
        return None;
    }
    let parsed = split_compact(value);
    if parsed.is_none() {
        tracing::warn!("Cannot parse {:?} to a duration (key {:?})", value, key);
    }
    parsed
}

fn split_compact(value: &str) -> Option<Duration> {
    if value.is_empty() {
        return None;
    }

    let mut total = 0u64;
    let mut num = String::new();
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            num.push(ch);
            continue;
        }
        if num.is_empty() {
            return None;
        }
        let unit_seconds = match ch {
            'w' => 7 * 24 * 3600,
            'd' => 24 * 3600,
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        let n: u64 = num.parse().ok()?;
        total = total.checked_add(n.checked_mul(unit_seconds)?)?;
        num.clear();
    }
    if !num.is_empty() {
        return None;
    }
    Some(Duration::from_secs(total))
}

/// Parses a timestamp in one of the report layouts
pub fn parse_timestamp(layout: TimeLayout, key: &str, value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if is_never(value) {
        return None;
    }
    match NaiveDateTime::parse_from_str(value, layout.format()) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::warn!("Cannot parse {:?} to a time (key {:?}): {}", value, key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u64>("pings", "1000"), Some(1000));
        assert_eq!(parse_number::<u32>("AS", " 64497 "), Some(64497));
        assert_eq!(parse_number::<u64>("pings", "many"), None);
        assert_eq!(parse_number::<u32>("AS", "4294967296"), None);
    }

    #[test]
    fn test_parse_bytes_with_suffix() {
        assert_eq!(parse_bytes("Tx Byte", "34.8K"), Some(35635));
        assert_eq!(parse_bytes("Tx Byte", "1.2K"), Some(1228));
        assert_eq!(parse_bytes("Rx Byte", "58.2K"), Some(59596));
        assert_eq!(parse_bytes("Rx Byte", "116.4K"), Some(119193));
        assert_eq!(parse_bytes("Rx Byte", "2M"), Some(2 * 1024 * 1024));
        assert_eq!(parse_bytes("Rx Byte", "1G"), Some(1 << 30));
    }

    #[test]
    fn test_parse_bytes_plain() {
        assert_eq!(parse_bytes("Tx Pkt", "384"), Some(384));
        assert_eq!(parse_bytes("Tx Pkt", "0"), Some(0));
        assert_eq!(parse_bytes("Tx Pkt", "1.5"), Some(1));
    }

    #[test]
    fn test_parse_bytes_rejects_garbage() {
        assert_eq!(parse_bytes("Tx Byte", ""), None);
        assert_eq!(parse_bytes("Tx Byte", "K"), None);
        assert_eq!(parse_bytes("Tx Byte", "12Q"), None);
        assert_eq!(parse_bytes("Tx Byte", "-1K"), None);
        assert_eq!(parse_bytes("Tx Byte", "abc"), None);
    }

    #[test]
    fn test_parse_clock_duration() {
        assert_eq!(
            parse_clock_duration("Up/Down", "03:33:33"),
            Some(Duration::from_secs(3 * 3600 + 33 * 60 + 33))
        );
        assert_eq!(
            parse_clock_duration("Up/Down", "23:10"),
            Some(Duration::from_secs(1390))
        );
        assert_eq!(parse_clock_duration("Up/Down", "1:2:3:4"), None);
        assert_eq!(parse_clock_duration("Up/Down", "aa:bb"), None);
        assert_eq!(parse_clock_duration("Up/Down", "never"), None);
    }

    #[test]
    fn test_parse_clock_duration_overflow() {
        assert_eq!(
            parse_clock_duration("Up/Down", "0:307445734561825861:0"),
            None
        );
        assert_eq!(
            parse_clock_duration("Up/Down", "307445734561825861:00"),
            None
        );
        assert_eq!(
            parse_clock_duration("Up/Down", "5124095576030432:00:00"),
            None
        );
        assert_eq!(
            parse_clock_duration("Up/Down", "0:0:18446744073709551615"),
            Some(Duration::from_secs(u64::MAX))
        );
    }

    #[test]
    fn test_parse_compact_duration() {
        assert_eq!(
            parse_compact_duration("Time", "01h02m03s"),
            Some(Duration::from_secs(3723))
        );
        assert_eq!(
            parse_compact_duration("Up/Down", "04d05h06m"),
            Some(Duration::from_secs(363_960))
        );
        assert_eq!(
            parse_compact_duration("Up/Down", "2w1d"),
            Some(Duration::from_secs(15 * 24 * 3600))
        );
        assert_eq!(
            parse_compact_duration("Time", "30s"),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_parse_compact_duration_is_strict() {
        assert_eq!(parse_compact_duration("Time", ""), None);
        assert_eq!(parse_compact_duration("Time", "15"), None);
        assert_eq!(parse_compact_duration("Time", "1h30"), None);
        assert_eq!(parse_compact_duration("Time", "h1"), None);
        assert_eq!(parse_compact_duration("Time", "1y"), None);
        assert_eq!(parse_compact_duration("Time", "never"), None);
    }

    #[test]
    fn test_parse_timestamp_generic() {
        assert_eq!(
            parse_timestamp(TimeLayout::Generic, "last update", "Sun Jan  2 15:04:05 2022"),
            Some(datetime(2022, 1, 2, 15, 4, 5))
        );
        assert_eq!(
            parse_timestamp(TimeLayout::Generic, "last route drop", "Mon Jan 10 08:00:00 2022"),
            Some(datetime(2022, 1, 10, 8, 0, 0))
        );
    }

    #[test]
    fn test_parse_timestamp_build() {
        assert_eq!(
            parse_timestamp(TimeLayout::Build, "Build on", "01/02/06 15:04"),
            Some(datetime(2006, 1, 2, 15, 4, 0))
        );
    }

    #[test]
    fn test_parse_timestamp_failures() {
        assert_eq!(parse_timestamp(TimeLayout::Generic, "last update", "never"), None);
        assert_eq!(parse_timestamp(TimeLayout::Generic, "last update", "yesterday"), None);
        assert_eq!(parse_timestamp(TimeLayout::Build, "Build on", "2006-01-02"), None);
    }
}
