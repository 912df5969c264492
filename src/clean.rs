//! Field-cleaning rules applied to raw campaign values.
//!
//! Every rule takes `None` for an absent column or empty cell and is a pure
//! function of its input.

use std::str::FromStr;

use chrono::Month;

use crate::error::SplitError;

/// Year stamped on every `last_contact_day`.
pub const CONTACT_YEAR: i32 = 2022;

/// Drops `.` and turns `-` into `_`, so `blue-collar` becomes `blue_collar`
/// and `admin.` becomes `admin`.
pub fn clean_job(value: Option<&str>) -> Option<String> {
    value.map(|job| {
        job.chars()
            .filter(|ch| *ch != '.')
            .map(|ch| if ch == '-' { '_' } else { ch })
            .collect()
    })
}

/// `unknown` is the source's own null marker and is matched exactly.
pub fn clean_education(value: Option<&str>) -> Option<String> {
    match value {
        None | Some("unknown") => None,
        Some(education) => Some(education.replace('.', "_")),
    }
}

pub fn yes_flag(value: Option<&str>) -> u8 {
    matches_flag(value, "yes")
}

pub fn success_flag(value: Option<&str>) -> u8 {
    matches_flag(value, "success")
}

fn matches_flag(value: Option<&str>, expected: &str) -> u8 {
    match value {
        Some(raw) if raw.eq_ignore_ascii_case(expected) => 1,
        _ => 0,
    }
}

/// Resolves a month label by its first three letters, case-insensitively.
pub fn parse_month(value: &str) -> Option<u32> {
    let key = value.trim().chars().take(3).collect::<String>();
    if key.chars().count() != 3 {
        return None;
    }
    Month::from_str(&key)
        .ok()
        .map(|month| month.number_from_month())
}

pub fn parse_day(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|day| (1..=31).contains(day))
}

/// Formats `YYYY-MM-DD` for `CONTACT_YEAR`.
pub fn last_contact_day(month: &str, day: u32) -> Result<String, SplitError> {
    match parse_month(month) {
        Some(number) if (1..=31).contains(&day) => {
            Ok(format!("{CONTACT_YEAR:04}-{number:02}-{day:02}"))
        }
        _ => Err(SplitError::InvalidDate {
            month: month.to_string(),
            day: day.to_string(),
        }),
    }
}

/// Builds the contact date from raw `month` and `day` cells.
pub fn contact_date(month: Option<&str>, day: Option<&str>) -> Result<String, SplitError> {
    let invalid = || SplitError::InvalidDate {
        month: month.unwrap_or_default().to_string(),
        day: day.unwrap_or_default().to_string(),
    };
    let month = month.ok_or_else(invalid)?;
    let day = day.and_then(parse_day).ok_or_else(invalid)?;
    last_contact_day(month, day)
}
