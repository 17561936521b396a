//! Expands a class's weekly recurrence into concrete meeting dates.
//!
//! Dates are timezone-less calendar labels; no UTC or local conversion is
//! ever applied.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::models::ClassSession;

/// Parses a `YYYY-MM-DD` label. ISO datetimes are accepted and truncated to
/// their date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    let prefix = trimmed.get(..10)?;
    match trimmed.as_bytes().get(10) {
        Some(b'T') | Some(b't') | Some(b' ') => NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok(),
        _ => None,
    }
}

pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    match raw.trim().to_lowercase().as_str() {
        "sun" | "sunday" => Some(Weekday::Sun),
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Every date the class meets, ascending and without duplicates.
///
/// A single-day class meets on its start date whatever its meeting pattern
/// says. Missing or malformed bounds yield no dates.
pub fn expand_schedule(class: &ClassSession) -> Vec<NaiveDate> {
    let (Some(start), Some(end)) = (class.start(), class.end()) else {
        debug!(
            class_id = %class.id,
            start = ?class.start_date,
            end = ?class.end_date,
            "class has no usable date bounds"
        );
        return Vec::new();
    };

    if start == end {
        return vec![start];
    }

    let meeting_days: HashSet<Weekday> = class
        .meetings
        .iter()
        .filter_map(|meeting| meeting.day.as_deref().and_then(parse_weekday))
        .collect();

    if meeting_days.is_empty() {
        return Vec::new();
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| meeting_days.contains(&day.weekday()))
        .collect()
}
