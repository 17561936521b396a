use chrono::NaiveDate;
use tracing::debug;

use crate::models::{ClassSession, DateRange};
use crate::schedule::{expand_schedule, parse_date};

/// A [`DateRange`] with its open end pinned to a concrete day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: Option<NaiveDate>,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// `today` stands in for a missing end date; callers pass the clock in.
    pub fn resolve(range: &DateRange, today: NaiveDate) -> Self {
        Self {
            start: range.start_date,
            end: range.end_date.unwrap_or(today),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date <= self.end && self.start.map_or(true, |start| date >= start)
    }

    /// Attendance records without a date count as in range; records whose
    /// date doesn't parse do not.
    pub fn contains_label(&self, raw: Option<&str>) -> bool {
        match raw {
            None => true,
            Some(raw) => parse_date(raw).is_some_and(|date| self.contains(date)),
        }
    }
}

pub fn should_include(class: &ClassSession, window: &ReportWindow) -> bool {
    let Some(start) = class.start() else {
        debug!(class_id = %class.id, "excluding class without a usable start date");
        return false;
    };

    if start > window.end {
        debug!(class_id = %class.id, %start, end = %window.end, "class starts after the window");
        return false;
    }

    if let (Some(window_start), Some(end)) = (window.start, class.end()) {
        if end < window_start {
            debug!(class_id = %class.id, %end, %window_start, "class ended before the window");
            return false;
        }
    }

    if class.enrolled_count() == 0 {
        debug!(class_id = %class.id, "excluding class with no enrolled students");
        return false;
    }

    true
}

pub fn clip_dates(class: &ClassSession, window: &ReportWindow) -> Vec<NaiveDate> {
    expand_schedule(class)
        .into_iter()
        .filter(|date| window.contains(*date))
        .collect()
}
