use std::collections::HashSet;

use crate::models::{AttendanceStats, ClassSession};
use crate::window::{clip_dates, ReportWindow};

/// Per-class attendance figures for a report window.
///
/// Every report builder goes through here so rounding and inclusion rules
/// never diverge between reports.
pub fn compute_stats(class: &ClassSession, window: &ReportWindow) -> AttendanceStats {
    let students_enrolled = class.enrolled_count();
    let total_class_days = clip_dates(class, window).len();

    let present_in_window: Vec<&str> = class
        .attendance
        .iter()
        .filter(|record| record.is_present() && window.contains_label(record.date.as_deref()))
        .map(|record| record.student_id.as_str())
        .collect();

    let total_attended = present_in_window.len();
    let students_attended = present_in_window.iter().collect::<HashSet<_>>().len();
    let max_possible_attendance = students_enrolled * total_class_days;

    AttendanceStats {
        students_enrolled,
        students_attended,
        total_class_days,
        total_attended,
        max_possible_attendance,
        total_attendance: format!("{total_attended} of {max_possible_attendance}"),
        attendance_percentage: format_percentage(total_attended, max_possible_attendance),
    }
}

/// Whole-number percentage, rounding halves up. A zero denominator is `0%`.
pub fn format_percentage(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        return "0%".to_string();
    }
    let (n, d) = (numerator as u128, denominator as u128);
    format!("{}%", (n * 200 + d) / (d * 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceRecord, Enrollment, Meeting};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(student: &str, day: Option<&str>, present: bool) -> AttendanceRecord {
        AttendanceRecord {
            student_id: student.to_string(),
            date: day.map(str::to_string),
            present: Some(present),
        }
    }

    fn monday_class(attendance: Vec<AttendanceRecord>) -> ClassSession {
        ClassSession {
            start_date: Some("2025-01-06".to_string()),
            end_date: Some("2025-01-20".to_string()),
            meetings: vec![Meeting {
                day: Some("Monday".to_string()),
                ..Meeting::default()
            }],
            signups: vec![
                Enrollment {
                    id: "1".to_string(),
                    ..Enrollment::default()
                },
                Enrollment {
                    id: "2".to_string(),
                    ..Enrollment::default()
                },
            ],
            attendance,
            ..ClassSession::default()
        }
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(format_percentage(1, 3), "33%");
        assert_eq!(format_percentage(2, 3), "67%");
        assert_eq!(format_percentage(1, 8), "13%");
        assert_eq!(format_percentage(1, 200), "1%");
        assert_eq!(format_percentage(5, 5), "100%");
    }

    #[test]
    fn zero_denominator_is_zero_percent() {
        assert_eq!(format_percentage(0, 0), "0%");
        assert_eq!(format_percentage(3, 0), "0%");
    }

    #[test]
    fn three_mondays_two_students() {
        let class = monday_class(vec![
            record("1", Some("2025-01-06"), true),
            record("1", Some("2025-01-13"), true),
            record("2", Some("2025-01-06"), false),
        ]);
        let window = ReportWindow {
            start: None,
            end: date(2025, 1, 20),
        };

        let stats = compute_stats(&class, &window);
        assert_eq!(
            stats,
            AttendanceStats {
                students_enrolled: 2,
                students_attended: 1,
                total_class_days: 3,
                total_attended: 2,
                max_possible_attendance: 6,
                total_attendance: "2 of 6".to_string(),
                attendance_percentage: "33%".to_string(),
            }
        );
    }

    #[test]
    fn records_outside_window_are_ignored() {
        let class = monday_class(vec![
            record("1", Some("2025-01-06"), true),
            record("2", Some("2025-01-20"), true),
            record("2", Some("bad-date"), true),
            record("1", None, true),
        ]);
        let window = ReportWindow {
            start: Some(date(2025, 1, 7)),
            end: date(2025, 1, 14),
        };

        let stats = compute_stats(&class, &window);
        assert_eq!(stats.total_class_days, 1);
        assert_eq!(stats.total_attended, 1);
        assert_eq!(stats.students_attended, 1);
        assert_eq!(stats.attendance_percentage, "50%");
    }

    #[test]
    fn no_scheduled_days_is_zero_percent() {
        let mut class = monday_class(vec![record("1", None, true)]);
        class.meetings.clear();
        let window = ReportWindow {
            start: None,
            end: date(2025, 1, 31),
        };

        let stats = compute_stats(&class, &window);
        assert_eq!(stats.max_possible_attendance, 0);
        assert_eq!(stats.total_attended, 1);
        assert_eq!(stats.attendance_percentage, "0%");
    }
}
