use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::attendance::{compute_stats, format_percentage};
use crate::models::{AttendanceStats, DateRange, Semester};
use crate::report::csv::CsvDocument;
use crate::report::labels::contexts;
use crate::window::{should_include, ReportWindow};

const HEADER: [&str; 12] = [
    "City",
    "Community",
    "Class Title",
    "Category",
    "Start Date",
    "End Date",
    "Location",
    "Total Class Days",
    "Students Enrolled",
    "Students Attended",
    "Total Attendance",
    "Attendance %",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_classes: usize,
    pub total_enrolled: usize,
    pub total_attended: usize,
    pub attendance_slots_used: usize,
    pub attendance_slots_possible: usize,
}

impl ReportSummary {
    pub fn add(self, stats: &AttendanceStats) -> Self {
        Self {
            total_classes: self.total_classes + 1,
            total_enrolled: self.total_enrolled + stats.students_enrolled,
            total_attended: self.total_attended + stats.students_attended,
            attendance_slots_used: self.attendance_slots_used + stats.total_attended,
            attendance_slots_possible: self.attendance_slots_possible
                + stats.max_possible_attendance,
        }
    }

    pub fn students_not_attended(&self) -> usize {
        self.total_enrolled.saturating_sub(self.total_attended)
    }

    pub fn enrolled_attended_percentage(&self) -> String {
        format_percentage(self.total_attended, self.total_enrolled)
    }

    /// Weighted by attendance slots, not an average of per-class percentages.
    pub fn average_attendance(&self) -> String {
        format_percentage(self.attendance_slots_used, self.attendance_slots_possible)
    }
}

pub fn generate_detailed_csv(
    semester: &Semester,
    range: &DateRange,
    today: NaiveDate,
) -> Result<String> {
    let window = ReportWindow::resolve(range, today);
    let mut document = CsvDocument::new();
    document.row(HEADER)?;

    let classes: Vec<_> = contexts(semester)
        .filter(|context| should_include(context.class, &window))
        .map(|context| (context, compute_stats(context.class, &window)))
        .collect();

    for (context, stats) in &classes {
        document.row([
            context.city(),
            context.community(),
            context.title(),
            context.category(),
            context.start_date(),
            context.end_date(),
            context.location(),
            stats.total_class_days.to_string(),
            stats.students_enrolled.to_string(),
            stats.students_attended.to_string(),
            stats.total_attendance.clone(),
            stats.attendance_percentage.clone(),
        ])?;
    }

    let summary = classes
        .iter()
        .map(|(_, stats)| stats)
        .fold(ReportSummary::default(), ReportSummary::add);

    document.blank_line();
    document.row(["Summary"])?;
    document.row(["Total Classes".to_string(), summary.total_classes.to_string()])?;
    document.row([
        "Total Students Enrolled".to_string(),
        summary.total_enrolled.to_string(),
    ])?;
    document.row([
        "Total Students Attended".to_string(),
        summary.total_attended.to_string(),
    ])?;
    document.row([
        "Students Not Attended".to_string(),
        summary.students_not_attended().to_string(),
    ])?;
    document.row([
        "Enrolled Attended %".to_string(),
        summary.enrolled_attended_percentage(),
    ])?;
    document.row([
        "Average Attendance".to_string(),
        summary.average_attendance(),
    ])?;

    info!(
        classes = summary.total_classes,
        enrolled = summary.total_enrolled,
        "built detailed report"
    );
    document.finish()
}
