use std::collections::{BTreeSet, HashSet};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::attendance::format_percentage;
use crate::models::{ClassSession, DateRange, Semester};
use crate::report::csv::CsvDocument;
use crate::report::labels::contexts;
use crate::schedule::parse_date;
use crate::window::{clip_dates, should_include, ReportWindow};

pub const PRESENT_MARK: &str = "✓";
pub const ABSENT_MARK: &str = "x";
pub const NOT_SCHEDULED_MARK: &str = "- -";

const LEADING_COLUMNS: [&str; 9] = [
    "City",
    "Community",
    "Class",
    "Category",
    "Student Name",
    "Email",
    "Phone",
    "Status",
    "Registration Date",
];

fn presence(class: &ClassSession, window: &ReportWindow) -> HashSet<(String, NaiveDate)> {
    class
        .attendance
        .iter()
        .filter(|record| record.is_present())
        .filter_map(|record| {
            let day = parse_date(record.date.as_deref()?)?;
            window
                .contains(day)
                .then(|| (record.student_id.clone(), day))
        })
        .collect()
}

/// One row per signup across every included class with a column per
/// scheduled day of any included class.
///
/// "Classes Attended" counts the student's scheduled days marked present and
/// the rate is taken over their own class's scheduled days.
pub fn generate_student_attendance_report_csv(
    semester: &Semester,
    range: &DateRange,
    today: NaiveDate,
) -> Result<String> {
    let window = ReportWindow::resolve(range, today);
    let classes: Vec<_> = contexts(semester)
        .filter(|context| should_include(context.class, &window))
        .map(|context| (context, clip_dates(context.class, &window)))
        .collect();

    let all_dates: BTreeSet<NaiveDate> = classes
        .iter()
        .flat_map(|(_, dates)| dates.iter().copied())
        .collect();

    let mut document = CsvDocument::new();
    let header = LEADING_COLUMNS
        .iter()
        .map(|column| column.to_string())
        .chain(all_dates.iter().map(NaiveDate::to_string))
        .chain(["Classes Attended".to_string(), "Attendance Rate".to_string()]);
    document.row(header)?;

    let mut rows = 0usize;
    for (context, scheduled) in &classes {
        let scheduled_days: HashSet<NaiveDate> = scheduled.iter().copied().collect();
        let present = presence(context.class, &window);

        for signup in &context.class.signups {
            let mut attended = 0usize;
            let marks: Vec<String> = all_dates
                .iter()
                .map(|day| {
                    let mark = if !scheduled_days.contains(day) {
                        NOT_SCHEDULED_MARK
                    } else if present.contains(&(signup.id.clone(), *day)) {
                        attended += 1;
                        PRESENT_MARK
                    } else {
                        ABSENT_MARK
                    };
                    mark.to_string()
                })
                .collect();

            let row = [
                context.city(),
                context.community(),
                context.title(),
                context.category(),
                signup.full_name(),
                signup.email.clone().unwrap_or_default(),
                signup.phone.clone().unwrap_or_default(),
                signup.status().to_string(),
                signup.registered_on(),
            ]
            .into_iter()
            .chain(marks)
            .chain([
                attended.to_string(),
                format_percentage(attended, scheduled_days.len()),
            ]);
            document.row(row)?;
            rows += 1;
        }
    }

    info!(
        classes = classes.len(),
        rows,
        dates = all_dates.len(),
        "built student attendance report"
    );
    document.finish()
}
