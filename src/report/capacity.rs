use std::collections::{BTreeMap, BTreeSet, HashSet};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::models::{ClassSession, DateRange, Semester};
use crate::report::csv::CsvDocument;
use crate::report::labels::contexts;
use crate::report::student_attendance::NOT_SCHEDULED_MARK;
use crate::schedule::parse_date;
use crate::window::{clip_dates, should_include, ReportWindow};

/// Distinct students present per day, for days inside the window.
fn headcounts(class: &ClassSession, window: &ReportWindow) -> BTreeMap<NaiveDate, usize> {
    let mut students: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
    for record in class.attendance.iter().filter(|record| record.is_present()) {
        let Some(day) = record.date.as_deref().and_then(parse_date) else {
            continue;
        };
        if window.contains(day) {
            students
                .entry(day)
                .or_default()
                .insert(record.student_id.as_str());
        }
    }

    students
        .into_iter()
        .map(|(day, present)| (day, present.len()))
        .collect()
}

/// Classes as rows, one column per day anyone attended, with a total column
/// and a closing `TOTAL` row.
///
/// Cells and totals are headcounts: distinct students present on a dated day
/// in the window. They are not `AttendanceStats::total_attended`, which also
/// counts repeated and undated present records.
pub fn generate_capacity_report_csv(
    semester: &Semester,
    range: &DateRange,
    today: NaiveDate,
) -> Result<String> {
    let window = ReportWindow::resolve(range, today);
    let classes: Vec<_> = contexts(semester)
        .filter(|context| should_include(context.class, &window))
        .map(|context| {
            let scheduled: HashSet<NaiveDate> =
                clip_dates(context.class, &window).into_iter().collect();
            (context, scheduled, headcounts(context.class, &window))
        })
        .collect();

    let all_dates: BTreeSet<NaiveDate> = classes
        .iter()
        .flat_map(|(_, _, counts)| counts.keys().copied())
        .collect();

    let mut document = CsvDocument::new();
    let header = ["City", "Community", "Class Title", "Category"]
        .into_iter()
        .map(str::to_string)
        .chain(all_dates.iter().map(NaiveDate::to_string))
        .chain(["Total".to_string()]);
    document.row(header)?;

    let mut column_totals = vec![0usize; all_dates.len()];
    for (context, scheduled, counts) in &classes {
        let mut cells = Vec::with_capacity(all_dates.len());
        for (column, day) in all_dates.iter().enumerate() {
            let count = counts.get(day).copied().unwrap_or(0);
            column_totals[column] += count;
            if count == 0 && !scheduled.contains(day) {
                cells.push(NOT_SCHEDULED_MARK.to_string());
            } else {
                cells.push(count.to_string());
            }
        }

        let class_total: usize = counts.values().sum();
        let row = [
            context.city(),
            context.community(),
            context.title(),
            context.category(),
        ]
        .into_iter()
        .chain(cells)
        .chain([class_total.to_string()]);
        document.row(row)?;
    }

    let grand_total: usize = column_totals.iter().sum();
    let totals = ["TOTAL".to_string(), String::new(), String::new(), String::new()]
        .into_iter()
        .chain(column_totals.iter().map(usize::to_string))
        .chain([grand_total.to_string()]);
    document.row(totals)?;

    info!(
        classes = classes.len(),
        dates = all_dates.len(),
        grand_total,
        "built capacity report"
    );
    document.finish()
}
