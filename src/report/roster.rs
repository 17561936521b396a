use anyhow::Result;
use tracing::info;

use crate::models::Semester;
use crate::report::csv::CsvDocument;
use crate::report::labels::contexts;

pub const NO_STUDENTS: &str = "No students enrolled";

const HEADER: [&str; 13] = [
    "City",
    "Community",
    "Class Title",
    "Category",
    "Location",
    "Start Date",
    "End Date",
    "Student Name",
    "Email",
    "Phone",
    "Status",
    "Registration Date",
    "Special Needs",
];

/// Roster snapshot of every visible class.
///
/// Unlike the attendance reports this takes no date range: classes are
/// listed whatever their dates, and a class without signups still gets a
/// placeholder row.
pub fn generate_student_report_csv(semester: &Semester) -> Result<String> {
    let mut document = CsvDocument::new();
    document.row(HEADER)?;

    let mut classes = 0usize;
    for context in contexts(semester) {
        classes += 1;
        let class_fields = [
            context.city(),
            context.community(),
            context.title(),
            context.category(),
            context.location(),
            context.start_date(),
            context.end_date(),
        ];

        if context.class.signups.is_empty() {
            let row = class_fields.iter().cloned().chain([
                NO_STUDENTS.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ]);
            document.row(row)?;
            continue;
        }

        for signup in &context.class.signups {
            let row = class_fields.iter().cloned().chain([
                signup.full_name(),
                signup.email.clone().unwrap_or_default(),
                signup.phone.clone().unwrap_or_default(),
                signup.status().to_string(),
                signup.registered_on(),
                signup.special_needs.clone().unwrap_or_default(),
            ]);
            document.row(row)?;
        }
    }

    info!(classes, "built roster report");
    document.finish()
}
