//! CSV report builders.
//!
//! Every builder walks sections then classes in the order supplied, so row
//! order always follows the input document.

pub mod capacity;
pub mod csv;
pub mod detailed;
pub mod labels;
pub mod roster;
pub mod student_attendance;

pub use capacity::generate_capacity_report_csv;
pub use detailed::{generate_detailed_csv, ReportSummary};
pub use roster::generate_student_report_csv;
pub use student_attendance::generate_student_attendance_report_csv;

/// Byte order mark spreadsheet tools want in front of a downloaded CSV.
pub const UTF8_BOM: char = '\u{feff}';

pub fn with_bom(csv: String) -> String {
    if csv.starts_with(UTF8_BOM) {
        csv
    } else {
        format!("{UTF8_BOM}{csv}")
    }
}
