pub mod attendance;
pub mod input;
pub mod lenient;
pub mod models;
pub mod report;
pub mod schedule;
pub mod window;

pub use attendance::{compute_stats, format_percentage};
pub use models::{AttendanceStats, ClassSession, DateRange, Section, Semester};
pub use schedule::expand_schedule;
pub use window::{clip_dates, should_include, ReportWindow};
