use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use class_attendance_reports::input::load_semester;
use class_attendance_reports::models::{AttendanceStats, DateRange, Semester};
use class_attendance_reports::report::{
    self, labels::contexts, generate_capacity_report_csv, generate_detailed_csv,
    generate_student_attendance_report_csv, generate_student_report_csv,
};
use class_attendance_reports::schedule::{expand_schedule, weekday_name};
use class_attendance_reports::{compute_stats, should_include, ReportWindow};

#[derive(Parser)]
#[command(name = "class-attendance-reports")]
#[command(about = "Attendance and capacity reports for community class programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the meeting dates of every visible class
    Schedule {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print attendance statistics for each class in the window as JSON
    Stats {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Per-class summary report with totals
    Detailed {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Per-student attendance grid
    StudentAttendance {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Class roster with contact and accommodation details
    Roster {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Daily headcount grid per class
    Capacity {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Semester JSON document, or `-` for stdin
    #[arg(long, env = "REPORT_INPUT", default_value = "-")]
    input: PathBuf,
}

#[derive(Args)]
struct WindowArgs {
    /// First day of the report window (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day of the report window, defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Pin "today" instead of reading the clock
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl WindowArgs {
    fn range(&self) -> DateRange {
        DateRange {
            start_date: self.start,
            end_date: self.end,
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Write the CSV here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Prefix a UTF-8 byte order mark for spreadsheet imports
    #[arg(long, default_value_t = false)]
    bom: bool,
}

impl OutputArgs {
    fn emit(&self, csv: String) -> anyhow::Result<()> {
        let csv = if self.bom { report::with_bom(csv) } else { csv };
        match &self.out {
            Some(path) => {
                std::fs::write(path, csv)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "report written");
            }
            None => print!("{csv}"),
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassStatsRow {
    title: String,
    category: String,
    city: String,
    community: String,
    #[serde(flatten)]
    stats: AttendanceStats,
}

fn print_schedule(semester: &Semester) {
    for context in contexts(semester) {
        let dates = expand_schedule(context.class);
        println!("{} ({} meetings)", context.title(), dates.len());
        for date in dates {
            println!("  {} {}", date, weekday_name(date.weekday()));
        }
    }
}

fn print_stats(semester: &Semester, window: &WindowArgs) -> anyhow::Result<()> {
    let window = ReportWindow::resolve(&window.range(), window.today());
    let rows: Vec<ClassStatsRow> = contexts(semester)
        .filter(|context| should_include(context.class, &window))
        .map(|context| ClassStatsRow {
            title: context.title(),
            category: context.category(),
            city: context.city(),
            community: context.community(),
            stats: compute_stats(context.class, &window),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn init_tracing() {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry().with(stderr_layer).init();
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule { input } => {
            let semester = load_semester(&input.input)?;
            print_schedule(&semester);
        }
        Commands::Stats { input, window } => {
            let semester = load_semester(&input.input)?;
            print_stats(&semester, &window)?;
        }
        Commands::Detailed {
            input,
            window,
            output,
        } => {
            let semester = load_semester(&input.input)?;
            let csv = generate_detailed_csv(&semester, &window.range(), window.today())?;
            output.emit(csv)?;
        }
        Commands::StudentAttendance {
            input,
            window,
            output,
        } => {
            let semester = load_semester(&input.input)?;
            let csv = generate_student_attendance_report_csv(
                &semester,
                &window.range(),
                window.today(),
            )?;
            output.emit(csv)?;
        }
        Commands::Roster { input, output } => {
            let semester = load_semester(&input.input)?;
            let csv = generate_student_report_csv(&semester)?;
            output.emit(csv)?;
        }
        Commands::Capacity {
            input,
            window,
            output,
        } => {
            let semester = load_semester(&input.input)?;
            let csv = generate_capacity_report_csv(&semester, &window.range(), window.today())?;
            output.emit(csv)?;
        }
    }

    Ok(())
}
