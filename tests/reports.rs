use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use class_attendance_reports::input::parse_semester;
use class_attendance_reports::report::{
    generate_capacity_report_csv, generate_detailed_csv, generate_student_attendance_report_csv,
    generate_student_report_csv,
};
use class_attendance_reports::{
    compute_stats, expand_schedule, AttendanceStats, DateRange, ReportWindow, Semester,
};

const SEMESTER: &str = r#"{
    "title": "Winter 2025",
    "city_name": "Springfield",
    "sections": [
        {
            "title": "Art Classes",
            "communityName": "Northside",
            "classes": [
                {
                    "id": 10,
                    "title": "Watercolor",
                    "location": "Library Room B",
                    "startDate": "2025-01-06",
                    "endDate": "2025-01-20",
                    "meetings": [{"day": "Monday", "startTime": "18:00", "endTime": "19:30"}],
                    "signups": [
                        {"id": 1, "firstName": "Ada", "lastName": "Lee", "email": "ada@example.com", "phone": "555-0101", "isWaitlisted": false, "createdAt": "2024-12-15T10:00:00Z"},
                        {"id": 2, "firstName": "Ben", "lastName": "Cho", "email": "ben@example.com", "phone": "555-0102", "isWaitlisted": false, "createdAt": "2024-12-16T10:00:00Z"}
                    ],
                    "attendance": [
                        {"studentId": 1, "date": "2025-01-06", "present": true},
                        {"studentId": 1, "date": "2025-01-13", "present": true},
                        {"studentId": 2, "date": "2025-01-06", "present": false}
                    ]
                },
                {
                    "id": 11,
                    "title": "Sculpture",
                    "visibility": false,
                    "startDate": "2025-01-06",
                    "endDate": "2025-01-06",
                    "signups": [{"id": 3, "firstName": "Hidden"}]
                }
            ]
        },
        {
            "title": "Workshops",
            "cityName": "Shelbyville",
            "classes": [
                {
                    "id": 20,
                    "title": "Bike Repair",
                    "startDate": "2025-01-11",
                    "endDate": "2025-01-11",
                    "meetings": null,
                    "signups": [{"id": 5, "firstName": "Cy", "lastName": "Park"}],
                    "attendance": [{"studentId": "5", "date": "2025-01-11", "present": true}]
                },
                {
                    "id": 21,
                    "title": "Empty Workshop",
                    "startDate": "2025-01-12",
                    "endDate": "2025-01-12",
                    "signups": []
                }
            ]
        }
    ]
}"#;

fn semester() -> Semester {
    parse_semester(SEMESTER).unwrap()
}

fn january() -> DateRange {
    DateRange {
        start_date: None,
        end_date: NaiveDate::from_ymd_opt(2025, 1, 20),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

#[test]
fn watercolor_stats_match_recorded_attendance() {
    let semester = semester();
    let watercolor = &semester.sections[0].classes[0];
    assert_eq!(expand_schedule(watercolor).len(), 3);

    let window = ReportWindow::resolve(&january(), today());
    assert_eq!(
        compute_stats(watercolor, &window),
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
fn detailed_report_end_to_end() {
    let csv = generate_detailed_csv(&semester(), &january(), today()).unwrap();
    let expected = "\
City,Community,Class Title,Category,Start Date,End Date,Location,Total Class Days,Students Enrolled,Students Attended,Total Attendance,Attendance %
Springfield,Northside,Watercolor,Art Classes,2025-01-06,2025-01-20,Library Room B,3,2,1,2 of 6,33%
Shelbyville,,Bike Repair,Workshops,2025-01-11,2025-01-11,,1,1,1,1 of 1,100%

Summary
Total Classes,2
Total Students Enrolled,3
Total Students Attended,2
Students Not Attended,1
Enrolled Attended %,67%
Average Attendance,43%
";
    assert_eq!(csv, expected);
}

#[test]
fn student_attendance_report_end_to_end() {
    let csv = generate_student_attendance_report_csv(&semester(), &january(), today()).unwrap();
    let expected = "\
City,Community,Class,Category,Student Name,Email,Phone,Status,Registration Date,2025-01-06,2025-01-11,2025-01-13,2025-01-20,Classes Attended,Attendance Rate
Springfield,Northside,Watercolor,Art Classes,Ada Lee,ada@example.com,555-0101,Enrolled,2024-12-15,✓,- -,✓,x,2,67%
Springfield,Northside,Watercolor,Art Classes,Ben Cho,ben@example.com,555-0102,Enrolled,2024-12-16,x,- -,x,x,0,0%
Shelbyville,,Bike Repair,Workshops,Cy Park,,,Enrolled,,- -,✓,- -,- -,1,100%
";
    assert_eq!(csv, expected);
}

#[test]
fn roster_ignores_window_and_lists_empty_classes() {
    let csv = generate_student_report_csv(&semester()).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[3].contains("Bike Repair"));
    assert_eq!(
        lines[4],
        "Shelbyville,,Empty Workshop,Workshops,,2025-01-12,2025-01-12,No students enrolled,,,,,"
    );
    assert!(!csv.contains("Sculpture"));
}

#[test]
fn capacity_report_end_to_end() {
    let csv = generate_capacity_report_csv(&semester(), &january(), today()).unwrap();
    let expected = "\
City,Community,Class Title,Category,2025-01-06,2025-01-11,2025-01-13,Total
Springfield,Northside,Watercolor,Art Classes,1,- -,1,2
Shelbyville,,Bike Repair,Workshops,- -,1,- -,1
TOTAL,,,,1,1,1,3
";
    assert_eq!(csv, expected);
}

#[test]
fn open_ended_window_stops_at_today() {
    let semester = semester();
    let range = DateRange::default();
    let pinned = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

    let csv = generate_detailed_csv(&semester, &range, pinned).unwrap();
    assert!(csv.contains("Watercolor"));
    assert!(!csv.contains("Bike Repair"));
    assert!(csv.contains(",1,2,1,1 of 2,50%"));
}
