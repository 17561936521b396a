use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::schedule::parse_date;

/// City and community labels as the upstream rows carry them. Several
/// generations of the schema are in circulation, hence the synonyms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Locale {
    #[serde(default, rename = "cityName", deserialize_with = "lenient::opt_string")]
    pub city_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub city: Option<String>,
    #[serde(default, rename = "city_name", deserialize_with = "lenient::opt_string")]
    pub legacy_city_name: Option<String>,
    #[serde(default, rename = "communityName", deserialize_with = "lenient::opt_string")]
    pub community_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub community: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Semester {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub locale: Locale,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub sections: Vec<Section>,
}

impl Semester {
    pub fn visible_classes(&self) -> impl Iterator<Item = (&Section, &ClassSession)> {
        self.sections
            .iter()
            .filter(|section| section.is_visible())
            .flat_map(|section| {
                section
                    .classes
                    .iter()
                    .filter(|class| class.is_visible())
                    .map(move |class| (section, class))
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub visibility: Option<bool>,
    #[serde(flatten)]
    pub locale: Locale,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub classes: Vec<ClassSession>,
}

impl Section {
    pub fn is_visible(&self) -> bool {
        self.visibility != Some(false)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub meetings: Vec<Meeting>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub signups: Vec<Enrollment>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub visibility: Option<bool>,
    #[serde(flatten)]
    pub locale: Locale,
}

impl ClassSession {
    pub fn is_visible(&self) -> bool {
        self.visibility != Some(false)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_date)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end_date.as_deref().and_then(parse_date)
    }

    pub fn enrolled(&self) -> impl Iterator<Item = &Enrollment> {
        self.signups.iter().filter(|signup| !signup.is_waitlisted())
    }

    pub fn enrolled_count(&self) -> usize {
        self.enrolled().count()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub day: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_waitlisted: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(default, alias = "accommodations", deserialize_with = "lenient::opt_string")]
    pub special_needs: Option<String>,
}

impl Enrollment {
    pub fn is_waitlisted(&self) -> bool {
        self.is_waitlisted == Some(true)
    }

    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        format!("{first} {last}").trim().to_string()
    }

    pub fn status(&self) -> &'static str {
        if self.is_waitlisted() {
            "Waitlisted"
        } else {
            "Enrolled"
        }
    }

    pub fn registered_on(&self) -> String {
        match self.created_at.as_deref() {
            Some(raw) => parse_date(raw)
                .map(|date| date.to_string())
                .unwrap_or_else(|| raw.to_string()),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub student_id: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub present: Option<bool>,
}

impl AttendanceRecord {
    pub fn is_present(&self) -> bool {
        self.present == Some(true)
    }
}

/// Caller-supplied report window. Both bounds are inclusive; a missing end
/// means "today" and a missing start means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub students_enrolled: usize,
    pub students_attended: usize,
    pub total_class_days: usize,
    pub total_attended: usize,
    pub max_possible_attendance: usize,
    pub total_attendance: String,
    pub attendance_percentage: String,
}
