//! Display labels shared by all reports.
//!
//! City and community names are looked up through an ordered chain of
//! accessors, class first, then section, then semester. The first non-blank
//! value wins; an exhausted chain yields an empty label.

use crate::models::{ClassSession, Locale, Section, Semester};

type Accessor = for<'a> fn(&'a Locale) -> Option<&'a str>;

const CITY_FIELDS: &[Accessor] = &[city_name, city, legacy_city_name];

const COMMUNITY_FIELDS: &[Accessor] = &[community_name, community];

fn city_name(locale: &Locale) -> Option<&str> {
    locale.city_name.as_deref()
}

fn city(locale: &Locale) -> Option<&str> {
    locale.city.as_deref()
}

fn legacy_city_name(locale: &Locale) -> Option<&str> {
    locale.legacy_city_name.as_deref()
}

fn community_name(locale: &Locale) -> Option<&str> {
    locale.community_name.as_deref()
}

fn community(locale: &Locale) -> Option<&str> {
    locale.community.as_deref()
}

#[derive(Debug, Clone, Copy)]
pub struct ClassContext<'a> {
    pub semester: &'a Semester,
    pub section: &'a Section,
    pub class: &'a ClassSession,
}

impl<'a> ClassContext<'a> {
    pub fn new(semester: &'a Semester, section: &'a Section, class: &'a ClassSession) -> Self {
        Self {
            semester,
            section,
            class,
        }
    }

    pub fn city(&self) -> String {
        self.resolve(CITY_FIELDS)
    }

    pub fn community(&self) -> String {
        self.resolve(COMMUNITY_FIELDS)
    }

    pub fn title(&self) -> String {
        text(self.class.title.as_deref())
    }

    pub fn category(&self) -> String {
        text(self.section.title.as_deref())
    }

    pub fn location(&self) -> String {
        text(self.class.location.as_deref())
    }

    pub fn start_date(&self) -> String {
        text(self.class.start_date.as_deref())
    }

    pub fn end_date(&self) -> String {
        text(self.class.end_date.as_deref())
    }

    fn resolve(&self, fields: &[Accessor]) -> String {
        let locales = [
            &self.class.locale,
            &self.section.locale,
            &self.semester.locale,
        ];
        locales
            .into_iter()
            .flat_map(|locale| fields.iter().map(move |field| field(locale)))
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

pub fn contexts(semester: &Semester) -> impl Iterator<Item = ClassContext<'_>> {
    semester
        .visible_classes()
        .map(move |(section, class)| ClassContext::new(semester, section, class))
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}
