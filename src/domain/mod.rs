mod cell;
pub mod fields;

pub use cell::{CellValue, DetailBag};

use serde::{Deserialize, Serialize};

use crate::constants::{AFFIRMATIVE_TOKENS, NEGATIVE_TOKENS, PLACEHOLDER, PRODUCTION_PROJECT_MARKERS};
use fields::{classify_header, DetailKind, FieldRole};

/// Tri-state completion flag of a course. Anything that is not a known
/// affirmative or negative token stays `Unknown`; it is never read as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Completion {
    Completed,
    NotCompleted,
    #[default]
    Unknown,
}

impl Completion {
    pub fn from_cell(cell: &CellValue) -> Self {
        match cell {
            CellValue::Bool(true) => Completion::Completed,
            CellValue::Bool(false) => Completion::NotCompleted,
            other => {
                let token = other
                    .as_trimmed_string()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase();
                if AFFIRMATIVE_TOKENS.contains(&token.as_str()) {
                    Completion::Completed
                } else if NEGATIVE_TOKENS.contains(&token.as_str()) {
                    Completion::NotCompleted
                } else {
                    Completion::Unknown
                }
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Completion::Completed => Some(true),
            Completion::NotCompleted => Some(false),
            Completion::Unknown => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Completion::Completed => "yes",
            Completion::NotCompleted => "no",
            Completion::Unknown => PLACEHOLDER,
        }
    }
}

impl From<Option<bool>> for Completion {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Completion::Completed,
            Some(false) => Completion::NotCompleted,
            None => Completion::Unknown,
        }
    }
}

impl From<Completion> for Option<bool> {
    fn from(value: Completion) -> Self {
        value.as_bool()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    pub course_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<CellValue>,
    #[serde(default)]
    pub is_completed: Completion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(default)]
    pub production_project: bool,
}

impl CourseRecord {
    pub fn new(course_name: impl Into<String>) -> Self {
        let course_name = course_name.into();
        let production_project = is_production_project(&course_name);
        Self {
            course_code: None,
            course_name,
            credits: None,
            is_completed: Completion::Unknown,
            semester: None,
            production_project,
        }
    }
}

pub fn is_production_project(course_name: &str) -> bool {
    let lower = course_name.to_lowercase();
    PRODUCTION_PROJECT_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// One trainee's normalized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraineeProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub details: DetailBag,
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
}

impl TraineeProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            details: DetailBag::new(),
            courses: Vec::new(),
        }
    }

    /// Detail entries whose header classifies as the given kind.
    pub fn details_of_kind(&self, kind: DetailKind) -> impl Iterator<Item = (&str, &CellValue)> {
        self.details
            .iter()
            .filter(move |(key, _)| classify_header(key) == FieldRole::Detail(kind))
    }

    /// Values stored under phone-like headers, trimmed.
    pub fn phone_numbers(&self) -> Vec<String> {
        self.details_of_kind(DetailKind::Phone)
            .map(|(_, value)| value.as_trimmed_string())
            .collect()
    }

    /// Courses ordered by semester for display. Stored order is untouched:
    /// courses without a semester come last and ties keep insertion order.
    pub fn sorted_courses(&self) -> Vec<&CourseRecord> {
        let mut view: Vec<&CourseRecord> = self.courses.iter().collect();
        view.sort_by(|a, b| match (&a.semester, &b.semester) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_tokens() {
        assert_eq!(Completion::from_cell(&CellValue::from("نعم")), Completion::Completed);
        assert_eq!(Completion::from_cell(&CellValue::from(" Yes ")), Completion::Completed);
        assert_eq!(Completion::from_cell(&CellValue::Bool(true)), Completion::Completed);
        assert_eq!(Completion::from_cell(&CellValue::from("لا")), Completion::NotCompleted);
        assert_eq!(Completion::from_cell(&CellValue::from("No")), Completion::NotCompleted);
        assert_eq!(Completion::from_cell(&CellValue::from("FALSE")), Completion::NotCompleted);
        assert_eq!(Completion::from_cell(&CellValue::from("")), Completion::Unknown);
        assert_eq!(Completion::from_cell(&CellValue::from("ربما")), Completion::Unknown);
        assert_eq!(Completion::from_cell(&CellValue::Number(0.0)), Completion::Unknown);

        assert_eq!(Completion::from_cell(&CellValue::from("مستوفى")), Completion::Completed);
        assert_eq!(Completion::from_cell(&CellValue::from(" مستوفي ")), Completion::Completed);
        assert_eq!(Completion::from_cell(&CellValue::from("غير مستوفى")), Completion::NotCompleted);
        assert_eq!(Completion::from_cell(&CellValue::from("غير  مستوفي")), Completion::NotCompleted);
    }

    #[test]
    fn test_completion_serializes_as_nullable_bool() {
        let mut course = CourseRecord::new("برمجة 1");
        assert_eq!(
            serde_json::to_value(&course).unwrap()["isCompleted"],
            serde_json::Value::Null
        );
        course.is_completed = Completion::NotCompleted;
        assert_eq!(
            serde_json::to_value(&course).unwrap()["isCompleted"],
            serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn test_production_project_marker() {
        assert!(CourseRecord::new("المشروع الإنتاجي").production_project);
        assert!(CourseRecord::new("Production Project II").production_project);
        assert!(!CourseRecord::new("قواعد البيانات").production_project);
    }

    #[test]
    fn test_sorted_courses_keeps_stored_order() {
        let mut profile = TraineeProfile::new("1", "A");
        for (name, semester) in [("c1", Some("1446-2")), ("c2", None), ("c3", Some("1446-1")), ("c4", Some("1446-2"))] {
            let mut course = CourseRecord::new(name);
            course.semester = semester.map(str::to_string);
            profile.courses.push(course);
        }

        let names: Vec<&str> = profile
            .sorted_courses()
            .iter()
            .map(|c| c.course_name.as_str())
            .collect();
        assert_eq!(names, vec!["c3", "c1", "c4", "c2"]);
        assert_eq!(profile.courses[0].course_name, "c1");
    }

    #[test]
    fn test_phone_numbers_accessor() {
        let mut profile = TraineeProfile::new("1", "A");
        profile.details.insert("رقم الهاتف الجوال", CellValue::from("0558112233"));
        profile.details.insert("القسم", CellValue::from("حاسب"));
        assert_eq!(profile.phone_numbers(), vec!["0558112233".to_string()]);
    }
}
