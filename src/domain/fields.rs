//! Header classification: the keyword table that maps one column header
//! onto a semantic [`FieldRole`].
//!
//! A header is normalized (trimmed, inner whitespace collapsed, lower-cased,
//! hamza-carrying alef folded to bare alef) and then checked against
//! [`CLASSIFICATION_TABLE`] from top to bottom; the first row with a hit
//! decides the role. Headers that match nothing are plain details, so
//! unexpected columns are carried through instead of dropped.

use crate::constants::*;

/// Semantic sub-kind of a detail column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKind {
    Phone,
    Department,
    Gpa,
    Semester,
    Credits,
    Status,
    Advisor,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CourseField {
    Code,
    Name,
    Credits,
    Completed,
    Semester,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Id,
    Name,
    Course(CourseField),
    Detail(DetailKind),
}

/// Keyword set of one classification row.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    /// Matched anywhere inside the normalized header.
    pub contains: &'static [&'static str],
    /// Matched against the whole normalized header only.
    pub exact: &'static [&'static str],
}

impl KeywordSet {
    const fn contains(tokens: &'static [&'static str]) -> Self {
        Self { contains: tokens, exact: &[] }
    }

    pub fn matches(&self, normalized: &str) -> bool {
        self.exact.iter().any(|t| normalized == *t)
            || self.contains.iter().any(|t| normalized.contains(t))
    }
}

/// Ordered classification table. Course rows come first because their
/// headers also contain generic words such as "status" or "حالة"; phone comes
/// before identity because "رقم الهاتف" would otherwise look like an id.
pub const CLASSIFICATION_TABLE: &[(FieldRole, KeywordSet)] = &[
    (FieldRole::Course(CourseField::Code), KeywordSet::contains(COURSE_CODE_KEYWORDS)),
    (FieldRole::Course(CourseField::Name), KeywordSet::contains(COURSE_NAME_KEYWORDS)),
    (FieldRole::Course(CourseField::Credits), KeywordSet::contains(COURSE_CREDITS_KEYWORDS)),
    (FieldRole::Course(CourseField::Completed), KeywordSet::contains(COURSE_COMPLETED_KEYWORDS)),
    (FieldRole::Course(CourseField::Semester), KeywordSet::contains(COURSE_SEMESTER_KEYWORDS)),
    (FieldRole::Detail(DetailKind::Phone), KeywordSet::contains(PHONE_KEYWORDS)),
    (FieldRole::Id, KeywordSet { contains: ID_KEYWORDS, exact: ID_EXACT }),
    (FieldRole::Name, KeywordSet { contains: NAME_KEYWORDS, exact: NAME_EXACT }),
    (FieldRole::Detail(DetailKind::Department), KeywordSet::contains(DEPARTMENT_KEYWORDS)),
    (FieldRole::Detail(DetailKind::Gpa), KeywordSet::contains(GPA_KEYWORDS)),
    (FieldRole::Detail(DetailKind::Semester), KeywordSet::contains(SEMESTER_KEYWORDS)),
    (FieldRole::Detail(DetailKind::Credits), KeywordSet::contains(CREDITS_KEYWORDS)),
    (FieldRole::Detail(DetailKind::Status), KeywordSet::contains(STATUS_KEYWORDS)),
    (FieldRole::Detail(DetailKind::Advisor), KeywordSet::contains(ADVISOR_KEYWORDS)),
];

/// Map أ, إ and آ to bare ا. Spreadsheets spell the same header both ways.
pub fn fold_alef(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'أ' | 'إ' | 'آ' => 'ا',
            other => other,
        })
        .collect()
}

pub fn normalize_header(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    fold_alef(&collapsed.to_lowercase())
}

/// Classify a single header. Never fails: unknown headers are `Detail(Other)`.
pub fn classify_header(raw: &str) -> FieldRole {
    let normalized = normalize_header(raw);
    CLASSIFICATION_TABLE
        .iter()
        .find(|(_, keywords)| keywords.matches(&normalized))
        .map(|(role, _)| *role)
        .unwrap_or(FieldRole::Detail(DetailKind::Other))
}

pub fn is_phone_header(raw: &str) -> bool {
    classify_header(raw) == FieldRole::Detail(DetailKind::Phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_headers() {
        assert_eq!(classify_header("id"), FieldRole::Id);
        assert_eq!(classify_header("  ID "), FieldRole::Id);
        assert_eq!(classify_header("الرقم التدريبي"), FieldRole::Id);
        assert_eq!(classify_header("Trainee  ID"), FieldRole::Id);
        assert_eq!(classify_header("name"), FieldRole::Name);
        assert_eq!(classify_header("اسم المتدرب"), FieldRole::Name);
        assert_eq!(classify_header("الاسم"), FieldRole::Name);
    }

    #[test]
    fn test_bare_words_do_not_hijack_identity() {
        assert_eq!(classify_header("paid"), FieldRole::Detail(DetailKind::Other));
        assert_eq!(classify_header("national id"), FieldRole::Detail(DetailKind::Other));
        assert_eq!(classify_header("nickname"), FieldRole::Detail(DetailKind::Other));
    }

    #[test]
    fn test_phone_headers_in_both_locales() {
        for header in ["رقم الهاتف الجوال", "جوال", "Phone", "Mobile Number", "هاتف المنزل"] {
            assert_eq!(classify_header(header), FieldRole::Detail(DetailKind::Phone), "{}", header);
        }
    }

    #[test]
    fn test_course_headers_win_over_generic_details() {
        assert_eq!(classify_header("حالة المقرر/ مستوفى"), FieldRole::Course(CourseField::Completed));
        assert_eq!(classify_header("الوحدات المعتمدة للمقرر"), FieldRole::Course(CourseField::Credits));
        assert_eq!(classify_header("Course Name 2"), FieldRole::Course(CourseField::Name));
        assert_eq!(classify_header("حالة المتدرب"), FieldRole::Detail(DetailKind::Status));
        assert_eq!(
            classify_header("عدد الوحدات المعتمده للبرنامج"),
            FieldRole::Detail(DetailKind::Credits)
        );
    }

    #[test]
    fn test_unknown_header_is_plain_detail() {
        assert_eq!(classify_header("ملاحظات"), FieldRole::Detail(DetailKind::Other));
        assert_eq!(classify_header(""), FieldRole::Detail(DetailKind::Other));
    }

    #[test]
    fn test_hamza_alef_spellings_match() {
        assert_eq!(classify_header("إسم المقرر"), FieldRole::Course(CourseField::Name));
        assert_eq!(classify_header("إسم المتدرب"), FieldRole::Name);
        assert_eq!(classify_header("أسم الطالب"), FieldRole::Name);
        assert_eq!(normalize_header("  المرشد   الأكاديمي "), "المرشد الاكاديمي");
    }
}
