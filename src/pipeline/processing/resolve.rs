//! Header resolution: applies the per-header classification of
//! [`crate::domain::fields`] to a whole header set, groups course columns
//! into slots and ranks detail keys for display.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::constants::CANONICAL_DETAIL_ORDER;
use crate::domain::{CellValue, DetailBag};
use crate::domain::fields::{classify_header, fold_alef, normalize_header, CourseField, DetailKind, FieldRole};

static SLOT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*$").expect("slot suffix pattern is valid"));

/// Course slot a header belongs to: its trailing number, or 0.
pub fn course_slot(raw: &str) -> u32 {
    SLOT_SUFFIX
        .captures(&normalize_header(raw))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHeader {
    pub raw: String,
    pub role: FieldRole,
}

/// Column headers of one course slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseColumns {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credits: Option<String>,
    pub completed: Option<String>,
    pub semester: Option<String>,
}

impl CourseColumns {
    fn field_mut(&mut self, field: CourseField) -> &mut Option<String> {
        match field {
            CourseField::Code => &mut self.code,
            CourseField::Name => &mut self.name,
            CourseField::Credits => &mut self.credits,
            CourseField::Completed => &mut self.completed,
            CourseField::Semester => &mut self.semester,
        }
    }
}

/// Classification of one spreadsheet's header set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderResolution {
    /// Every header in source order with its final role.
    pub headers: Vec<ResolvedHeader>,
    /// Course columns keyed by slot number, ascending.
    pub course_slots: BTreeMap<u32, CourseColumns>,
}

impl HeaderResolution {
    pub fn headers_with_role(&self, role: FieldRole) -> impl Iterator<Item = &str> {
        self.headers
            .iter()
            .filter(move |h| h.role == role)
            .map(|h| h.raw.as_str())
    }

    pub fn is_course_header(&self, raw: &str) -> bool {
        self.headers
            .iter()
            .any(|h| h.raw == raw && matches!(h.role, FieldRole::Course(_)))
    }
}

/// Resolve a header set. A course field seen twice in the same slot keeps
/// the first header; the later one is demoted to a plain detail.
pub fn resolve_headers<S: AsRef<str>>(headers: &[S]) -> HeaderResolution {
    let mut resolution = HeaderResolution::default();

    for header in headers {
        let raw = header.as_ref();
        let mut role = classify_header(raw);

        if let FieldRole::Course(field) = role {
            let slot = resolution.course_slots.entry(course_slot(raw)).or_default();
            let column = slot.field_mut(field);
            if column.is_none() {
                *column = Some(raw.to_string());
            } else {
                tracing::debug!(header = raw, "duplicate course column in slot, keeping as detail");
                role = FieldRole::Detail(DetailKind::Other);
            }
        }

        resolution.headers.push(ResolvedHeader {
            raw: raw.to_string(),
            role,
        });
    }

    resolution
}

/// Order detail keys for presentation. For every canonical name, the first
/// unplaced key equal to it (after trim) or containing it takes that rank;
/// the remaining keys follow in encounter order. Both sides are alef-folded
/// before comparing.
pub fn display_order<'a, I>(keys: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut remaining: Vec<Option<(&'a str, String)>> = keys
        .into_iter()
        .map(|key| Some((key, fold_alef(key.trim()))))
        .collect();
    let mut ordered = Vec::with_capacity(remaining.len());

    for canonical in CANONICAL_DETAIL_ORDER {
        let canonical = fold_alef(canonical.trim());
        let hit = remaining.iter_mut().find(|slot| match slot {
            Some((_, folded)) => *folded == canonical || folded.contains(&canonical),
            None => false,
        });
        if let Some((key, _)) = hit.and_then(|slot| slot.take()) {
            ordered.push(key);
        }
    }

    ordered.extend(remaining.into_iter().flatten().map(|(key, _)| key));
    ordered
}

/// Detail entries in display order.
pub fn ordered_details(details: &DetailBag) -> Vec<(&str, &CellValue)> {
    display_order(details.keys())
        .into_iter()
        .filter_map(|key| details.get(key).map(|value| (key, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_slots_group_by_suffix() {
        let headers = [
            "id",
            "اسم المقرر 1",
            "رمز المقرر 1",
            "اسم المقرر 2",
            "مستوفى 2",
            "Course Name",
        ];
        let resolution = resolve_headers(&headers);

        assert_eq!(resolution.course_slots.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        let slot1 = &resolution.course_slots[&1];
        assert_eq!(slot1.name.as_deref(), Some("اسم المقرر 1"));
        assert_eq!(slot1.code.as_deref(), Some("رمز المقرر 1"));
        assert_eq!(resolution.course_slots[&2].completed.as_deref(), Some("مستوفى 2"));
        assert!(resolution.is_course_header("Course Name"));
    }

    #[test]
    fn test_duplicate_course_field_is_demoted() {
        let resolution = resolve_headers(&["اسم المقرر", "Course Name"]);
        assert_eq!(resolution.course_slots[&0].name.as_deref(), Some("اسم المقرر"));
        assert_eq!(resolution.headers[1].role, FieldRole::Detail(DetailKind::Other));
    }

    #[test]
    fn test_display_order_is_stable_and_canonical_first() {
        let keys = ["ملاحظات", "رقم الهاتف الجوال", "البريد", "التخصص ", "القسم"];
        let first = display_order(keys.iter().copied());
        let second = display_order(keys.iter().copied());

        assert_eq!(first, vec!["القسم", "التخصص ", "رقم الهاتف الجوال", "ملاحظات", "البريد"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_order_ignores_alef_spelling() {
        let keys = ["ملاحظات", "المرشد الاكاديمي", "القسم"];
        assert_eq!(
            display_order(keys.iter().copied()),
            vec!["القسم", "المرشد الاكاديمي", "ملاحظات"]
        );
    }

    #[test]
    fn test_hamza_spelled_course_headers_form_a_slot() {
        let resolution = resolve_headers(&["الرقم التدريبي", "إسم المتدرب", "إسم المقرر", "رمز المقرر"]);
        let slot = &resolution.course_slots[&0];
        assert_eq!(slot.name.as_deref(), Some("إسم المقرر"));
        assert_eq!(slot.code.as_deref(), Some("رمز المقرر"));
        assert_eq!(resolution.headers[1].role, FieldRole::Name);
    }
}
