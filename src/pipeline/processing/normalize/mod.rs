use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::domain::fields::FieldRole;
use crate::domain::TraineeProfile;
use crate::observability::metrics;
use crate::pipeline::ingestion::{Row, RowBatch};
use crate::pipeline::processing::resolve::{resolve_headers, HeaderResolution};

pub mod courses;

/// Output of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBatch {
    /// Profiles in order of first appearance of their id in the source rows.
    pub profiles: Vec<TraineeProfile>,
    /// 1-based numbers of rows dropped for lacking a training identifier.
    pub rejected_rows: Vec<usize>,
    /// Rows folded into an earlier profile with the same id.
    pub merged_rows: usize,
}

impl NormalizedBatch {
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Trait for turning a tabulated upload into trainee profiles
pub trait Normalizer {
    fn normalize(&self, batch: &RowBatch) -> NormalizedBatch;
}

/// Keyword-driven normalizer. Pure: no I/O, input rows are never mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileNormalizer;

impl ProfileNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// First header of the given role with a non-empty cell.
    fn first_filled<'r>(
        resolution: &'r HeaderResolution,
        row: &Row,
        role: FieldRole,
    ) -> Option<(&'r str, String)> {
        resolution
            .headers_with_role(role)
            .find_map(|header| RowBatch::cell(row, header).map(|v| (header, v.as_trimmed_string())))
    }

    /// Assemble one row. `None` when no identifier could be found.
    fn assemble(resolution: &HeaderResolution, row: &Row) -> Option<TraineeProfile> {
        let (id_header, id) = Self::first_filled(resolution, row, FieldRole::Id)?;
        let name_entry = Self::first_filled(resolution, row, FieldRole::Name);
        let name_header = name_entry.as_ref().map(|(h, _)| *h);

        let mut profile = TraineeProfile::new(id, name_entry.as_ref().map(|(_, n)| n.clone()).unwrap_or_default());

        for header in &resolution.headers {
            let raw = header.raw.as_str();
            if raw == id_header || Some(raw) == name_header {
                continue;
            }
            if matches!(header.role, FieldRole::Course(_)) {
                continue;
            }
            if let Some(value) = RowBatch::cell(row, raw) {
                profile.details.insert(raw, value.normalized());
            }
        }

        profile.courses = courses::extract_courses(resolution, row);
        Some(profile)
    }

    /// Fold a later row of the same trainee into the existing profile.
    fn merge(existing: &mut TraineeProfile, later: TraineeProfile) {
        if existing.name.is_empty() && !later.name.is_empty() {
            existing.name = later.name;
        }
        for (key, value) in later.details.iter() {
            if !existing.details.contains_key(key) {
                existing.details.insert(key, value.clone());
            }
        }
        existing.courses.extend(later.courses);
    }
}

impl Normalizer for ProfileNormalizer {
    fn normalize(&self, batch: &RowBatch) -> NormalizedBatch {
        let resolution = resolve_headers(&batch.headers);
        let mut result = NormalizedBatch::default();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, row) in batch.rows.iter().enumerate() {
            let row_number = index + 1;
            let Some(profile) = Self::assemble(&resolution, row) else {
                warn!(row = row_number, "Row has no training identifier, skipping");
                result.rejected_rows.push(row_number);
                metrics::normalize::row_rejected();
                continue;
            };

            match positions.get(&profile.id) {
                Some(&position) => {
                    debug!(row = row_number, id = %profile.id, "Merging row into existing profile");
                    Self::merge(&mut result.profiles[position], profile);
                    result.merged_rows += 1;
                }
                None => {
                    positions.insert(profile.id.clone(), result.profiles.len());
                    result.profiles.push(profile);
                }
            }
        }

        metrics::normalize::batch_processed(batch.rows.len(), result.profiles.len());
        info!(
            rows = batch.rows.len(),
            profiles = result.profiles.len(),
            rejected = result.rejected_rows.len(),
            merged = result.merged_rows,
            "Normalized row batch"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellValue, Completion};

    fn sample_batch() -> RowBatch {
        RowBatch::from_records(
            &["الرقم التدريبي", "اسم المتدرب", "القسم", "رقم الهاتف الجوال", "اسم المقرر", "مستوفى"],
            vec![
                vec!["423901", " أحمد علي ", "الحاسب", "0558112233", "برمجة 1", "نعم"],
                vec!["", "بدون رقم", "الحاسب", "0500000000", "", ""],
                vec!["423902", "سالم", "الإلكترونيات", "0559112233", "", ""],
                vec!["423901", "أحمد علي", "", "", "المشروع الإنتاجي", "maybe"],
            ],
        )
    }

    #[test]
    fn test_identity_fields_are_hoisted_out_of_details() {
        let batch = ProfileNormalizer::new().normalize(&sample_batch());
        let first = &batch.profiles[0];

        assert_eq!(first.id, "423901");
        assert_eq!(first.name, "أحمد علي");
        assert!(!first.details.contains_key("الرقم التدريبي"));
        assert!(!first.details.contains_key("اسم المتدرب"));
        assert!(!first.details.contains_key("اسم المقرر"));
        assert_eq!(
            first.details.get("رقم الهاتف الجوال"),
            Some(&CellValue::Text("0558112233".to_string()))
        );
    }

    #[test]
    fn test_rows_without_id_are_rejected_not_fatal() {
        let batch = ProfileNormalizer::new().normalize(&sample_batch());
        assert_eq!(batch.rejected_rows, vec![2]);
        assert_eq!(batch.profiles.len(), 2);
    }

    #[test]
    fn test_rows_sharing_an_id_merge_courses() {
        let batch = ProfileNormalizer::new().normalize(&sample_batch());
        let ids: Vec<&str> = batch.profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["423901", "423902"]);
        assert_eq!(batch.merged_rows, 1);

        let courses = &batch.profiles[0].courses;
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].is_completed, Completion::Completed);
        assert!(courses[1].production_project);
        assert_eq!(courses[1].is_completed, Completion::Unknown);
        assert!(batch.profiles[1].courses.is_empty());
    }

    #[test]
    fn test_numeric_id_cell_is_rendered_as_text() {
        let batch = RowBatch::from_records(
            &["id", "name", "GPA"],
            vec![vec![CellValue::Number(423901.0), CellValue::from("أحمد"), CellValue::from("4.5")]],
        );
        let result = ProfileNormalizer::new().normalize(&batch);
        assert_eq!(result.profiles[0].id, "423901");
        assert_eq!(result.profiles[0].details.get("GPA"), Some(&CellValue::Number(4.5)));
    }

    #[test]
    fn test_all_rows_invalid_gives_empty_batch() {
        let batch = RowBatch::from_records(&["القسم", "جوال"], vec![vec!["الحاسب", "0558"]]);
        let result = ProfileNormalizer::new().normalize(&batch);
        assert!(result.is_empty());
        assert_eq!(result.rejected_rows, vec![1]);
    }

    #[test]
    fn test_hamza_spelled_headers_keep_name_and_courses() {
        let batch = RowBatch::from_records(
            &[
                "الرقم التدريبي",
                "إسم المتدرب",
                "رمز المقرر",
                "إسم المقرر",
                "الوحدات المعتمدة للمقرر",
                "حالة المقرر/ مستوفى",
            ],
            vec![vec!["423901", "أحمد", "ENG 101", "لغة إنجليزية", "3", "نعم"]],
        );
        let result = ProfileNormalizer::new().normalize(&batch);
        let profile = &result.profiles[0];

        assert_eq!(profile.name, "أحمد");
        assert!(!profile.details.contains_key("إسم المقرر"));
        assert_eq!(profile.courses.len(), 1);
        let course = &profile.courses[0];
        assert_eq!(course.course_name, "لغة إنجليزية");
        assert_eq!(course.course_code.as_deref(), Some("ENG 101"));
        assert_eq!(course.credits, Some(CellValue::Number(3.0)));
        assert_eq!(course.is_completed, Completion::Completed);
    }

    #[test]
    fn test_input_rows_are_not_mutated() {
        let input = sample_batch();
        let snapshot = input.clone();
        let _ = ProfileNormalizer::new().normalize(&input);
        assert_eq!(input, snapshot);
    }
}
