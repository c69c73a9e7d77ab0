use crate::domain::{is_production_project, Completion, CourseRecord};
use crate::pipeline::ingestion::{Row, RowBatch};
use crate::pipeline::processing::resolve::{CourseColumns, HeaderResolution};

fn text_cell(row: &Row, header: Option<&String>) -> Option<String> {
    header
        .and_then(|h| RowBatch::cell(row, h))
        .map(|value| value.as_trimmed_string())
}

/// Build the course of one slot. A slot without a course name is empty and
/// yields nothing.
fn course_from_slot(columns: &CourseColumns, row: &Row) -> Option<CourseRecord> {
    let course_name = text_cell(row, columns.name.as_ref())?;

    let is_completed = columns
        .completed
        .as_ref()
        .and_then(|h| RowBatch::cell(row, h))
        .map(Completion::from_cell)
        .unwrap_or_default();

    Some(CourseRecord {
        course_code: text_cell(row, columns.code.as_ref()),
        production_project: is_production_project(&course_name),
        course_name,
        credits: columns
            .credits
            .as_ref()
            .and_then(|h| RowBatch::cell(row, h))
            .map(|value| value.normalized()),
        is_completed,
        semester: text_cell(row, columns.semester.as_ref()),
    })
}

/// Every populated course slot of a row, in ascending slot order.
pub fn extract_courses(resolution: &HeaderResolution, row: &Row) -> Vec<CourseRecord> {
    resolution
        .course_slots
        .values()
        .filter_map(|columns| course_from_slot(columns, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;
    use crate::pipeline::processing::resolve::resolve_headers;

    #[test]
    fn test_empty_slots_are_dropped() {
        let batch = RowBatch::from_records(
            &["اسم المقرر 1", "رمز المقرر 1", "اسم المقرر 2", "رمز المقرر 2", "مستوفى 1"],
            vec![vec!["برمجة 1", "CS101", "   ", "CS102", "نعم"]],
        );
        let resolution = resolve_headers(&batch.headers);

        let courses = extract_courses(&resolution, &batch.rows[0]);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_name, "برمجة 1");
        assert_eq!(courses[0].course_code.as_deref(), Some("CS101"));
        assert_eq!(courses[0].is_completed, Completion::Completed);
    }

    #[test]
    fn test_slot_order_follows_slot_number() {
        let batch = RowBatch::from_records(
            &["Course Name 2", "Course Credits 2", "Course Name 1"],
            vec![vec![
                CellValue::from("Networks"),
                CellValue::from("3"),
                CellValue::from("Databases"),
            ]],
        );
        let resolution = resolve_headers(&batch.headers);

        let courses = extract_courses(&resolution, &batch.rows[0]);
        let names: Vec<&str> = courses.iter().map(|c| c.course_name.as_str()).collect();
        assert_eq!(names, vec!["Databases", "Networks"]);
        assert_eq!(courses[1].credits, Some(CellValue::Number(3.0)));
        assert_eq!(courses[1].is_completed, Completion::Unknown);
    }
}
