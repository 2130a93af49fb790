use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AssessmentCreate {
    #[serde(alias = "studentId")]
    pub(crate) student_id: String,
    #[serde(alias = "courseId")]
    pub(crate) course_id: String,
    #[serde(alias = "sessionId")]
    pub(crate) session_id: String,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "attendance must be within 0..=100"))]
    pub(crate) attendance: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "assignment must be within 0..=100"))]
    pub(crate) assignment: Option<f64>,
    #[serde(default)]
    #[serde(alias = "midExam")]
    #[validate(range(min = 0.0, max = 100.0, message = "mid_exam must be within 0..=100"))]
    pub(crate) mid_exam: Option<f64>,
    #[serde(default)]
    #[serde(alias = "finalExam")]
    #[validate(range(min = 0.0, max = 100.0, message = "final_exam must be within 0..=100"))]
    pub(crate) final_exam: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AssessmentUpdate {
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "attendance must be within 0..=100"))]
    pub(crate) attendance: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "assignment must be within 0..=100"))]
    pub(crate) assignment: Option<f64>,
    #[serde(default)]
    #[serde(alias = "midExam")]
    #[validate(range(min = 0.0, max = 100.0, message = "mid_exam must be within 0..=100"))]
    pub(crate) mid_exam: Option<f64>,
    #[serde(default)]
    #[serde(alias = "finalExam")]
    #[validate(range(min = 0.0, max = 100.0, message = "final_exam must be within 0..=100"))]
    pub(crate) final_exam: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) session_id: String,
    pub(crate) attendance: Option<f64>,
    pub(crate) assignment: Option<f64>,
    pub(crate) mid_exam: Option<f64>,
    pub(crate) final_exam: Option<f64>,
    pub(crate) total_score: f64,
    pub(crate) grade: String,
    pub(crate) grade_comment: String,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl AssessmentResponse {
    pub(crate) fn from_db(assessment: crate::db::models::Assessment) -> Self {
        Self {
            id: assessment.id,
            student_id: assessment.student_id,
            course_id: assessment.course_id,
            session_id: assessment.session_id,
            attendance: assessment.attendance,
            assignment: assessment.assignment,
            mid_exam: assessment.mid_exam,
            final_exam: assessment.final_exam,
            total_score: assessment.total_score,
            grade: assessment.grade,
            grade_comment: assessment.grade_comment,
            created_at: format_primitive(assessment.created_at),
            updated_at: format_primitive(assessment.updated_at),
        }
    }
}
