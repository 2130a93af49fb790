use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::types::EnrollmentStatus;

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollmentCreate {
    #[serde(alias = "studentId")]
    pub(crate) student_id: String,
    #[serde(alias = "courseId")]
    pub(crate) course_id: String,
    #[serde(alias = "sessionId")]
    pub(crate) session_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollmentDrop {
    #[serde(alias = "studentId")]
    pub(crate) student_id: String,
    #[serde(alias = "courseId")]
    pub(crate) course_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrollmentResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) session_id: String,
    pub(crate) status: EnrollmentStatus,
    pub(crate) enrolled_at: String,
}

impl EnrollmentResponse {
    pub(crate) fn from_db(enrollment: crate::db::models::Enrollment) -> Self {
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            session_id: enrollment.session_id,
            status: enrollment.status,
            enrolled_at: format_primitive(enrollment.enrolled_at),
        }
    }
}
