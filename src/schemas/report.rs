use serde::Serialize;

use crate::schemas::assessment::AssessmentResponse;
use crate::schemas::enrollment::EnrollmentResponse;
use crate::schemas::user::UserResponse;

#[derive(Debug, Serialize)]
pub(crate) struct GradeReportResponse {
    pub(crate) student: UserResponse,
    pub(crate) assessments: Vec<AssessmentResponse>,
    pub(crate) gpa: f64,
    pub(crate) generated_at: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegistrationSlipResponse {
    pub(crate) student: UserResponse,
    pub(crate) enrollments: Vec<EnrollmentResponse>,
    pub(crate) generated_at: String,
}
