use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct DashboardMetricsResponse {
    pub(crate) total_students: i64,
    pub(crate) total_lecturers: i64,
    pub(crate) total_courses: i64,
    pub(crate) total_enrollments: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GradeBucketResponse {
    pub(crate) grade: String,
    pub(crate) count: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct TopCourseResponse {
    pub(crate) course_id: String,
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) department: Option<String>,
    pub(crate) avg_gpa: f64,
    pub(crate) student_count: i64,
}
