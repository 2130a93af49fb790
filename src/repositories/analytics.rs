use sqlx::{FromRow, PgPool};

use crate::db::types::UserRole;

#[derive(Debug, Clone)]
pub(crate) struct DashboardCounts {
    pub(crate) total_students: i64,
    pub(crate) total_lecturers: i64,
    pub(crate) total_courses: i64,
    pub(crate) total_enrollments: i64,
}

pub(crate) async fn dashboard_counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
    let total_students =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(UserRole::Student)
            .fetch_one(pool)
            .await?;

    let total_lecturers =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(UserRole::Lecturer)
            .fetch_one(pool)
            .await?;

    let total_courses =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE is_active")
            .fetch_one(pool)
            .await?;

    let total_enrollments =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments WHERE status = 'active'")
            .fetch_one(pool)
            .await?;

    Ok(DashboardCounts { total_students, total_lecturers, total_courses, total_enrollments })
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct GradeBucket {
    pub(crate) grade: String,
    pub(crate) count: i64,
}

pub(crate) async fn grade_distribution(pool: &PgPool) -> Result<Vec<GradeBucket>, sqlx::Error> {
    sqlx::query_as::<_, GradeBucket>(
        "SELECT grade, COUNT(*) AS count
         FROM assessments
         GROUP BY grade
         ORDER BY grade",
    )
    .fetch_all(pool)
    .await
}

/// One active course with its mean grade points over all assessments and
/// the number of graded students. Courses without assessments average 0,
/// matching the dashboard's historical behavior.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct CourseStanding {
    pub(crate) id: String,
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) department: Option<String>,
    pub(crate) avg_grade_points: f64,
    pub(crate) student_count: i64,
}

pub(crate) async fn top_performing_courses(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<CourseStanding>, sqlx::Error> {
    sqlx::query_as::<_, CourseStanding>(
        "SELECT c.id, c.code, c.name, c.department,
                COALESCE(AVG(CASE a.grade
                    WHEN 'A' THEN 4.0
                    WHEN 'B' THEN 3.0
                    WHEN 'C' THEN 2.0
                    WHEN 'D' THEN 1.0
                    ELSE 0.0
                END)::float8, 0) AS avg_grade_points,
                COUNT(a.student_id) AS student_count
         FROM courses c
         LEFT JOIN assessments a ON a.course_id = c.id
         WHERE c.is_active
         GROUP BY c.id, c.code, c.name, c.department
         ORDER BY avg_grade_points DESC
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
