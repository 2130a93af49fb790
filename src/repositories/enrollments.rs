use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::models::Enrollment;
use crate::db::types::EnrollmentStatus;

const COLUMNS: &str = "id, student_id, course_id, session_id, status, enrolled_at";

pub(crate) struct CreateEnrollment<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) session_id: &'a str,
    pub(crate) status: EnrollmentStatus,
    pub(crate) enrolled_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateEnrollment<'_>,
) -> Result<Enrollment, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(&format!(
        "INSERT INTO enrollments (id, student_id, course_id, session_id, status, enrolled_at)
         VALUES ($1,$2,$3,$4,$5,$6)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.course_id)
    .bind(params.session_id)
    .bind(params.status)
    .bind(params.enrolled_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list(
    pool: &PgPool,
    student_id: Option<&str>,
    course_id: Option<&str>,
) -> Result<Vec<Enrollment>, sqlx::Error> {
    let mut builder =
        QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM enrollments"));
    let mut has_where = false;

    if let Some(student_id) = student_id {
        builder.push(" WHERE student_id = ");
        builder.push_bind(student_id);
        has_where = true;
    }
    if let Some(course_id) = course_id {
        builder.push(if has_where { " AND " } else { " WHERE " });
        builder.push("course_id = ");
        builder.push_bind(course_id);
    }

    builder.push(" ORDER BY enrolled_at DESC");
    builder.build_query_as::<Enrollment>().fetch_all(pool).await
}

pub(crate) async fn mark_dropped(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE enrollments SET status = $1 WHERE student_id = $2 AND course_id = $3",
    )
    .bind(EnrollmentStatus::Dropped)
    .bind(student_id)
    .bind(course_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
