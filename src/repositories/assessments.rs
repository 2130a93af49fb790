use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::models::Assessment;

const COLUMNS: &str = "\
    id, student_id, course_id, session_id, attendance, assignment, mid_exam, \
    final_exam, total_score, grade, grade_comment, created_at, updated_at";

pub(crate) struct CreateAssessment<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) session_id: &'a str,
    pub(crate) attendance: Option<f64>,
    pub(crate) assignment: Option<f64>,
    pub(crate) mid_exam: Option<f64>,
    pub(crate) final_exam: Option<f64>,
    pub(crate) total_score: f64,
    pub(crate) grade: &'a str,
    pub(crate) grade_comment: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAssessment<'_>,
) -> Result<Assessment, sqlx::Error> {
    sqlx::query_as::<_, Assessment>(&format!(
        "INSERT INTO assessments (
            id, student_id, course_id, session_id, attendance, assignment,
            mid_exam, final_exam, total_score, grade, grade_comment,
            created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.course_id)
    .bind(params.session_id)
    .bind(params.attendance)
    .bind(params.assignment)
    .bind(params.mid_exam)
    .bind(params.final_exam)
    .bind(params.total_score)
    .bind(params.grade)
    .bind(params.grade_comment)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Assessment>, sqlx::Error> {
    sqlx::query_as::<_, Assessment>(&format!("SELECT {COLUMNS} FROM assessments WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list(
    pool: &PgPool,
    student_id: Option<&str>,
    course_id: Option<&str>,
) -> Result<Vec<Assessment>, sqlx::Error> {
    let mut builder =
        QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM assessments"));
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

    builder.push(" ORDER BY created_at DESC");
    builder.build_query_as::<Assessment>().fetch_all(pool).await
}

/// Full-row update: the caller merges patch components with the stored row
/// and recomputes the derived columns before calling in.
pub(crate) struct UpdateAssessment {
    pub(crate) attendance: Option<f64>,
    pub(crate) assignment: Option<f64>,
    pub(crate) mid_exam: Option<f64>,
    pub(crate) final_exam: Option<f64>,
    pub(crate) total_score: f64,
    pub(crate) grade: String,
    pub(crate) grade_comment: String,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateAssessment,
) -> Result<Assessment, sqlx::Error> {
    sqlx::query_as::<_, Assessment>(&format!(
        "UPDATE assessments SET
            attendance = $1,
            assignment = $2,
            mid_exam = $3,
            final_exam = $4,
            total_score = $5,
            grade = $6,
            grade_comment = $7,
            updated_at = $8
         WHERE id = $9
         RETURNING {COLUMNS}",
    ))
    .bind(params.attendance)
    .bind(params.assignment)
    .bind(params.mid_exam)
    .bind(params.final_exam)
    .bind(params.total_score)
    .bind(params.grade)
    .bind(params.grade_comment)
    .bind(params.updated_at)
    .bind(id)
    .fetch_one(pool)
    .await
}
