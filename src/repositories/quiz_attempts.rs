use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::models::QuizAttempt;

const COLUMNS: &str = "\
    id, quiz_id, user_id, answers, score, passed, started_at, completed_at, \
    time_spent_seconds";

pub(crate) struct CreateQuizAttempt<'a> {
    pub(crate) id: &'a str,
    pub(crate) quiz_id: &'a str,
    pub(crate) user_id: &'a str,
    pub(crate) answers: serde_json::Value,
    pub(crate) score: Option<f64>,
    pub(crate) passed: Option<bool>,
    pub(crate) started_at: time::PrimitiveDateTime,
    pub(crate) completed_at: Option<time::PrimitiveDateTime>,
    pub(crate) time_spent_seconds: Option<i32>,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateQuizAttempt<'_>,
) -> Result<QuizAttempt, sqlx::Error> {
    sqlx::query_as::<_, QuizAttempt>(&format!(
        "INSERT INTO quiz_attempts (
            id, quiz_id, user_id, answers, score, passed, started_at,
            completed_at, time_spent_seconds
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.quiz_id)
    .bind(params.user_id)
    .bind(params.answers)
    .bind(params.score)
    .bind(params.passed)
    .bind(params.started_at)
    .bind(params.completed_at)
    .bind(params.time_spent_seconds)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<QuizAttempt>, sqlx::Error> {
    sqlx::query_as::<_, QuizAttempt>(&format!(
        "SELECT {COLUMNS} FROM quiz_attempts WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list(
    pool: &PgPool,
    user_id: Option<&str>,
    quiz_id: Option<&str>,
) -> Result<Vec<QuizAttempt>, sqlx::Error> {
    let mut builder =
        QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM quiz_attempts"));
    let mut has_where = false;

    if let Some(user_id) = user_id {
        builder.push(" WHERE user_id = ");
        builder.push_bind(user_id);
        has_where = true;
    }
    if let Some(quiz_id) = quiz_id {
        builder.push(if has_where { " AND " } else { " WHERE " });
        builder.push("quiz_id = ");
        builder.push_bind(quiz_id);
    }

    builder.push(" ORDER BY started_at DESC");
    builder.build_query_as::<QuizAttempt>().fetch_all(pool).await
}

pub(crate) struct UpdateQuizAttempt {
    pub(crate) answers: Option<serde_json::Value>,
    pub(crate) score: Option<f64>,
    pub(crate) passed: Option<bool>,
    pub(crate) completed_at: Option<time::PrimitiveDateTime>,
    pub(crate) time_spent_seconds: Option<i32>,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateQuizAttempt,
) -> Result<QuizAttempt, sqlx::Error> {
    sqlx::query_as::<_, QuizAttempt>(&format!(
        "UPDATE quiz_attempts SET
            answers = COALESCE($1, answers),
            score = COALESCE($2, score),
            passed = COALESCE($3, passed),
            completed_at = COALESCE($4, completed_at),
            time_spent_seconds = COALESCE($5, time_spent_seconds)
         WHERE id = $6
         RETURNING {COLUMNS}",
    ))
    .bind(params.answers)
    .bind(params.score)
    .bind(params.passed)
    .bind(params.completed_at)
    .bind(params.time_spent_seconds)
    .bind(id)
    .fetch_one(pool)
    .await
}
