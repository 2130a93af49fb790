use sqlx::PgPool;

use crate::db::models::Quiz;
use crate::db::types::ShowAnswers;

const COLUMNS: &str = "\
    id, title, description, course_id, pass_mark, time_limit_minutes, \
    attempts_allowed, randomize_questions, show_answers, is_active, created_at";

pub(crate) struct CreateQuiz<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) course_id: Option<&'a str>,
    pub(crate) pass_mark: i32,
    pub(crate) time_limit_minutes: Option<i32>,
    pub(crate) attempts_allowed: i32,
    pub(crate) randomize_questions: bool,
    pub(crate) show_answers: ShowAnswers,
    pub(crate) is_active: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateQuiz<'_>) -> Result<Quiz, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!(
        "INSERT INTO quizzes (
            id, title, description, course_id, pass_mark, time_limit_minutes,
            attempts_allowed, randomize_questions, show_answers, is_active,
            created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.course_id)
    .bind(params.pass_mark)
    .bind(params.time_limit_minutes)
    .bind(params.attempts_allowed)
    .bind(params.randomize_questions)
    .bind(params.show_answers)
    .bind(params.is_active)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_active(
    pool: &PgPool,
    course_id: Option<&str>,
) -> Result<Vec<Quiz>, sqlx::Error> {
    match course_id {
        Some(course_id) => {
            sqlx::query_as::<_, Quiz>(&format!(
                "SELECT {COLUMNS} FROM quizzes
                 WHERE is_active AND course_id = $1
                 ORDER BY created_at DESC",
            ))
            .bind(course_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Quiz>(&format!(
                "SELECT {COLUMNS} FROM quizzes WHERE is_active ORDER BY created_at DESC",
            ))
            .fetch_all(pool)
            .await
        }
    }
}

pub(crate) struct UpdateQuiz {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) pass_mark: Option<i32>,
    pub(crate) time_limit_minutes: Option<i32>,
    pub(crate) attempts_allowed: Option<i32>,
    pub(crate) randomize_questions: Option<bool>,
    pub(crate) show_answers: Option<ShowAnswers>,
    pub(crate) is_active: Option<bool>,
}

pub(crate) async fn update(pool: &PgPool, id: &str, params: UpdateQuiz) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE quizzes SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            pass_mark = COALESCE($3, pass_mark),
            time_limit_minutes = COALESCE($4, time_limit_minutes),
            attempts_allowed = COALESCE($5, attempts_allowed),
            randomize_questions = COALESCE($6, randomize_questions),
            show_answers = COALESCE($7, show_answers),
            is_active = COALESCE($8, is_active)
         WHERE id = $9",
    )
    .bind(params.title)
    .bind(params.description)
    .bind(params.pass_mark)
    .bind(params.time_limit_minutes)
    .bind(params.attempts_allowed)
    .bind(params.randomize_questions)
    .bind(params.show_answers)
    .bind(params.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn fetch_one_by_id(pool: &PgPool, id: &str) -> Result<Quiz, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
}
