use sqlx::PgPool;

use crate::db::models::QuizQuestion;
use crate::db::types::QuestionType;

const COLUMNS: &str = "\
    id, quiz_id, question, question_type, options, correct_answer, \
    explanation, points, order_index";

pub(crate) struct CreateQuizQuestion<'a> {
    pub(crate) id: &'a str,
    pub(crate) quiz_id: &'a str,
    pub(crate) question: &'a str,
    pub(crate) question_type: QuestionType,
    pub(crate) options: serde_json::Value,
    pub(crate) correct_answer: Option<&'a str>,
    pub(crate) explanation: Option<&'a str>,
    pub(crate) points: i32,
    pub(crate) order_index: i32,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateQuizQuestion<'_>,
) -> Result<QuizQuestion, sqlx::Error> {
    sqlx::query_as::<_, QuizQuestion>(&format!(
        "INSERT INTO quiz_questions (
            id, quiz_id, question, question_type, options, correct_answer,
            explanation, points, order_index
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.quiz_id)
    .bind(params.question)
    .bind(params.question_type)
    .bind(params.options)
    .bind(params.correct_answer)
    .bind(params.explanation)
    .bind(params.points)
    .bind(params.order_index)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_by_quiz(
    pool: &PgPool,
    quiz_id: &str,
) -> Result<Vec<QuizQuestion>, sqlx::Error> {
    sqlx::query_as::<_, QuizQuestion>(&format!(
        "SELECT {COLUMNS} FROM quiz_questions WHERE quiz_id = $1 ORDER BY order_index",
    ))
    .bind(quiz_id)
    .fetch_all(pool)
    .await
}
