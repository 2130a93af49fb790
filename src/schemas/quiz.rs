use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::types::{QuestionType, ShowAnswers};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuizCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    #[serde(alias = "courseId")]
    pub(crate) course_id: Option<String>,
    #[serde(default = "default_pass_mark")]
    #[serde(alias = "passMark")]
    #[validate(range(min = 0, max = 100, message = "pass_mark must be within 0..=100"))]
    pub(crate) pass_mark: i32,
    #[serde(default)]
    #[serde(alias = "timeLimitMinutes")]
    #[validate(range(min = 1, message = "time_limit_minutes must be positive"))]
    pub(crate) time_limit_minutes: Option<i32>,
    #[serde(default = "default_attempts_allowed")]
    #[serde(alias = "attemptsAllowed")]
    #[validate(range(min = 1, message = "attempts_allowed must be positive"))]
    pub(crate) attempts_allowed: i32,
    #[serde(default)]
    #[serde(alias = "randomizeQuestions")]
    pub(crate) randomize_questions: bool,
    #[serde(default = "default_show_answers")]
    #[serde(alias = "showAnswers")]
    pub(crate) show_answers: ShowAnswers,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuizUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    #[serde(alias = "passMark")]
    #[validate(range(min = 0, max = 100, message = "pass_mark must be within 0..=100"))]
    pub(crate) pass_mark: Option<i32>,
    #[serde(default)]
    #[serde(alias = "timeLimitMinutes")]
    pub(crate) time_limit_minutes: Option<i32>,
    #[serde(default)]
    #[serde(alias = "attemptsAllowed")]
    pub(crate) attempts_allowed: Option<i32>,
    #[serde(default)]
    #[serde(alias = "randomizeQuestions")]
    pub(crate) randomize_questions: Option<bool>,
    #[serde(default)]
    #[serde(alias = "showAnswers")]
    pub(crate) show_answers: Option<ShowAnswers>,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) course_id: Option<String>,
    pub(crate) pass_mark: i32,
    pub(crate) time_limit_minutes: Option<i32>,
    pub(crate) attempts_allowed: i32,
    pub(crate) randomize_questions: bool,
    pub(crate) show_answers: ShowAnswers,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl QuizResponse {
    pub(crate) fn from_db(quiz: crate::db::models::Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            course_id: quiz.course_id,
            pass_mark: quiz.pass_mark,
            time_limit_minutes: quiz.time_limit_minutes,
            attempts_allowed: quiz.attempts_allowed,
            randomize_questions: quiz.randomize_questions,
            show_answers: quiz.show_answers,
            is_active: quiz.is_active,
            created_at: format_primitive(quiz.created_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuizQuestionCreate {
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub(crate) question: String,
    #[serde(alias = "questionType")]
    pub(crate) question_type: QuestionType,
    #[serde(default = "default_options")]
    pub(crate) options: serde_json::Value,
    #[serde(default)]
    #[serde(alias = "correctAnswer")]
    pub(crate) correct_answer: Option<String>,
    #[serde(default)]
    pub(crate) explanation: Option<String>,
    #[serde(default = "default_points")]
    #[validate(range(min = 1, message = "points must be positive"))]
    pub(crate) points: i32,
    #[serde(default)]
    #[serde(alias = "orderIndex")]
    #[validate(range(min = 0, message = "order_index must be non-negative"))]
    pub(crate) order_index: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizQuestionResponse {
    pub(crate) id: String,
    pub(crate) quiz_id: String,
    pub(crate) question: String,
    pub(crate) question_type: QuestionType,
    pub(crate) options: serde_json::Value,
    pub(crate) correct_answer: Option<String>,
    pub(crate) explanation: Option<String>,
    pub(crate) points: i32,
    pub(crate) order_index: i32,
}

impl QuizQuestionResponse {
    pub(crate) fn from_db(question: crate::db::models::QuizQuestion) -> Self {
        Self {
            id: question.id,
            quiz_id: question.quiz_id,
            question: question.question,
            question_type: question.question_type,
            options: question.options.0,
            correct_answer: question.correct_answer,
            explanation: question.explanation,
            points: question.points,
            order_index: question.order_index,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuizAttemptCreate {
    #[serde(alias = "quizId")]
    pub(crate) quiz_id: String,
    #[serde(default = "default_answers")]
    pub(crate) answers: serde_json::Value,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "score must be within 0..=100"))]
    pub(crate) score: Option<f64>,
    #[serde(default)]
    #[serde(alias = "timeSpentSeconds")]
    #[validate(range(min = 0, message = "time_spent_seconds must be non-negative"))]
    pub(crate) time_spent_seconds: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuizAttemptUpdate {
    #[serde(default)]
    pub(crate) answers: Option<serde_json::Value>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "score must be within 0..=100"))]
    pub(crate) score: Option<f64>,
    #[serde(default)]
    #[serde(alias = "timeSpentSeconds")]
    #[validate(range(min = 0, message = "time_spent_seconds must be non-negative"))]
    pub(crate) time_spent_seconds: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizAttemptResponse {
    pub(crate) id: String,
    pub(crate) quiz_id: String,
    pub(crate) user_id: String,
    pub(crate) answers: serde_json::Value,
    pub(crate) score: Option<f64>,
    pub(crate) passed: Option<bool>,
    pub(crate) started_at: String,
    pub(crate) completed_at: Option<String>,
    pub(crate) time_spent_seconds: Option<i32>,
}

impl QuizAttemptResponse {
    pub(crate) fn from_db(attempt: crate::db::models::QuizAttempt) -> Self {
        Self {
            id: attempt.id,
            quiz_id: attempt.quiz_id,
            user_id: attempt.user_id,
            answers: attempt.answers.0,
            score: attempt.score,
            passed: attempt.passed,
            started_at: format_primitive(attempt.started_at),
            completed_at: attempt.completed_at.map(format_primitive),
            time_spent_seconds: attempt.time_spent_seconds,
        }
    }
}

fn default_pass_mark() -> i32 {
    50
}

fn default_attempts_allowed() -> i32 {
    1
}

fn default_show_answers() -> ShowAnswers {
    ShowAnswers::AfterCompletion
}

fn default_points() -> i32 {
    1
}

fn default_options() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

fn default_answers() -> serde_json::Value {
    serde_json::json!({})
}
