use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime};

use crate::db::types::{EnrollmentStatus, NewsEventKind, QuestionType, ShowAnswers, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) hashed_password: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) role: UserRole,
    pub(crate) department: Option<String>,
    pub(crate) student_id: Option<String>,
    pub(crate) profile_image_url: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct AcademicSession {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) start_date: Date,
    pub(crate) end_date: Date,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Course {
    pub(crate) id: String,
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) credits: i32,
    pub(crate) department: Option<String>,
    pub(crate) lecturer_id: Option<String>,
    pub(crate) session_id: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Enrollment {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) session_id: String,
    pub(crate) status: EnrollmentStatus,
    pub(crate) enrolled_at: PrimitiveDateTime,
}

/// `total_score`, `grade` and `grade_comment` are derived from the four
/// component scores and stored redundantly; they are recomputed on every
/// write, never accepted from a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Assessment {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) session_id: String,
    pub(crate) attendance: Option<f64>,
    pub(crate) assignment: Option<f64>,
    pub(crate) mid_exam: Option<f64>,
    pub(crate) final_exam: Option<f64>,
    pub(crate) total_score: f64,
    pub(crate) grade: String,
    pub(crate) grade_comment: String,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct NewsEvent {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) content: Option<String>,
    pub(crate) kind: NewsEventKind,
    pub(crate) author_id: Option<String>,
    pub(crate) event_date: Option<PrimitiveDateTime>,
    pub(crate) is_published: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Quiz {
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
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct QuizQuestion {
    pub(crate) id: String,
    pub(crate) quiz_id: String,
    pub(crate) question: String,
    pub(crate) question_type: QuestionType,
    pub(crate) options: Json<serde_json::Value>,
    pub(crate) correct_answer: Option<String>,
    pub(crate) explanation: Option<String>,
    pub(crate) points: i32,
    pub(crate) order_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct QuizAttempt {
    pub(crate) id: String,
    pub(crate) quiz_id: String,
    pub(crate) user_id: String,
    pub(crate) answers: Json<serde_json::Value>,
    pub(crate) score: Option<f64>,
    pub(crate) passed: Option<bool>,
    pub(crate) started_at: PrimitiveDateTime,
    pub(crate) completed_at: Option<PrimitiveDateTime>,
    pub(crate) time_spent_seconds: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct CourseMaterial {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) file_url: Option<String>,
    pub(crate) file_type: Option<String>,
    pub(crate) uploaded_by: Option<String>,
    pub(crate) uploaded_at: PrimitiveDateTime,
}
