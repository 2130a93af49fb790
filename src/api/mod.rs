pub(crate) mod assessments;
pub(crate) mod auth;
pub(crate) mod courses;
pub(crate) mod dashboard;
pub(crate) mod enrollments;
pub(crate) mod errors;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod news_events;
pub(crate) mod pagination;
pub(crate) mod quiz_attempts;
pub(crate) mod quizzes;
pub(crate) mod reports;
pub(crate) mod router;
pub(crate) mod sessions;
pub(crate) mod users;
pub(crate) mod validation;

pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23503"),
        _ => false,
    }
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23505"),
        _ => false,
    }
}
