pub(crate) mod academic_sessions;
pub(crate) mod analytics;
pub(crate) mod assessments;
pub(crate) mod course_materials;
pub(crate) mod courses;
pub(crate) mod enrollments;
pub(crate) mod news_events;
pub(crate) mod quiz_attempts;
pub(crate) mod quiz_questions;
pub(crate) mod quizzes;
pub(crate) mod users;
