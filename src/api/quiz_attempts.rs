use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::quiz::{QuizAttemptCreate, QuizAttemptResponse, QuizAttemptUpdate};

#[derive(Debug, Deserialize)]
pub(crate) struct QuizAttemptListQuery {
    #[serde(default)]
    #[serde(alias = "userId")]
    user_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "quizId")]
    quiz_id: Option<String>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attempts).post(create_attempt))
        .route("/:attempt_id", axum::routing::put(update_attempt))
}

async fn list_attempts(
    Query(params): Query<QuizAttemptListQuery>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<QuizAttemptResponse>>, ApiError> {
    let attempts = repositories::quiz_attempts::list(
        state.db(),
        params.user_id.as_deref(),
        params.quiz_id.as_deref(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to list quiz attempts"))?;

    Ok(Json(attempts.into_iter().map(QuizAttemptResponse::from_db).collect()))
}

/// The attempting user is always the caller; `passed` is derived from the
/// quiz pass mark whenever a score is present.
async fn create_attempt(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<QuizAttemptCreate>,
) -> Result<(axum::http::StatusCode, Json<QuizAttemptResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let quiz = repositories::quizzes::find_by_id(state.db(), &payload.quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch quiz"))?;

    let Some(quiz) = quiz else {
        return Err(ApiError::NotFound("Quiz not found".to_string()));
    };

    let previous_attempts =
        repositories::quiz_attempts::list(state.db(), Some(&user.id), Some(&quiz.id))
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count previous attempts"))?;

    if previous_attempts.len() >= quiz.attempts_allowed as usize {
        return Err(ApiError::Conflict("No attempts remaining for this quiz".to_string()));
    }

    let passed = payload.score.map(|score| score >= quiz.pass_mark as f64);
    let completed_at = payload.score.map(|_| primitive_now_utc());

    let attempt = repositories::quiz_attempts::create(
        state.db(),
        repositories::quiz_attempts::CreateQuizAttempt {
            id: &Uuid::new_v4().to_string(),
            quiz_id: &quiz.id,
            user_id: &user.id,
            answers: payload.answers,
            score: payload.score,
            passed,
            started_at: primitive_now_utc(),
            completed_at,
            time_spent_seconds: payload.time_spent_seconds,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create quiz attempt"))?;

    Ok((axum::http::StatusCode::CREATED, Json(QuizAttemptResponse::from_db(attempt))))
}

async fn update_attempt(
    axum::extract::Path(attempt_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<QuizAttemptUpdate>,
) -> Result<Json<QuizAttemptResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let existing = repositories::quiz_attempts::find_by_id(state.db(), &attempt_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch quiz attempt"))?;

    let Some(existing) = existing else {
        return Err(ApiError::NotFound("Quiz attempt not found".to_string()));
    };

    if existing.user_id != user.id {
        return Err(ApiError::Forbidden("Not enough permissions"));
    }

    let quiz = repositories::quizzes::fetch_one_by_id(state.db(), &existing.quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch quiz"))?;

    let passed = payload.score.map(|score| score >= quiz.pass_mark as f64);
    let completed_at = payload.score.map(|_| primitive_now_utc());

    let updated = repositories::quiz_attempts::update(
        state.db(),
        &attempt_id,
        repositories::quiz_attempts::UpdateQuizAttempt {
            answers: payload.answers,
            score: payload.score,
            passed,
            completed_at,
            time_spent_seconds: payload.time_spent_seconds,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update quiz attempt"))?;

    Ok(Json(QuizAttemptResponse::from_db(updated)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::db::types::UserRole;
    use crate::test_support;

    #[tokio::test]
    async fn attempt_derives_passed_from_pass_mark() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "attempt-stud@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let quiz = test_support::insert_quiz(ctx.state.db(), "Pass mark quiz", 70, 3).await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/quiz-attempts",
                Some(&token),
                Some(json!({
                    "quiz_id": quiz.id,
                    "answers": {"q1": "4"},
                    "score": 65.0
                })),
            ))
            .await
            .expect("create attempt");

        let status = response.status();
        let created = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::CREATED, "response: {created}");
        assert_eq!(created["user_id"], student.id.as_str());
        assert_eq!(created["passed"], false);
        assert!(created["completed_at"].is_string());

        let attempt_id = created["id"].as_str().expect("id").to_string();
        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::PUT,
                &format!("/api/quiz-attempts/{attempt_id}"),
                Some(&token),
                Some(json!({"score": 85.0, "time_spent_seconds": 300})),
            ))
            .await
            .expect("update attempt");

        let status = response.status();
        let updated = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {updated}");
        assert_eq!(updated["passed"], true);
        assert_eq!(updated["time_spent_seconds"], 300);
    }

    #[tokio::test]
    async fn attempts_are_capped_by_quiz_allowance() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "attempt-cap@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let quiz = test_support::insert_quiz(ctx.state.db(), "Single try", 50, 1).await;

        let payload = json!({"quiz_id": quiz.id, "score": 90.0});

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/quiz-attempts",
                Some(&token),
                Some(payload.clone()),
            ))
            .await
            .expect("first attempt");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/quiz-attempts",
                Some(&token),
                Some(payload),
            ))
            .await
            .expect("second attempt");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn cannot_update_someone_elses_attempt() {
        let ctx = test_support::setup_test_context().await;

        let owner = test_support::insert_user(
            ctx.state.db(),
            "attempt-owner@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let intruder = test_support::insert_user(
            ctx.state.db(),
            "attempt-intruder@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;

        let quiz = test_support::insert_quiz(ctx.state.db(), "Private quiz", 50, 2).await;

        let owner_token = test_support::bearer_token(&owner.id, ctx.state.settings());
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/quiz-attempts",
                Some(&owner_token),
                Some(json!({"quiz_id": quiz.id})),
            ))
            .await
            .expect("create attempt");
        let created = test_support::read_json(response).await;
        let attempt_id = created["id"].as_str().expect("id").to_string();

        let intruder_token = test_support::bearer_token(&intruder.id, ctx.state.settings());
        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::PUT,
                &format!("/api/quiz-attempts/{attempt_id}"),
                Some(&intruder_token),
                Some(json!({"score": 100.0})),
            ))
            .await
            .expect("update attempt");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
