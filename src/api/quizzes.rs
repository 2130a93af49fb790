use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{require_roles, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::quiz::{
    QuizCreate, QuizQuestionCreate, QuizQuestionResponse, QuizResponse, QuizUpdate,
};

#[derive(Debug, Deserialize)]
pub(crate) struct QuizListQuery {
    #[serde(default)]
    #[serde(alias = "courseId")]
    course_id: Option<String>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quizzes).post(create_quiz))
        .route("/:quiz_id", get(get_quiz).put(update_quiz))
        .route("/:quiz_id/questions", get(list_questions).post(create_question))
}

async fn list_quizzes(
    Query(params): Query<QuizListQuery>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<QuizResponse>>, ApiError> {
    let quizzes = repositories::quizzes::list_active(state.db(), params.course_id.as_deref())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list quizzes"))?;

    Ok(Json(quizzes.into_iter().map(QuizResponse::from_db).collect()))
}

async fn get_quiz(
    axum::extract::Path(quiz_id): axum::extract::Path<String>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<QuizResponse>, ApiError> {
    let quiz = repositories::quizzes::find_by_id(state.db(), &quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch quiz"))?;

    let Some(quiz) = quiz else {
        return Err(ApiError::NotFound("Quiz not found".to_string()));
    };

    Ok(Json(QuizResponse::from_db(quiz)))
}

async fn create_quiz(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<QuizCreate>,
) -> Result<(axum::http::StatusCode, Json<QuizResponse>), ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if let Some(course_id) = payload.course_id.as_deref() {
        let course = repositories::courses::find_by_id(state.db(), course_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;
        if course.is_none() {
            return Err(ApiError::NotFound("Course not found".to_string()));
        }
    }

    let quiz = repositories::quizzes::create(
        state.db(),
        repositories::quizzes::CreateQuiz {
            id: &Uuid::new_v4().to_string(),
            title: payload.title.trim(),
            description: payload.description.as_deref(),
            course_id: payload.course_id.as_deref(),
            pass_mark: payload.pass_mark,
            time_limit_minutes: payload.time_limit_minutes,
            attempts_allowed: payload.attempts_allowed,
            randomize_questions: payload.randomize_questions,
            show_answers: payload.show_answers,
            is_active: true,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create quiz"))?;

    Ok((axum::http::StatusCode::CREATED, Json(QuizResponse::from_db(quiz))))
}

async fn update_quiz(
    axum::extract::Path(quiz_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<QuizUpdate>,
) -> Result<Json<QuizResponse>, ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let existing = repositories::quizzes::find_by_id(state.db(), &quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch quiz"))?;

    if existing.is_none() {
        return Err(ApiError::NotFound("Quiz not found".to_string()));
    }

    repositories::quizzes::update(
        state.db(),
        &quiz_id,
        repositories::quizzes::UpdateQuiz {
            title: payload.title,
            description: payload.description,
            pass_mark: payload.pass_mark,
            time_limit_minutes: payload.time_limit_minutes,
            attempts_allowed: payload.attempts_allowed,
            randomize_questions: payload.randomize_questions,
            show_answers: payload.show_answers,
            is_active: payload.is_active,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update quiz"))?;

    let updated = repositories::quizzes::fetch_one_by_id(state.db(), &quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated quiz"))?;

    Ok(Json(QuizResponse::from_db(updated)))
}

async fn list_questions(
    axum::extract::Path(quiz_id): axum::extract::Path<String>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<QuizQuestionResponse>>, ApiError> {
    let quiz = repositories::quizzes::find_by_id(state.db(), &quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch quiz"))?;

    if quiz.is_none() {
        return Err(ApiError::NotFound("Quiz not found".to_string()));
    }

    let questions = repositories::quiz_questions::list_by_quiz(state.db(), &quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list quiz questions"))?;

    Ok(Json(questions.into_iter().map(QuizQuestionResponse::from_db).collect()))
}

async fn create_question(
    axum::extract::Path(quiz_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<QuizQuestionCreate>,
) -> Result<(axum::http::StatusCode, Json<QuizQuestionResponse>), ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let quiz = repositories::quizzes::find_by_id(state.db(), &quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch quiz"))?;

    if quiz.is_none() {
        return Err(ApiError::NotFound("Quiz not found".to_string()));
    }

    let question = repositories::quiz_questions::create(
        state.db(),
        repositories::quiz_questions::CreateQuizQuestion {
            id: &Uuid::new_v4().to_string(),
            quiz_id: &quiz_id,
            question: payload.question.trim(),
            question_type: payload.question_type,
            options: payload.options,
            correct_answer: payload.correct_answer.as_deref(),
            explanation: payload.explanation.as_deref(),
            points: payload.points,
            order_index: payload.order_index,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create quiz question"))?;

    Ok((axum::http::StatusCode::CREATED, Json(QuizQuestionResponse::from_db(question))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::db::types::UserRole;
    use crate::test_support;

    #[tokio::test]
    async fn quiz_with_questions_roundtrip() {
        let ctx = test_support::setup_test_context().await;

        let lecturer = test_support::insert_user(
            ctx.state.db(),
            "quiz-lect@campushub.local",
            UserRole::Lecturer,
            "lecturer-pass",
        )
        .await;
        let token = test_support::bearer_token(&lecturer.id, ctx.state.settings());

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/quizzes",
                Some(&token),
                Some(json!({
                    "title": "Week 3 checkpoint",
                    "pass_mark": 60,
                    "time_limit_minutes": 20
                })),
            ))
            .await
            .expect("create quiz");

        let status = response.status();
        let quiz = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::CREATED, "response: {quiz}");
        assert_eq!(quiz["show_answers"], "after_completion");
        let quiz_id = quiz["id"].as_str().expect("quiz id").to_string();

        for (index, question) in ["What is 2 + 2?", "Is water wet?"].iter().enumerate() {
            let response = ctx
                .app
                .clone()
                .oneshot(test_support::json_request(
                    Method::POST,
                    &format!("/api/quizzes/{quiz_id}/questions"),
                    Some(&token),
                    Some(json!({
                        "question": question,
                        "question_type": "multiple_choice",
                        "options": ["1", "2", "4"],
                        "correct_answer": "4",
                        "order_index": index
                    })),
                ))
                .await
                .expect("create question");
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                &format!("/api/quizzes/{quiz_id}/questions"),
                Some(&token),
                None,
            ))
            .await
            .expect("list questions");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");
        let items = body.as_array().expect("array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["order_index"], 0);
        assert_eq!(items[1]["order_index"], 1);
    }

    #[tokio::test]
    async fn deactivated_quiz_leaves_the_listing() {
        let ctx = test_support::setup_test_context().await;

        let lecturer = test_support::insert_user(
            ctx.state.db(),
            "quiz-hide@campushub.local",
            UserRole::Lecturer,
            "lecturer-pass",
        )
        .await;
        let token = test_support::bearer_token(&lecturer.id, ctx.state.settings());

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/quizzes",
                Some(&token),
                Some(json!({"title": "Soon hidden"})),
            ))
            .await
            .expect("create quiz");
        let quiz = test_support::read_json(response).await;
        let quiz_id = quiz["id"].as_str().expect("quiz id").to_string();

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::PUT,
                &format!("/api/quizzes/{quiz_id}"),
                Some(&token),
                Some(json!({"is_active": false})),
            ))
            .await
            .expect("deactivate quiz");
        assert_eq!(response.status(), StatusCode::OK);

        let response = ctx
            .app
            .oneshot(test_support::json_request(Method::GET, "/api/quizzes", Some(&token), None))
            .await
            .expect("list quizzes");

        let body = test_support::read_json(response).await;
        assert_eq!(body.as_array().expect("array").len(), 0);
    }
}
