use axum::{routing::get, Json, Router};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{require_roles, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::session::{
    AcademicSessionCreate, AcademicSessionResponse, AcademicSessionUpdate,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/:session_id", axum::routing::put(update_session))
}

async fn list_sessions(
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<AcademicSessionResponse>>, ApiError> {
    let sessions = repositories::academic_sessions::list_active(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list sessions"))?;

    Ok(Json(sessions.into_iter().map(AcademicSessionResponse::from_db).collect()))
}

// "At most one active session" is a convention kept by the admins, not a
// constraint this endpoint enforces.
async fn create_session(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<AcademicSessionCreate>,
) -> Result<(axum::http::StatusCode, Json<AcademicSessionResponse>), ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if payload.end_date <= payload.start_date {
        return Err(ApiError::BadRequest("end_date must be after start_date".to_string()));
    }

    let session = repositories::academic_sessions::create(
        state.db(),
        repositories::academic_sessions::CreateAcademicSession {
            id: &Uuid::new_v4().to_string(),
            name: payload.name.trim(),
            start_date: payload.start_date,
            end_date: payload.end_date,
            is_active: payload.is_active,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create session"))?;

    Ok((axum::http::StatusCode::CREATED, Json(AcademicSessionResponse::from_db(session))))
}

async fn update_session(
    axum::extract::Path(session_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<AcademicSessionUpdate>,
) -> Result<Json<AcademicSessionResponse>, ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;

    let existing = repositories::academic_sessions::find_by_id(state.db(), &session_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch session"))?;

    let Some(existing) = existing else {
        return Err(ApiError::NotFound("Session not found".to_string()));
    };

    let start_date = payload.start_date.unwrap_or(existing.start_date);
    let end_date = payload.end_date.unwrap_or(existing.end_date);
    if end_date <= start_date {
        return Err(ApiError::BadRequest("end_date must be after start_date".to_string()));
    }

    repositories::academic_sessions::update(
        state.db(),
        &session_id,
        repositories::academic_sessions::UpdateAcademicSession {
            name: payload.name,
            start_date: payload.start_date,
            end_date: payload.end_date,
            is_active: payload.is_active,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update session"))?;

    let updated = repositories::academic_sessions::fetch_one_by_id(state.db(), &session_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated session"))?;

    Ok(Json(AcademicSessionResponse::from_db(updated)))
}
