use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{require_roles, CurrentAdmin, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::course::{
    CourseCreate, CourseMaterialCreate, CourseMaterialResponse, CourseResponse, CourseUpdate,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CourseListQuery {
    #[serde(default)]
    #[serde(alias = "sessionId")]
    session_id: Option<String>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/:course_id",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/:course_id/materials", get(list_materials).post(create_material))
}

async fn list_courses(
    Query(params): Query<CourseListQuery>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = repositories::courses::list(state.db(), params.session_id.as_deref())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list courses"))?;

    Ok(Json(courses.into_iter().map(CourseResponse::from_db).collect()))
}

async fn get_course(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;

    let Some(course) = course else {
        return Err(ApiError::NotFound("Course not found".to_string()));
    };

    Ok(Json(CourseResponse::from_db(course)))
}

async fn create_course(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CourseCreate>,
) -> Result<(axum::http::StatusCode, Json<CourseResponse>), ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let existing = repositories::courses::exists_by_code(state.db(), payload.code.trim())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check course code"))?;

    if existing.is_some() {
        return Err(ApiError::Conflict("Course with this code already exists".to_string()));
    }

    let course = repositories::courses::create(
        state.db(),
        repositories::courses::CreateCourse {
            id: &Uuid::new_v4().to_string(),
            code: payload.code.trim(),
            name: payload.name.trim(),
            description: payload.description.as_deref(),
            credits: payload.credits,
            department: payload.department.as_deref(),
            lecturer_id: payload.lecturer_id.as_deref(),
            session_id: payload.session_id.as_deref(),
            is_active: true,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create course"))?;

    Ok((axum::http::StatusCode::CREATED, Json(CourseResponse::from_db(course))))
}

async fn update_course(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CourseUpdate>,
) -> Result<Json<CourseResponse>, ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;

    let existing = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;

    if existing.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    repositories::courses::update(
        state.db(),
        &course_id,
        repositories::courses::UpdateCourse {
            name: payload.name,
            description: payload.description,
            credits: payload.credits,
            department: payload.department,
            lecturer_id: payload.lecturer_id,
            session_id: payload.session_id,
            is_active: payload.is_active,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update course"))?;

    let updated = repositories::courses::fetch_one_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated course"))?;

    Ok(Json(CourseResponse::from_db(updated)))
}

async fn delete_course(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentAdmin(admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;

    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let deleted = repositories::courses::delete(state.db(), &course_id).await.map_err(|e| {
        if super::is_foreign_key_violation(&e) {
            ApiError::Conflict("Cannot delete course due dependent records".to_string())
        } else {
            ApiError::internal(e, "Failed to delete course")
        }
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    tracing::info!(
        admin_id = %admin.id,
        course_id = %course_id,
        action = "course_delete",
        "Admin deleted course"
    );

    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn list_materials(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<CourseMaterialResponse>>, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;

    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let materials = repositories::course_materials::list_by_course(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list course materials"))?;

    Ok(Json(materials.into_iter().map(CourseMaterialResponse::from_db).collect()))
}

async fn create_material(
    axum::extract::Path(course_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<CourseMaterialCreate>,
) -> Result<(axum::http::StatusCode, Json<CourseMaterialResponse>), ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;

    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let material = repositories::course_materials::create(
        state.db(),
        repositories::course_materials::CreateCourseMaterial {
            id: &Uuid::new_v4().to_string(),
            course_id: &course_id,
            title: payload.title.trim(),
            description: payload.description.as_deref(),
            file_url: payload.file_url.as_deref(),
            file_type: payload.file_type.as_deref(),
            uploaded_by: Some(&user.id),
            uploaded_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create course material"))?;

    Ok((axum::http::StatusCode::CREATED, Json(CourseMaterialResponse::from_db(material))))
}
