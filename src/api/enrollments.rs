use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::{require_self_or_staff, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::EnrollmentStatus;
use crate::repositories;
use crate::schemas::enrollment::{EnrollmentCreate, EnrollmentDrop, EnrollmentResponse};
use crate::schemas::MessageResponse;

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollmentListQuery {
    #[serde(default)]
    #[serde(alias = "studentId")]
    student_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "courseId")]
    course_id: Option<String>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_enrollments).post(create_enrollment).delete(drop_enrollment))
}

async fn list_enrollments(
    Query(params): Query<EnrollmentListQuery>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let enrollments = repositories::enrollments::list(
        state.db(),
        params.student_id.as_deref(),
        params.course_id.as_deref(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to list enrollments"))?;

    Ok(Json(enrollments.into_iter().map(EnrollmentResponse::from_db).collect()))
}

async fn create_enrollment(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<EnrollmentCreate>,
) -> Result<(axum::http::StatusCode, Json<EnrollmentResponse>), ApiError> {
    require_self_or_staff(&user, &payload.student_id)?;

    let course = repositories::courses::find_by_id(state.db(), &payload.course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;

    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let enrollment = repositories::enrollments::create(
        state.db(),
        repositories::enrollments::CreateEnrollment {
            id: &Uuid::new_v4().to_string(),
            student_id: &payload.student_id,
            course_id: &payload.course_id,
            session_id: &payload.session_id,
            status: EnrollmentStatus::Active,
            enrolled_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if super::is_unique_violation(&e) {
            ApiError::Conflict("Student is already enrolled in this course".to_string())
        } else {
            ApiError::internal(e, "Failed to create enrollment")
        }
    })?;

    Ok((axum::http::StatusCode::CREATED, Json(EnrollmentResponse::from_db(enrollment))))
}

async fn drop_enrollment(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<EnrollmentDrop>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_self_or_staff(&user, &payload.student_id)?;

    let dropped = repositories::enrollments::mark_dropped(
        state.db(),
        &payload.student_id,
        &payload.course_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to drop enrollment"))?;

    if !dropped {
        return Err(ApiError::NotFound("Enrollment not found".to_string()));
    }

    Ok(Json(MessageResponse { message: "Enrollment dropped successfully".to_string() }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::db::types::UserRole;
    use crate::test_support;

    #[tokio::test]
    async fn student_can_enroll_and_drop() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "enroll-stud@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let session = test_support::insert_session(ctx.state.db(), "2025/2026", true).await;
        let course = test_support::insert_course(
            ctx.state.db(),
            "ENG101",
            "Technical Writing",
            None,
            Some(&session.id),
        )
        .await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/enrollments",
                Some(&token),
                Some(json!({
                    "student_id": student.id,
                    "course_id": course.id,
                    "session_id": session.id
                })),
            ))
            .await
            .expect("create enrollment");

        let status = response.status();
        let created = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::CREATED, "response: {created}");
        assert_eq!(created["status"], "active");

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::DELETE,
                "/api/enrollments",
                Some(&token),
                Some(json!({
                    "student_id": student.id,
                    "course_id": course.id
                })),
            ))
            .await
            .expect("drop enrollment");
        assert_eq!(response.status(), StatusCode::OK);

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                &format!("/api/enrollments?student_id={}", student.id),
                Some(&token),
                None,
            ))
            .await
            .expect("list enrollments");

        let body = test_support::read_json(response).await;
        let items = body.as_array().expect("array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["status"], "dropped");
    }

    #[tokio::test]
    async fn duplicate_enrollment_conflicts() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "enroll-dup@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let session = test_support::insert_session(ctx.state.db(), "2025/2026 Dup", true).await;
        let course = test_support::insert_course(
            ctx.state.db(),
            "ENG102",
            "Advanced Writing",
            None,
            Some(&session.id),
        )
        .await;

        let payload = json!({
            "student_id": student.id,
            "course_id": course.id,
            "session_id": session.id
        });

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/enrollments",
                Some(&token),
                Some(payload.clone()),
            ))
            .await
            .expect("first enrollment");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/enrollments",
                Some(&token),
                Some(payload),
            ))
            .await
            .expect("second enrollment");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn student_cannot_enroll_someone_else() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "enroll-self@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let other = test_support::insert_user(
            ctx.state.db(),
            "enroll-other@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let session = test_support::insert_session(ctx.state.db(), "2025/2026 Other", true).await;
        let course = test_support::insert_course(
            ctx.state.db(),
            "ENG103",
            "Creative Writing",
            None,
            Some(&session.id),
        )
        .await;

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/enrollments",
                Some(&token),
                Some(json!({
                    "student_id": other.id,
                    "course_id": course.id,
                    "session_id": session.id
                })),
            ))
            .await
            .expect("enrollment for another student");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
