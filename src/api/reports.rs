use axum::{routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{require_self_or_staff, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::{format_primitive, primitive_now_utc};
use crate::db::models::User;
use crate::repositories;
use crate::schemas::assessment::AssessmentResponse;
use crate::schemas::enrollment::EnrollmentResponse;
use crate::schemas::report::{GradeReportResponse, RegistrationSlipResponse};
use crate::schemas::user::UserResponse;
use crate::services::grading;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/:student_id/grade-report", get(grade_report))
        .route("/:student_id/registration-slip", get(registration_slip))
}

async fn grade_report(
    axum::extract::Path(student_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<GradeReportResponse>, ApiError> {
    require_self_or_staff(&user, &student_id)?;

    let student = fetch_student(&state, &student_id).await?;

    let assessments = repositories::assessments::list(state.db(), Some(&student_id), None)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list assessments"))?;

    let gpa = grading::grade_point_average(
        assessments.iter().map(|assessment| assessment.grade.as_str()),
    );

    Ok(Json(GradeReportResponse {
        student: UserResponse::from_db(student),
        assessments: assessments.into_iter().map(AssessmentResponse::from_db).collect(),
        gpa,
        generated_at: format_primitive(primitive_now_utc()),
    }))
}

async fn registration_slip(
    axum::extract::Path(student_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<RegistrationSlipResponse>, ApiError> {
    require_self_or_staff(&user, &student_id)?;

    let student = fetch_student(&state, &student_id).await?;

    let enrollments = repositories::enrollments::list(state.db(), Some(&student_id), None)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list enrollments"))?;

    Ok(Json(RegistrationSlipResponse {
        student: UserResponse::from_db(student),
        enrollments: enrollments.into_iter().map(EnrollmentResponse::from_db).collect(),
        generated_at: format_primitive(primitive_now_utc()),
    }))
}

async fn fetch_student(state: &AppState, student_id: &str) -> Result<User, ApiError> {
    repositories::users::find_by_id(state.db(), student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch student"))?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    use crate::db::types::UserRole;
    use crate::test_support;

    #[tokio::test]
    async fn grade_report_averages_letter_grades() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "report-stud@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let session = test_support::insert_session(ctx.state.db(), "2025/2026 Rep", true).await;
        let course_a = test_support::insert_course(
            ctx.state.db(),
            "REP101",
            "Report A",
            None,
            Some(&session.id),
        )
        .await;
        let course_b = test_support::insert_course(
            ctx.state.db(),
            "REP102",
            "Report B",
            None,
            Some(&session.id),
        )
        .await;

        // One A (95 total) and one F (10 total): GPA (4.0 + 0.0) / 2.
        test_support::insert_assessment(
            ctx.state.db(),
            &student.id,
            &course_a.id,
            &session.id,
            95.0,
            95.0,
            95.0,
            95.0,
        )
        .await;
        test_support::insert_assessment(
            ctx.state.db(),
            &student.id,
            &course_b.id,
            &session.id,
            10.0,
            10.0,
            10.0,
            10.0,
        )
        .await;

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                &format!("/api/students/{}/grade-report", student.id),
                Some(&token),
                None,
            ))
            .await
            .expect("grade report");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");
        assert_eq!(body["gpa"], 2.0);
        assert_eq!(body["assessments"].as_array().expect("array").len(), 2);
        assert_eq!(body["student"]["id"], student.id.as_str());
        assert!(body["generated_at"].is_string());
    }

    #[tokio::test]
    async fn grade_report_of_unassessed_student_is_zero() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "report-empty@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                &format!("/api/students/{}/grade-report", student.id),
                Some(&token),
                None,
            ))
            .await
            .expect("grade report");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");
        assert_eq!(body["gpa"], 0.0);
        assert_eq!(body["assessments"].as_array().expect("array").len(), 0);
    }

    #[tokio::test]
    async fn student_cannot_read_anothers_report() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "report-peek@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let other = test_support::insert_user(
            ctx.state.db(),
            "report-target@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                &format!("/api/students/{}/grade-report", other.id),
                Some(&token),
                None,
            ))
            .await
            .expect("grade report");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn lecturer_can_read_registration_slip() {
        let ctx = test_support::setup_test_context().await;

        let lecturer = test_support::insert_user(
            ctx.state.db(),
            "slip-lect@campushub.local",
            UserRole::Lecturer,
            "lecturer-pass",
        )
        .await;
        let student = test_support::insert_user(
            ctx.state.db(),
            "slip-stud@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;

        let session = test_support::insert_session(ctx.state.db(), "2025/2026 Slip", true).await;
        let course = test_support::insert_course(
            ctx.state.db(),
            "SLP101",
            "Slips",
            Some(&lecturer.id),
            Some(&session.id),
        )
        .await;
        test_support::insert_enrollment(ctx.state.db(), &student.id, &course.id, &session.id)
            .await;

        let token = test_support::bearer_token(&lecturer.id, ctx.state.settings());
        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                &format!("/api/students/{}/registration-slip", student.id),
                Some(&token),
                None,
            ))
            .await
            .expect("registration slip");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");
        assert_eq!(body["enrollments"].as_array().expect("array").len(), 1);
    }
}
