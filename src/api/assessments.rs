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
use crate::schemas::assessment::{AssessmentCreate, AssessmentResponse, AssessmentUpdate};
use crate::services::grading::{self, ComponentScores};

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentListQuery {
    #[serde(default)]
    #[serde(alias = "studentId")]
    student_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "courseId")]
    course_id: Option<String>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assessments).post(create_assessment))
        .route("/:assessment_id", axum::routing::put(update_assessment))
}

async fn list_assessments(
    Query(params): Query<AssessmentListQuery>,
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<AssessmentResponse>>, ApiError> {
    let assessments = repositories::assessments::list(
        state.db(),
        params.student_id.as_deref(),
        params.course_id.as_deref(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to list assessments"))?;

    Ok(Json(assessments.into_iter().map(AssessmentResponse::from_db).collect()))
}

async fn create_assessment(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<AssessmentCreate>,
) -> Result<(axum::http::StatusCode, Json<AssessmentResponse>), ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let course = repositories::courses::find_by_id(state.db(), &payload.course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;

    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let outcome = grading::grade_assessment(ComponentScores {
        attendance: payload.attendance,
        assignment: payload.assignment,
        mid_exam: payload.mid_exam,
        final_exam: payload.final_exam,
    });

    let now = primitive_now_utc();
    let assessment = repositories::assessments::create(
        state.db(),
        repositories::assessments::CreateAssessment {
            id: &Uuid::new_v4().to_string(),
            student_id: &payload.student_id,
            course_id: &payload.course_id,
            session_id: &payload.session_id,
            attendance: payload.attendance,
            assignment: payload.assignment,
            mid_exam: payload.mid_exam,
            final_exam: payload.final_exam,
            total_score: outcome.total_score,
            grade: outcome.grade,
            grade_comment: outcome.comment,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create assessment"))?;

    Ok((axum::http::StatusCode::CREATED, Json(AssessmentResponse::from_db(assessment))))
}

async fn update_assessment(
    axum::extract::Path(assessment_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<AssessmentUpdate>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let existing = repositories::assessments::find_by_id(state.db(), &assessment_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch assessment"))?;

    let Some(existing) = existing else {
        return Err(ApiError::NotFound("Assessment not found".to_string()));
    };

    // Merge the patch with the stored components, then re-derive the
    // total/grade/comment from the merged row.
    let attendance = payload.attendance.or(existing.attendance);
    let assignment = payload.assignment.or(existing.assignment);
    let mid_exam = payload.mid_exam.or(existing.mid_exam);
    let final_exam = payload.final_exam.or(existing.final_exam);

    let outcome = grading::grade_assessment(ComponentScores {
        attendance,
        assignment,
        mid_exam,
        final_exam,
    });

    let updated = repositories::assessments::update(
        state.db(),
        &assessment_id,
        repositories::assessments::UpdateAssessment {
            attendance,
            assignment,
            mid_exam,
            final_exam,
            total_score: outcome.total_score,
            grade: outcome.grade.to_string(),
            grade_comment: outcome.comment.to_string(),
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update assessment"))?;

    Ok(Json(AssessmentResponse::from_db(updated)))
}
