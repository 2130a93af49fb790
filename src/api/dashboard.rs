use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::dashboard::{
    DashboardMetricsResponse, GradeBucketResponse, TopCourseResponse,
};

#[derive(Debug, Deserialize)]
pub(crate) struct TopCoursesQuery {
    #[serde(default)]
    limit: Option<i64>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/grade-distribution", get(grade_distribution))
        .route("/top-courses", get(top_courses))
}

async fn metrics(
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<Json<DashboardMetricsResponse>, ApiError> {
    let counts = repositories::analytics::dashboard_counts(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch dashboard metrics"))?;

    Ok(Json(DashboardMetricsResponse {
        total_students: counts.total_students,
        total_lecturers: counts.total_lecturers,
        total_courses: counts.total_courses,
        total_enrollments: counts.total_enrollments,
    }))
}

async fn grade_distribution(
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<GradeBucketResponse>>, ApiError> {
    let buckets = repositories::analytics::grade_distribution(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch grade distribution"))?;

    Ok(Json(
        buckets
            .into_iter()
            .map(|bucket| GradeBucketResponse { grade: bucket.grade, count: bucket.count })
            .collect(),
    ))
}

async fn top_courses(
    Query(params): Query<TopCoursesQuery>,
    CurrentAdmin(_admin): CurrentAdmin,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<TopCourseResponse>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(state.settings().api().top_courses_limit)
        .clamp(1, 100);

    let standings = repositories::analytics::top_performing_courses(state.db(), limit)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch top courses"))?;

    Ok(Json(
        standings
            .into_iter()
            .map(|standing| TopCourseResponse {
                course_id: standing.id,
                code: standing.code,
                name: standing.name,
                department: standing.department,
                avg_gpa: standing.avg_grade_points,
                student_count: standing.student_count,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    use crate::db::types::UserRole;
    use crate::test_support;

    #[tokio::test]
    async fn metrics_count_roles_and_enrollments() {
        let ctx = test_support::setup_test_context().await;

        let admin = test_support::insert_user(
            ctx.state.db(),
            "dash-admin@campushub.local",
            UserRole::Admin,
            "admin-pass",
        )
        .await;
        let lecturer = test_support::insert_user(
            ctx.state.db(),
            "dash-lect@campushub.local",
            UserRole::Lecturer,
            "lecturer-pass",
        )
        .await;
        let student = test_support::insert_user(
            ctx.state.db(),
            "dash-stud@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;

        let session = test_support::insert_session(ctx.state.db(), "2025/2026 Dash", true).await;
        let course = test_support::insert_course(
            ctx.state.db(),
            "DSH101",
            "Dashboards",
            Some(&lecturer.id),
            Some(&session.id),
        )
        .await;
        test_support::insert_enrollment(ctx.state.db(), &student.id, &course.id, &session.id)
            .await;

        let token = test_support::bearer_token(&admin.id, ctx.state.settings());
        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                "/api/dashboard/metrics",
                Some(&token),
                None,
            ))
            .await
            .expect("metrics");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");
        assert_eq!(body["total_students"], 1);
        assert_eq!(body["total_lecturers"], 1);
        assert_eq!(body["total_courses"], 1);
        assert_eq!(body["total_enrollments"], 1);
    }

    #[tokio::test]
    async fn grade_distribution_groups_by_letter() {
        let ctx = test_support::setup_test_context().await;

        let admin = test_support::insert_user(
            ctx.state.db(),
            "dist-admin@campushub.local",
            UserRole::Admin,
            "admin-pass",
        )
        .await;
        let session = test_support::insert_session(ctx.state.db(), "2025/2026 Dist", true).await;
        let course = test_support::insert_course(
            ctx.state.db(),
            "DST101",
            "Distributions",
            None,
            Some(&session.id),
        )
        .await;

        for (email, scores) in [
            ("dist-a@campushub.local", (95.0, 95.0, 95.0, 95.0)),
            ("dist-b@campushub.local", (95.0, 95.0, 95.0, 90.0)),
            ("dist-f@campushub.local", (10.0, 10.0, 10.0, 10.0)),
        ] {
            let student =
                test_support::insert_user(ctx.state.db(), email, UserRole::Student, "pass-word")
                    .await;
            test_support::insert_assessment(
                ctx.state.db(),
                &student.id,
                &course.id,
                &session.id,
                scores.0,
                scores.1,
                scores.2,
                scores.3,
            )
            .await;
        }

        let token = test_support::bearer_token(&admin.id, ctx.state.settings());
        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                "/api/dashboard/grade-distribution",
                Some(&token),
                None,
            ))
            .await
            .expect("grade distribution");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");

        let buckets = body.as_array().expect("array");
        let find = |grade: &str| {
            buckets
                .iter()
                .find(|bucket| bucket["grade"] == grade)
                .map(|bucket| bucket["count"].as_i64().unwrap())
        };
        assert_eq!(find("A"), Some(2));
        assert_eq!(find("F"), Some(1));
    }

    #[tokio::test]
    async fn top_courses_rank_by_average_points() {
        let ctx = test_support::setup_test_context().await;

        let admin = test_support::insert_user(
            ctx.state.db(),
            "top-admin@campushub.local",
            UserRole::Admin,
            "admin-pass",
        )
        .await;
        let session = test_support::insert_session(ctx.state.db(), "2025/2026 Top", true).await;

        let strong = test_support::insert_course(
            ctx.state.db(),
            "TOP101",
            "Strong Course",
            None,
            Some(&session.id),
        )
        .await;
        let weak = test_support::insert_course(
            ctx.state.db(),
            "TOP102",
            "Weak Course",
            None,
            Some(&session.id),
        )
        .await;

        let ace = test_support::insert_user(
            ctx.state.db(),
            "top-ace@campushub.local",
            UserRole::Student,
            "pass-word",
        )
        .await;
        let strugg = test_support::insert_user(
            ctx.state.db(),
            "top-strugg@campushub.local",
            UserRole::Student,
            "pass-word",
        )
        .await;

        test_support::insert_assessment(
            ctx.state.db(),
            &ace.id,
            &strong.id,
            &session.id,
            95.0,
            95.0,
            95.0,
            95.0,
        )
        .await;
        test_support::insert_assessment(
            ctx.state.db(),
            &strugg.id,
            &weak.id,
            &session.id,
            50.0,
            50.0,
            50.0,
            50.0,
        )
        .await;

        let token = test_support::bearer_token(&admin.id, ctx.state.settings());
        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                "/api/dashboard/top-courses?limit=2",
                Some(&token),
                None,
            ))
            .await
            .expect("top courses");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");

        let items = body.as_array().expect("array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["code"], "TOP101");
        assert_eq!(items[0]["avg_gpa"], 4.0);
        assert_eq!(items[1]["code"], "TOP102");
        assert_eq!(items[1]["avg_gpa"], 0.0);
    }

    #[tokio::test]
    async fn dashboard_requires_admin() {
        let ctx = test_support::setup_test_context().await;

        let lecturer = test_support::insert_user(
            ctx.state.db(),
            "dash-nonadmin@campushub.local",
            UserRole::Lecturer,
            "lecturer-pass",
        )
        .await;
        let token = test_support::bearer_token(&lecturer.id, ctx.state.settings());

        for uri in
            ["/api/dashboard/metrics", "/api/dashboard/grade-distribution", "/api/dashboard/top-courses"]
        {
            let response = ctx
                .app
                .clone()
                .oneshot(test_support::json_request(Method::GET, uri, Some(&token), None))
                .await
                .expect("dashboard request");
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "uri: {uri}");
        }

        // And entirely anonymous requests are unauthorized.
        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::GET,
                "/api/dashboard/metrics",
                None,
                None,
            ))
            .await
            .expect("anonymous dashboard request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
