use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{require_roles, CurrentUser};
use crate::api::pagination::clamp_limit;
use crate::core::state::AppState;
use crate::core::time::{primitive_now_utc, to_primitive_utc};
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::news_event::{NewsEventCreate, NewsEventResponse, NewsEventUpdate};

#[derive(Debug, Deserialize)]
pub(crate) struct NewsEventListQuery {
    #[serde(default)]
    limit: Option<i64>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news_events).post(create_news_event))
        .route("/:event_id", axum::routing::put(update_news_event).delete(delete_news_event))
}

/// Published items only; this endpoint is the public landing feed and
/// deliberately takes no credentials.
async fn list_news_events(
    Query(params): Query<NewsEventListQuery>,
    state: axum::extract::State<AppState>,
) -> Result<Json<Vec<NewsEventResponse>>, ApiError> {
    let limit =
        clamp_limit(params.limit.unwrap_or(state.settings().api().default_news_limit));

    let events = repositories::news_events::list_published(state.db(), limit)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list news events"))?;

    Ok(Json(events.into_iter().map(NewsEventResponse::from_db).collect()))
}

async fn create_news_event(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<NewsEventCreate>,
) -> Result<(axum::http::StatusCode, Json<NewsEventResponse>), ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let now = primitive_now_utc();
    let event = repositories::news_events::create(
        state.db(),
        repositories::news_events::CreateNewsEvent {
            id: &Uuid::new_v4().to_string(),
            title: payload.title.trim(),
            content: payload.content.as_deref(),
            kind: payload.kind,
            author_id: Some(&user.id),
            event_date: payload.event_date.map(to_primitive_utc),
            is_published: payload.is_published,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create news event"))?;

    Ok((axum::http::StatusCode::CREATED, Json(NewsEventResponse::from_db(event))))
}

async fn update_news_event(
    axum::extract::Path(event_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<NewsEventUpdate>,
) -> Result<Json<NewsEventResponse>, ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;

    let existing = repositories::news_events::find_by_id(state.db(), &event_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch news event"))?;

    if existing.is_none() {
        return Err(ApiError::NotFound("News event not found".to_string()));
    }

    repositories::news_events::update(
        state.db(),
        &event_id,
        repositories::news_events::UpdateNewsEvent {
            title: payload.title,
            content: payload.content,
            kind: payload.kind,
            event_date: payload.event_date.map(to_primitive_utc),
            is_published: payload.is_published,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update news event"))?;

    let updated = repositories::news_events::fetch_one_by_id(state.db(), &event_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch updated news event"))?;

    Ok(Json(NewsEventResponse::from_db(updated)))
}

async fn delete_news_event(
    axum::extract::Path(event_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    require_roles(&user, &[UserRole::Lecturer])?;

    let deleted = repositories::news_events::delete(state.db(), &event_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete news event"))?;

    if !deleted {
        return Err(ApiError::NotFound("News event not found".to_string()));
    }

    Ok(axum::http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::db::types::UserRole;
    use crate::test_support;

    #[tokio::test]
    async fn public_feed_shows_only_published_items() {
        let ctx = test_support::setup_test_context().await;

        let lecturer = test_support::insert_user(
            ctx.state.db(),
            "news-lect@campushub.local",
            UserRole::Lecturer,
            "lecturer-pass",
        )
        .await;
        let token = test_support::bearer_token(&lecturer.id, ctx.state.settings());

        for (title, published) in
            [("Exam timetable released", true), ("Draft announcement", false)]
        {
            let response = ctx
                .app
                .clone()
                .oneshot(test_support::json_request(
                    Method::POST,
                    "/api/news-events",
                    Some(&token),
                    Some(json!({
                        "title": title,
                        "kind": "announcement",
                        "is_published": published
                    })),
                ))
                .await
                .expect("create news event");
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // No token: the feed is public.
        let response = ctx
            .app
            .oneshot(test_support::json_request(Method::GET, "/api/news-events", None, None))
            .await
            .expect("list news events");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {body}");
        let items = body.as_array().expect("array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Exam timetable released");
    }

    #[tokio::test]
    async fn update_and_delete_roundtrip() {
        let ctx = test_support::setup_test_context().await;

        let lecturer = test_support::insert_user(
            ctx.state.db(),
            "news-edit@campushub.local",
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
                "/api/news-events",
                Some(&token),
                Some(json!({
                    "title": "Orientation week",
                    "kind": "event",
                    "event_date": "2025-09-15T09:00:00Z"
                })),
            ))
            .await
            .expect("create news event");

        let created = test_support::read_json(response).await;
        let event_id = created["id"].as_str().expect("id").to_string();

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::PUT,
                &format!("/api/news-events/{event_id}"),
                Some(&token),
                Some(json!({"is_published": true})),
            ))
            .await
            .expect("update news event");

        let status = response.status();
        let updated = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::OK, "response: {updated}");
        assert_eq!(updated["is_published"], true);
        assert_eq!(updated["title"], "Orientation week");

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::DELETE,
                &format!("/api/news-events/{event_id}"),
                Some(&token),
                None,
            ))
            .await
            .expect("delete news event");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn student_cannot_publish_news() {
        let ctx = test_support::setup_test_context().await;

        let student = test_support::insert_user(
            ctx.state.db(),
            "news-stud@campushub.local",
            UserRole::Student,
            "student-pass",
        )
        .await;
        let token = test_support::bearer_token(&student.id, ctx.state.settings());

        let response = ctx
            .app
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/news-events",
                Some(&token),
                Some(json!({"title": "Nope", "kind": "news"})),
            ))
            .await
            .expect("create news event");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
