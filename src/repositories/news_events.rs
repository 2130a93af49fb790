use sqlx::PgPool;

use crate::db::models::NewsEvent;
use crate::db::types::NewsEventKind;

const COLUMNS: &str = "\
    id, title, content, kind, author_id, event_date, is_published, \
    created_at, updated_at";

pub(crate) struct CreateNewsEvent<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) content: Option<&'a str>,
    pub(crate) kind: NewsEventKind,
    pub(crate) author_id: Option<&'a str>,
    pub(crate) event_date: Option<time::PrimitiveDateTime>,
    pub(crate) is_published: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateNewsEvent<'_>,
) -> Result<NewsEvent, sqlx::Error> {
    sqlx::query_as::<_, NewsEvent>(&format!(
        "INSERT INTO news_events (
            id, title, content, kind, author_id, event_date, is_published,
            created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.content)
    .bind(params.kind)
    .bind(params.author_id)
    .bind(params.event_date)
    .bind(params.is_published)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<NewsEvent>, sqlx::Error> {
    sqlx::query_as::<_, NewsEvent>(&format!("SELECT {COLUMNS} FROM news_events WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_published(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<NewsEvent>, sqlx::Error> {
    sqlx::query_as::<_, NewsEvent>(&format!(
        "SELECT {COLUMNS} FROM news_events
         WHERE is_published
         ORDER BY created_at DESC
         LIMIT $1",
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub(crate) struct UpdateNewsEvent {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) kind: Option<NewsEventKind>,
    pub(crate) event_date: Option<time::PrimitiveDateTime>,
    pub(crate) is_published: Option<bool>,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateNewsEvent,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE news_events SET
            title = COALESCE($1, title),
            content = COALESCE($2, content),
            kind = COALESCE($3, kind),
            event_date = COALESCE($4, event_date),
            is_published = COALESCE($5, is_published),
            updated_at = $6
         WHERE id = $7",
    )
    .bind(params.title)
    .bind(params.content)
    .bind(params.kind)
    .bind(params.event_date)
    .bind(params.is_published)
    .bind(params.updated_at)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn fetch_one_by_id(pool: &PgPool, id: &str) -> Result<NewsEvent, sqlx::Error> {
    sqlx::query_as::<_, NewsEvent>(&format!("SELECT {COLUMNS} FROM news_events WHERE id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM news_events WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
