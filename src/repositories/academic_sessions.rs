use sqlx::PgPool;

use crate::db::models::AcademicSession;

const COLUMNS: &str = "id, name, start_date, end_date, is_active, created_at";

pub(crate) struct CreateAcademicSession<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) start_date: time::Date,
    pub(crate) end_date: time::Date,
    pub(crate) is_active: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAcademicSession<'_>,
) -> Result<AcademicSession, sqlx::Error> {
    sqlx::query_as::<_, AcademicSession>(&format!(
        "INSERT INTO academic_sessions (id, name, start_date, end_date, is_active, created_at)
         VALUES ($1,$2,$3,$4,$5,$6)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.name)
    .bind(params.start_date)
    .bind(params.end_date)
    .bind(params.is_active)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<AcademicSession>, sqlx::Error> {
    sqlx::query_as::<_, AcademicSession>(&format!(
        "SELECT {COLUMNS} FROM academic_sessions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_active(pool: &PgPool) -> Result<Vec<AcademicSession>, sqlx::Error> {
    sqlx::query_as::<_, AcademicSession>(&format!(
        "SELECT {COLUMNS} FROM academic_sessions WHERE is_active ORDER BY start_date DESC"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) struct UpdateAcademicSession {
    pub(crate) name: Option<String>,
    pub(crate) start_date: Option<time::Date>,
    pub(crate) end_date: Option<time::Date>,
    pub(crate) is_active: Option<bool>,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateAcademicSession,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE academic_sessions SET
            name = COALESCE($1, name),
            start_date = COALESCE($2, start_date),
            end_date = COALESCE($3, end_date),
            is_active = COALESCE($4, is_active)
         WHERE id = $5",
    )
    .bind(params.name)
    .bind(params.start_date)
    .bind(params.end_date)
    .bind(params.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn fetch_one_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<AcademicSession, sqlx::Error> {
    sqlx::query_as::<_, AcademicSession>(&format!(
        "SELECT {COLUMNS} FROM academic_sessions WHERE id = $1"
    ))
    .bind(id)
    .fetch_one(pool)
    .await
}
