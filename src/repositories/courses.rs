use sqlx::PgPool;

use crate::db::models::Course;

pub(crate) const COLUMNS: &str = "\
    id, code, name, description, credits, department, lecturer_id, \
    session_id, is_active, created_at";

pub(crate) struct CreateCourse<'a> {
    pub(crate) id: &'a str,
    pub(crate) code: &'a str,
    pub(crate) name: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) credits: i32,
    pub(crate) department: Option<&'a str>,
    pub(crate) lecturer_id: Option<&'a str>,
    pub(crate) session_id: Option<&'a str>,
    pub(crate) is_active: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateCourse<'_>) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (
            id, code, name, description, credits, department,
            lecturer_id, session_id, is_active, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.code)
    .bind(params.name)
    .bind(params.description)
    .bind(params.credits)
    .bind(params.department)
    .bind(params.lecturer_id)
    .bind(params.session_id)
    .bind(params.is_active)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn fetch_one_by_id(pool: &PgPool, id: &str) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses WHERE id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
}

pub(crate) async fn exists_by_code(
    pool: &PgPool,
    code: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT id FROM courses WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list(
    pool: &PgPool,
    session_id: Option<&str>,
) -> Result<Vec<Course>, sqlx::Error> {
    match session_id {
        Some(session_id) => {
            sqlx::query_as::<_, Course>(&format!(
                "SELECT {COLUMNS} FROM courses WHERE session_id = $1 ORDER BY code"
            ))
            .bind(session_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses ORDER BY code"))
                .fetch_all(pool)
                .await
        }
    }
}

pub(crate) struct UpdateCourse {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) credits: Option<i32>,
    pub(crate) department: Option<String>,
    pub(crate) lecturer_id: Option<String>,
    pub(crate) session_id: Option<String>,
    pub(crate) is_active: Option<bool>,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateCourse,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE courses SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            credits = COALESCE($3, credits),
            department = COALESCE($4, department),
            lecturer_id = COALESCE($5, lecturer_id),
            session_id = COALESCE($6, session_id),
            is_active = COALESCE($7, is_active)
         WHERE id = $8",
    )
    .bind(params.name)
    .bind(params.description)
    .bind(params.credits)
    .bind(params.department)
    .bind(params.lecturer_id)
    .bind(params.session_id)
    .bind(params.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
