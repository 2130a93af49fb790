use sqlx::PgPool;

use crate::db::models::CourseMaterial;

const COLUMNS: &str = "\
    id, course_id, title, description, file_url, file_type, uploaded_by, \
    uploaded_at";

pub(crate) struct CreateCourseMaterial<'a> {
    pub(crate) id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) file_url: Option<&'a str>,
    pub(crate) file_type: Option<&'a str>,
    pub(crate) uploaded_by: Option<&'a str>,
    pub(crate) uploaded_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateCourseMaterial<'_>,
) -> Result<CourseMaterial, sqlx::Error> {
    sqlx::query_as::<_, CourseMaterial>(&format!(
        "INSERT INTO course_materials (
            id, course_id, title, description, file_url, file_type,
            uploaded_by, uploaded_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.course_id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.file_url)
    .bind(params.file_type)
    .bind(params.uploaded_by)
    .bind(params.uploaded_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_by_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<CourseMaterial>, sqlx::Error> {
    sqlx::query_as::<_, CourseMaterial>(&format!(
        "SELECT {COLUMNS} FROM course_materials
         WHERE course_id = $1
         ORDER BY uploaded_at DESC",
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}
