use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseCreate {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub(crate) code: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default = "default_credits")]
    #[validate(range(min = 0, message = "credits must be non-negative"))]
    pub(crate) credits: i32,
    #[serde(default)]
    pub(crate) department: Option<String>,
    #[serde(default)]
    #[serde(alias = "lecturerId")]
    pub(crate) lecturer_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "sessionId")]
    pub(crate) session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseUpdate {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) credits: Option<i32>,
    #[serde(default)]
    pub(crate) department: Option<String>,
    #[serde(default)]
    #[serde(alias = "lecturerId")]
    pub(crate) lecturer_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "sessionId")]
    pub(crate) session_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
    pub(crate) id: String,
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) credits: i32,
    pub(crate) department: Option<String>,
    pub(crate) lecturer_id: Option<String>,
    pub(crate) session_id: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl CourseResponse {
    pub(crate) fn from_db(course: crate::db::models::Course) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
            description: course.description,
            credits: course.credits,
            department: course.department,
            lecturer_id: course.lecturer_id,
            session_id: course.session_id,
            is_active: course.is_active,
            created_at: format_primitive(course.created_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseMaterialCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    #[serde(alias = "fileUrl")]
    pub(crate) file_url: Option<String>,
    #[serde(default)]
    #[serde(alias = "fileType")]
    pub(crate) file_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseMaterialResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) file_url: Option<String>,
    pub(crate) file_type: Option<String>,
    pub(crate) uploaded_by: Option<String>,
    pub(crate) uploaded_at: String,
}

impl CourseMaterialResponse {
    pub(crate) fn from_db(material: crate::db::models::CourseMaterial) -> Self {
        Self {
            id: material.id,
            course_id: material.course_id,
            title: material.title,
            description: material.description,
            file_url: material.file_url,
            file_type: material.file_type,
            uploaded_by: material.uploaded_by,
            uploaded_at: format_primitive(material.uploaded_at),
        }
    }
}

fn default_credits() -> i32 {
    3
}
