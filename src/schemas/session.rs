use serde::{Deserialize, Serialize};
use time::Date;
use validator::Validate;

use crate::core::time::format_primitive;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AcademicSessionCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[serde(alias = "startDate")]
    pub(crate) start_date: Date,
    #[serde(alias = "endDate")]
    pub(crate) end_date: Date,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AcademicSessionUpdate {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    #[serde(alias = "startDate")]
    pub(crate) start_date: Option<Date>,
    #[serde(default)]
    #[serde(alias = "endDate")]
    pub(crate) end_date: Option<Date>,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AcademicSessionResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) start_date: Date,
    pub(crate) end_date: Date,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl AcademicSessionResponse {
    pub(crate) fn from_db(session: crate::db::models::AcademicSession) -> Self {
        Self {
            id: session.id,
            name: session.name,
            start_date: session.start_date,
            end_date: session.end_date,
            is_active: session.is_active,
            created_at: format_primitive(session.created_at),
        }
    }
}
