use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::types::NewsEventKind;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct NewsEventCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) content: Option<String>,
    pub(crate) kind: NewsEventKind,
    #[serde(default)]
    #[serde(alias = "eventDate", deserialize_with = "deserialize_optional_rfc3339")]
    pub(crate) event_date: Option<OffsetDateTime>,
    #[serde(default)]
    #[serde(alias = "isPublished")]
    pub(crate) is_published: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsEventUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    pub(crate) kind: Option<NewsEventKind>,
    #[serde(default)]
    #[serde(alias = "eventDate", deserialize_with = "deserialize_optional_rfc3339")]
    pub(crate) event_date: Option<OffsetDateTime>,
    #[serde(default)]
    #[serde(alias = "isPublished")]
    pub(crate) is_published: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewsEventResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) content: Option<String>,
    pub(crate) kind: NewsEventKind,
    pub(crate) author_id: Option<String>,
    pub(crate) event_date: Option<String>,
    pub(crate) is_published: bool,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl NewsEventResponse {
    pub(crate) fn from_db(event: crate::db::models::NewsEvent) -> Self {
        Self {
            id: event.id,
            title: event.title,
            content: event.content,
            kind: event.kind,
            author_id: event.author_id,
            event_date: event.event_date.map(format_primitive),
            is_published: event.is_published,
            created_at: format_primitive(event.created_at),
            updated_at: format_primitive(event.updated_at),
        }
    }
}

fn deserialize_optional_rfc3339<'de, D>(
    deserializer: D,
) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value {
        Some(raw) => OffsetDateTime::parse(&raw, &Rfc3339)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid RFC3339 timestamp: {raw}"))),
        None => Ok(None),
    }
}
