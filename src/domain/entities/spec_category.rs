use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A technical-specification ("teknik şartname") category: a titled block
/// of raw HTML content rendered on the public site.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SpecCategory {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub is_active: bool,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub last_updated: DateTime<Utc>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSpecCategoryRequest {
    #[validate(length(min = 1, message = "Başlık zorunludur"))]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub updated_by: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecCategoryRequest {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
    pub updated_by: Option<String>,
    pub is_active: Option<bool>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}
