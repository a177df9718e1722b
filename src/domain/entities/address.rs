use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub title: String,
    pub street: String,
    pub neighborhood: String,
    pub building_info: Option<String>,
    pub district: String,
    pub city: String,
    pub full_address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub working_hours: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAddressRequest {
    #[serde(default = "default_title")]
    pub title: String,
    #[validate(length(min = 1, message = "Sokak bilgisi gerekli"))]
    pub street: String,
    #[validate(length(min = 1, message = "Mahalle bilgisi gerekli"))]
    pub neighborhood: String,
    pub building_info: Option<String>,
    #[validate(length(min = 1, message = "İlçe bilgisi gerekli"))]
    pub district: String,
    #[validate(length(min = 1, message = "Şehir bilgisi gerekli"))]
    pub city: String,
    #[validate(length(min = 1, message = "Açık adres gerekli"))]
    pub full_address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub working_hours: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_title() -> String {
    "Firma Adresi".to_string()
}

fn default_true() -> bool {
    true
}
