use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::entities::address::Address;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub order: i32,
}

/// The company profile. Stored as a single keyed row; there is exactly one.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(skip_serializing)]
    pub id: i16,
    pub company_name: String,
    pub phone: Option<String>,
    pub mobile1: Option<String>,
    pub mobile2: Option<String>,
    pub email: Option<String>,
    pub working_hours: Option<String>,
    pub about: Option<String>,
    pub team_members: Json<Vec<TeamMember>>,
    pub address_id: Option<Uuid>,
    pub is_active: bool,
    pub founded_year: Option<i32>,
    pub total_projects: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Company plus the referenced address, as the public endpoint returns it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    #[serde(flatten)]
    pub company: Company,
    pub address: Option<Address>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCompanyRequest {
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub mobile1: Option<String>,
    pub mobile2: Option<String>,
    pub email: Option<String>,
    pub working_hours: Option<String>,
    pub about: Option<String>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    pub address_id: Option<Uuid>,
    pub founded_year: Option<i32>,
    pub total_projects: Option<i32>,
}
