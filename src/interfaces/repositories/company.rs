use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use crate::{
    entities::company::{Company, UpsertCompanyRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxCompanyRepo,
};

const DEFAULT_COMPANY_NAME: &str = "Kahramanoğulları İnşaat";

/// The company profile lives in a single keyed row (id = 1); reads and
/// writes always address that row.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn get(&self) -> Result<Option<Company>, AppError>;
    async fn upsert(&self, data: &UpsertCompanyRequest) -> Result<Company, AppError>;
}

impl SqlxCompanyRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCompanyRepo { pool }
    }
}

#[async_trait]
impl CompanyRepository for SqlxCompanyRepo {
    async fn get(&self) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM company WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    async fn upsert(&self, data: &UpsertCompanyRequest) -> Result<Company, AppError> {
        let company_name = data
            .company_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string());

        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO company (
                id, company_name, phone, mobile1, mobile2, email,
                working_hours, about, team_members, address_id,
                founded_year, total_projects
            )
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                phone = EXCLUDED.phone,
                mobile1 = EXCLUDED.mobile1,
                mobile2 = EXCLUDED.mobile2,
                email = EXCLUDED.email,
                working_hours = EXCLUDED.working_hours,
                about = EXCLUDED.about,
                team_members = EXCLUDED.team_members,
                address_id = EXCLUDED.address_id,
                founded_year = EXCLUDED.founded_year,
                total_projects = EXCLUDED.total_projects,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(company_name)
        .bind(&data.phone)
        .bind(&data.mobile1)
        .bind(&data.mobile2)
        .bind(&data.email)
        .bind(&data.working_hours)
        .bind(&data.about)
        .bind(Json(&data.team_members))
        .bind(data.address_id)
        .bind(data.founded_year)
        .bind(data.total_projects)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23503") {
                    return AppError::Validation("Adres bulunamadı".into());
                }
            }
            AppError::from(e)
        })?;

        Ok(company)
    }
}
