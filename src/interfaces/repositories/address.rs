use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::address::{Address, NewAddressRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxAddressRepo,
};

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn list(&self, active_only: bool) -> Result<Vec<Address>, AppError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Address>, AppError>;
    async fn create(&self, data: &NewAddressRequest) -> Result<Address, AppError>;
    async fn update(&self, id: &Uuid, data: &NewAddressRequest)
        -> Result<Option<Address>, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxAddressRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxAddressRepo { pool }
    }
}

#[async_trait]
impl AddressRepository for SqlxAddressRepo {
    async fn list(&self, active_only: bool) -> Result<Vec<Address>, AppError> {
        let addresses = sqlx::query_as::<_, Address>(
            r#"
            SELECT * FROM addresses
            WHERE ($1::boolean IS FALSE OR is_active = TRUE)
            ORDER BY created_at DESC
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Address>, AppError> {
        let address = sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(address)
    }

    async fn create(&self, data: &NewAddressRequest) -> Result<Address, AppError> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (
                title, street, neighborhood, building_info, district,
                city, full_address, phone, email, working_hours, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.street)
        .bind(&data.neighborhood)
        .bind(&data.building_info)
        .bind(&data.district)
        .bind(&data.city)
        .bind(&data.full_address)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.working_hours)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(address)
    }

    async fn update(
        &self,
        id: &Uuid,
        data: &NewAddressRequest,
    ) -> Result<Option<Address>, AppError> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            UPDATE addresses SET
                title = $1,
                street = $2,
                neighborhood = $3,
                building_info = $4,
                district = $5,
                city = $6,
                full_address = $7,
                phone = $8,
                email = $9,
                working_hours = $10,
                is_active = $11,
                updated_at = NOW()
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.street)
        .bind(&data.neighborhood)
        .bind(&data.building_info)
        .bind(&data.district)
        .bind(&data.city)
        .bind(&data.full_address)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.working_hours)
        .bind(data.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23503") {
                        return AppError::Conflict(
                            "Adres firma kaydında kullanılıyor".into(),
                        );
                    }
                }
                AppError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
