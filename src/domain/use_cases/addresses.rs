use uuid::Uuid;
use validator::Validate;

use crate::entities::address::{Address, NewAddressRequest};
use crate::errors::AppError;
use crate::repositories::address::AddressRepository;

pub struct AddressHandler<A>
where
    A: AddressRepository,
{
    pub address_repo: A,
}

impl<A> AddressHandler<A>
where
    A: AddressRepository,
{
    pub fn new(address_repo: A) -> Self {
        AddressHandler { address_repo }
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<Address>, AppError> {
        self.address_repo.list(active_only).await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Address, AppError> {
        self.address_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Adres bulunamadı".into()))
    }

    pub async fn create(&self, request: NewAddressRequest) -> Result<Address, AppError> {
        request.validate()?;
        let address = self.address_repo.create(&request).await?;
        tracing::info!(address_id = %address.id, "address created");
        Ok(address)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        request: NewAddressRequest,
    ) -> Result<Address, AppError> {
        request.validate()?;
        self.address_repo
            .update(id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound("Adres bulunamadı".into()))
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        if !self.address_repo.delete(id).await? {
            return Err(AppError::NotFound("Adres bulunamadı".into()));
        }
        Ok(())
    }
}
