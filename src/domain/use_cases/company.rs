use crate::entities::company::{CompanyView, UpsertCompanyRequest};
use crate::errors::AppError;
use crate::repositories::{address::AddressRepository, company::CompanyRepository};

pub struct CompanyHandler<C, A>
where
    C: CompanyRepository,
    A: AddressRepository,
{
    pub company_repo: C,
    pub address_repo: A,
}

impl<C, A> CompanyHandler<C, A>
where
    C: CompanyRepository,
    A: AddressRepository,
{
    pub fn new(company_repo: C, address_repo: A) -> Self {
        CompanyHandler {
            company_repo,
            address_repo,
        }
    }

    /// Returns the company profile with its address embedded.
    pub async fn get(&self) -> Result<CompanyView, AppError> {
        let company = self
            .company_repo
            .get()
            .await?
            .ok_or_else(|| AppError::NotFound("Firma bilgisi bulunamadı".into()))?;

        let address = match company.address_id {
            Some(id) => self.address_repo.find_by_id(&id).await?,
            None => None,
        };

        Ok(CompanyView { company, address })
    }

    pub async fn upsert(&self, request: UpsertCompanyRequest) -> Result<CompanyView, AppError> {
        if let Some(address_id) = request.address_id {
            if self.address_repo.find_by_id(&address_id).await?.is_none() {
                return Err(AppError::Validation("Adres bulunamadı".into()));
            }
        }

        let company = self.company_repo.upsert(&request).await?;

        let address = match company.address_id {
            Some(id) => self.address_repo.find_by_id(&id).await?,
            None => None,
        };

        tracing::info!("company profile saved");
        Ok(CompanyView { company, address })
    }
}
