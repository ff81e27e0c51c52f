use crate::{entities::seller, errors::ServiceError, repositories::SellerRepository};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

const UNIQUE_KEY: &str = "cid";
const MISSING_LOCALITY: &str = "locality does not exist";

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct SellerPatch {
    #[validate(range(min = 1))]
    pub cid: Option<i32>,
    #[validate(length(min = 1))]
    pub company_name: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub telephone: Option<String>,
    #[validate(length(min = 1))]
    pub locality_id: Option<String>,
}

impl SellerPatch {
    fn apply_to(self, seller: &mut seller::Model) {
        if let Some(cid) = self.cid {
            seller.cid = cid;
        }
        if let Some(company_name) = self.company_name {
            seller.company_name = company_name;
        }
        if let Some(address) = self.address {
            seller.address = address;
        }
        if let Some(telephone) = self.telephone {
            seller.telephone = telephone;
        }
        if let Some(locality_id) = self.locality_id {
            seller.locality_id = locality_id;
        }
    }
}

#[derive(Clone)]
pub struct SellerService {
    repository: Arc<dyn SellerRepository>,
}

impl SellerService {
    pub fn new(repository: Arc<dyn SellerRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<seller::Model>, ServiceError> {
        self.repository.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<seller::Model, ServiceError> {
        self.repository.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, mut seller: seller::Model) -> Result<seller::Model, ServiceError> {
        if self.repository.exists(seller.cid).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        seller.id = self
            .repository
            .save(seller.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY).with_referent(MISSING_LOCALITY))?;

        info!(seller_id = seller.id, "Seller created");
        Ok(seller)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, patch: SellerPatch) -> Result<seller::Model, ServiceError> {
        let stored = self.repository.get(id).await?;

        if let Some(cid) = patch.cid {
            if cid != stored.cid && self.repository.exists(cid).await? {
                return Err(ServiceError::already_exists(UNIQUE_KEY));
            }
        }

        let mut seller = stored.clone();
        patch.apply_to(&mut seller);
        if seller == stored {
            return Ok(stored);
        }

        self.repository
            .update(seller.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY).with_referent(MISSING_LOCALITY))?;

        info!(seller_id = id, "Seller updated");
        Ok(seller)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| e.with_dependents("seller"))?;
        info!(seller_id = id, "Seller deleted");
        Ok(())
    }
}
