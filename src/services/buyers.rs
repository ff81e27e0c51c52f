use crate::{
    entities::buyer,
    errors::ServiceError,
    reports::PurchaseOrdersPerBuyer,
    repositories::BuyerRepository,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

const UNIQUE_KEY: &str = "card_number_id";

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct BuyerPatch {
    #[validate(length(min = 1))]
    pub card_number_id: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
}

impl BuyerPatch {
    fn apply_to(self, buyer: &mut buyer::Model) {
        if let Some(card_number_id) = self.card_number_id {
            buyer.card_number_id = card_number_id;
        }
        if let Some(first_name) = self.first_name {
            buyer.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            buyer.last_name = last_name;
        }
    }
}

#[derive(Clone)]
pub struct BuyerService {
    repository: Arc<dyn BuyerRepository>,
}

impl BuyerService {
    pub fn new(repository: Arc<dyn BuyerRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<buyer::Model>, ServiceError> {
        self.repository.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<buyer::Model, ServiceError> {
        self.repository.get(id).await
    }

    /// Creates a buyer; `buyer.id` is ignored and replaced by the assigned id.
    #[instrument(skip(self))]
    pub async fn create(&self, mut buyer: buyer::Model) -> Result<buyer::Model, ServiceError> {
        if self.repository.exists(&buyer.card_number_id).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        buyer.id = self
            .repository
            .save(buyer.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(buyer_id = buyer.id, "Buyer created");
        Ok(buyer)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, patch: BuyerPatch) -> Result<buyer::Model, ServiceError> {
        let stored = self.repository.get(id).await?;

        if let Some(card_number_id) = patch.card_number_id.as_deref() {
            if card_number_id != stored.card_number_id
                && self.repository.exists(card_number_id).await?
            {
                return Err(ServiceError::already_exists(UNIQUE_KEY));
            }
        }

        let mut buyer = stored.clone();
        patch.apply_to(&mut buyer);
        if buyer == stored {
            return Ok(stored);
        }

        self.repository
            .update(buyer.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(buyer_id = id, "Buyer updated");
        Ok(buyer)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| e.with_dependents("buyer"))?;
        info!(buyer_id = id, "Buyer deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn report_purchase_orders(
        &self,
        buyer_id: Option<i32>,
    ) -> Result<Vec<PurchaseOrdersPerBuyer>, ServiceError> {
        self.repository.report_purchase_orders(buyer_id).await
    }
}
