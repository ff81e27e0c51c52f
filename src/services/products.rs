use crate::{
    entities::product,
    errors::ServiceError,
    reports::RecordsPerProduct,
    repositories::ProductRepository,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

const UNIQUE_KEY: &str = "product_code";

/// Partial update; every numeric field is optional so zero can be stored.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct ProductPatch {
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub expiration_rate: Option<f64>,
    pub freezing_rate: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub net_weight: Option<f64>,
    #[validate(length(min = 1))]
    pub product_code: Option<String>,
    pub recommended_freezing_temperature: Option<f64>,
    #[validate(range(min = 1))]
    pub product_type_id: Option<i32>,
    #[validate(range(min = 1))]
    pub seller_id: Option<i32>,
}

impl ProductPatch {
    fn apply_to(self, product: &mut product::Model) {
        if let Some(value) = self.description {
            product.description = value;
        }
        if let Some(value) = self.expiration_rate {
            product.expiration_rate = value;
        }
        if let Some(value) = self.freezing_rate {
            product.freezing_rate = value;
        }
        if let Some(value) = self.height {
            product.height = value;
        }
        if let Some(value) = self.length {
            product.length = value;
        }
        if let Some(value) = self.width {
            product.width = value;
        }
        if let Some(value) = self.net_weight {
            product.net_weight = value;
        }
        if let Some(value) = self.product_code {
            product.product_code = value;
        }
        if let Some(value) = self.recommended_freezing_temperature {
            product.recommended_freezing_temperature = value;
        }
        if let Some(value) = self.product_type_id {
            product.product_type_id = value;
        }
        if let Some(value) = self.seller_id {
            product.seller_id = Some(value);
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        self.repository.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<product::Model, ServiceError> {
        self.repository.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, mut product: product::Model) -> Result<product::Model, ServiceError> {
        if self.repository.exists(&product.product_code).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        product.id = self
            .repository
            .save(product.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(product_id = product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        patch: ProductPatch,
    ) -> Result<product::Model, ServiceError> {
        let stored = self.repository.get(id).await?;

        if let Some(code) = patch.product_code.as_deref() {
            if code != stored.product_code && self.repository.exists(code).await? {
                return Err(ServiceError::already_exists(UNIQUE_KEY));
            }
        }

        let mut product = stored.clone();
        patch.apply_to(&mut product);
        if product == stored {
            return Ok(stored);
        }

        self.repository
            .update(product.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(product_id = id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| e.with_dependents("product"))?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn report_records(
        &self,
        product_id: Option<i32>,
    ) -> Result<Vec<RecordsPerProduct>, ServiceError> {
        self.repository.report_records(product_id).await
    }
}
