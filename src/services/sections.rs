use crate::{
    entities::section,
    errors::ServiceError,
    reports::ProductsPerSection,
    repositories::SectionRepository,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

const UNIQUE_KEY: &str = "section_number";

/// Partial update. Temperatures may legitimately be zero or negative, so
/// only an absent field leaves the stored value in place.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct SectionPatch {
    #[validate(range(min = 1))]
    pub section_number: Option<i32>,
    pub current_temperature: Option<i32>,
    pub minimum_temperature: Option<i32>,
    #[validate(range(min = 0))]
    pub current_capacity: Option<i32>,
    #[validate(range(min = 0))]
    pub minimum_capacity: Option<i32>,
    #[validate(range(min = 0))]
    pub maximum_capacity: Option<i32>,
    #[validate(range(min = 1))]
    pub warehouse_id: Option<i32>,
    #[validate(range(min = 1))]
    pub product_type_id: Option<i32>,
}

impl SectionPatch {
    fn apply_to(self, section: &mut section::Model) {
        if let Some(value) = self.section_number {
            section.section_number = value;
        }
        if let Some(value) = self.current_temperature {
            section.current_temperature = value;
        }
        if let Some(value) = self.minimum_temperature {
            section.minimum_temperature = value;
        }
        if let Some(value) = self.current_capacity {
            section.current_capacity = value;
        }
        if let Some(value) = self.minimum_capacity {
            section.minimum_capacity = value;
        }
        if let Some(value) = self.maximum_capacity {
            section.maximum_capacity = value;
        }
        if let Some(value) = self.warehouse_id {
            section.warehouse_id = value;
        }
        if let Some(value) = self.product_type_id {
            section.product_type_id = value;
        }
    }
}

#[derive(Clone)]
pub struct SectionService {
    repository: Arc<dyn SectionRepository>,
}

impl SectionService {
    pub fn new(repository: Arc<dyn SectionRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<section::Model>, ServiceError> {
        self.repository.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<section::Model, ServiceError> {
        self.repository.get(id).await
    }

    /// Unknown warehouse or product type surfaces as a foreign-key conflict.
    #[instrument(skip(self))]
    pub async fn create(&self, mut section: section::Model) -> Result<section::Model, ServiceError> {
        if self.repository.exists(section.section_number).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        section.id = self
            .repository
            .save(section.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(section_id = section.id, "Section created");
        Ok(section)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        patch: SectionPatch,
    ) -> Result<section::Model, ServiceError> {
        let stored = self.repository.get(id).await?;

        if let Some(number) = patch.section_number {
            if number != stored.section_number && self.repository.exists(number).await? {
                return Err(ServiceError::already_exists(UNIQUE_KEY));
            }
        }

        let mut section = stored.clone();
        patch.apply_to(&mut section);
        if section == stored {
            return Ok(stored);
        }

        self.repository
            .update(section.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(section_id = id, "Section updated");
        Ok(section)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| e.with_dependents("section"))?;
        info!(section_id = id, "Section deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn report_products(
        &self,
        section_id: Option<i32>,
    ) -> Result<Vec<ProductsPerSection>, ServiceError> {
        self.repository.report_products(section_id).await
    }
}
