use crate::{entities::warehouse, errors::ServiceError, repositories::WarehouseRepository};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

const UNIQUE_KEY: &str = "warehouse_code";

/// Partial update. Every field is optional so that a stored zero and an
/// omitted field stay distinguishable.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct WarehousePatch {
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub telephone: Option<String>,
    #[validate(length(min = 1))]
    pub warehouse_code: Option<String>,
    pub minimum_capacity: Option<i32>,
    pub minimum_temperature: Option<i32>,
}

impl WarehousePatch {
    fn apply_to(self, warehouse: &mut warehouse::Model) {
        if let Some(address) = self.address {
            warehouse.address = address;
        }
        if let Some(telephone) = self.telephone {
            warehouse.telephone = telephone;
        }
        if let Some(warehouse_code) = self.warehouse_code {
            warehouse.warehouse_code = warehouse_code;
        }
        if let Some(minimum_capacity) = self.minimum_capacity {
            warehouse.minimum_capacity = minimum_capacity;
        }
        if let Some(minimum_temperature) = self.minimum_temperature {
            warehouse.minimum_temperature = minimum_temperature;
        }
    }
}

#[derive(Clone)]
pub struct WarehouseService {
    repository: Arc<dyn WarehouseRepository>,
}

impl WarehouseService {
    pub fn new(repository: Arc<dyn WarehouseRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<warehouse::Model>, ServiceError> {
        self.repository.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<warehouse::Model, ServiceError> {
        self.repository.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        mut warehouse: warehouse::Model,
    ) -> Result<warehouse::Model, ServiceError> {
        if self.repository.exists(&warehouse.warehouse_code).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        warehouse.id = self
            .repository
            .save(warehouse.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(warehouse_id = warehouse.id, "Warehouse created");
        Ok(warehouse)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        patch: WarehousePatch,
    ) -> Result<warehouse::Model, ServiceError> {
        let stored = self.repository.get(id).await?;

        if let Some(code) = patch.warehouse_code.as_deref() {
            if code != stored.warehouse_code && self.repository.exists(code).await? {
                return Err(ServiceError::already_exists(UNIQUE_KEY));
            }
        }

        let mut warehouse = stored.clone();
        patch.apply_to(&mut warehouse);
        if warehouse == stored {
            return Ok(stored);
        }

        self.repository
            .update(warehouse.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(warehouse_id = id, "Warehouse updated");
        Ok(warehouse)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| e.with_dependents("warehouse"))?;
        info!(warehouse_id = id, "Warehouse deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::warehouse_repository::MockWarehouseRepository;

    fn warehouse(id: i32) -> warehouse::Model {
        warehouse::Model {
            id,
            address: "Ruta 9".into(),
            telephone: "555-7777".into(),
            warehouse_code: "DHM".into(),
            minimum_capacity: 10,
            minimum_temperature: -3,
        }
    }

    #[tokio::test]
    async fn explicit_zero_overwrites_but_absence_does_not() {
        let mut repo = MockWarehouseRepository::new();
        repo.expect_get().returning(|id| Ok(warehouse(id)));
        repo.expect_update().times(1).returning(|_| Ok(()));

        let service = WarehouseService::new(Arc::new(repo));
        let patch = WarehousePatch {
            minimum_temperature: Some(0),
            ..Default::default()
        };
        let updated = service.update(1, patch).await.unwrap();

        assert_eq!(updated.minimum_temperature, 0);
        assert_eq!(updated.minimum_capacity, 10);
    }

    #[tokio::test]
    async fn delete_surfaces_not_found() {
        let mut repo = MockWarehouseRepository::new();
        repo.expect_delete()
            .returning(|_| Err(ServiceError::not_found("warehouse")));

        let service = WarehouseService::new(Arc::new(repo));
        let err = service.delete(5).await.unwrap_err();
        assert_eq!(err.to_string(), "warehouse not found");
    }

    #[tokio::test]
    async fn delete_of_referenced_warehouse_names_it() {
        let mut repo = MockWarehouseRepository::new();
        repo.expect_delete().returning(|_| {
            Err(ServiceError::ForeignKeyMissing(
                "FOREIGN KEY constraint failed".into(),
            ))
        });

        let service = WarehouseService::new(Arc::new(repo));
        let err = service.delete(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::ForeignKeyMissing(_)));
        assert_eq!(
            err.to_string(),
            "warehouse is still referenced by other records"
        );
    }
}
