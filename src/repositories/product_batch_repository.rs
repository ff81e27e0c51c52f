use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter,
};
use std::sync::Arc;

use super::{found, BaseRepository, Repository};
use crate::entities::product_batch;
use crate::errors::{classify_db_err, ServiceError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductBatchRepository: Send + Sync {
    async fn get(&self, id: i32) -> Result<product_batch::Model, ServiceError>;
    async fn exists(&self, batch_number: i32) -> Result<bool, ServiceError>;
    async fn save(&self, batch: product_batch::Model) -> Result<i32, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmProductBatchRepository {
    base: BaseRepository,
}

impl SeaOrmProductBatchRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductBatchRepository for SeaOrmProductBatchRepository {
    async fn get(&self, id: i32) -> Result<product_batch::Model, ServiceError> {
        let row = product_batch::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        found(row, "product batch")
    }

    async fn exists(&self, batch_number: i32) -> Result<bool, ServiceError> {
        let count = product_batch::Entity::find()
            .filter(product_batch::Column::BatchNumber.eq(batch_number))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, batch: product_batch::Model) -> Result<i32, ServiceError> {
        let mut active = batch.into_active_model();
        active.id = NotSet;
        let result = product_batch::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }
}
