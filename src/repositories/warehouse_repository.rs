use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;

use super::{deleted, found, BaseRepository, Repository};
use crate::entities::warehouse;
use crate::errors::{classify_db_err, ServiceError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<warehouse::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<warehouse::Model, ServiceError>;
    async fn exists(&self, warehouse_code: &str) -> Result<bool, ServiceError>;
    async fn save(&self, warehouse: warehouse::Model) -> Result<i32, ServiceError>;
    async fn update(&self, warehouse: warehouse::Model) -> Result<(), ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmWarehouseRepository {
    base: BaseRepository,
}

impl SeaOrmWarehouseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl WarehouseRepository for SeaOrmWarehouseRepository {
    async fn get_all(&self) -> Result<Vec<warehouse::Model>, ServiceError> {
        warehouse::Entity::find()
            .order_by_asc(warehouse::Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)
    }

    async fn get(&self, id: i32) -> Result<warehouse::Model, ServiceError> {
        let row = warehouse::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        found(row, "warehouse")
    }

    async fn exists(&self, warehouse_code: &str) -> Result<bool, ServiceError> {
        let count = warehouse::Entity::find()
            .filter(warehouse::Column::WarehouseCode.eq(warehouse_code))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, warehouse: warehouse::Model) -> Result<i32, ServiceError> {
        let mut active = warehouse.into_active_model();
        active.id = NotSet;
        let result = warehouse::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, warehouse: warehouse::Model) -> Result<(), ServiceError> {
        warehouse
            .into_active_model()
            .reset_all()
            .update(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = warehouse::Entity::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        deleted(result, "warehouse")
    }
}
