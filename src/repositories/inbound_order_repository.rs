use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter,
};
use std::sync::Arc;

use super::{BaseRepository, Repository};
use crate::entities::inbound_order;
use crate::errors::{classify_db_err, ServiceError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InboundOrderRepository: Send + Sync {
    async fn exists(&self, order_number: &str) -> Result<bool, ServiceError>;
    async fn save(&self, order: inbound_order::Model) -> Result<i32, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmInboundOrderRepository {
    base: BaseRepository,
}

impl SeaOrmInboundOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl InboundOrderRepository for SeaOrmInboundOrderRepository {
    async fn exists(&self, order_number: &str) -> Result<bool, ServiceError> {
        let count = inbound_order::Entity::find()
            .filter(inbound_order::Column::OrderNumber.eq(order_number))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, order: inbound_order::Model) -> Result<i32, ServiceError> {
        let mut active = order.into_active_model();
        active.id = NotSet;
        let result = inbound_order::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }
}
