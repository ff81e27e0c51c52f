use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;

use super::{BaseRepository, Repository};
use crate::entities::purchase_order;
use crate::errors::{classify_db_err, ServiceError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseOrderRepository: Send + Sync {
    async fn exists(&self, order_number: &str) -> Result<bool, ServiceError>;
    async fn save(&self, order: purchase_order::Model) -> Result<i32, ServiceError>;
    async fn get_by_buyer(&self, buyer_id: i32)
        -> Result<Vec<purchase_order::Model>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmPurchaseOrderRepository {
    base: BaseRepository,
}

impl SeaOrmPurchaseOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl PurchaseOrderRepository for SeaOrmPurchaseOrderRepository {
    async fn exists(&self, order_number: &str) -> Result<bool, ServiceError> {
        let count = purchase_order::Entity::find()
            .filter(purchase_order::Column::OrderNumber.eq(order_number))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, order: purchase_order::Model) -> Result<i32, ServiceError> {
        let mut active = order.into_active_model();
        active.id = NotSet;
        let result = purchase_order::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }

    async fn get_by_buyer(
        &self,
        buyer_id: i32,
    ) -> Result<Vec<purchase_order::Model>, ServiceError> {
        purchase_order::Entity::find()
            .filter(purchase_order::Column::BuyerId.eq(buyer_id))
            .order_by_asc(purchase_order::Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)
    }
}
