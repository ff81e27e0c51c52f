use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};
use std::sync::Arc;

use super::{deleted, found, report_rows, BaseRepository, Repository};
use crate::entities::{buyer, purchase_order};
use crate::errors::{classify_db_err, ServiceError};
use crate::reports::PurchaseOrdersPerBuyer;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuyerRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<buyer::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<buyer::Model, ServiceError>;
    async fn exists(&self, card_number_id: &str) -> Result<bool, ServiceError>;
    /// Inserts the buyer, ignoring `id`, and returns the assigned id.
    async fn save(&self, buyer: buyer::Model) -> Result<i32, ServiceError>;
    async fn update(&self, buyer: buyer::Model) -> Result<(), ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn report_purchase_orders(
        &self,
        buyer_id: Option<i32>,
    ) -> Result<Vec<PurchaseOrdersPerBuyer>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmBuyerRepository {
    base: BaseRepository,
}

impl SeaOrmBuyerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl BuyerRepository for SeaOrmBuyerRepository {
    async fn get_all(&self) -> Result<Vec<buyer::Model>, ServiceError> {
        buyer::Entity::find()
            .order_by_asc(buyer::Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)
    }

    async fn get(&self, id: i32) -> Result<buyer::Model, ServiceError> {
        let row = buyer::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        found(row, "buyer")
    }

    async fn exists(&self, card_number_id: &str) -> Result<bool, ServiceError> {
        let count = buyer::Entity::find()
            .filter(buyer::Column::CardNumberId.eq(card_number_id))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, buyer: buyer::Model) -> Result<i32, ServiceError> {
        let mut active = buyer.into_active_model();
        active.id = NotSet;
        let result = buyer::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, buyer: buyer::Model) -> Result<(), ServiceError> {
        buyer
            .into_active_model()
            .reset_all()
            .update(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = buyer::Entity::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        deleted(result, "buyer")
    }

    async fn report_purchase_orders(
        &self,
        buyer_id: Option<i32>,
    ) -> Result<Vec<PurchaseOrdersPerBuyer>, ServiceError> {
        let rows = buyer::Entity::find()
            .select_only()
            .column(buyer::Column::Id)
            .column(buyer::Column::CardNumberId)
            .column(buyer::Column::FirstName)
            .column(buyer::Column::LastName)
            .column_as(
                Expr::col((purchase_order::Entity, purchase_order::Column::Id)).count(),
                "purchase_orders_count",
            )
            .left_join(purchase_order::Entity)
            .apply_if(buyer_id, |query, id| query.filter(buyer::Column::Id.eq(id)))
            .group_by(buyer::Column::Id)
            .group_by(buyer::Column::CardNumberId)
            .group_by(buyer::Column::FirstName)
            .group_by(buyer::Column::LastName)
            .order_by_asc(buyer::Column::Id)
            .into_model::<PurchaseOrdersPerBuyer>()
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)?;

        report_rows(rows, buyer_id, "buyer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::memory_db;
    use assert_matches::assert_matches;

    fn buyer(card: &str) -> buyer::Model {
        buyer::Model {
            id: 0,
            card_number_id: card.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let repo = SeaOrmBuyerRepository::new(memory_db().await);

        assert_eq!(repo.save(buyer("001")).await.unwrap(), 1);
        assert_eq!(repo.save(buyer("002")).await.unwrap(), 2);
        assert!(repo.exists("002").await.unwrap());
        assert!(!repo.exists("003").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_card_is_classified_as_already_exists() {
        let repo = SeaOrmBuyerRepository::new(memory_db().await);
        repo.save(buyer("001")).await.unwrap();

        assert_matches!(
            repo.save(buyer("001")).await,
            Err(ServiceError::AlreadyExists(_))
        );
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let repo = SeaOrmBuyerRepository::new(memory_db().await);
        let id = repo.save(buyer("001")).await.unwrap();

        let mut stored = repo.get(id).await.unwrap();
        stored.last_name = "Diaz".to_string();
        repo.update(stored.clone()).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap(), stored);

        repo.delete(id).await.unwrap();
        assert_matches!(repo.get(id).await, Err(ServiceError::NotFound(_)));
        assert_matches!(repo.delete(id).await, Err(ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn report_counts_buyers_without_orders_as_zero() {
        let repo = SeaOrmBuyerRepository::new(memory_db().await);
        let id = repo.save(buyer("001")).await.unwrap();

        let rows = repo.report_purchase_orders(None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].purchase_orders_count, 0);

        assert_matches!(
            repo.report_purchase_orders(Some(42)).await,
            Err(ServiceError::NotFound(_))
        );
    }
}
