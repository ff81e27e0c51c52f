use crate::{
    entities::purchase_order,
    errors::ServiceError,
    repositories::{BuyerRepository, PurchaseOrderRepository},
};
use std::sync::Arc;
use tracing::{info, instrument};

const UNIQUE_KEY: &str = "order_number";

#[derive(Clone)]
pub struct PurchaseOrderService {
    repository: Arc<dyn PurchaseOrderRepository>,
    buyers: Arc<dyn BuyerRepository>,
}

impl PurchaseOrderService {
    pub fn new(
        repository: Arc<dyn PurchaseOrderRepository>,
        buyers: Arc<dyn BuyerRepository>,
    ) -> Self {
        Self { repository, buyers }
    }

    /// Unknown buyer, product record or status surfaces as a foreign-key conflict.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        mut order: purchase_order::Model,
    ) -> Result<purchase_order::Model, ServiceError> {
        if self.repository.exists(&order.order_number).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        order.id = self
            .repository
            .save(order.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(purchase_order_id = order.id, "Purchase order created");
        Ok(order)
    }

    /// Orders placed by one buyer; `NotFound` when the buyer is unknown.
    #[instrument(skip(self))]
    pub async fn get_by_buyer(
        &self,
        buyer_id: i32,
    ) -> Result<Vec<purchase_order::Model>, ServiceError> {
        self.buyers.get(buyer_id).await?;
        self.repository.get_by_buyer(buyer_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::buyer;
    use crate::repositories::buyer_repository::MockBuyerRepository;
    use crate::repositories::purchase_order_repository::MockPurchaseOrderRepository;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn order() -> purchase_order::Model {
        purchase_order::Model {
            id: 0,
            order_number: "PO-1".into(),
            order_date: NaiveDate::from_ymd_opt(2030, 1, 2).unwrap(),
            tracking_code: "TRK-1".into(),
            buyer_id: 1,
            product_record_id: 1,
            order_status_id: 1,
        }
    }

    #[tokio::test]
    async fn orders_of_unknown_buyer_are_not_found() {
        let mut buyers = MockBuyerRepository::new();
        buyers
            .expect_get()
            .returning(|_| Err(ServiceError::not_found("buyer")));
        let mut orders = MockPurchaseOrderRepository::new();
        orders.expect_get_by_buyer().never();

        let service = PurchaseOrderService::new(Arc::new(orders), Arc::new(buyers));
        assert_matches!(service.get_by_buyer(8).await, Err(ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn orders_of_known_buyer_are_listed() {
        let mut buyers = MockBuyerRepository::new();
        buyers.expect_get().returning(|id| {
            Ok(buyer::Model {
                id,
                card_number_id: "001".into(),
                first_name: "A".into(),
                last_name: "B".into(),
            })
        });
        let mut orders = MockPurchaseOrderRepository::new();
        orders
            .expect_get_by_buyer()
            .returning(|_| Ok(vec![purchase_order::Model { id: 1, ..order() }]));

        let service = PurchaseOrderService::new(Arc::new(orders), Arc::new(buyers));
        assert_eq!(service.get_by_buyer(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_order_number_conflicts() {
        let mut orders = MockPurchaseOrderRepository::new();
        orders.expect_exists().returning(|_| Ok(true));
        orders.expect_save().never();

        let service =
            PurchaseOrderService::new(Arc::new(orders), Arc::new(MockBuyerRepository::new()));
        assert_matches!(
            service.create(order()).await,
            Err(ServiceError::AlreadyExists(ref m)) if m == "order_number already exists"
        );
    }
}
