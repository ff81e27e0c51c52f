use sea_orm::{DatabaseConnection, DeleteResult};
use std::sync::Arc;

use crate::errors::ServiceError;

pub mod buyer_repository;
pub mod carry_repository;
pub mod employee_repository;
pub mod inbound_order_repository;
pub mod locality_repository;
pub mod product_batch_repository;
pub mod product_record_repository;
pub mod product_repository;
pub mod purchase_order_repository;
pub mod section_repository;
pub mod seller_repository;
pub mod warehouse_repository;

pub use buyer_repository::{BuyerRepository, SeaOrmBuyerRepository};
pub use carry_repository::{CarryRepository, SeaOrmCarryRepository};
pub use employee_repository::{EmployeeRepository, SeaOrmEmployeeRepository};
pub use inbound_order_repository::{InboundOrderRepository, SeaOrmInboundOrderRepository};
pub use locality_repository::{LocalityRepository, SeaOrmLocalityRepository};
pub use product_batch_repository::{ProductBatchRepository, SeaOrmProductBatchRepository};
pub use product_record_repository::{ProductRecordRepository, SeaOrmProductRecordRepository};
pub use product_repository::{ProductRepository, SeaOrmProductRepository};
pub use purchase_order_repository::{PurchaseOrderRepository, SeaOrmPurchaseOrderRepository};
pub use section_repository::{SeaOrmSectionRepository, SectionRepository};
pub use seller_repository::{SeaOrmSellerRepository, SellerRepository};
pub use warehouse_repository::{SeaOrmWarehouseRepository, WarehouseRepository};

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Turns a missing row into `NotFound` naming the entity.
pub(crate) fn found<T>(row: Option<T>, entity: &str) -> Result<T, ServiceError> {
    row.ok_or_else(|| ServiceError::not_found(entity))
}

/// A delete that touched no row means the id was unknown.
pub(crate) fn deleted(result: DeleteResult, entity: &str) -> Result<(), ServiceError> {
    if result.rows_affected < 1 {
        return Err(ServiceError::not_found(entity));
    }
    Ok(())
}

/// A filtered report with no rows means the parent does not exist.
pub(crate) fn report_rows<T, K>(
    rows: Vec<T>,
    filter: Option<K>,
    parent: &str,
) -> Result<Vec<T>, ServiceError> {
    if filter.is_some() && rows.is_empty() {
        return Err(ServiceError::not_found(parent));
    }
    Ok(rows)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::{establish_connection_with_config, run_migrations, DbConfig};
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;

    /// Fresh in-memory database with the full schema.
    pub async fn memory_db() -> Arc<DatabaseConnection> {
        let db = establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        })
        .await
        .expect("in-memory sqlite");
        run_migrations(&db).await.expect("schema");
        Arc::new(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn unfiltered_reports_may_be_empty() {
        let rows: Vec<i32> = vec![];
        assert_eq!(report_rows(rows, None::<i32>, "buyer").unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn filtered_reports_without_rows_are_not_found() {
        let rows: Vec<i32> = vec![];
        assert_matches!(
            report_rows(rows, Some(9999), "locality"),
            Err(ServiceError::NotFound(message)) if message == "locality not found"
        );
    }

    #[test]
    fn empty_delete_is_not_found() {
        let result = DeleteResult { rows_affected: 0 };
        assert_matches!(deleted(result, "buyer"), Err(ServiceError::NotFound(_)));
        assert!(deleted(DeleteResult { rows_affected: 1 }, "buyer").is_ok());
    }
}
