use crate::{
    entities::inbound_order,
    errors::ServiceError,
    repositories::{
        EmployeeRepository, InboundOrderRepository, ProductBatchRepository, WarehouseRepository,
    },
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

const UNIQUE_KEY: &str = "order_number";

#[derive(Clone)]
pub struct InboundOrderService {
    repository: Arc<dyn InboundOrderRepository>,
    employees: Arc<dyn EmployeeRepository>,
    batches: Arc<dyn ProductBatchRepository>,
    warehouses: Arc<dyn WarehouseRepository>,
}

impl InboundOrderService {
    pub fn new(
        repository: Arc<dyn InboundOrderRepository>,
        employees: Arc<dyn EmployeeRepository>,
        batches: Arc<dyn ProductBatchRepository>,
        warehouses: Arc<dyn WarehouseRepository>,
    ) -> Self {
        Self {
            repository,
            employees,
            batches,
            warehouses,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        mut order: inbound_order::Model,
    ) -> Result<inbound_order::Model, ServiceError> {
        if self.repository.exists(&order.order_number).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        match self.repository.save(order.clone()).await {
            Ok(id) => order.id = id,
            Err(ServiceError::ForeignKeyMissing(detail)) => {
                warn!(%detail, "Inbound order references a missing row");
                return Err(self.missing_referent(&order).await);
            }
            Err(err) => return Err(err.with_conflict_on(UNIQUE_KEY)),
        }

        info!(inbound_order_id = order.id, "Inbound order created");
        Ok(order)
    }

    /// Probes the referents in a fixed order and names the first one missing.
    async fn missing_referent(&self, order: &inbound_order::Model) -> ServiceError {
        let employee = self.employees.get(order.employee_id).await;
        if let Some(err) = probe(employee, "employee does not exist") {
            return err;
        }
        let batch = self.batches.get(order.product_batch_id).await;
        if let Some(err) = probe(batch, "product batch does not exist") {
            return err;
        }
        let warehouse = self.warehouses.get(order.warehouse_id).await;
        if let Some(err) = probe(warehouse, "warehouse does not exist") {
            return err;
        }
        ServiceError::ForeignKeyMissing("inbound order references a missing row".to_string())
    }
}

fn probe<T>(lookup: Result<T, ServiceError>, message: &str) -> Option<ServiceError> {
    match lookup {
        Ok(_) => None,
        Err(ServiceError::NotFound(_)) => Some(ServiceError::ReferentNotFound(message.to_string())),
        Err(other) => Some(other),
    }
}
