use crate::{
    entities::employee,
    errors::ServiceError,
    reports::InboundOrdersPerEmployee,
    repositories::EmployeeRepository,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

const UNIQUE_KEY: &str = "card_number_id";
const MISSING_WAREHOUSE: &str = "associated warehouse does not exist";

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct EmployeePatch {
    #[validate(length(min = 1))]
    pub card_number_id: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(range(min = 1))]
    pub warehouse_id: Option<i32>,
}

impl EmployeePatch {
    fn apply_to(self, employee: &mut employee::Model) {
        if let Some(card_number_id) = self.card_number_id {
            employee.card_number_id = card_number_id;
        }
        if let Some(first_name) = self.first_name {
            employee.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            employee.last_name = last_name;
        }
        if let Some(warehouse_id) = self.warehouse_id {
            employee.warehouse_id = warehouse_id;
        }
    }
}

#[derive(Clone)]
pub struct EmployeeService {
    repository: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<employee::Model>, ServiceError> {
        self.repository.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<employee::Model, ServiceError> {
        self.repository.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        mut employee: employee::Model,
    ) -> Result<employee::Model, ServiceError> {
        if self.repository.exists(&employee.card_number_id).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        employee.id = self
            .repository
            .save(employee.clone())
            .await
            .map_err(|e| refine(e, employee.warehouse_id))?;

        info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        patch: EmployeePatch,
    ) -> Result<employee::Model, ServiceError> {
        let stored = self.repository.get(id).await?;

        if let Some(card_number_id) = patch.card_number_id.as_deref() {
            if card_number_id != stored.card_number_id
                && self.repository.exists(card_number_id).await?
            {
                return Err(ServiceError::already_exists(UNIQUE_KEY));
            }
        }

        let mut employee = stored.clone();
        patch.apply_to(&mut employee);
        if employee == stored {
            return Ok(stored);
        }

        self.repository
            .update(employee.clone())
            .await
            .map_err(|e| refine(e, employee.warehouse_id))?;

        info!(employee_id = id, "Employee updated");
        Ok(employee)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| e.with_dependents("employee"))?;
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn report_inbound_orders(
        &self,
        employee_id: Option<i32>,
    ) -> Result<Vec<InboundOrdersPerEmployee>, ServiceError> {
        self.repository.report_inbound_orders(employee_id).await
    }
}

// The warehouse is the only foreign key on employees.
fn refine(err: ServiceError, warehouse_id: i32) -> ServiceError {
    if matches!(err, ServiceError::ForeignKeyMissing(_)) {
        warn!(warehouse_id, "Employee references a missing warehouse");
    }
    err.with_conflict_on(UNIQUE_KEY)
        .with_referent(MISSING_WAREHOUSE)
}
