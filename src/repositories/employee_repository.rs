use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};
use std::sync::Arc;

use super::{deleted, found, report_rows, BaseRepository, Repository};
use crate::entities::{employee, inbound_order};
use crate::errors::{classify_db_err, ServiceError};
use crate::reports::InboundOrdersPerEmployee;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<employee::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<employee::Model, ServiceError>;
    async fn exists(&self, card_number_id: &str) -> Result<bool, ServiceError>;
    async fn save(&self, employee: employee::Model) -> Result<i32, ServiceError>;
    async fn update(&self, employee: employee::Model) -> Result<(), ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn report_inbound_orders(
        &self,
        employee_id: Option<i32>,
    ) -> Result<Vec<InboundOrdersPerEmployee>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmEmployeeRepository {
    base: BaseRepository,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn get_all(&self) -> Result<Vec<employee::Model>, ServiceError> {
        employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)
    }

    async fn get(&self, id: i32) -> Result<employee::Model, ServiceError> {
        let row = employee::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        found(row, "employee")
    }

    async fn exists(&self, card_number_id: &str) -> Result<bool, ServiceError> {
        let count = employee::Entity::find()
            .filter(employee::Column::CardNumberId.eq(card_number_id))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, employee: employee::Model) -> Result<i32, ServiceError> {
        let mut active = employee.into_active_model();
        active.id = NotSet;
        let result = employee::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, employee: employee::Model) -> Result<(), ServiceError> {
        employee
            .into_active_model()
            .reset_all()
            .update(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = employee::Entity::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        deleted(result, "employee")
    }

    async fn report_inbound_orders(
        &self,
        employee_id: Option<i32>,
    ) -> Result<Vec<InboundOrdersPerEmployee>, ServiceError> {
        let rows = employee::Entity::find()
            .select_only()
            .column(employee::Column::Id)
            .column(employee::Column::CardNumberId)
            .column(employee::Column::FirstName)
            .column(employee::Column::LastName)
            .column(employee::Column::WarehouseId)
            .column_as(
                Expr::col((inbound_order::Entity, inbound_order::Column::Id)).count(),
                "inbound_orders_count",
            )
            .left_join(inbound_order::Entity)
            .apply_if(employee_id, |query, id| {
                query.filter(employee::Column::Id.eq(id))
            })
            .group_by(employee::Column::Id)
            .group_by(employee::Column::CardNumberId)
            .group_by(employee::Column::FirstName)
            .group_by(employee::Column::LastName)
            .group_by(employee::Column::WarehouseId)
            .order_by_asc(employee::Column::Id)
            .into_model::<InboundOrdersPerEmployee>()
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)?;

        report_rows(rows, employee_id, "employee")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::warehouse;
    use crate::repositories::test_support::memory_db;
    use crate::repositories::{SeaOrmWarehouseRepository, WarehouseRepository};
    use assert_matches::assert_matches;

    fn employee(card: &str, warehouse_id: i32) -> employee::Model {
        employee::Model {
            id: 0,
            card_number_id: card.into(),
            first_name: "Juan".into(),
            last_name: "Perez".into(),
            warehouse_id,
        }
    }

    #[tokio::test]
    async fn missing_warehouse_is_a_foreign_key_failure() {
        let repo = SeaOrmEmployeeRepository::new(memory_db().await);
        assert_matches!(
            repo.save(employee("E-1", 77)).await,
            Err(ServiceError::ForeignKeyMissing(_))
        );
    }

    #[tokio::test]
    async fn report_lists_every_employee() {
        let db = memory_db().await;
        let warehouses = SeaOrmWarehouseRepository::new(db.clone());
        let employees = SeaOrmEmployeeRepository::new(db);

        let warehouse_id = warehouses
            .save(warehouse::Model {
                id: 0,
                address: "Av. Siempre Viva 742".into(),
                telephone: "555-0000".into(),
                warehouse_code: "W-01".into(),
                minimum_capacity: 10,
                minimum_temperature: -5,
            })
            .await
            .unwrap();
        let first = employees.save(employee("E-1", warehouse_id)).await.unwrap();
        employees.save(employee("E-2", warehouse_id)).await.unwrap();

        let rows = employees.report_inbound_orders(None).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.inbound_orders_count == 0));

        let one = employees.report_inbound_orders(Some(first)).await.unwrap();
        assert_eq!(one[0].card_number_id, "E-1");
        assert_eq!(one[0].warehouse_id, warehouse_id);
    }
}
