use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};
use std::sync::Arc;

use super::{deleted, found, report_rows, BaseRepository, Repository};
use crate::entities::{product, product_record};
use crate::errors::{classify_db_err, ServiceError};
use crate::reports::RecordsPerProduct;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<product::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<product::Model, ServiceError>;
    async fn exists(&self, product_code: &str) -> Result<bool, ServiceError>;
    async fn save(&self, product: product::Model) -> Result<i32, ServiceError>;
    async fn update(&self, product: product::Model) -> Result<(), ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn report_records(
        &self,
        product_id: Option<i32>,
    ) -> Result<Vec<RecordsPerProduct>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmProductRepository {
    base: BaseRepository,
}

impl SeaOrmProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn get_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)
    }

    async fn get(&self, id: i32) -> Result<product::Model, ServiceError> {
        let row = product::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        found(row, "product")
    }

    async fn exists(&self, product_code: &str) -> Result<bool, ServiceError> {
        let count = product::Entity::find()
            .filter(product::Column::ProductCode.eq(product_code))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, product: product::Model) -> Result<i32, ServiceError> {
        let mut active = product.into_active_model();
        active.id = NotSet;
        let result = product::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, product: product::Model) -> Result<(), ServiceError> {
        product
            .into_active_model()
            .reset_all()
            .update(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = product::Entity::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        deleted(result, "product")
    }

    async fn report_records(
        &self,
        product_id: Option<i32>,
    ) -> Result<Vec<RecordsPerProduct>, ServiceError> {
        let rows = product::Entity::find()
            .select_only()
            .column_as(product::Column::Id, "product_id")
            .column(product::Column::Description)
            .column_as(
                Expr::col((product_record::Entity, product_record::Column::Id)).count(),
                "records_count",
            )
            .left_join(product_record::Entity)
            .apply_if(product_id, |query, id| {
                query.filter(product::Column::Id.eq(id))
            })
            .group_by(product::Column::Id)
            .group_by(product::Column::Description)
            .order_by_asc(product::Column::Id)
            .into_model::<RecordsPerProduct>()
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)?;

        report_rows(rows, product_id, "product")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::memory_db;
    use crate::repositories::{ProductRecordRepository, SeaOrmProductRecordRepository};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn product(code: &str) -> product::Model {
        product::Model {
            id: 0,
            description: "Yogurt".into(),
            expiration_rate: 0.5,
            freezing_rate: 1.2,
            height: 10.0,
            length: 5.0,
            width: 5.0,
            net_weight: 0.2,
            product_code: code.into(),
            recommended_freezing_temperature: 2.0,
            product_type_id: 2,
            seller_id: None,
        }
    }

    #[tokio::test]
    async fn records_report_counts_per_product() {
        let db = memory_db().await;
        let products = SeaOrmProductRepository::new(db.clone());
        let records = SeaOrmProductRecordRepository::new(db);

        let id = products.save(product("P-1")).await.unwrap();
        products.save(product("P-2")).await.unwrap();
        for _ in 0..3 {
            records
                .save(product_record::Model {
                    id: 0,
                    last_update_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                    purchase_price: Decimal::new(1050, 2),
                    sale_price: Decimal::new(1500, 2),
                    product_id: id,
                })
                .await
                .unwrap();
        }

        let rows = products.report_records(None).await.unwrap();
        assert_eq!(
            rows.iter().map(|r| r.records_count).collect::<Vec<_>>(),
            vec![3, 0]
        );

        let one = products.report_records(Some(id)).await.unwrap();
        assert_eq!(
            one,
            vec![RecordsPerProduct {
                product_id: id,
                description: "Yogurt".into(),
                records_count: 3,
            }]
        );
    }
}
