use async_trait::async_trait;
use sea_orm::{
    sea_query::{Alias, Expr, Func, SimpleExpr},
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};
use std::sync::Arc;

use super::{deleted, found, report_rows, BaseRepository, Repository};
use crate::entities::{product_batch, section};
use crate::errors::{classify_db_err, ServiceError};
use crate::reports::ProductsPerSection;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<section::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<section::Model, ServiceError>;
    async fn exists(&self, section_number: i32) -> Result<bool, ServiceError>;
    async fn save(&self, section: section::Model) -> Result<i32, ServiceError>;
    async fn update(&self, section: section::Model) -> Result<(), ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn report_products(
        &self,
        section_id: Option<i32>,
    ) -> Result<Vec<ProductsPerSection>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmSectionRepository {
    base: BaseRepository,
}

impl SeaOrmSectionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl SectionRepository for SeaOrmSectionRepository {
    async fn get_all(&self) -> Result<Vec<section::Model>, ServiceError> {
        section::Entity::find()
            .order_by_asc(section::Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)
    }

    async fn get(&self, id: i32) -> Result<section::Model, ServiceError> {
        let row = section::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        found(row, "section")
    }

    async fn exists(&self, section_number: i32) -> Result<bool, ServiceError> {
        let count = section::Entity::find()
            .filter(section::Column::SectionNumber.eq(section_number))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, section: section::Model) -> Result<i32, ServiceError> {
        let mut active = section.into_active_model();
        active.id = NotSet;
        let result = section::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, section: section::Model) -> Result<(), ServiceError> {
        section
            .into_active_model()
            .reset_all()
            .update(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = section::Entity::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        deleted(result, "section")
    }

    async fn report_products(
        &self,
        section_id: Option<i32>,
    ) -> Result<Vec<ProductsPerSection>, ServiceError> {
        let stock = Func::coalesce([
            Expr::col((product_batch::Entity, product_batch::Column::CurrentQuantity)).sum(),
            Expr::val(0).into(),
        ]);
        let products_count = SimpleExpr::from(Func::cast_as(stock, Alias::new("BIGINT")));

        let rows = section::Entity::find()
            .select_only()
            .column_as(section::Column::Id, "section_id")
            .column_as(section::Column::SectionNumber, "section_number")
            .column_as(products_count, "products_count")
            .left_join(product_batch::Entity)
            .apply_if(section_id, |query, id| {
                query.filter(section::Column::Id.eq(id))
            })
            .group_by(section::Column::Id)
            .group_by(section::Column::SectionNumber)
            .order_by_asc(section::Column::Id)
            .into_model::<ProductsPerSection>()
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)?;

        report_rows(rows, section_id, "section")
    }
}
