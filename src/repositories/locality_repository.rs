use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};
use std::sync::Arc;

use super::{found, report_rows, BaseRepository, Repository};
use crate::entities::{carry, locality, seller};
use crate::errors::{classify_db_err, ServiceError};
use crate::reports::{CarriesPerLocality, SellersPerLocality};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalityRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<locality::Model>, ServiceError>;
    async fn get(&self, id: &str) -> Result<locality::Model, ServiceError>;
    async fn exists(&self, id: &str) -> Result<bool, ServiceError>;
    /// Localities carry caller-supplied keys, so nothing is assigned here.
    async fn save(&self, locality: locality::Model) -> Result<(), ServiceError>;
    async fn report_sellers(
        &self,
        locality_id: Option<String>,
    ) -> Result<Vec<SellersPerLocality>, ServiceError>;
    async fn report_carries(
        &self,
        locality_id: Option<String>,
    ) -> Result<Vec<CarriesPerLocality>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmLocalityRepository {
    base: BaseRepository,
}

impl SeaOrmLocalityRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl LocalityRepository for SeaOrmLocalityRepository {
    async fn get_all(&self) -> Result<Vec<locality::Model>, ServiceError> {
        locality::Entity::find()
            .order_by_asc(locality::Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)
    }

    async fn get(&self, id: &str) -> Result<locality::Model, ServiceError> {
        let row = locality::Entity::find_by_id(id.to_string())
            .one(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        found(row, "locality")
    }

    async fn exists(&self, id: &str) -> Result<bool, ServiceError> {
        let count = locality::Entity::find()
            .filter(locality::Column::Id.eq(id))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, locality: locality::Model) -> Result<(), ServiceError> {
        locality::Entity::insert(locality.into_active_model())
            .exec_without_returning(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(())
    }

    async fn report_sellers(
        &self,
        locality_id: Option<String>,
    ) -> Result<Vec<SellersPerLocality>, ServiceError> {
        let rows = locality::Entity::find()
            .select_only()
            .column_as(locality::Column::Id, "locality_id")
            .column_as(locality::Column::LocalityName, "locality_name")
            .column_as(
                Expr::col((seller::Entity, seller::Column::Id)).count(),
                "sellers_count",
            )
            .left_join(seller::Entity)
            .apply_if(locality_id.clone(), |query, id| {
                query.filter(locality::Column::Id.eq(id))
            })
            .group_by(locality::Column::Id)
            .group_by(locality::Column::LocalityName)
            .order_by_asc(locality::Column::Id)
            .into_model::<SellersPerLocality>()
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)?;

        report_rows(rows, locality_id, "locality")
    }

    async fn report_carries(
        &self,
        locality_id: Option<String>,
    ) -> Result<Vec<CarriesPerLocality>, ServiceError> {
        let rows = locality::Entity::find()
            .select_only()
            .column_as(locality::Column::Id, "locality_id")
            .column_as(locality::Column::LocalityName, "locality_name")
            .column_as(
                Expr::col((carry::Entity, carry::Column::Id)).count(),
                "carries_count",
            )
            .left_join(carry::Entity)
            .apply_if(locality_id.clone(), |query, id| {
                query.filter(locality::Column::Id.eq(id))
            })
            .group_by(locality::Column::Id)
            .group_by(locality::Column::LocalityName)
            .order_by_asc(locality::Column::Id)
            .into_model::<CarriesPerLocality>()
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)?;

        report_rows(rows, locality_id, "locality")
    }
}
