use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter,
};
use std::sync::Arc;

use super::{BaseRepository, Repository};
use crate::entities::carry;
use crate::errors::{classify_db_err, ServiceError};

/// Carriers are create-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarryRepository: Send + Sync {
    async fn exists(&self, cid: &str) -> Result<bool, ServiceError>;
    async fn save(&self, carry: carry::Model) -> Result<i32, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmCarryRepository {
    base: BaseRepository,
}

impl SeaOrmCarryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CarryRepository for SeaOrmCarryRepository {
    async fn exists(&self, cid: &str) -> Result<bool, ServiceError> {
        let count = carry::Entity::find()
            .filter(carry::Column::Cid.eq(cid))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, carry: carry::Model) -> Result<i32, ServiceError> {
        let mut active = carry.into_active_model();
        active.id = NotSet;
        let result = carry::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }
}
