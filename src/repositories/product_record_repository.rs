use async_trait::async_trait;
use sea_orm::{ActiveValue::NotSet, DatabaseConnection, EntityTrait, IntoActiveModel};
use std::sync::Arc;

use super::{BaseRepository, Repository};
use crate::entities::product_record;
use crate::errors::{classify_db_err, ServiceError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRecordRepository: Send + Sync {
    async fn save(&self, record: product_record::Model) -> Result<i32, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmProductRecordRepository {
    base: BaseRepository,
}

impl SeaOrmProductRecordRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRecordRepository for SeaOrmProductRecordRepository {
    async fn save(&self, record: product_record::Model) -> Result<i32, ServiceError> {
        let mut active = record.into_active_model();
        active.id = NotSet;
        let result = product_record::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }
}
