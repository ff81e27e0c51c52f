use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;

use super::{deleted, found, BaseRepository, Repository};
use crate::entities::seller;
use crate::errors::{classify_db_err, ServiceError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SellerRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<seller::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<seller::Model, ServiceError>;
    async fn exists(&self, cid: i32) -> Result<bool, ServiceError>;
    async fn save(&self, seller: seller::Model) -> Result<i32, ServiceError>;
    async fn update(&self, seller: seller::Model) -> Result<(), ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmSellerRepository {
    base: BaseRepository,
}

impl SeaOrmSellerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl SellerRepository for SeaOrmSellerRepository {
    async fn get_all(&self) -> Result<Vec<seller::Model>, ServiceError> {
        seller::Entity::find()
            .order_by_asc(seller::Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(classify_db_err)
    }

    async fn get(&self, id: i32) -> Result<seller::Model, ServiceError> {
        let row = seller::Entity::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        found(row, "seller")
    }

    async fn exists(&self, cid: i32) -> Result<bool, ServiceError> {
        let count = seller::Entity::find()
            .filter(seller::Column::Cid.eq(cid))
            .count(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, seller: seller::Model) -> Result<i32, ServiceError> {
        let mut active = seller.into_active_model();
        active.id = NotSet;
        let result = seller::Entity::insert(active)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, seller: seller::Model) -> Result<(), ServiceError> {
        seller
            .into_active_model()
            .reset_all()
            .update(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = seller::Entity::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map_err(classify_db_err)?;
        deleted(result, "seller")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::memory_db;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn unknown_locality_is_a_foreign_key_failure() {
        let repo = SeaOrmSellerRepository::new(memory_db().await);
        let seller = seller::Model {
            id: 0,
            cid: 10,
            company_name: "Lacteos SRL".into(),
            address: "Ruta 2 km 40".into(),
            telephone: "555-0199".into(),
            locality_id: "nowhere".into(),
        };

        assert_matches!(
            repo.save(seller).await,
            Err(ServiceError::ForeignKeyMissing(_))
        );
        assert!(repo.get_all().await.unwrap().is_empty());
    }
}
