use crate::{entities::product_batch, errors::ServiceError, repositories::ProductBatchRepository};
use std::sync::Arc;
use tracing::{info, instrument};

const UNIQUE_KEY: &str = "batch_number";

#[derive(Clone)]
pub struct ProductBatchService {
    repository: Arc<dyn ProductBatchRepository>,
}

impl ProductBatchService {
    pub fn new(repository: Arc<dyn ProductBatchRepository>) -> Self {
        Self { repository }
    }

    /// Unknown product or section surfaces as a foreign-key conflict.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        mut batch: product_batch::Model,
    ) -> Result<product_batch::Model, ServiceError> {
        if self.repository.exists(batch.batch_number).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        batch.id = self
            .repository
            .save(batch.clone())
            .await
            .map_err(|e| e.with_conflict_on(UNIQUE_KEY))?;

        info!(product_batch_id = batch.id, "Product batch created");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::product_batch_repository::MockProductBatchRepository;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn batch() -> product_batch::Model {
        product_batch::Model {
            id: 0,
            batch_number: 111,
            current_quantity: 200,
            current_temperature: 20,
            due_date: NaiveDate::from_ymd_opt(2030, 4, 4).unwrap(),
            initial_quantity: 10,
            manufacturing_date: NaiveDate::from_ymd_opt(2030, 4, 1).unwrap(),
            manufacturing_hour: 10,
            minimum_temperature: 5,
            product_id: 1,
            section_id: 1,
        }
    }

    #[tokio::test]
    async fn create_returns_the_assigned_id() {
        let mut repo = MockProductBatchRepository::new();
        repo.expect_exists().with(eq(111)).returning(|_| Ok(false));
        repo.expect_save().returning(|_| Ok(12));

        let service = ProductBatchService::new(Arc::new(repo));
        let created = service.create(batch()).await.unwrap();
        assert_eq!(created.id, 12);
        assert_eq!(created.batch_number, 111);
    }

    #[tokio::test]
    async fn unknown_section_is_a_conflict() {
        let mut repo = MockProductBatchRepository::new();
        repo.expect_exists().returning(|_| Ok(false));
        repo.expect_save()
            .returning(|_| Err(ServiceError::ForeignKeyMissing("fk".into())));

        let service = ProductBatchService::new(Arc::new(repo));
        assert_matches!(
            service.create(batch()).await,
            Err(ServiceError::ForeignKeyMissing(_))
        );
    }
}
