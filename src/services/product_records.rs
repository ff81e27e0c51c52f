use crate::{
    common::today, entities::product_record, errors::ServiceError,
    repositories::ProductRecordRepository,
};
use std::sync::Arc;
use tracing::{info, instrument};

pub const PAST_DATE_MESSAGE: &str = "input date cannot be less than today";

#[derive(Clone)]
pub struct ProductRecordService {
    repository: Arc<dyn ProductRecordRepository>,
}

impl ProductRecordService {
    pub fn new(repository: Arc<dyn ProductRecordRepository>) -> Self {
        Self { repository }
    }

    /// `last_update_date` must be today or later.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        mut record: product_record::Model,
    ) -> Result<product_record::Model, ServiceError> {
        if record.last_update_date < today() {
            return Err(ServiceError::DatePast(PAST_DATE_MESSAGE.to_string()));
        }

        record.id = self
            .repository
            .save(record.clone())
            .await
            .map_err(|e| e.with_referent("product does not exist"))?;

        info!(product_record_id = record.id, "Product record created");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::product_record_repository::MockProductRecordRepository;
    use assert_matches::assert_matches;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;

    fn record(date: NaiveDate) -> product_record::Model {
        product_record::Model {
            id: 0,
            last_update_date: date,
            purchase_price: Decimal::new(1999, 2),
            sale_price: Decimal::new(2999, 2),
            product_id: 1,
        }
    }

    #[tokio::test]
    async fn yesterday_is_rejected_before_storage() {
        let mut repo = MockProductRecordRepository::new();
        repo.expect_save().never();

        let service = ProductRecordService::new(Arc::new(repo));
        let err = service
            .create(record(today() - Duration::days(1)))
            .await
            .unwrap_err();

        assert_matches!(err, ServiceError::DatePast(ref m) if m == PAST_DATE_MESSAGE);
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn today_is_accepted() {
        let mut repo = MockProductRecordRepository::new();
        repo.expect_save().returning(|_| Ok(3));

        let service = ProductRecordService::new(Arc::new(repo));
        assert_eq!(service.create(record(today())).await.unwrap().id, 3);
    }

    #[tokio::test]
    async fn unknown_product_is_named() {
        let mut repo = MockProductRecordRepository::new();
        repo.expect_save()
            .returning(|_| Err(ServiceError::ForeignKeyMissing("fk".into())));

        let service = ProductRecordService::new(Arc::new(repo));
        let err = service.create(record(today())).await.unwrap_err();
        assert_eq!(err.to_string(), "product does not exist");
    }
}
