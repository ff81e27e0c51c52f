use crate::{
    entities::locality,
    errors::ServiceError,
    reports::{CarriesPerLocality, SellersPerLocality},
    repositories::LocalityRepository,
};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct LocalityService {
    repository: Arc<dyn LocalityRepository>,
}

impl LocalityService {
    pub fn new(repository: Arc<dyn LocalityRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<locality::Model>, ServiceError> {
        self.repository.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<locality::Model, ServiceError> {
        self.repository.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, locality: locality::Model) -> Result<locality::Model, ServiceError> {
        if self.repository.exists(&locality.id).await? {
            return Err(ServiceError::already_exists("id"));
        }

        self.repository
            .save(locality.clone())
            .await
            .map_err(|e| e.with_conflict_on("id"))?;

        info!(locality_id = %locality.id, "Locality created");
        Ok(locality)
    }

    #[instrument(skip(self))]
    pub async fn report_sellers(
        &self,
        locality_id: Option<String>,
    ) -> Result<Vec<SellersPerLocality>, ServiceError> {
        self.repository.report_sellers(locality_id).await
    }

    #[instrument(skip(self))]
    pub async fn report_carries(
        &self,
        locality_id: Option<String>,
    ) -> Result<Vec<CarriesPerLocality>, ServiceError> {
        self.repository.report_carries(locality_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::locality_repository::MockLocalityRepository;
    use assert_matches::assert_matches;
    use mockall::predicate::eq;

    fn locality(id: &str) -> locality::Model {
        locality::Model {
            id: id.into(),
            locality_name: "Rosario".into(),
            province_name: "Santa Fe".into(),
            country_name: "Argentina".into(),
        }
    }

    #[tokio::test]
    async fn create_keeps_the_caller_key() {
        let mut repo = MockLocalityRepository::new();
        repo.expect_exists().returning(|_| Ok(false));
        repo.expect_save().times(1).returning(|_| Ok(()));

        let service = LocalityService::new(Arc::new(repo));
        assert_eq!(service.create(locality("2000")).await.unwrap().id, "2000");
    }

    #[tokio::test]
    async fn duplicate_key_conflicts() {
        let mut repo = MockLocalityRepository::new();
        repo.expect_exists().returning(|_| Ok(true));
        repo.expect_save().never();

        let service = LocalityService::new(Arc::new(repo));
        assert_matches!(
            service.create(locality("2000")).await,
            Err(ServiceError::AlreadyExists(ref m)) if m == "id already exists"
        );
    }

    #[tokio::test]
    async fn report_filter_is_passed_through() {
        let mut repo = MockLocalityRepository::new();
        repo.expect_report_sellers()
            .with(eq(Some("9999".to_string())))
            .returning(|_| Err(ServiceError::not_found("locality")));

        let service = LocalityService::new(Arc::new(repo));
        assert_matches!(
            service.report_sellers(Some("9999".into())).await,
            Err(ServiceError::NotFound(_))
        );
    }
}
