use crate::{
    entities::carry::{self, CID_MAX_LEN},
    errors::ServiceError,
    repositories::CarryRepository,
};
use std::sync::Arc;
use tracing::{info, instrument};

const UNIQUE_KEY: &str = "cid";

#[derive(Clone)]
pub struct CarryService {
    repository: Arc<dyn CarryRepository>,
}

impl CarryService {
    pub fn new(repository: Arc<dyn CarryRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, mut carry: carry::Model) -> Result<carry::Model, ServiceError> {
        if carry.cid.chars().count() > CID_MAX_LEN {
            return Err(ServiceError::FieldTooLong(format!(
                "cid cannot be longer than {CID_MAX_LEN} characters"
            )));
        }

        if self.repository.exists(&carry.cid).await? {
            return Err(ServiceError::already_exists(UNIQUE_KEY));
        }

        carry.id = self
            .repository
            .save(carry.clone())
            .await
            .map_err(|e| {
                e.with_conflict_on(UNIQUE_KEY)
                    .with_referent("locality does not exist")
            })?;

        info!(carry_id = carry.id, "Carry created");
        Ok(carry)
    }
}
