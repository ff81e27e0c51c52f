use super::common::{bind_json, created, BodyPolicy};
use crate::{entities::carry, errors::ServiceError, record_err, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

pub fn carries_routes() -> Router<AppState> {
    Router::new().route("/", post(create_carry))
}

/// `cid` length is bounded by the domain, not here, so an overlong value is
/// reported as `422` rather than a binding failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarryRequest {
    #[validate(length(min = 1))]
    pub cid: String,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub telephone: String,
    #[validate(length(min = 1))]
    pub locality_id: String,
}

impl From<CreateCarryRequest> for carry::Model {
    fn from(req: CreateCarryRequest) -> Self {
        Self {
            id: 0,
            cid: req.cid,
            company_name: req.company_name,
            address: req.address,
            telephone: req.telephone,
            locality_id: req.locality_id,
        }
    }
}

async fn create_carry(
    State(state): State<AppState>,
    payload: Result<Json<CreateCarryRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Strict))?;
    let carry = record_err!(state.services.carries.create(request.into()).await)?;
    Ok(created(carry))
}
