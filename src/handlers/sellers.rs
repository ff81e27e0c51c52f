use super::common::{bind_json, created, no_content, ok, parse_id, BodyPolicy};
use crate::{
    entities::seller, errors::ServiceError, record_err, services::sellers::SellerPatch, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

pub fn sellers_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sellers).post(create_seller))
        .route(
            "/:id",
            get(get_seller).patch(update_seller).delete(delete_seller),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSellerRequest {
    #[validate(range(min = 1))]
    pub cid: i32,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub telephone: String,
    #[validate(length(min = 1))]
    pub locality_id: String,
}

impl From<CreateSellerRequest> for seller::Model {
    fn from(req: CreateSellerRequest) -> Self {
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

async fn list_sellers(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let sellers = record_err!(state.services.sellers.get_all().await)?;
    Ok(ok(sellers))
}

async fn get_seller(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let seller = record_err!(state.services.sellers.get(id).await)?;
    Ok(ok(seller))
}

async fn create_seller(
    State(state): State<AppState>,
    payload: Result<Json<CreateSellerRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Strict))?;
    let seller = record_err!(state.services.sellers.create(request.into()).await)?;
    Ok(created(seller))
}

async fn update_seller(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SellerPatch>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let patch = record_err!(bind_json(payload, BodyPolicy::Strict))?;
    let seller = record_err!(state.services.sellers.update(id, patch).await)?;
    Ok(ok(seller))
}

async fn delete_seller(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    record_err!(state.services.sellers.delete(id).await)?;
    Ok(no_content())
}
