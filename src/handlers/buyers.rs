use super::common::{
    bind_json, bind_query, created, no_content, ok, parse_id, BodyPolicy, ReportQuery,
};
use crate::{
    entities::buyer, errors::ServiceError, record_err, services::buyers::BuyerPatch, AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

pub fn buyers_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_buyers).post(create_buyer))
        .route("/reportPurchaseOrders", get(report_purchase_orders))
        .route("/:id/purchaseOrders", get(list_purchase_orders))
        .route(
            "/:id",
            get(get_buyer).patch(update_buyer).delete(delete_buyer),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBuyerRequest {
    #[validate(length(min = 1))]
    pub card_number_id: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
}

impl From<CreateBuyerRequest> for buyer::Model {
    fn from(req: CreateBuyerRequest) -> Self {
        Self {
            id: 0,
            card_number_id: req.card_number_id,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

async fn list_buyers(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let buyers = record_err!(state.services.buyers.get_all().await)?;
    Ok(ok(buyers))
}

async fn get_buyer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let buyer = record_err!(state.services.buyers.get(id).await)?;
    Ok(ok(buyer))
}

async fn create_buyer(
    State(state): State<AppState>,
    payload: Result<Json<CreateBuyerRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let buyer = record_err!(state.services.buyers.create(request.into()).await)?;
    Ok(created(buyer))
}

async fn update_buyer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BuyerPatch>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let patch = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let buyer = record_err!(state.services.buyers.update(id, patch).await)?;
    Ok(ok(buyer))
}

async fn delete_buyer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    record_err!(state.services.buyers.delete(id).await)?;
    Ok(no_content())
}

/// Also mounted at `/reportPurchaseOrder` on the API root.
pub(crate) async fn report_purchase_orders(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let query = record_err!(bind_query(query))?;
    let buyer_id = record_err!(query.int_id())?;
    let rows = record_err!(
        state
            .services
            .buyers
            .report_purchase_orders(buyer_id)
            .await
    )?;
    Ok(ok(rows))
}

async fn list_purchase_orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let orders = record_err!(state.services.purchase_orders.get_by_buyer(id).await)?;
    Ok(ok(orders))
}
