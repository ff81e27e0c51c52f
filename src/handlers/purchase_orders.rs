use super::common::{bind_json, created, BodyPolicy};
use crate::{
    common::parse_date, entities::purchase_order, errors::ServiceError, record_err, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

/// Listing by buyer lives under `/buyers/:id/purchaseOrders`.
pub fn purchase_orders_routes() -> Router<AppState> {
    Router::new().route("/", post(create_purchase_order))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePurchaseOrderRequest {
    #[validate(length(min = 1))]
    pub order_number: String,
    #[validate(length(min = 1))]
    pub order_date: String,
    #[validate(length(min = 1))]
    pub tracking_code: String,
    #[validate(range(min = 1))]
    pub buyer_id: i32,
    #[validate(range(min = 1))]
    pub product_record_id: i32,
    #[validate(range(min = 1))]
    pub order_status_id: i32,
}

impl TryFrom<CreatePurchaseOrderRequest> for purchase_order::Model {
    type Error = ServiceError;

    fn try_from(req: CreatePurchaseOrderRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: 0,
            order_number: req.order_number,
            order_date: parse_date(&req.order_date)?,
            tracking_code: req.tracking_code,
            buyer_id: req.buyer_id,
            product_record_id: req.product_record_id,
            order_status_id: req.order_status_id,
        })
    }
}

async fn create_purchase_order(
    State(state): State<AppState>,
    payload: Result<Json<CreatePurchaseOrderRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let order = record_err!(purchase_order::Model::try_from(request))?;
    let order = record_err!(state.services.purchase_orders.create(order).await)?;
    Ok(created(order))
}
