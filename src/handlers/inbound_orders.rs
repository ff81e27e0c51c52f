use super::common::{bind_json, created, BodyPolicy};
use crate::{
    common::parse_date, entities::inbound_order, errors::ServiceError, record_err, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

pub fn inbound_orders_routes() -> Router<AppState> {
    Router::new().route("/", post(create_inbound_order))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInboundOrderRequest {
    #[validate(length(min = 1))]
    pub order_date: String,
    #[validate(length(min = 1))]
    pub order_number: String,
    #[validate(range(min = 1))]
    pub employee_id: i32,
    #[validate(range(min = 1))]
    pub product_batch_id: i32,
    #[validate(range(min = 1))]
    pub warehouse_id: i32,
}

impl TryFrom<CreateInboundOrderRequest> for inbound_order::Model {
    type Error = ServiceError;

    fn try_from(req: CreateInboundOrderRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: 0,
            order_date: parse_date(&req.order_date)?,
            order_number: req.order_number,
            employee_id: req.employee_id,
            product_batch_id: req.product_batch_id,
            warehouse_id: req.warehouse_id,
        })
    }
}

async fn create_inbound_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateInboundOrderRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let order = record_err!(inbound_order::Model::try_from(request))?;
    let order = record_err!(state.services.inbound_orders.create(order).await)?;
    Ok(created(order))
}
