use super::common::{bind_json, created, BodyPolicy};
use crate::{
    common::parse_date, entities::product_record, errors::ServiceError, record_err, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    routing::post,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

pub fn product_records_routes() -> Router<AppState> {
    Router::new().route("/", post(create_product_record))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRecordRequest {
    #[validate(length(min = 1))]
    pub last_update_date: String,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    #[validate(range(min = 1))]
    pub product_id: i32,
}

impl TryFrom<CreateProductRecordRequest> for product_record::Model {
    type Error = ServiceError;

    fn try_from(req: CreateProductRecordRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: 0,
            last_update_date: parse_date(&req.last_update_date)?,
            purchase_price: req.purchase_price,
            sale_price: req.sale_price,
            product_id: req.product_id,
        })
    }
}

async fn create_product_record(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRecordRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let record = record_err!(product_record::Model::try_from(request))?;
    let record = record_err!(state.services.product_records.create(record).await)?;
    Ok(created(record))
}
