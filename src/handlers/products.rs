use super::common::{
    bind_json, bind_query, created, no_content, ok, parse_id, BodyPolicy, ReportQuery,
};
use crate::{
    entities::product, errors::ServiceError, record_err, services::products::ProductPatch,
    AppState,
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

pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/reportRecords", get(report_records))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub description: String,
    pub expiration_rate: f64,
    pub freezing_rate: f64,
    pub height: f64,
    pub length: f64,
    pub width: f64,
    pub net_weight: f64,
    #[validate(length(min = 1))]
    pub product_code: String,
    pub recommended_freezing_temperature: f64,
    #[validate(range(min = 1))]
    pub product_type_id: i32,
    #[validate(range(min = 1))]
    pub seller_id: Option<i32>,
}

impl From<CreateProductRequest> for product::Model {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            id: 0,
            description: req.description,
            expiration_rate: req.expiration_rate,
            freezing_rate: req.freezing_rate,
            height: req.height,
            length: req.length,
            width: req.width,
            net_weight: req.net_weight,
            product_code: req.product_code,
            recommended_freezing_temperature: req.recommended_freezing_temperature,
            product_type_id: req.product_type_id,
            seller_id: req.seller_id,
        }
    }
}

async fn list_products(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let products = record_err!(state.services.products.get_all().await)?;
    Ok(ok(products))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let product = record_err!(state.services.products.get(id).await)?;
    Ok(ok(product))
}

async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let product = record_err!(state.services.products.create(request.into()).await)?;
    Ok(created(product))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let patch = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let product = record_err!(state.services.products.update(id, patch).await)?;
    Ok(ok(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    record_err!(state.services.products.delete(id).await)?;
    Ok(no_content())
}

async fn report_records(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let query = record_err!(bind_query(query))?;
    let product_id = record_err!(query.int_id())?;
    let rows = record_err!(state.services.products.report_records(product_id).await)?;
    Ok(ok(rows))
}
