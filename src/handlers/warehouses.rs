use super::common::{bind_json, created, no_content, ok, parse_id, BodyPolicy};
use crate::{
    entities::warehouse, errors::ServiceError, record_err, services::warehouses::WarehousePatch,
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

pub fn warehouses_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/:id",
            get(get_warehouse)
                .patch(update_warehouse)
                .delete(delete_warehouse),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWarehouseRequest {
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub telephone: String,
    #[validate(length(min = 1))]
    pub warehouse_code: String,
    #[validate(range(min = 0))]
    pub minimum_capacity: i32,
    pub minimum_temperature: i32,
}

impl From<CreateWarehouseRequest> for warehouse::Model {
    fn from(req: CreateWarehouseRequest) -> Self {
        Self {
            id: 0,
            address: req.address,
            telephone: req.telephone,
            warehouse_code: req.warehouse_code,
            minimum_capacity: req.minimum_capacity,
            minimum_temperature: req.minimum_temperature,
        }
    }
}

async fn list_warehouses(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let warehouses = record_err!(state.services.warehouses.get_all().await)?;
    Ok(ok(warehouses))
}

async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let warehouse = record_err!(state.services.warehouses.get(id).await)?;
    Ok(ok(warehouse))
}

async fn create_warehouse(
    State(state): State<AppState>,
    payload: Result<Json<CreateWarehouseRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Strict))?;
    let warehouse = record_err!(state.services.warehouses.create(request.into()).await)?;
    Ok(created(warehouse))
}

async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<WarehousePatch>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let patch = record_err!(bind_json(payload, BodyPolicy::Strict))?;
    let warehouse = record_err!(state.services.warehouses.update(id, patch).await)?;
    Ok(ok(warehouse))
}

async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    record_err!(state.services.warehouses.delete(id).await)?;
    Ok(no_content())
}
