use super::common::{
    bind_json, bind_query, created, no_content, ok, parse_id, BodyPolicy, ReportQuery,
};
use crate::{
    entities::employee, errors::ServiceError, record_err, services::employees::EmployeePatch,
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

pub fn employees_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/reportInboundOrders", get(report_inbound_orders))
        .route("/reportInboundOrders/:id", get(report_inbound_orders_for))
        .route(
            "/:id",
            get(get_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1))]
    pub card_number_id: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(range(min = 1))]
    pub warehouse_id: i32,
}

impl From<CreateEmployeeRequest> for employee::Model {
    fn from(req: CreateEmployeeRequest) -> Self {
        Self {
            id: 0,
            card_number_id: req.card_number_id,
            first_name: req.first_name,
            last_name: req.last_name,
            warehouse_id: req.warehouse_id,
        }
    }
}

async fn list_employees(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let employees = record_err!(state.services.employees.get_all().await)?;
    Ok(ok(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let employee = record_err!(state.services.employees.get(id).await)?;
    Ok(ok(employee))
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let employee = record_err!(state.services.employees.create(request.into()).await)?;
    Ok(created(employee))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let patch = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let employee = record_err!(state.services.employees.update(id, patch).await)?;
    Ok(ok(employee))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    record_err!(state.services.employees.delete(id).await)?;
    Ok(no_content())
}

async fn report_inbound_orders(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let query = record_err!(bind_query(query))?;
    let employee_id = record_err!(query.int_id())?;
    let rows = record_err!(
        state
            .services
            .employees
            .report_inbound_orders(employee_id)
            .await
    )?;
    Ok(ok(rows))
}

async fn report_inbound_orders_for(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let rows = record_err!(
        state
            .services
            .employees
            .report_inbound_orders(Some(id))
            .await
    )?;
    Ok(ok(rows))
}
