use super::common::{
    bind_json, bind_query, created, no_content, ok, parse_id, BodyPolicy, ReportQuery,
};
use crate::{
    entities::section, errors::ServiceError, record_err, services::sections::SectionPatch,
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

pub fn sections_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sections).post(create_section))
        .route("/reportProducts", get(report_products))
        .route(
            "/:id",
            get(get_section).patch(update_section).delete(delete_section),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSectionRequest {
    #[validate(range(min = 1))]
    pub section_number: i32,
    pub current_temperature: i32,
    pub minimum_temperature: i32,
    #[validate(range(min = 0))]
    pub current_capacity: i32,
    #[validate(range(min = 0))]
    pub minimum_capacity: i32,
    #[validate(range(min = 0))]
    pub maximum_capacity: i32,
    #[validate(range(min = 1))]
    pub warehouse_id: i32,
    #[validate(range(min = 1))]
    pub product_type_id: i32,
}

impl From<CreateSectionRequest> for section::Model {
    fn from(req: CreateSectionRequest) -> Self {
        Self {
            id: 0,
            section_number: req.section_number,
            current_temperature: req.current_temperature,
            minimum_temperature: req.minimum_temperature,
            current_capacity: req.current_capacity,
            minimum_capacity: req.minimum_capacity,
            maximum_capacity: req.maximum_capacity,
            warehouse_id: req.warehouse_id,
            product_type_id: req.product_type_id,
        }
    }
}

async fn list_sections(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let sections = record_err!(state.services.sections.get_all().await)?;
    Ok(ok(sections))
}

async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let section = record_err!(state.services.sections.get(id).await)?;
    Ok(ok(section))
}

async fn create_section(
    State(state): State<AppState>,
    payload: Result<Json<CreateSectionRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Lenient))?;
    let section = record_err!(state.services.sections.create(request.into()).await)?;
    Ok(created(section))
}

// Section PATCH reports every binding failure as 400, unlike its siblings.
async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SectionPatch>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    let patch = record_err!(bind_json(payload, BodyPolicy::AllBadRequest))?;
    let section = record_err!(state.services.sections.update(id, patch).await)?;
    Ok(ok(section))
}

async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = record_err!(parse_id(&id))?;
    record_err!(state.services.sections.delete(id).await)?;
    Ok(no_content())
}

async fn report_products(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let query = record_err!(bind_query(query))?;
    let section_id = record_err!(query.int_id())?;
    let rows = record_err!(state.services.sections.report_products(section_id).await)?;
    Ok(ok(rows))
}
