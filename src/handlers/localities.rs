use super::common::{bind_json, bind_query, created, ok, BodyPolicy, ReportQuery};
use crate::{entities::locality, errors::ServiceError, record_err, AppState};
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

pub fn localities_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_localities).post(create_locality))
        .route("/reportSellers", get(report_sellers))
        .route("/reportCarries", get(report_carries))
        .route("/:id", get(get_locality))
}

/// The id is a caller-chosen code such as a postal code.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocalityRequest {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub locality_name: String,
    #[validate(length(min = 1))]
    pub province_name: String,
    #[validate(length(min = 1))]
    pub country_name: String,
}

impl From<CreateLocalityRequest> for locality::Model {
    fn from(req: CreateLocalityRequest) -> Self {
        Self {
            id: req.id,
            locality_name: req.locality_name,
            province_name: req.province_name,
            country_name: req.country_name,
        }
    }
}

async fn list_localities(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let localities = record_err!(state.services.localities.get_all().await)?;
    Ok(ok(localities))
}

async fn get_locality(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let locality = record_err!(state.services.localities.get(&id).await)?;
    Ok(ok(locality))
}

async fn create_locality(
    State(state): State<AppState>,
    payload: Result<Json<CreateLocalityRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Strict))?;
    let locality = record_err!(state.services.localities.create(request.into()).await)?;
    Ok(created(locality))
}

async fn report_sellers(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let query = record_err!(bind_query(query))?;
    let rows = record_err!(
        state
            .services
            .localities
            .report_sellers(query.text_id())
            .await
    )?;
    Ok(ok(rows))
}

async fn report_carries(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let query = record_err!(bind_query(query))?;
    let rows = record_err!(
        state
            .services
            .localities
            .report_carries(query.text_id())
            .await
    )?;
    Ok(ok(rows))
}
