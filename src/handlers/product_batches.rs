use super::common::{bind_json, created, BodyPolicy};
use crate::{
    common::parse_date, entities::product_batch, errors::ServiceError, record_err, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

pub fn product_batches_routes() -> Router<AppState> {
    Router::new().route("/", post(create_product_batch))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductBatchRequest {
    #[validate(range(min = 1))]
    pub batch_number: i32,
    #[validate(range(min = 0))]
    pub current_quantity: i32,
    pub current_temperature: i32,
    #[validate(length(min = 1))]
    pub due_date: String,
    #[validate(range(min = 0))]
    pub initial_quantity: i32,
    #[validate(length(min = 1))]
    pub manufacturing_date: String,
    #[validate(range(min = 0, max = 23))]
    pub manufacturing_hour: i32,
    pub minimum_temperature: i32,
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub section_id: i32,
}

impl TryFrom<CreateProductBatchRequest> for product_batch::Model {
    type Error = ServiceError;

    fn try_from(req: CreateProductBatchRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: 0,
            batch_number: req.batch_number,
            current_quantity: req.current_quantity,
            current_temperature: req.current_temperature,
            due_date: parse_date(&req.due_date)?,
            initial_quantity: req.initial_quantity,
            manufacturing_date: parse_date(&req.manufacturing_date)?,
            manufacturing_hour: req.manufacturing_hour,
            minimum_temperature: req.minimum_temperature,
            product_id: req.product_id,
            section_id: req.section_id,
        })
    }
}

async fn create_product_batch(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductBatchRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = record_err!(bind_json(payload, BodyPolicy::Strict))?;
    let batch = record_err!(product_batch::Model::try_from(request))?;
    let batch = record_err!(state.services.product_batches.create(batch).await)?;
    Ok(created(batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn request(due_date: &str) -> CreateProductBatchRequest {
        CreateProductBatchRequest {
            batch_number: 111,
            current_quantity: 200,
            current_temperature: 20,
            due_date: due_date.to_string(),
            initial_quantity: 10,
            manufacturing_date: "2030-04-01".to_string(),
            manufacturing_hour: 10,
            minimum_temperature: 5,
            product_id: 1,
            section_id: 1,
        }
    }

    #[test]
    fn wire_dates_are_parsed() {
        let batch = product_batch::Model::try_from(request("2030-04-04")).unwrap();
        assert_eq!(batch.due_date, NaiveDate::from_ymd_opt(2030, 4, 4).unwrap());
        assert_eq!(batch.id, 0);
    }

    #[test]
    fn unparseable_date_is_a_bad_request() {
        let err = product_batch::Model::try_from(request("04/04/2030")).unwrap_err();
        assert_matches!(err, ServiceError::DateInvalid(_));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn manufacturing_hour_is_bounded() {
        let mut req = request("2030-04-04");
        req.manufacturing_hour = 24;
        assert!(req.validate().is_err());
    }
}
