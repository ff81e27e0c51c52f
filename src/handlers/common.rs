use crate::errors::ServiceError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Success envelope: `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(DataResponse { data })).into_response()
}

pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(DataResponse { data })).into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Path ids are integers; anything else is `400 invalid id`.
pub fn parse_id(raw: &str) -> Result<i32, ServiceError> {
    raw.trim().parse::<i32>().map_err(|_| ServiceError::InvalidId)
}

/// How body-binding failures are reported for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// Malformed bodies and rule violations are both `422`.
    Lenient,
    /// Malformed bodies are `422`, rule violations `400`.
    Strict,
    /// Every binding failure is `400`.
    AllBadRequest,
}

/// Unwraps an extracted JSON body and runs its validation rules.
pub fn bind_json<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
    policy: BodyPolicy,
) -> Result<T, ServiceError> {
    let Json(body) = payload.map_err(|rejection| {
        let message = rejection.body_text();
        match policy {
            BodyPolicy::AllBadRequest => ServiceError::BadRequest(message),
            BodyPolicy::Lenient | BodyPolicy::Strict => ServiceError::BodyInvalid(message),
        }
    })?;

    body.validate().map_err(|e| {
        let message = format!("Validation failed: {}", e);
        match policy {
            BodyPolicy::Lenient => ServiceError::BodyInvalid(message),
            BodyPolicy::Strict | BodyPolicy::AllBadRequest => ServiceError::BadRequest(message),
        }
    })?;

    Ok(body)
}

/// `?id=` filter accepted by every report endpoint; blank means "all".
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub id: Option<String>,
}

/// Unwraps an extracted report filter; a malformed query string is `400`.
pub fn bind_query(
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<ReportQuery, ServiceError> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))
}

impl ReportQuery {
    pub fn text_id(&self) -> Option<String> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    pub fn int_id(&self) -> Result<Option<i32>, ServiceError> {
        self.text_id().as_deref().map(parse_id).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::{body::Body, extract::FromRequest, http::Request};
    use rstest::rstest;

    #[derive(Debug, Deserialize, Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    async fn extract(body: &'static str) -> Result<Json<Named>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        Json::<Named>::from_request(request, &()).await
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case(" 7 ", Some(7))]
    #[case("abc", None)]
    #[case("4.5", None)]
    #[case("", None)]
    fn parses_path_ids(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_id(raw).ok(), expected);
    }

    #[rstest]
    #[case(BodyPolicy::Lenient, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(BodyPolicy::Strict, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(BodyPolicy::AllBadRequest, StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn malformed_body_status(#[case] policy: BodyPolicy, #[case] status: StatusCode) {
        let err = bind_json(extract("{\"name\":").await, policy).unwrap_err();
        assert_eq!(err.status_code(), status);
    }

    #[rstest]
    #[case(BodyPolicy::Lenient, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(BodyPolicy::Strict, StatusCode::BAD_REQUEST)]
    #[case(BodyPolicy::AllBadRequest, StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn rule_violation_status(#[case] policy: BodyPolicy, #[case] status: StatusCode) {
        let err = bind_json(extract("{\"name\":\"\"}").await, policy).unwrap_err();
        assert_eq!(err.status_code(), status);
    }

    #[tokio::test]
    async fn missing_field_is_unprocessable() {
        assert_matches!(
            bind_json(extract("{}").await, BodyPolicy::Strict),
            Err(ServiceError::BodyInvalid(_))
        );
    }

    fn report_query(uri: &str) -> Result<Query<ReportQuery>, QueryRejection> {
        let uri: axum::http::Uri = uri.parse().unwrap();
        Query::try_from_uri(&uri)
    }

    #[test]
    fn repeated_report_filter_is_bad_request() {
        assert_matches!(
            bind_query(report_query("/report?id=1&id=2")),
            Err(ServiceError::BadRequest(_))
        );
        let query = bind_query(report_query("/report?id=5")).unwrap();
        assert_eq!(query.int_id().unwrap(), Some(5));
        let query = bind_query(report_query("/report")).unwrap();
        assert_eq!(query.text_id(), None);
    }

    #[test]
    fn blank_report_filter_means_all() {
        let query = ReportQuery {
            id: Some("  ".into()),
        };
        assert_eq!(query.int_id().unwrap(), None);

        let query = ReportQuery {
            id: Some("x".into()),
        };
        assert_matches!(query.int_id(), Err(ServiceError::InvalidId));
    }
}
