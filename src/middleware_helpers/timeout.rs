use crate::errors::ServiceError;
use axum::{
    http::StatusCode,
    middleware::map_response,
    response::{IntoResponse, Response},
    Router,
};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Bounds every request by `timeout`; an expired request answers with the
/// regular error envelope.
pub fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(map_response(timeout_envelope))
}

/// The timeout layer answers with a bare `408`; render it as a `ServiceError`
/// and record it like any other surfaced error.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    let err = ServiceError::Timeout;
    crate::logging::event_logger()
        .record(crate::call_site!(), &err)
        .await;
    err.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        routing::get,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route("/fast", get(|| async { "on time" }));
        with_request_timeout(router, Duration::from_millis(20))
    }

    async fn call(uri: &str) -> (StatusCode, axum::body::Bytes) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, to_bytes(response.into_body(), usize::MAX).await.unwrap())
    }

    #[tokio::test]
    async fn expired_request_renders_error_envelope() {
        let (status, body) = call("/slow").await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            payload,
            json!({"code": "request_timeout", "message": "request timed out"})
        );
    }

    #[tokio::test]
    async fn timely_responses_pass_through() {
        let (status, body) = call("/fast").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"on time");
    }
}
