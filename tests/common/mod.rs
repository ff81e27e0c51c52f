#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use freshstock_api::{app_router, common::format_date, config::AppConfig, db, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper harness for spinning up the full router over an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with a fresh, migrated schema.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // One connection, otherwise every pooled connection sees its own empty database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self { router, state }
    }

    /// Sends a request through the router and returns the status and decoded body.
    /// An empty body decodes to `Value::Null`.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map(|value| value.to_string());
        self.request_raw(method, uri, body.as_deref()).await
    }

    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        raw_body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match raw_body {
            Some(raw) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(raw.to_string())
            }
            None => Body::empty(),
        };

        let response = self.send(builder.body(body).expect("request")).await;

        let status = response.status();
        (status, response_json(response.into_body()).await)
    }

    /// Sends a prepared request and hands back the raw response.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// POSTs and asserts `201`, returning the created id.
    pub async fn create(&self, uri: &str, body: Value) -> i64 {
        let (status, body) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "create {uri} failed: {body}");
        body["data"]["id"].as_i64().expect("created id")
    }

    pub async fn seed_locality(&self, id: &str) {
        let (status, body) = self
            .post(
                "/api/v1/localities",
                json!({
                    "id": id,
                    "locality_name": "Palermo",
                    "province_name": "Buenos Aires",
                    "country_name": "Argentina"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed locality failed: {body}");
    }

    pub async fn seed_warehouse(&self, code: &str) -> i64 {
        self.create(
            "/api/v1/warehouses",
            json!({
                "address": "Av. Siempre Viva 742",
                "telephone": "555-0100",
                "warehouse_code": code,
                "minimum_capacity": 10,
                "minimum_temperature": -10
            }),
        )
        .await
    }

    pub async fn seed_employee(&self, card: &str, warehouse_id: i64) -> i64 {
        self.create(
            "/api/v1/employees",
            json!({
                "card_number_id": card,
                "first_name": "Lucia",
                "last_name": "Gomez",
                "warehouse_id": warehouse_id
            }),
        )
        .await
    }

    pub async fn seed_buyer(&self, card: &str) -> i64 {
        self.create(
            "/api/v1/buyers",
            json!({ "card_number_id": card, "first_name": "Ana", "last_name": "Diaz" }),
        )
        .await
    }

    /// Frozen-goods section with the given number in `warehouse_id`.
    pub async fn seed_section(&self, number: i64, warehouse_id: i64) -> i64 {
        self.create(
            "/api/v1/sections",
            json!({
                "section_number": number,
                "current_temperature": -1,
                "minimum_temperature": -5,
                "current_capacity": 20,
                "minimum_capacity": 5,
                "maximum_capacity": 50,
                "warehouse_id": warehouse_id,
                "product_type_id": 3
            }),
        )
        .await
    }

    pub async fn seed_product(&self, code: &str) -> i64 {
        self.create(
            "/api/v1/products",
            json!({
                "description": "Helado de dulce de leche",
                "expiration_rate": 0.5,
                "freezing_rate": 1.5,
                "height": 10.0,
                "length": 20.0,
                "width": 15.0,
                "net_weight": 1.0,
                "product_code": code,
                "recommended_freezing_temperature": -18.0,
                "product_type_id": 3
            }),
        )
        .await
    }

    pub async fn seed_batch(&self, number: i64, product_id: i64, section_id: i64) -> i64 {
        self.create(
            "/api/v1/productBatches",
            json!({
                "batch_number": number,
                "current_quantity": 200,
                "current_temperature": -10,
                "due_date": "2030-04-04",
                "initial_quantity": 250,
                "manufacturing_date": "2030-04-01",
                "manufacturing_hour": 10,
                "minimum_temperature": -20,
                "product_id": product_id,
                "section_id": section_id
            }),
        )
        .await
    }
}

pub async fn response_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.expect("read body");
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is json")
    }
}

/// Wire form of a date `days` away from today.
pub fn date_from_today(days: i64) -> String {
    format_date(Utc::now().date_naive() + Duration::days(days))
}
