mod common;

use axum::http::StatusCode;
use common::{date_from_today, TestApp};
use serde_json::{json, Value};

fn record_body(date: String, product_id: i64) -> Value {
    json!({
        "last_update_date": date,
        "purchase_price": 10.5,
        "sale_price": 15.0,
        "product_id": product_id
    })
}

#[tokio::test]
async fn product_record_dated_yesterday_is_rejected() {
    let app = TestApp::new().await;
    let product = app.seed_product("HEL-1").await;

    let (status, body) = app
        .post(
            "/api/v1/productRecords",
            record_body(date_from_today(-1), product),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({"code": "conflict", "message": "input date cannot be less than today"})
    );
}

#[tokio::test]
async fn product_record_dated_today_is_created() {
    let app = TestApp::new().await;
    let product = app.seed_product("HEL-1").await;
    let today = date_from_today(0);

    let (status, body) = app
        .post("/api/v1/productRecords", record_body(today.clone(), product))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["last_update_date"], today.as_str());
    assert_eq!(body["data"]["product_id"], product);
}

#[tokio::test]
async fn product_record_for_unknown_product_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/productRecords", record_body(date_from_today(3), 77))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "product does not exist");
}

#[tokio::test]
async fn unparseable_dates_are_bad_requests() {
    let app = TestApp::new().await;
    let product = app.seed_product("HEL-1").await;

    let (status, body) = app
        .post(
            "/api/v1/productRecords",
            record_body("31/12/2030".to_string(), product),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn records_report_counts_per_product() {
    let app = TestApp::new().await;
    let tracked = app.seed_product("HEL-1").await;
    let untracked = app.seed_product("HEL-2").await;
    for days in [0, 1, 2] {
        app.create(
            "/api/v1/productRecords",
            record_body(date_from_today(days), tracked),
        )
        .await;
    }

    let (status, body) = app.get("/api/v1/products/reportRecords").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([
            {"product_id": tracked, "description": "Helado de dulce de leche", "records_count": 3},
            {"product_id": untracked, "description": "Helado de dulce de leche", "records_count": 0}
        ])
    );

    let (status, body) = app
        .get(&format!("/api/v1/products/reportRecords?id={untracked}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["records_count"], 0);

    let (status, _) = app.get("/api/v1/products/reportRecords?id=404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_lifecycle_and_zero_updates() {
    let app = TestApp::new().await;
    let id = app.seed_product("HEL-1").await;
    let uri = format!("/api/v1/products/{id}");

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["seller_id"].is_null());

    let (status, body) = app
        .patch(&uri, json!({"recommended_freezing_temperature": 0.0}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["recommended_freezing_temperature"], 0.0);
    assert_eq!(body["data"]["product_code"], "HEL-1");

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_product_code_conflicts() {
    let app = TestApp::new().await;
    app.seed_product("HEL-1").await;

    let (status, body) = app
        .post(
            "/api/v1/products",
            json!({
                "description": "Otro",
                "expiration_rate": 1.0,
                "freezing_rate": 1.0,
                "height": 1.0,
                "length": 1.0,
                "width": 1.0,
                "net_weight": 1.0,
                "product_code": "HEL-1",
                "recommended_freezing_temperature": -5.0,
                "product_type_id": 1
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "product_code already exists");
}

#[tokio::test]
async fn product_batch_policies() {
    let app = TestApp::new().await;
    let warehouse = app.seed_warehouse("W-1").await;
    let section = app.seed_section(1, warehouse).await;
    let product = app.seed_product("HEL-1").await;
    let batch = app.seed_batch(111, product, section).await;
    assert!(batch > 0);

    // Duplicate batch number
    let duplicate = json!({
        "batch_number": 111,
        "current_quantity": 1,
        "current_temperature": 1,
        "due_date": "2030-01-01",
        "initial_quantity": 1,
        "manufacturing_date": "2030-01-01",
        "manufacturing_hour": 1,
        "minimum_temperature": 1,
        "product_id": product,
        "section_id": section
    });
    let (status, body) = app.post("/api/v1/productBatches", duplicate.clone()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "batch_number already exists");

    // Unknown section is a business conflict
    let mut orphan = duplicate.clone();
    orphan["batch_number"] = json!(112);
    orphan["section_id"] = json!(999);
    let (status, _) = app.post("/api/v1/productBatches", orphan).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Rule violations are bad requests for batches
    let mut invalid = duplicate.clone();
    invalid["batch_number"] = json!(113);
    invalid["manufacturing_hour"] = json!(25);
    let (status, _) = app.post("/api/v1/productBatches", invalid).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing fields are unprocessable
    let (status, _) = app
        .post("/api/v1/productBatches", json!({"batch_number": 114}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn inbound_order_names_the_missing_referent() {
    let app = TestApp::new().await;
    let warehouse = app.seed_warehouse("W-1").await;
    let employee = app.seed_employee("E-1", warehouse).await;
    let section = app.seed_section(1, warehouse).await;
    let product = app.seed_product("HEL-1").await;
    let batch = app.seed_batch(1, product, section).await;

    let cases = [
        (999, batch, warehouse, "employee does not exist"),
        (employee, 999, warehouse, "product batch does not exist"),
        (employee, batch, 999, "warehouse does not exist"),
    ];

    for (number, (employee_id, batch_id, warehouse_id, message)) in cases.into_iter().enumerate() {
        let (status, body) = app
            .post(
                "/api/v1/inboundOrders",
                json!({
                    "order_date": "2030-06-01",
                    "order_number": format!("IN-{number}"),
                    "employee_id": employee_id,
                    "product_batch_id": batch_id,
                    "warehouse_id": warehouse_id
                }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{message}");
        assert_eq!(body["message"], message);
    }

    let created = app
        .create(
            "/api/v1/inboundOrders",
            json!({
                "order_date": "2030-06-01",
                "order_number": "IN-OK",
                "employee_id": employee,
                "product_batch_id": batch,
                "warehouse_id": warehouse
            }),
        )
        .await;
    assert!(created > 0);

    let (status, body) = app
        .post(
            "/api/v1/inboundOrders",
            json!({
                "order_date": "2030-06-01",
                "order_number": "IN-OK",
                "employee_id": employee,
                "product_batch_id": batch,
                "warehouse_id": warehouse
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "order_number already exists");
}
