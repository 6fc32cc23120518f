//! Router-level integration tests with a scripted oracle.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use firmo_llm::{BooleanOracle, LlmError};
use firmo_rules::RuleEngine;
use firmo_server::router::build_router;
use firmo_server::state::AppState;
use firmo_server::store::Database;

// ── Harness ─────────────────────────────────────────────────────────

/// Oracle that always answers yes.
struct YesOracle;

#[async_trait]
impl BooleanOracle for YesOracle {
    async fn ask(&self, _question: &str, _context: &str) -> Result<bool, LlmError> {
        Ok(true)
    }
}

fn app() -> Router {
    let state = Arc::new(AppState {
        db: Database::new(),
        engine: RuleEngine::new(Some(Arc::new(YesOracle))),
    });
    build_router(state)
}

async fn send(app: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn acme() -> Value {
    json!({
        "name": "Acme Robotics",
        "url": "https://acme.example",
        "founded_year": 2015,
        "total_employees": 150,
        "headquarters_city": "Paris (France)",
        "employee_locations": "Paris; Lyon",
        "employee_growth_2y": 0.35,
        "description": "Industrial robot arms",
        "industry": "Technology"
    })
}

fn nordship() -> Value {
    json!({
        "name": "Nordship",
        "url": "https://nordship.example",
        "founded_year": 1998,
        "total_employees": 3200,
        "headquarters_city": "Oslo (Norway)",
        "employee_locations": "Oslo",
        "description": "Freight and logistics",
        "industry": "Logistics"
    })
}

// ── Health and users ────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_counts() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["companies"], 0);

    send(&app, "POST", "/companies/import", Some(json!([acme()]))).await;
    let (_, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(body["companies"], 1);
}

#[tokio::test]
async fn user_creation_returns_existing_record() {
    let app = app();

    let (status, first) = send(&app, "POST", "/users", Some(json!({"user_name": "alice"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, second) = send(&app, "POST", "/users", Some(json!({"user_name": "alice"}))).await;
    assert_eq!(first["id"], second["id"]);
}

// ── Imports ─────────────────────────────────────────────────────────

#[tokio::test]
async fn json_import_dedups_by_url() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/companies/import",
        Some(json!([acme(), nordship()])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported_records"], 2);
    assert_eq!(body["skipped_duplicates"], 0);

    let (_, body) = send(&app, "POST", "/companies/import", Some(json!([acme()]))).await;
    assert_eq!(body["imported_records"], 0);
    assert_eq!(body["skipped_duplicates"], 1);
}

#[tokio::test]
async fn csv_import_collects_row_errors() {
    let app = app();

    let csv = "company_name,url,founded_year,total_employees,headquarters_city,employee_locations,employee_growth_2Y,employee_growth_1Y,employee_growth_6M,description,industry\n\
               Acme Robotics,https://acme.example,2015,150,Paris (France),Paris,0.35,,,Robots,Technology\n\
               Mystery Co,https://mystery.example,unknown,12,Nowhere,Nowhere,,,,,\n";

    let request = Request::builder()
        .method("POST")
        .uri("/companies/import/csv")
        .header("content-type", "text/csv")
        .body(Body::from(csv))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["imported_records"], 1);
    assert_eq!(body["record_errors"], 1);
    assert_eq!(body["errors"], json!(["Mystery Co"]));
}

// ── Rule creation ───────────────────────────────────────────────────

fn established_tech_rule() -> Value {
    json!({
        "input": "Established tech companies",
        "feature_name": "is_established_tech",
        "match": 1,
        "default": 0,
        "operation": {
            "AND": [
                { "operator": "EQUALS", "target_object": "industry", "value": "Technology" },
                { "operator": "LESS_THAN", "target_object": "founded_year", "value": "2020" }
            ]
        }
    })
}

fn robot_rule() -> Value {
    json!({
        "input": "Robot companies",
        "feature_name": "builds_robots",
        "match": 1,
        "default": 0,
        "operation": {
            "operator": "LLM",
            "target_object": "description",
            "value": "Does this company build robots?"
        }
    })
}

#[tokio::test]
async fn rule_creation_is_idempotent() {
    let app = app();
    let payload = json!({ "user_name": "alice", "rules": [established_tech_rule()] });

    let (status, body) = send(&app, "POST", "/rules", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"].as_array().unwrap().len(), 1);
    assert_eq!(body["created"][0]["boolean_operator"], "AND");

    // Identical resubmission creates nothing.
    let (status, body) = send(&app, "POST", "/rules", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_rule_payloads_are_client_errors() {
    let app = app();

    // List-shaped operation block keeps its distinct message.
    let (status, body) = send(
        &app,
        "POST",
        "/rules",
        Some(json!({
            "user_name": "alice",
            "rules": [{
                "input": "r", "feature_name": "f",
                "operation": [{ "operator": "EQUALS", "target_object": "industry", "value": "x" }]
            }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "invalid boolean operator");

    let (status, body) = send(
        &app,
        "POST",
        "/rules",
        Some(json!({
            "user_name": "alice",
            "rules": [{ "input": "r", "feature_name": "f", "operation": "EQUALS" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "invalid operation block");

    let (status, _) = send(
        &app,
        "POST",
        "/rules",
        Some(json!({ "user_name": "", "rules": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Processing ──────────────────────────────────────────────────────

#[tokio::test]
async fn process_flow_end_to_end() {
    let app = app();

    send(
        &app,
        "POST",
        "/companies/import",
        Some(json!([acme(), nordship()])),
    )
    .await;
    send(
        &app,
        "POST",
        "/rules",
        Some(json!({
            "user_name": "alice",
            "rules": [established_tech_rule(), robot_rule()]
        })),
    )
    .await;

    let (status, rows) = send(
        &app,
        "POST",
        "/companies/process",
        Some(json!({
            "user_name": "alice",
            "urls": ["https://acme.example", "https://nordship.example"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // Companies come back in name order.
    assert_eq!(rows[0]["company"], "Acme Robotics");
    assert_eq!(rows[0]["is_established_tech"], 1);
    assert_eq!(rows[0]["builds_robots"], 1); // YesOracle affirms

    assert_eq!(rows[1]["company"], "Nordship");
    assert_eq!(rows[1]["is_established_tech"], 0);

    // Features and timestamps were recorded.
    let (_, companies) = send(&app, "GET", "/companies", None).await;
    let companies = companies.as_array().unwrap();
    assert_eq!(companies.len(), 2);
    for company in companies {
        assert_eq!(company["processed_features"].as_array().unwrap().len(), 2);
        assert!(!company["last_processed_at"].is_null());
        assert!(company["data"].get("id").is_none());
        assert!(company["data"].get("industry").is_some());
    }
}

#[tokio::test]
async fn process_requires_known_user_and_companies() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/companies/process",
        Some(json!({ "user_name": "nobody", "urls": ["https://acme.example"] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        "POST",
        "/rules",
        Some(json!({ "user_name": "alice", "rules": [established_tech_rule()] })),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/companies/process",
        Some(json!({ "user_name": "alice", "urls": ["https://missing.example"] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn broken_rule_fails_processing_with_details() {
    let app = app();

    send(&app, "POST", "/companies/import", Some(json!([acme()]))).await;
    send(
        &app,
        "POST",
        "/rules",
        Some(json!({
            "user_name": "alice",
            "rules": [{
                "input": "Bad path",
                "feature_name": "broken",
                "operation": {
                    "operator": "EQUALS",
                    "target_object": "ticker_symbol",
                    "value": "ACME"
                }
            }]
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/companies/process",
        Some(json!({ "user_name": "alice", "urls": ["https://acme.example"] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("ticker_symbol"));
}
