#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use hrdesk::migrator::Migrator;
use hrdesk::{AppState, Config, router};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tower::ServiceExt;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn test_config(uploads_dir: PathBuf) -> Config {
    Config {
        uploads_dir,
        seed_sample_data: false,
        report_delay: Duration::from_millis(20),
        ..Config::default()
    }
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    router(AppState::new(db, test_config(std::env::temp_dir())))
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// Sends a JSON request and parses the JSON response (`Value::Null` for an
/// empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// POSTs `body` and returns the new id, asserting success.
pub async fn create(app: &Router, collection: &str, body: Value) -> i64 {
    let (status, json) = send(app, "POST", &format!("/api/{collection}"), Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {json}");
    json["id"].as_i64().expect("create response carries an id")
}

pub fn employee_json(name: &str, email: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "phone": "+1 (555) 000-0000",
        "department": "Engineering",
        "position": "Developer",
        "join_date": "2023-05-01",
        "salary": "70000"
    })
}
