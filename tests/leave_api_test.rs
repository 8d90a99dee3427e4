use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;
use common::{create, employee_json, send, setup_test_app, setup_test_db};

fn leave_json(employee_id: i64) -> Value {
    json!({
        "employee_id": employee_id,
        "leave_type": "Annual Leave",
        "start_date": "2024-01-20",
        "end_date": "2024-01-25",
        "reason": "Family vacation"
    })
}

#[tokio::test]
async fn test_create_derives_days_and_defaults() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let employee = create(&app, "employees", employee_json("Jane", "jane@company.com")).await;
    let id = create(&app, "leave-requests", leave_json(employee)).await;

    let (status, request) = send(&app, "GET", &format!("/api/leave-requests/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(request["days"], 6);
    assert_eq!(request["status"], "Pending");
    assert_eq!(request["employee_name"], "Jane");
    assert_eq!(
        request["applied_on"],
        chrono::Utc::now().date_naive().to_string()
    );
}

#[tokio::test]
async fn test_reversed_range_is_counted() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let id = create(
        &app,
        "leave-requests",
        json!({"employee_id": 1, "employee_name": "Jane", "leave_type": "Sick Leave", "start_date": "2024-01-25", "end_date": "2024-01-20"}),
    )
    .await;
    let (_, request) = send(&app, "GET", &format!("/api/leave-requests/{id}"), None).await;
    assert_eq!(request["days"], 6);
}

#[tokio::test]
async fn test_approving_twice_is_idempotent() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let employee = create(&app, "employees", employee_json("Jane", "jane@company.com")).await;
    let id = create(&app, "leave-requests", leave_json(employee)).await;
    let uri = format!("/api/leave-requests/{id}/status");

    for _ in 0..2 {
        let (status, body) = send(&app, "PUT", &uri, Some(json!({"status": "Approved"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Leave request status updated successfully");
    }

    let (_, request) = send(&app, "GET", &format!("/api/leave-requests/{id}"), None).await;
    assert_eq!(request["status"], "Approved");
}

#[tokio::test]
async fn test_decided_request_cannot_flip() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let employee = create(&app, "employees", employee_json("Jane", "jane@company.com")).await;
    let id = create(&app, "leave-requests", leave_json(employee)).await;
    let uri = format!("/api/leave-requests/{id}/status");

    send(&app, "PUT", &uri, Some(json!({"status": "Rejected"}))).await;
    let (status, body) = send(&app, "PUT", &uri, Some(json!({"status": "Approved"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Cannot change leave request status from Rejected to Approved"
    );

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"status": "Pending"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_status_route_unknown_id_and_bad_status() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/leave-requests/77/status",
        Some(json!({"status": "Approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = create(&app, "leave-requests", json!({"employee_id": 1, "employee_name": "Jane", "leave_type": "Sick Leave", "start_date": "2024-01-20", "end_date": "2024-01-20"})).await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/leave-requests/{id}/status"),
        Some(json!({"status": "Maybe"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_new_request_must_be_pending() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let mut body = leave_json(1);
    body["employee_name"] = json!("Jane");
    body["status"] = json!("Approved");
    let (status, _) = send(&app, "POST", "/api/leave-requests", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_replace_keeps_status_and_applied_on() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let mut body = leave_json(1);
    body["employee_name"] = json!("Jane");
    body["applied_on"] = json!("2024-01-10");
    let id = create(&app, "leave-requests", body).await;
    send(
        &app,
        "PUT",
        &format!("/api/leave-requests/{id}/status"),
        Some(json!({"status": "Approved"})),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/leave-requests/{id}"),
        Some(json!({
            "employee_id": 1,
            "employee_name": "Jane",
            "leave_type": "Annual Leave",
            "start_date": "2024-01-20",
            "end_date": "2024-01-21",
            "applied_on": "2030-01-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, request) = send(&app, "GET", &format!("/api/leave-requests/{id}"), None).await;
    assert_eq!(request["status"], "Approved");
    assert_eq!(request["applied_on"], "2024-01-10");
    assert_eq!(request["days"], 2);
    assert!(request["reason"].is_null());

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/leave-requests/{id}"),
        Some(json!({
            "employee_id": 1,
            "employee_name": "Jane",
            "leave_type": "Annual Leave",
            "start_date": "2024-01-20",
            "end_date": "2024-01-21",
            "status": "Rejected"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_name_snapshot_is_not_refreshed() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let employee = create(&app, "employees", employee_json("Jane Smith", "jane@company.com")).await;
    let id = create(&app, "leave-requests", leave_json(employee)).await;

    send(
        &app,
        "PUT",
        &format!("/api/employees/{employee}"),
        Some(employee_json("Jane Doe", "jane@company.com")),
    )
    .await;

    let (_, request) = send(&app, "GET", &format!("/api/leave-requests/{id}"), None).await;
    assert_eq!(request["employee_name"], "Jane Smith");
}

#[tokio::test]
async fn test_list_is_ordered_by_applied_on() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    for applied_on in ["2024-01-15", "2024-01-16", "2024-01-10"] {
        let mut body = leave_json(1);
        body["employee_name"] = json!("Jane");
        body["applied_on"] = json!(applied_on);
        create(&app, "leave-requests", body).await;
    }

    let (_, list) = send(&app, "GET", "/api/leave-requests", None).await;
    let applied: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["applied_on"].as_str().unwrap())
        .collect();
    assert_eq!(applied, vec!["2024-01-16", "2024-01-15", "2024-01-10"]);
}

#[tokio::test]
async fn test_blank_dates_are_missing() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let (status, body) = send(
        &app,
        "POST",
        "/api/leave-requests",
        Some(json!({"employee_id": "1", "employee_name": "Jane", "leave_type": "Sick Leave", "start_date": "", "end_date": "", "applied_on": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["details"],
        json!(["start_date is required", "end_date is required"])
    );
}
