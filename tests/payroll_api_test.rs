use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create, employee_json, send, setup_test_app, setup_test_db};

#[tokio::test]
async fn test_pay_is_derived_from_form_values() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let employee = create(&app, "employees", employee_json("John", "john@company.com")).await;
    let id = create(
        &app,
        "payroll",
        json!({
            "employee_id": employee.to_string(),
            "basic_salary": "5000",
            "allowances": "500",
            "overtime": 200,
            "deductions": "100",
            "pay_period": "January 2024",
            "gross_pay": 1,
            "net_pay": 1
        }),
    )
    .await;

    let (status, record) = send(&app, "GET", &format!("/api/payroll/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["employee_name"], "John");
    assert_eq!(record["position"], "Developer");
    assert_eq!(record["gross_pay"], 5600.0);
    assert_eq!(record["tax_deduction"], 840.0);
    assert_eq!(record["net_pay"], 4760.0);
    assert_eq!(record["status"], "Pending");
}

#[tokio::test]
async fn test_explicit_snapshot_wins() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let employee = create(&app, "employees", employee_json("John", "john@company.com")).await;
    let id = create(
        &app,
        "payroll",
        json!({
            "employee_id": employee,
            "employee_name": "J. Doe",
            "position": "Contractor",
            "basic_salary": 1000,
            "pay_period": "February 2024"
        }),
    )
    .await;

    let (_, record) = send(&app, "GET", &format!("/api/payroll/{id}"), None).await;
    assert_eq!(record["employee_name"], "J. Doe");
    assert_eq!(record["position"], "Contractor");
    assert_eq!(record["allowances"], 0.0);
    assert_eq!(record["gross_pay"], 1000.0);
}

#[tokio::test]
async fn test_negative_payroll_is_stored() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let id = create(
        &app,
        "payroll",
        json!({
            "employee_id": 3,
            "employee_name": "Overdrawn",
            "basic_salary": 1000,
            "deductions": 3000,
            "pay_period": "March 2024"
        }),
    )
    .await;

    let (_, record) = send(&app, "GET", &format!("/api/payroll/{id}"), None).await;
    assert_eq!(record["gross_pay"], -2000.0);
    assert_eq!(record["tax_deduction"], -300.0);
    assert_eq!(record["net_pay"], -1700.0);
}

#[tokio::test]
async fn test_status_moves_forward_only() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let id = create(
        &app,
        "payroll",
        json!({"employee_id": 1, "employee_name": "John", "basic_salary": 4000, "pay_period": "January 2024"}),
    )
    .await;
    let uri = format!("/api/payroll/{id}/status");

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"status": "Processed"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payroll status updated successfully");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"status": "Paid"}))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "PUT", &uri, Some(json!({"status": "Paid"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"status": "Pending"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Cannot move payroll status back from Paid to Pending");

    let (_, record) = send(&app, "GET", &format!("/api/payroll/{id}"), None).await;
    assert_eq!(record["status"], "Paid");
}

#[tokio::test]
async fn test_replace_recomputes_and_keeps_status() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let id = create(
        &app,
        "payroll",
        json!({"employee_id": 1, "employee_name": "John", "basic_salary": 4000, "allowances": 400, "pay_period": "January 2024"}),
    )
    .await;
    send(
        &app,
        "PUT",
        &format!("/api/payroll/{id}/status"),
        Some(json!({"status": "Processed"})),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/payroll/{id}"),
        Some(json!({"employee_id": 1, "employee_name": "John", "basic_salary": 6000, "pay_period": "January 2024"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, record) = send(&app, "GET", &format!("/api/payroll/{id}"), None).await;
    assert_eq!(record["status"], "Processed");
    assert_eq!(record["allowances"], 0.0);
    assert_eq!(record["gross_pay"], 6000.0);
    assert_eq!(record["net_pay"], 5100.0);
}

#[tokio::test]
async fn test_required_fields() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let (status, body) = send(
        &app,
        "POST",
        "/api/payroll",
        Some(json!({"employee_id": 1, "employee_name": "John"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["details"],
        json!(["basic_salary is required", "pay_period is required"])
    );
}

#[tokio::test]
async fn test_non_finite_amounts_are_bad_requests() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    for (field, value) in [("basic_salary", "NaN"), ("allowances", "inf"), ("deductions", "-inf")] {
        let mut body = json!({"employee_id": 1, "employee_name": "John", "basic_salary": 4000, "pay_period": "January 2024"});
        body[field] = json!(value);
        let (status, body) = send(&app, "POST", "/api/payroll", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}={value}");
        assert!(body["error"].as_str().unwrap().contains(field));
    }

    let (_, list) = send(&app, "GET", "/api/payroll", None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_blank_form_fields() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let (status, body) = send(
        &app,
        "POST",
        "/api/payroll",
        Some(json!({"employee_id": "", "employee_name": "John", "basic_salary": "", "pay_period": "January 2024"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["details"],
        json!(["employee_id is required", "basic_salary is required"])
    );

    let id = create(
        &app,
        "payroll",
        json!({"employee_id": "1", "employee_name": "John", "basic_salary": "3000", "allowances": "", "overtime": "", "deductions": "", "pay_period": "January 2024", "status": ""}),
    )
    .await;
    let (_, record) = send(&app, "GET", &format!("/api/payroll/{id}"), None).await;
    assert_eq!(record["allowances"], 0.0);
    assert_eq!(record["gross_pay"], 3000.0);
    assert_eq!(record["status"], "Pending");
}
