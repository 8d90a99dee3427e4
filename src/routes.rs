//! Axum handlers.
//!
//! The CRUD handlers are generic over [`Record`] and mounted once per
//! collection by [`crate::app::router`]:
//!
//! ```rust,ignore
//! Router::new().route("/api/employees", get(get_all::<Employee>).post(create_one::<Employee>))
//! ```

use crate::app::AppState;
use crate::entities::employee::EmployeeInput;
use crate::entities::leave_request::{self, LeaveStatus};
use crate::entities::payroll::{self, PayrollStatus};
use crate::entities::profile::{self, ProfileInput};
use crate::entities::{Employee, Report, UserProfile};
use crate::errors::ApiError;
use crate::models::{MutationResponse, StatusChange};
use crate::reports::{self, GenerateReport};
use crate::traits::Record;
use crate::upload;
use axum::{
    Json,
    extract::{FromRequest, Multipart, Path, Request, State, rejection::JsonRejection},
    http::header,
};
use sea_orm::DatabaseConnection;

pub async fn get_all<T>(State(db): State<DatabaseConnection>) -> Result<Json<Vec<T>>, ApiError>
where
    T: Record,
{
    Ok(Json(T::get_all(&db).await?))
}

pub async fn get_one<T>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<T>, ApiError>
where
    T: Record,
{
    Ok(Json(T::get_one(&db, id).await?))
}

pub async fn create_one<T>(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<T::Input>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError>
where
    T: Record,
{
    let Json(input) = payload?;
    let created = T::create(&db, input).await?;
    Ok(Json(MutationResponse::created(created.id(), T::DISPLAY_NAME)))
}

pub async fn update_one<T>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    payload: Result<Json<T::Input>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError>
where
    T: Record,
{
    let Json(input) = payload?;
    T::update(&db, id, input).await?;
    Ok(Json(MutationResponse::updated(T::DISPLAY_NAME)))
}

/// Succeeds whether or not a row existed.
pub async fn delete_one<T>(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<MutationResponse>, ApiError>
where
    T: Record,
{
    T::delete(&db, id).await?;
    Ok(Json(MutationResponse::deleted(T::DISPLAY_NAME)))
}

/// Employee payload from either a JSON body or a `multipart/form-data`
/// form that may carry an avatar file.
async fn employee_payload(state: &AppState, request: Request) -> Result<EmployeeInput, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));
    if is_multipart {
        let multipart = Multipart::from_request(request, state).await?;
        upload::employee_form(multipart, &state.config.uploads_dir).await
    } else {
        let Json(input) = Json::<EmployeeInput>::from_request(request, state).await?;
        Ok(input)
    }
}

pub async fn create_employee(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<MutationResponse>, ApiError> {
    let input = employee_payload(&state, request).await?;
    let created = Employee::create(&state.db, input).await?;
    Ok(Json(MutationResponse::created(created.id, Employee::DISPLAY_NAME)))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    request: Request,
) -> Result<Json<MutationResponse>, ApiError> {
    let input = employee_payload(&state, request).await?;
    Employee::update(&state.db, id, input).await?;
    Ok(Json(MutationResponse::updated(Employee::DISPLAY_NAME)))
}

pub async fn set_leave_status(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    payload: Result<Json<StatusChange<LeaveStatus>>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(change) = payload?;
    leave_request::set_status(&db, id, change.status).await?;
    Ok(Json(MutationResponse::updated("Leave request status")))
}

pub async fn set_payroll_status(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    payload: Result<Json<StatusChange<PayrollStatus>>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(change) = payload?;
    payroll::set_status(&db, id, change.status).await?;
    Ok(Json(MutationResponse::updated("Payroll status")))
}

pub async fn generate_report(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReport>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(request) = payload?;
    let report: Report = reports::generate(
        &state.db,
        state.exporter.clone(),
        request,
        state.config.report_delay,
    )
    .await?;
    Ok(Json(MutationResponse {
        id: Some(report.id),
        message: "Report generation started".to_string(),
    }))
}

pub async fn get_profile(
    State(db): State<DatabaseConnection>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(profile::current(&db).await?))
}

pub async fn put_profile(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<ProfileInput>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(input) = payload?;
    profile::replace(&db, input).await?;
    Ok(Json(MutationResponse::updated("Profile")))
}
