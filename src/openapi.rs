use crate::calc::PayBreakdown;
use crate::entities::{
    attendance, department, employee, leave_request, payroll, profile, report,
};
use crate::models::MutationResponse;
use crate::reports::{ExportFormat, GenerateReport};
use crate::upload::UploadResponse;
use axum::Json;
use utoipa::OpenApi;

/// Wire schemas of the JSON API.
#[derive(OpenApi)]
#[openapi(
    info(title = "hrdesk", description = "HR administration API"),
    components(schemas(
        employee::Model,
        employee::EmployeeInput,
        employee::EmployeeStatus,
        department::Model,
        department::DepartmentInput,
        department::DepartmentStatus,
        attendance::Model,
        attendance::AttendanceInput,
        attendance::AttendanceStatus,
        leave_request::Model,
        leave_request::LeaveRequestInput,
        leave_request::LeaveStatus,
        payroll::Model,
        payroll::PayrollInput,
        payroll::PayrollStatus,
        report::Model,
        report::ReportInput,
        report::ReportStatus,
        profile::Model,
        profile::ProfileInput,
        MutationResponse,
        UploadResponse,
        GenerateReport,
        ExportFormat,
        PayBreakdown,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
