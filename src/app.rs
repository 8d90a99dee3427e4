use crate::config::Config;
use crate::dashboard;
use crate::entities::{AttendanceRecord, Department, Employee, LeaveRequest, PayrollRecord, Report};
use crate::openapi;
use crate::reports::{PlaceholderExporter, ReportExporter};
use crate::routes;
use crate::traits::Record;
use crate::upload;
use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub exporter: Arc<dyn ReportExporter>,
}

impl AppState {
    /// State with the placeholder report exporter.
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self::with_exporter(db, config, Arc::new(PlaceholderExporter))
    }

    pub fn with_exporter(
        db: DatabaseConnection,
        config: Config,
        exporter: Arc<dyn ReportExporter>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            exporter,
        }
    }
}

/// `GET|POST /api/<plural>` and `GET|PUT|DELETE /api/<plural>/{id}`.
/// Employees are mounted separately since they also accept multipart forms.
fn crud_routes<T: Record>() -> Router<AppState> {
    let collection = format!("/api/{}", T::RESOURCE_NAME_PLURAL);
    let item = format!("{collection}/{{id}}");
    Router::new()
        .route(
            &collection,
            get(routes::get_all::<T>).post(routes::create_one::<T>),
        )
        .route(
            &item,
            get(routes::get_one::<T>)
                .put(routes::update_one::<T>)
                .delete(routes::delete_one::<T>),
        )
}

pub fn router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.uploads_dir);

    Router::new()
        .route("/", get(dashboard::overview))
        .route(
            "/api/employees",
            get(routes::get_all::<Employee>)
                .post(routes::create_employee)
                .layer(DefaultBodyLimit::max(upload::BODY_LIMIT)),
        )
        .route(
            "/api/employees/{id}",
            get(routes::get_one::<Employee>)
                .put(routes::update_employee)
                .delete(routes::delete_one::<Employee>)
                .layer(DefaultBodyLimit::max(upload::BODY_LIMIT)),
        )
        .merge(crud_routes::<Department>())
        .merge(crud_routes::<AttendanceRecord>())
        .merge(crud_routes::<LeaveRequest>())
        .merge(crud_routes::<PayrollRecord>())
        .merge(crud_routes::<Report>())
        .route(
            "/api/leave-requests/{id}/status",
            put(routes::set_leave_status),
        )
        .route("/api/payroll/{id}/status", put(routes::set_payroll_status))
        .route("/api/reports/generate", post(routes::generate_report))
        .route(
            "/api/profile",
            get(routes::get_profile).put(routes::put_profile),
        )
        .route(
            "/api/upload-avatar",
            post(upload::upload_avatar).layer(DefaultBodyLimit::max(upload::BODY_LIMIT)),
        )
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
