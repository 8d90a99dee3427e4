//! HR administration service: employees, departments, attendance, leave,
//! payroll, reports and the current user's profile over a JSON API backed
//! by SQLite.

pub mod app;
pub mod calc;
pub mod config;
pub mod dashboard;
pub mod entities;
pub mod errors;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod reports;
pub mod routes;
pub mod seed;
pub mod traits;
pub mod upload;
pub mod validation;

pub use app::{AppState, router};
pub use config::Config;
pub use errors::ApiError;
pub use traits::{Record, RecordInput};
