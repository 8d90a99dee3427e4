//! Sea-ORM entities, one module per table.
//!
//! References between tables (`employee_id` on attendance, leave and payroll
//! rows) are plain integer columns with no declared relation, so deleting an
//! employee never cascades and never fails because of dependent rows.

pub mod attendance;
pub mod department;
pub mod employee;
pub mod leave_request;
pub mod payroll;
pub mod profile;
pub mod report;

pub use attendance::Model as AttendanceRecord;
pub use department::Model as Department;
pub use employee::Model as Employee;
pub use leave_request::Model as LeaveRequest;
pub use payroll::Model as PayrollRecord;
pub use profile::Model as UserProfile;
pub use report::Model as Report;

use crate::errors::ApiError;
use sea_orm::{DatabaseConnection, EntityTrait};

pub(crate) fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

/// Current employee row used to materialize denormalized name/position
/// snapshots. A dangling or absent reference yields `None`.
pub(crate) async fn employee_snapshot(
    db: &DatabaseConnection,
    employee_id: Option<i32>,
) -> Result<Option<Employee>, ApiError> {
    let Some(employee_id) = employee_id else {
        return Ok(None);
    };
    Ok(employee::Entity::find_by_id(employee_id).one(db).await?)
}
