use crate::calc;
use crate::errors::ApiError;
use crate::traits::{Record, RecordInput};
use crate::validation::{BlankAsNone, Required};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveValue::{self, NotSet, Set, Unchanged},
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::fmt;
use utoipa::ToSchema;

/// Leave types offered by the client. The stored `leave_type` is free text,
/// so this list is advisory only.
pub const SUGGESTED_LEAVE_TYPES: [&str; 7] = [
    "Annual Leave",
    "Sick Leave",
    "Personal Leave",
    "Maternity Leave",
    "Paternity Leave",
    "Emergency Leave",
    "Bereavement Leave",
];

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum LeaveStatus {
    #[default]
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        })
    }
}

impl LeaveStatus {
    /// A pending request is decided once, as approved or rejected. Asking for
    /// the status a request already has is accepted and changes nothing.
    ///
    /// # Errors
    ///
    /// `ApiError::InvalidTransition` for any other change.
    pub fn transition_to(self, next: Self) -> Result<Self, ApiError> {
        match (self, next) {
            (current, next) if current == next => Ok(next),
            (Self::Pending, Self::Approved | Self::Rejected) => Ok(next),
            (current, next) => Err(ApiError::invalid_transition(format!(
                "Cannot change leave request status from {current} to {next}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "leave_requests")]
#[schema(as = LeaveRequest)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i32,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub applied_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LeaveRequestInput {
    #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
    pub employee_id: Option<i32>,
    pub employee_name: Option<String>,
    pub leave_type: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub start_date: Option<NaiveDate>,
    #[serde_as(as = "BlankAsNone")]
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub status: Option<LeaveStatus>,
    /// Honoured on create only; defaults to today.
    #[serde_as(as = "BlankAsNone")]
    pub applied_on: Option<NaiveDate>,
}

impl LeaveRequestInput {
    fn build(
        self,
        id: ActiveValue<i32>,
        status: LeaveStatus,
        applied_on: ActiveValue<NaiveDate>,
        created_at: ActiveValue<DateTime<Utc>>,
    ) -> Result<ActiveModel, ApiError> {
        let mut required = Required::new();
        let employee_id = required.value("employee_id", self.employee_id);
        let employee_name = required.text("employee_name", self.employee_name);
        let leave_type = required.text("leave_type", self.leave_type);
        let start_date = required.value("start_date", self.start_date);
        let end_date = required.value("end_date", self.end_date);
        required.finish()?;

        if calc::is_reversed_range(start_date, end_date) {
            tracing::warn!(
                employee_id,
                %start_date,
                %end_date,
                "Leave request ends before it starts; counting days over the reversed range"
            );
        }
        let days = i32::try_from(calc::leave_days(start_date, end_date))
            .map_err(|_| ApiError::bad_request("Leave range is too long"))?;

        Ok(ActiveModel {
            id,
            employee_id: Set(employee_id),
            employee_name: Set(employee_name),
            leave_type: Set(leave_type),
            start_date: Set(start_date),
            end_date: Set(end_date),
            days: Set(days),
            reason: Set(self.reason),
            status: Set(status),
            applied_on,
            created_at,
        })
    }
}

impl RecordInput<Model, ActiveModel> for LeaveRequestInput {
    fn into_new(self) -> Result<ActiveModel, ApiError> {
        let status = self.status.unwrap_or_default();
        if status != LeaveStatus::Pending {
            return Err(ApiError::invalid_transition(
                "New leave requests must start as Pending",
            ));
        }
        let applied_on = self.applied_on.unwrap_or_else(|| Utc::now().date_naive());
        self.build(NotSet, status, Set(applied_on), Set(Utc::now()))
    }

    fn replace(self, existing: Model) -> Result<ActiveModel, ApiError> {
        let status = match self.status {
            Some(next) => existing.status.transition_to(next)?,
            None => existing.status,
        };
        self.build(
            Unchanged(existing.id),
            status,
            Unchanged(existing.applied_on),
            Unchanged(existing.created_at),
        )
    }
}

#[async_trait]
impl Record for Model {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type Input = LeaveRequestInput;

    const ID_COLUMN: Column = Column::Id;
    const ORDER_COLUMN: Column = Column::AppliedOn;
    const RESOURCE_NAME_SINGULAR: &'static str = "leave request";
    const RESOURCE_NAME_PLURAL: &'static str = "leave-requests";
    const DISPLAY_NAME: &'static str = "Leave request";

    fn id(&self) -> i32 {
        self.id
    }

    async fn resolve_snapshots(
        db: &DatabaseConnection,
        input: &mut LeaveRequestInput,
    ) -> Result<(), ApiError> {
        if super::is_blank(input.employee_name.as_ref())
            && let Some(employee) = super::employee_snapshot(db, input.employee_id).await?
        {
            input.employee_name = Some(employee.name);
        }
        Ok(())
    }
}

/// Approves or rejects a request. Re-applying the current status returns
/// the row untouched.
///
/// # Errors
///
/// `NotFound` for an unknown id, `InvalidTransition` when the request has
/// already been decided the other way.
pub async fn set_status(
    db: &DatabaseConnection,
    id: i32,
    status: LeaveStatus,
) -> Result<Model, ApiError> {
    let existing = Model::get_one(db, id).await?;
    let current = existing.status;
    let next = current.transition_to(status)?;
    if next == current {
        return Ok(existing);
    }

    let mut active: ActiveModel = existing.into();
    active.status = Set(next);
    let updated = active.update(db).await?;
    tracing::info!(id, from = %current, to = %next, "Leave request status changed");
    Ok(updated)
}
