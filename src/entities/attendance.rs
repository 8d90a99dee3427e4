use crate::calc;
use crate::errors::ApiError;
use crate::traits::{Record, RecordInput};
use crate::validation::{self, BlankAsNone, Required};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use sea_orm::{
    ActiveValue::{self, NotSet, Set, Unchanged},
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use utoipa::ToSchema;

#[derive(
    Clone,
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
pub enum AttendanceStatus {
    #[default]
    #[sea_orm(string_value = "Present")]
    Present,
    #[sea_orm(string_value = "Late")]
    Late,
    #[sea_orm(string_value = "Absent")]
    Absent,
    #[sea_orm(string_value = "Half Day")]
    #[serde(rename = "Half Day")]
    HalfDay,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "attendance")]
#[schema(as = AttendanceRecord)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    /// Name copied from the employee row when the record was written.
    pub employee_name: String,
    pub date: NaiveDate,
    /// Local time of day, `HH:MM`.
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub hours_worked: f64,
    pub overtime: f64,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Attendance payload. `hours_worked` and `overtime` are not accepted:
/// they are always recomputed from the check-in/out times.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct AttendanceInput {
    #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
    pub employee_id: Option<i32>,
    pub employee_name: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub date: Option<NaiveDate>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub status: Option<AttendanceStatus>,
}

fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

impl AttendanceInput {
    fn build(
        self,
        id: ActiveValue<i32>,
        created_at: ActiveValue<DateTime<Utc>>,
    ) -> Result<ActiveModel, ApiError> {
        let mut required = Required::new();
        let employee_id = required.value("employee_id", self.employee_id);
        let employee_name = required.text("employee_name", self.employee_name);
        let date = required.value("date", self.date);
        let status = required.value("status", self.status);
        required.finish()?;

        let check_in = validation::time_of_day("check_in", self.check_in.as_deref())?;
        let check_out = validation::time_of_day("check_out", self.check_out.as_deref())?;
        let hours_worked = calc::hours_worked(check_in, check_out);

        Ok(ActiveModel {
            id,
            employee_id: Set(employee_id),
            employee_name: Set(employee_name),
            date: Set(date),
            check_in: Set(check_in.map(format_time)),
            check_out: Set(check_out.map(format_time)),
            hours_worked: Set(hours_worked),
            overtime: Set(calc::overtime(hours_worked)),
            status: Set(status),
            created_at,
        })
    }
}

impl RecordInput<Model, ActiveModel> for AttendanceInput {
    fn into_new(self) -> Result<ActiveModel, ApiError> {
        self.build(NotSet, Set(Utc::now()))
    }

    fn replace(self, existing: Model) -> Result<ActiveModel, ApiError> {
        self.build(Unchanged(existing.id), Unchanged(existing.created_at))
    }
}

#[async_trait]
impl Record for Model {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type Input = AttendanceInput;

    const ID_COLUMN: Column = Column::Id;
    const ORDER_COLUMN: Column = Column::Date;
    const RESOURCE_NAME_SINGULAR: &'static str = "attendance";
    const RESOURCE_NAME_PLURAL: &'static str = "attendance";
    const DISPLAY_NAME: &'static str = "Attendance record";

    fn id(&self) -> i32 {
        self.id
    }

    async fn resolve_snapshots(
        db: &DatabaseConnection,
        input: &mut AttendanceInput,
    ) -> Result<(), ApiError> {
        if super::is_blank(input.employee_name.as_ref())
            && let Some(employee) = super::employee_snapshot(db, input.employee_id).await?
        {
            input.employee_name = Some(employee.name);
        }
        Ok(())
    }
}
