use crate::errors::ApiError;
use crate::traits::{Record, RecordInput};
use crate::validation::{BlankAsNone, Required};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
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
pub enum DepartmentStatus {
    #[default]
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Inactive")]
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "departments")]
#[schema(as = Department)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Manager's name as free text; not a reference to an employee row.
    pub manager: Option<String>,
    /// Maintained by hand; never recomputed from the employees table.
    pub employee_count: i32,
    pub status: DepartmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct DepartmentInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub manager: Option<String>,
    #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
    pub employee_count: Option<i32>,
    #[serde_as(as = "BlankAsNone")]
    pub status: Option<DepartmentStatus>,
}

impl DepartmentInput {
    fn build(
        self,
        id: ActiveValue<i32>,
        created_at: ActiveValue<DateTime<Utc>>,
    ) -> Result<ActiveModel, ApiError> {
        let mut required = Required::new();
        let name = required.text("name", self.name);
        required.finish()?;

        Ok(ActiveModel {
            id,
            name: Set(name),
            description: Set(self.description),
            manager: Set(self.manager),
            employee_count: Set(self.employee_count.unwrap_or(0)),
            status: Set(self.status.unwrap_or_default()),
            created_at,
            updated_at: Set(Utc::now()),
        })
    }
}

/// Replace does not keep unspecified fields: an omitted description or
/// manager is cleared, an omitted count resets to zero.
impl RecordInput<Model, ActiveModel> for DepartmentInput {
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
    type Input = DepartmentInput;

    const ID_COLUMN: Column = Column::Id;
    const ORDER_COLUMN: Column = Column::CreatedAt;
    const RESOURCE_NAME_SINGULAR: &'static str = "department";
    const RESOURCE_NAME_PLURAL: &'static str = "departments";
    const DISPLAY_NAME: &'static str = "Department";

    fn id(&self) -> i32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_count_accepts_numeric_string() {
        let input: DepartmentInput =
            serde_json::from_str(r#"{"name": "Legal", "employee_count": "7"}"#).unwrap();
        assert_eq!(input.employee_count, Some(7));

        let input: DepartmentInput =
            serde_json::from_str(r#"{"name": "Legal", "employee_count": 7}"#).unwrap();
        assert_eq!(input.employee_count, Some(7));
    }

    #[test]
    fn test_defaults() {
        let input: DepartmentInput = serde_json::from_str(r#"{"name": "Legal"}"#).unwrap();
        let active = input.into_new().unwrap();
        assert_eq!(active.employee_count, Set(0));
        assert_eq!(active.status, Set(DepartmentStatus::Active));
    }
}
