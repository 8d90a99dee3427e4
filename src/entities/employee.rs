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
use serde_with::serde_as;
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
pub enum EmployeeStatus {
    #[default]
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "On Leave")]
    #[serde(rename = "On Leave")]
    OnLeave,
    #[sea_orm(string_value = "Inactive")]
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "employees")]
#[schema(as = Employee)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: EmployeeStatus,
    pub join_date: Option<NaiveDate>,
    pub address: Option<String>,
    /// Free text, stored exactly as entered.
    pub salary: Option<String>,
    pub emergency_contact: Option<String>,
    /// File name inside the uploads directory.
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub status: Option<EmployeeStatus>,
    #[serde_as(as = "BlankAsNone")]
    pub join_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub salary: Option<String>,
    pub emergency_contact: Option<String>,
    pub avatar: Option<String>,
}

impl EmployeeInput {
    fn build(
        self,
        id: ActiveValue<i32>,
        created_at: ActiveValue<DateTime<Utc>>,
    ) -> Result<ActiveModel, ApiError> {
        let mut required = Required::new();
        let name = required.text("name", self.name);
        let email = required.text("email", self.email);
        required.finish()?;

        Ok(ActiveModel {
            id,
            name: Set(name),
            email: Set(email.trim().to_string()),
            phone: Set(self.phone),
            department: Set(self.department),
            position: Set(self.position),
            status: Set(self.status.unwrap_or_default()),
            join_date: Set(self.join_date),
            address: Set(self.address),
            salary: Set(self.salary),
            emergency_contact: Set(self.emergency_contact),
            avatar: Set(self.avatar),
            created_at,
            updated_at: Set(Utc::now()),
        })
    }
}

impl RecordInput<Model, ActiveModel> for EmployeeInput {
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
    type Input = EmployeeInput;

    const ID_COLUMN: Column = Column::Id;
    const ORDER_COLUMN: Column = Column::CreatedAt;
    const RESOURCE_NAME_SINGULAR: &'static str = "employee";
    const RESOURCE_NAME_PLURAL: &'static str = "employees";
    const DISPLAY_NAME: &'static str = "Employee";

    fn id(&self) -> i32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_active() {
        let input = EmployeeInput {
            name: Some("Grace Hopper".to_string()),
            email: Some(" grace@company.com ".to_string()),
            ..Default::default()
        };
        let active = input.into_new().unwrap();
        assert_eq!(active.status, Set(EmployeeStatus::Active));
        assert_eq!(active.email, Set("grace@company.com".to_string()));
        assert_eq!(active.id, NotSet);
    }

    #[test]
    fn test_missing_name_and_email() {
        let err = EmployeeInput::default().into_new().unwrap_err();
        match err {
            ApiError::ValidationFailed { errors } => {
                assert_eq!(errors, vec!["name is required", "email is required"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_status_wire_names() {
        let status: EmployeeStatus = serde_json::from_str("\"On Leave\"").unwrap();
        assert_eq!(status, EmployeeStatus::OnLeave);
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::Inactive).unwrap(),
            "\"Inactive\""
        );
    }
}
