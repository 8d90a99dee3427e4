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
pub enum ReportStatus {
    #[default]
    #[sea_orm(string_value = "Generated")]
    Generated,
    #[sea_orm(string_value = "Processing")]
    Processing,
    #[sea_orm(string_value = "Failed")]
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "reports")]
#[schema(as = Report)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub report_type: String,
    pub description: Option<String>,
    pub generated_on: NaiveDate,
    pub period: Option<String>,
    pub status: ReportStatus,
    /// Human-readable size label such as "2.4 MB".
    pub file_size: Option<String>,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ReportInput {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub description: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub generated_on: Option<NaiveDate>,
    pub period: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub status: Option<ReportStatus>,
    pub file_size: Option<String>,
    pub file_path: Option<String>,
}

impl ReportInput {
    fn build(
        self,
        id: ActiveValue<i32>,
        default_status: ReportStatus,
        created_at: ActiveValue<DateTime<Utc>>,
    ) -> Result<ActiveModel, ApiError> {
        let mut required = Required::new();
        let title = required.text("title", self.title);
        let report_type = required.text("type", self.report_type);
        required.finish()?;

        Ok(ActiveModel {
            id,
            title: Set(title),
            report_type: Set(report_type),
            description: Set(self.description),
            generated_on: Set(self
                .generated_on
                .unwrap_or_else(|| Utc::now().date_naive())),
            period: Set(self.period),
            status: Set(self.status.unwrap_or(default_status)),
            file_size: Set(self.file_size),
            file_path: Set(self.file_path),
            created_at,
        })
    }
}

impl RecordInput<Model, ActiveModel> for ReportInput {
    fn into_new(self) -> Result<ActiveModel, ApiError> {
        self.build(NotSet, ReportStatus::Generated, Set(Utc::now()))
    }

    fn replace(self, existing: Model) -> Result<ActiveModel, ApiError> {
        self.build(
            Unchanged(existing.id),
            existing.status,
            Unchanged(existing.created_at),
        )
    }
}

#[async_trait]
impl Record for Model {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type Input = ReportInput;

    const ID_COLUMN: Column = Column::Id;
    const ORDER_COLUMN: Column = Column::CreatedAt;
    const RESOURCE_NAME_SINGULAR: &'static str = "report";
    const RESOURCE_NAME_PLURAL: &'static str = "reports";
    const DISPLAY_NAME: &'static str = "Report";

    fn id(&self) -> i32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_wire_name() {
        let input: ReportInput =
            serde_json::from_str(r#"{"title": "Q1 Payroll", "type": "Payroll"}"#).unwrap();
        assert_eq!(input.report_type.as_deref(), Some("Payroll"));

        let active = input.into_new().unwrap();
        assert_eq!(active.status, Set(ReportStatus::Generated));
        assert_eq!(active.generated_on, Set(Utc::now().date_naive()));
    }

    #[test]
    fn test_type_is_required() {
        let input = ReportInput {
            title: Some("Untyped".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            input.into_new(),
            Err(ApiError::ValidationFailed { .. })
        ));
    }
}
