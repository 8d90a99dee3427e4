use crate::calc;
use crate::errors::ApiError;
use crate::traits::{Record, RecordInput};
use crate::validation::{self, BlankAsNone, Required};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::{self, NotSet, Set, Unchanged},
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::fmt;
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
pub enum PayrollStatus {
    #[default]
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Processed")]
    Processed,
    #[sea_orm(string_value = "Paid")]
    Paid,
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Processed => "Processed",
            Self::Paid => "Paid",
        })
    }
}

impl PayrollStatus {
    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Processed => 1,
            Self::Paid => 2,
        }
    }

    /// Payroll only moves forward: Pending, Processed, Paid. Skipping a step
    /// is allowed and staying put is a no-op.
    ///
    /// # Errors
    ///
    /// `ApiError::InvalidTransition` for a backward move.
    pub fn transition_to(self, next: Self) -> Result<Self, ApiError> {
        if next.rank() < self.rank() {
            return Err(ApiError::invalid_transition(format!(
                "Cannot move payroll status back from {self} to {next}"
            )));
        }
        Ok(next)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "payroll")]
#[schema(as = PayrollRecord)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: String,
    pub position: Option<String>,
    pub basic_salary: f64,
    pub allowances: f64,
    /// Overtime pay, an amount of money rather than hours.
    pub overtime: f64,
    pub deductions: f64,
    pub gross_pay: f64,
    pub tax_deduction: f64,
    pub net_pay: f64,
    pub pay_period: String,
    pub status: PayrollStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Payroll payload. Gross, tax and net pay are always computed server-side.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct PayrollInput {
    #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
    pub employee_id: Option<i32>,
    pub employee_name: Option<String>,
    pub position: Option<String>,
    #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
    pub basic_salary: Option<f64>,
    #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
    pub allowances: Option<f64>,
    #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
    pub overtime: Option<f64>,
    #[serde_as(as = "BlankAsNone<PickFirst<(_, DisplayFromStr)>>")]
    pub deductions: Option<f64>,
    pub pay_period: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub status: Option<PayrollStatus>,
}

impl PayrollInput {
    fn build(
        self,
        id: ActiveValue<i32>,
        status: PayrollStatus,
        created_at: ActiveValue<DateTime<Utc>>,
    ) -> Result<ActiveModel, ApiError> {
        let mut required = Required::new();
        let employee_id = required.value("employee_id", self.employee_id);
        let employee_name = required.text("employee_name", self.employee_name);
        let basic_salary = required.value("basic_salary", self.basic_salary);
        let pay_period = required.text("pay_period", self.pay_period);
        required.finish()?;

        let basic_salary = validation::finite("basic_salary", basic_salary)?;
        let allowances = validation::finite("allowances", self.allowances.unwrap_or(0.0))?;
        let overtime = validation::finite("overtime", self.overtime.unwrap_or(0.0))?;
        let deductions = validation::finite("deductions", self.deductions.unwrap_or(0.0))?;
        let pay = calc::payroll(basic_salary, allowances, overtime, deductions);
        if !pay.gross.is_finite() {
            return Err(ApiError::bad_request("Payroll amounts are out of range"));
        }
        if pay.is_negative() {
            tracing::warn!(
                employee_id,
                pay_period = %pay_period,
                gross = pay.gross,
                net = pay.net,
                "Deductions exceed earnings; storing negative payroll"
            );
        }

        Ok(ActiveModel {
            id,
            employee_id: Set(employee_id),
            employee_name: Set(employee_name),
            position: Set(self.position),
            basic_salary: Set(basic_salary),
            allowances: Set(allowances),
            overtime: Set(overtime),
            deductions: Set(deductions),
            gross_pay: Set(pay.gross),
            tax_deduction: Set(pay.tax),
            net_pay: Set(pay.net),
            pay_period: Set(pay_period),
            status: Set(status),
            created_at,
        })
    }
}

impl RecordInput<Model, ActiveModel> for PayrollInput {
    fn into_new(self) -> Result<ActiveModel, ApiError> {
        let status = self.status.unwrap_or_default();
        if status != PayrollStatus::Pending {
            return Err(ApiError::invalid_transition(
                "New payroll records must start as Pending",
            ));
        }
        self.build(NotSet, status, Set(Utc::now()))
    }

    fn replace(self, existing: Model) -> Result<ActiveModel, ApiError> {
        let status = match self.status {
            Some(next) => existing.status.transition_to(next)?,
            None => existing.status,
        };
        self.build(Unchanged(existing.id), status, Unchanged(existing.created_at))
    }
}

#[async_trait]
impl Record for Model {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type Input = PayrollInput;

    const ID_COLUMN: Column = Column::Id;
    const ORDER_COLUMN: Column = Column::CreatedAt;
    const RESOURCE_NAME_SINGULAR: &'static str = "payroll record";
    const RESOURCE_NAME_PLURAL: &'static str = "payroll";
    const DISPLAY_NAME: &'static str = "Payroll record";

    fn id(&self) -> i32 {
        self.id
    }

    /// Copies name and position from the employee row, each only when the
    /// caller left it out.
    async fn resolve_snapshots(
        db: &DatabaseConnection,
        input: &mut PayrollInput,
    ) -> Result<(), ApiError> {
        let name_missing = super::is_blank(input.employee_name.as_ref());
        let position_missing = super::is_blank(input.position.as_ref());
        if !name_missing && !position_missing {
            return Ok(());
        }
        if let Some(employee) = super::employee_snapshot(db, input.employee_id).await? {
            if name_missing {
                input.employee_name = Some(employee.name);
            }
            if position_missing {
                input.position = employee.position;
            }
        }
        Ok(())
    }
}

/// Moves a payroll record forward (process, mark paid).
///
/// # Errors
///
/// `NotFound` for an unknown id, `InvalidTransition` for a backward move.
pub async fn set_status(
    db: &DatabaseConnection,
    id: i32,
    status: PayrollStatus,
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
    tracing::info!(id, from = %current, to = %next, "Payroll status changed");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PayrollInput {
        PayrollInput {
            employee_id: Some(1),
            employee_name: Some("John Doe".to_string()),
            position: Some("Senior Developer".to_string()),
            basic_salary: Some(5000.0),
            allowances: Some(500.0),
            overtime: Some(200.0),
            deductions: Some(100.0),
            pay_period: Some("January 2024".to_string()),
            status: None,
        }
    }

    #[test]
    fn test_derived_pay() {
        let active = input().into_new().unwrap();
        assert_eq!(active.gross_pay, Set(5600.0));
        assert_eq!(active.tax_deduction, Set(840.0));
        assert_eq!(active.net_pay, Set(4760.0));
        assert_eq!(active.status, Set(PayrollStatus::Pending));
    }

    #[test]
    fn test_optional_amounts_default_to_zero() {
        let mut bare = input();
        bare.allowances = None;
        bare.overtime = None;
        bare.deductions = None;
        let active = bare.into_new().unwrap();
        assert_eq!(active.allowances, Set(0.0));
        assert_eq!(active.gross_pay, Set(5000.0));
    }

    #[test]
    fn test_amounts_from_form_strings() {
        let input: PayrollInput = serde_json::from_str(
            r#"{"employee_id": "1", "basic_salary": "4500.50", "allowances": 300, "pay_period": "March 2024"}"#,
        )
        .unwrap();
        assert_eq!(input.employee_id, Some(1));
        assert_eq!(input.basic_salary, Some(4500.5));
        assert_eq!(input.allowances, Some(300.0));
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        let mut bad = input();
        bad.deductions = Some(f64::INFINITY);
        assert!(matches!(bad.into_new(), Err(ApiError::BadRequest { .. })));

        let mut huge = input();
        huge.basic_salary = Some(f64::MAX);
        huge.allowances = Some(f64::MAX);
        assert!(matches!(huge.into_new(), Err(ApiError::BadRequest { .. })));
    }

    #[test]
    fn test_forward_only() {
        use PayrollStatus::{Paid, Pending, Processed};
        assert_eq!(Pending.transition_to(Processed).unwrap(), Processed);
        assert_eq!(Pending.transition_to(Paid).unwrap(), Paid);
        assert_eq!(Paid.transition_to(Paid).unwrap(), Paid);
        assert!(matches!(
            Paid.transition_to(Processed),
            Err(ApiError::InvalidTransition { .. })
        ));
        assert!(matches!(
            Processed.transition_to(Pending),
            Err(ApiError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_missing_required() {
        let err = PayrollInput::default().into_new().unwrap_err();
        match err {
            ApiError::ValidationFailed { errors } => assert_eq!(
                errors,
                vec![
                    "employee_id is required",
                    "employee_name is required",
                    "basic_salary is required",
                    "pay_period is required"
                ]
            ),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
