//! Creates every HR table from its entity definition.
//!
//! No foreign keys are declared: `employee_id` columns are plain integers,
//! so employee rows can be deleted while their attendance, leave and
//! payroll history stays in place.

use crate::entities::{
    attendance, department, employee, leave_request, payroll, profile, report,
};
use sea_orm::{EntityName, EntityTrait, Schema};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn create<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        manager.create_table(create(&schema, employee::Entity)).await?;
        manager.create_table(create(&schema, department::Entity)).await?;
        manager.create_table(create(&schema, attendance::Entity)).await?;
        manager.create_table(create(&schema, leave_request::Entity)).await?;
        manager.create_table(create(&schema, payroll::Entity)).await?;
        manager.create_table(create(&schema, report::Entity)).await?;
        manager.create_table(create(&schema, profile::Entity)).await?;

        // Read-all orders attendance by date and leave by applied_on
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_date")
                    .table(attendance::Entity)
                    .col(attendance::Column::Date)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leave_requests_applied_on")
                    .table(leave_request::Entity)
                    .col(leave_request::Column::AppliedOn)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            profile::Entity.table_ref(),
            report::Entity.table_ref(),
            payroll::Entity.table_ref(),
            leave_request::Entity.table_ref(),
            attendance::Entity.table_ref(),
            department::Entity.table_ref(),
            employee::Entity.table_ref(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
