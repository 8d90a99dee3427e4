//! Report generation.
//!
//! `generate` stores a report in `Processing` state and hands the actual
//! export to a [`ReportExporter`] on a background task. The exporter that
//! ships with the service records a placeholder artifact; a real PDF or
//! spreadsheet pipeline plugs in behind the same trait.

use crate::entities::report::{self, ReportStatus};
use crate::entities::Report;
use crate::errors::ApiError;
use crate::validation::Required;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

/// Report kinds offered by the client: `(key, label)`. The label is what
/// gets stored as the report's `type`.
pub const REPORT_TYPES: [(&str, &str); 6] = [
    ("payroll", "Payroll Report"),
    ("attendance", "Attendance Report"),
    ("leave", "Leave Report"),
    ("employee", "Employee Report"),
    ("performance", "Performance Report"),
    ("custom", "Custom Report"),
];

const CUSTOM_LABEL: &str = "Custom Report";

/// Label for a report type key. Matching is case-insensitive and also
/// accepts the label itself; anything unknown is a custom report.
#[must_use]
pub fn type_label(report_type: &str) -> &'static str {
    let report_type = report_type.trim();
    REPORT_TYPES
        .iter()
        .find(|(key, label)| {
            key.eq_ignore_ascii_case(report_type) || label.eq_ignore_ascii_case(report_type)
        })
        .map_or(CUSTOM_LABEL, |(_, label)| label)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum ExportFormat {
    #[default]
    #[serde(rename = "PDF", alias = "pdf")]
    Pdf,
    #[serde(rename = "Excel", alias = "excel", alias = "xlsx")]
    Excel,
    #[serde(rename = "CSV", alias = "csv")]
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
            Self::Csv => "csv",
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct GenerateReport {
    pub report_type: Option<String>,
    pub title: Option<String>,
    pub period: Option<String>,
    pub description: Option<String>,
    pub format: ExportFormat,
}

/// Descriptor of a finished export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file_path: String,
    /// Display label, e.g. "2.1 MB".
    pub file_size: String,
}

#[async_trait]
pub trait ReportExporter: Send + Sync {
    /// Produces the artifact for `report`.
    ///
    /// # Errors
    ///
    /// Any error marks the report `Failed`.
    async fn export(&self, report: &Report, format: ExportFormat) -> Result<Artifact, ApiError>;
}

/// Writes nothing; reports a fixed-size artifact path under `/reports/`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderExporter;

#[async_trait]
impl ReportExporter for PlaceholderExporter {
    async fn export(&self, report: &Report, format: ExportFormat) -> Result<Artifact, ApiError> {
        Ok(Artifact {
            file_path: format!("/reports/report_{}.{}", report.id, format.extension()),
            file_size: "2.1 MB".to_string(),
        })
    }
}

/// Stores the report as `Processing` and schedules its completion after
/// `delay`.
///
/// # Errors
///
/// `ValidationFailed` without a report type or period; store errors.
pub async fn generate(
    db: &DatabaseConnection,
    exporter: Arc<dyn ReportExporter>,
    request: GenerateReport,
    delay: Duration,
) -> Result<Report, ApiError> {
    let mut required = Required::new();
    let report_type = required.text("report_type", request.report_type);
    let period = required.text("period", request.period);
    required.finish()?;

    let label = type_label(&report_type);
    let title = match request.title {
        Some(title) if !title.trim().is_empty() => title,
        _ => format!("{label} - {period}"),
    };

    let report = report::ActiveModel {
        title: Set(title),
        report_type: Set(label.to_string()),
        description: Set(request.description),
        generated_on: Set(Utc::now().date_naive()),
        period: Set(Some(period)),
        status: Set(ReportStatus::Processing),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::info!(id = report.id, report_type = label, "Report generation started");

    let db = db.clone();
    let pending = report.clone();
    let format = request.format;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(err) = complete(&db, exporter.as_ref(), &pending, format).await {
            tracing::error!(id = pending.id, error = %err, "Failed to record report completion");
        }
    });

    Ok(report)
}

/// Runs the exporter and records the outcome on the report row.
///
/// # Errors
///
/// Only store errors; exporter failures are recorded as `Failed`.
pub async fn complete(
    db: &DatabaseConnection,
    exporter: &dyn ReportExporter,
    report: &Report,
    format: ExportFormat,
) -> Result<Report, ApiError> {
    let mut active = report::ActiveModel {
        id: sea_orm::ActiveValue::Unchanged(report.id),
        ..Default::default()
    };
    match exporter.export(report, format).await {
        Ok(artifact) => {
            active.status = Set(ReportStatus::Generated);
            active.file_path = Set(Some(artifact.file_path));
            active.file_size = Set(Some(artifact.file_size));
            active.generated_on = Set(Utc::now().date_naive());
        }
        Err(err) => {
            err.log_internal();
            tracing::warn!(id = report.id, error = %err, "Report export failed");
            active.status = Set(ReportStatus::Failed);
        }
    }

    // The row may have been deleted while the export ran.
    if report::Entity::find_by_id(report.id).one(db).await?.is_none() {
        tracing::warn!(id = report.id, "Report deleted before completion");
        return Err(ApiError::not_found("Report", Some(report.id.to_string())));
    }
    let updated = active.update(db).await?;
    tracing::info!(id = updated.id, status = ?updated.status, "Report generation finished");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_labels() {
        assert_eq!(type_label("payroll"), "Payroll Report");
        assert_eq!(type_label("Attendance"), "Attendance Report");
        assert_eq!(type_label("Leave Report"), "Leave Report");
        assert_eq!(type_label("quarterly-kpis"), "Custom Report");
    }

    #[test]
    fn test_format_wire_names() {
        let request: GenerateReport =
            serde_json::from_str(r#"{"report_type": "leave", "period": "2023", "format": "CSV"}"#)
                .unwrap();
        assert_eq!(request.format, ExportFormat::Csv);
        assert_eq!(request.format.extension(), "csv");

        let request: GenerateReport =
            serde_json::from_str(r#"{"report_type": "leave", "period": "2023"}"#).unwrap();
        assert_eq!(request.format, ExportFormat::Pdf);
    }
}
