//! Server-rendered admin overview at `/`.

use crate::entities::profile;
use crate::entities::{
    AttendanceRecord, Department, Employee, LeaveRequest, PayrollRecord, Report, UserProfile,
};
use crate::errors::ApiError;
use crate::traits::Record;
use axum::extract::State;
use axum::response::Html;
use sea_orm::DatabaseConnection;
use std::fmt::Display;

/// Everything the overview page shows, loaded in one pass.
#[derive(Debug, Default)]
pub struct Overview {
    pub employees: Vec<Employee>,
    pub departments: Vec<Department>,
    pub attendance: Vec<AttendanceRecord>,
    pub leave_requests: Vec<LeaveRequest>,
    pub payroll: Vec<PayrollRecord>,
    pub reports: Vec<Report>,
    pub profile: Option<UserProfile>,
}

impl Overview {
    /// # Errors
    ///
    /// Store errors from any of the underlying reads.
    pub async fn load(db: &DatabaseConnection) -> Result<Self, ApiError> {
        let profile = match profile::current(db).await {
            Ok(profile) => Some(profile),
            Err(ApiError::NotFound { .. }) => None,
            Err(err) => return Err(err),
        };
        Ok(Self {
            employees: Employee::get_all(db).await?,
            departments: Department::get_all(db).await?,
            attendance: AttendanceRecord::get_all(db).await?,
            leave_requests: LeaveRequest::get_all(db).await?,
            payroll: PayrollRecord::get_all(db).await?,
            reports: Report::get_all(db).await?,
            profile,
        })
    }
}

pub async fn overview(State(db): State<DatabaseConnection>) -> Result<Html<String>, ApiError> {
    let overview = Overview::load(&db).await?;
    Ok(Html(render(&overview)))
}

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn cell(value: impl Display) -> String {
    format!("<td>{}</td>", escape(&value.to_string()))
}

fn opt_cell(value: Option<&String>) -> String {
    cell(value.map_or("N/A", String::as_str))
}

fn status_cell(status: &str) -> String {
    let class = status.to_ascii_lowercase().replace(' ', "-");
    format!(
        "<td class=\"status-{}\">{}</td>",
        escape(&class),
        escape(status)
    )
}

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Serialized wire name of a status enum, e.g. "On Leave".
fn label<T: serde::Serialize>(status: &T) -> String {
    serde_json::to_value(status)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn section(title: &str, count: usize, headers: &[&str], rows: &[String]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let header: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let body: String = rows.iter().map(|row| format!("<tr>{row}</tr>")).collect();
    format!(
        "<div class=\"section\"><h2>{} ({count})</h2><table><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table></div>",
        escape(title)
    )
}

const STYLE: &str = "body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;margin:0;padding:20px;background:#f5f5f5}\
.container{max-width:1200px;margin:0 auto;background:#fff;border-radius:8px;box-shadow:0 2px 10px rgba(0,0,0,.1);overflow:hidden}\
.header{background:#2563eb;color:#fff;padding:20px;text-align:center}\
.section{margin:20px}.section h2{color:#1f2937;border-bottom:2px solid #e5e7eb;padding-bottom:10px}\
table{width:100%;border-collapse:collapse;margin-bottom:30px}th,td{padding:12px;text-align:left;border-bottom:1px solid #e5e7eb}\
th{background:#f9fafb;font-weight:600;color:#374151}\
.status-active,.status-approved,.status-paid,.status-generated,.status-present{color:#059669;font-weight:500}\
.status-inactive,.status-rejected,.status-failed,.status-absent{color:#dc2626;font-weight:500}\
.status-pending,.status-processing,.status-late{color:#d97706;font-weight:500}\
.avatar{width:40px;height:40px;border-radius:50%;object-fit:cover}\
.stats{display:grid;grid-template-columns:repeat(auto-fit,minmax(200px,1fr));gap:20px;margin:20px}\
.stat-card{background:#f9fafb;padding:20px;border-radius:8px;text-align:center}\
.stat-number{font-size:2em;font-weight:700;color:#2563eb}.stat-label{color:#6b7280}";

#[must_use]
pub fn render(data: &Overview) -> String {
    let stats: String = [
        (data.employees.len(), "Total Employees"),
        (data.departments.len(), "Departments"),
        (data.attendance.len(), "Attendance Records"),
        (data.leave_requests.len(), "Leave Requests"),
        (data.payroll.len(), "Payroll Records"),
        (data.reports.len(), "Reports Generated"),
    ]
    .iter()
    .map(|(count, name)| {
        format!(
            "<div class=\"stat-card\"><div class=\"stat-number\">{count}</div><div class=\"stat-label\">{name}</div></div>"
        )
    })
    .collect();

    let employees: Vec<String> = data
        .employees
        .iter()
        .map(|e| {
            let avatar = e.avatar.as_deref().map_or_else(
                || "<td></td>".to_string(),
                |file| {
                    format!(
                        "<td><img class=\"avatar\" alt=\"Avatar\" src=\"/uploads/{}\"></td>",
                        escape(file)
                    )
                },
            );
            [
                cell(e.id),
                avatar,
                cell(&e.name),
                cell(&e.email),
                opt_cell(e.department.as_ref()),
                opt_cell(e.position.as_ref()),
                status_cell(&label(&e.status)),
                cell(e.join_date.map_or_else(|| "N/A".to_string(), |d| d.to_string())),
                opt_cell(e.salary.as_ref()),
            ]
            .concat()
        })
        .collect();

    let departments: Vec<String> = data
        .departments
        .iter()
        .map(|d| {
            [
                cell(d.id),
                cell(&d.name),
                opt_cell(d.description.as_ref()),
                opt_cell(d.manager.as_ref()),
                cell(d.employee_count),
                status_cell(&label(&d.status)),
            ]
            .concat()
        })
        .collect();

    let attendance: Vec<String> = data
        .attendance
        .iter()
        .map(|a| {
            [
                cell(a.id),
                cell(&a.employee_name),
                cell(a.date),
                opt_cell(a.check_in.as_ref()),
                opt_cell(a.check_out.as_ref()),
                cell(format!("{}h", a.hours_worked)),
                status_cell(&label(&a.status)),
            ]
            .concat()
        })
        .collect();

    let leave_requests: Vec<String> = data
        .leave_requests
        .iter()
        .map(|l| {
            [
                cell(l.id),
                cell(&l.employee_name),
                cell(&l.leave_type),
                cell(l.start_date),
                cell(l.end_date),
                cell(l.days),
                status_cell(&l.status.to_string()),
            ]
            .concat()
        })
        .collect();

    let payroll: Vec<String> = data
        .payroll
        .iter()
        .map(|p| {
            [
                cell(p.id),
                cell(&p.employee_name),
                opt_cell(p.position.as_ref()),
                cell(money(p.basic_salary)),
                cell(money(p.gross_pay)),
                cell(money(p.net_pay)),
                cell(&p.pay_period),
                status_cell(&p.status.to_string()),
            ]
            .concat()
        })
        .collect();

    let reports: Vec<String> = data
        .reports
        .iter()
        .map(|r| {
            [
                cell(r.id),
                cell(&r.title),
                cell(&r.report_type),
                opt_cell(r.period.as_ref()),
                cell(r.generated_on),
                status_cell(&label(&r.status)),
                opt_cell(r.file_size.as_ref()),
            ]
            .concat()
        })
        .collect();

    let profile: Vec<String> = data
        .profile
        .iter()
        .map(|p| {
            [
                cell(&p.name),
                cell(&p.email),
                opt_cell(p.position.as_ref()),
                opt_cell(p.department.as_ref()),
                cell(p.join_date.map_or_else(|| "N/A".to_string(), |d| d.to_string())),
                opt_cell(p.phone.as_ref()),
            ]
            .concat()
        })
        .collect();

    let sections = [
        section(
            "Employees",
            data.employees.len(),
            &[
                "ID", "Avatar", "Name", "Email", "Department", "Position", "Status", "Join Date",
                "Salary",
            ],
            &employees,
        ),
        section(
            "Departments",
            data.departments.len(),
            &["ID", "Name", "Description", "Manager", "Employee Count", "Status"],
            &departments,
        ),
        section(
            "Attendance Records",
            data.attendance.len(),
            &["ID", "Employee", "Date", "Check In", "Check Out", "Hours", "Status"],
            &attendance,
        ),
        section(
            "Leave Requests",
            data.leave_requests.len(),
            &["ID", "Employee", "Type", "Start", "End", "Days", "Status"],
            &leave_requests,
        ),
        section(
            "Payroll Records",
            data.payroll.len(),
            &[
                "ID", "Employee", "Position", "Basic Salary", "Gross Pay", "Net Pay", "Period",
                "Status",
            ],
            &payroll,
        ),
        section(
            "Generated Reports",
            data.reports.len(),
            &["ID", "Title", "Type", "Period", "Generated On", "Status", "File Size"],
            &reports,
        ),
        section(
            "User Profile",
            profile.len(),
            &["Name", "Email", "Position", "Department", "Join Date", "Phone"],
            &profile,
        ),
    ]
    .concat();

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
<title>HR Database Overview</title><style>{STYLE}</style></head>\
<body><div class=\"container\"><div class=\"header\"><h1>HR Database Overview</h1></div>\
<div class=\"stats\">{stats}</div>{sections}</div></body></html>"
    )
}
