//! Demonstration data inserted into an empty store.
//!
//! Rows go through the same create and status paths as API requests, so
//! derived fields and name snapshots are computed rather than hard-coded.

use crate::entities::attendance::{AttendanceInput, AttendanceStatus};
use crate::entities::department::DepartmentInput;
use crate::entities::employee::{self, EmployeeInput, EmployeeStatus};
use crate::entities::leave_request::{self, LeaveRequestInput, LeaveStatus};
use crate::entities::payroll::{self, PayrollInput, PayrollStatus};
use crate::entities::profile::{self, ProfileInput};
use crate::entities::report::{ReportInput, ReportStatus};
use crate::entities::{AttendanceRecord, Department, Employee, LeaveRequest, PayrollRecord, Report};
use crate::errors::ApiError;
use crate::traits::Record;
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

struct SampleEmployee {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    department: &'static str,
    position: &'static str,
    status: EmployeeStatus,
    join_date: (i32, u32, u32),
    address: &'static str,
    salary: &'static str,
    emergency_contact: &'static str,
}

impl SampleEmployee {
    fn input(&self) -> EmployeeInput {
        let (year, month, day) = self.join_date;
        EmployeeInput {
            name: s(self.name),
            email: s(self.email),
            phone: s(self.phone),
            department: s(self.department),
            position: s(self.position),
            status: Some(self.status.clone()),
            join_date: NaiveDate::from_ymd_opt(year, month, day),
            address: s(self.address),
            salary: s(self.salary),
            emergency_contact: s(self.emergency_contact),
            avatar: None,
        }
    }
}

const SAMPLE_EMPLOYEES: [SampleEmployee; 5] = [
    SampleEmployee {
        name: "Sarah Johnson",
        email: "sarah.johnson@company.com",
        phone: "+1 (555) 123-4567",
        department: "Engineering",
        position: "Senior Developer",
        status: EmployeeStatus::Active,
        join_date: (2022, 3, 15),
        address: "123 Main St, New York, NY",
        salary: "75000",
        emergency_contact: "+1 (555) 999-0001",
    },
    SampleEmployee {
        name: "Michael Chen",
        email: "michael.chen@company.com",
        phone: "+1 (555) 234-5678",
        department: "Marketing",
        position: "Marketing Manager",
        status: EmployeeStatus::Active,
        join_date: (2021, 8, 22),
        address: "456 Oak Ave, Los Angeles, CA",
        salary: "65000",
        emergency_contact: "+1 (555) 999-0002",
    },
    SampleEmployee {
        name: "Emily Rodriguez",
        email: "emily.rodriguez@company.com",
        phone: "+1 (555) 345-6789",
        department: "Sales",
        position: "Sales Representative",
        status: EmployeeStatus::OnLeave,
        join_date: (2023, 1, 10),
        address: "789 Pine St, Chicago, IL",
        salary: "55000",
        emergency_contact: "+1 (555) 999-0003",
    },
    SampleEmployee {
        name: "David Kim",
        email: "david.kim@company.com",
        phone: "+1 (555) 456-7890",
        department: "Engineering",
        position: "DevOps Engineer",
        status: EmployeeStatus::Active,
        join_date: (2022, 11, 5),
        address: "321 Elm St, Seattle, WA",
        salary: "80000",
        emergency_contact: "+1 (555) 999-0004",
    },
    SampleEmployee {
        name: "Lisa Wang",
        email: "lisa.wang@company.com",
        phone: "+1 (555) 567-8901",
        department: "HR",
        position: "HR Specialist",
        status: EmployeeStatus::Active,
        join_date: (2021, 6, 18),
        address: "654 Maple Dr, Boston, MA",
        salary: "60000",
        emergency_contact: "+1 (555) 999-0005",
    },
];

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn jan_2024(day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 1, day)
}

/// Inserts the sample data set unless employees already exist. Returns
/// whether anything was inserted.
///
/// # Errors
///
/// Any store or validation error from the inserts.
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<bool, ApiError> {
    if employee::Entity::find().count(db).await? > 0 {
        tracing::debug!("Employees present; skipping sample data");
        return Ok(false);
    }

    let mut employee_ids = Vec::new();
    for sample in &SAMPLE_EMPLOYEES {
        let created = Employee::create(db, sample.input()).await?;
        employee_ids.push(created.id);
    }
    let &[sarah, michael, emily, david, lisa] = employee_ids.as_slice() else {
        return Err(ApiError::internal("Sample employees were not created", None));
    };

    for (name, description, manager, count) in [
        ("Engineering", "Software development and technical operations", "Sarah Johnson", 25),
        ("Marketing", "Brand promotion and digital marketing", "Michael Chen", 8),
        ("Sales", "Business development and client relations", "Emily Rodriguez", 12),
        ("HR", "Human resources and employee management", "Lisa Wang", 5),
    ] {
        Department::create(
            db,
            DepartmentInput {
                name: s(name),
                description: s(description),
                manager: s(manager),
                employee_count: Some(count),
                status: None,
            },
        )
        .await?;
    }

    for (employee_id, check_in, check_out, status) in [
        (sarah, s("09:00"), s("17:30"), AttendanceStatus::Present),
        (michael, s("09:15"), s("17:00"), AttendanceStatus::Late),
        (emily, None, None, AttendanceStatus::Absent),
        (david, s("09:00"), s("18:00"), AttendanceStatus::Present),
        (lisa, s("09:00"), s("13:00"), AttendanceStatus::HalfDay),
    ] {
        AttendanceRecord::create(
            db,
            AttendanceInput {
                employee_id: Some(employee_id),
                employee_name: None,
                date: jan_2024(15),
                check_in,
                check_out,
                status: Some(status),
            },
        )
        .await?;
    }

    for (employee_id, leave_type, start, end, reason, applied_on, decision) in [
        (sarah, "Annual Leave", 20, 25, "Family vacation", 10, Some(LeaveStatus::Approved)),
        (michael, "Sick Leave", 18, 19, "Medical appointment", 15, None),
        (emily, "Personal Leave", 22, 22, "Personal emergency", 16, Some(LeaveStatus::Rejected)),
    ] {
        let request = LeaveRequest::create(
            db,
            LeaveRequestInput {
                employee_id: Some(employee_id),
                employee_name: None,
                leave_type: s(leave_type),
                start_date: jan_2024(start),
                end_date: jan_2024(end),
                reason: s(reason),
                status: None,
                applied_on: jan_2024(applied_on),
            },
        )
        .await?;
        if let Some(decision) = decision {
            leave_request::set_status(db, request.id, decision).await?;
        }
    }

    for (employee_id, basic, allowances, overtime, deductions, status) in [
        (sarah, 5000.0, 500.0, 200.0, 100.0, PayrollStatus::Paid),
        (michael, 6000.0, 600.0, 0.0, 50.0, PayrollStatus::Processed),
        (david, 4000.0, 400.0, 300.0, 80.0, PayrollStatus::Pending),
    ] {
        let record = PayrollRecord::create(
            db,
            PayrollInput {
                employee_id: Some(employee_id),
                employee_name: None,
                position: None,
                basic_salary: Some(basic),
                allowances: Some(allowances),
                overtime: Some(overtime),
                deductions: Some(deductions),
                pay_period: s("January 2024"),
                status: None,
            },
        )
        .await?;
        payroll::set_status(db, record.id, status).await?;
    }

    for (title, report_type, description, generated_on, period, status, size, path) in [
        (
            "Monthly Payroll Report - January 2024",
            "Payroll",
            "Complete payroll summary including taxes and deductions",
            jan_2024(31),
            "January 2024",
            ReportStatus::Generated,
            s("2.3 MB"),
            s("/reports/payroll_jan_2024.pdf"),
        ),
        (
            "Employee Attendance Summary - Q1 2024",
            "Attendance",
            "Quarterly attendance analysis with overtime calculations",
            jan_2024(15),
            "Q1 2024",
            ReportStatus::Generated,
            s("1.8 MB"),
            s("/reports/attendance_q1_2024.pdf"),
        ),
        (
            "Leave Requests Analysis - 2023",
            "Leave",
            "Annual leave patterns and approval statistics",
            jan_2024(10),
            "2023",
            ReportStatus::Processing,
            None,
            None,
        ),
    ] {
        Report::create(
            db,
            ReportInput {
                title: s(title),
                report_type: s(report_type),
                description: s(description),
                generated_on,
                period: s(period),
                status: Some(status),
                file_size: size,
                file_path: path,
            },
        )
        .await?;
    }

    profile::replace(
        db,
        ProfileInput {
            name: s("Sarah Johnson"),
            email: s("sarah.johnson@company.com"),
            phone: s("+1 (555) 123-4567"),
            position: s("HR Manager"),
            department: s("Human Resources"),
            join_date: NaiveDate::from_ymd_opt(2021, 3, 15),
            address: s("123 Main St, New York, NY 10001"),
            bio: s(
                "Experienced HR professional with over 8 years in talent management and \
                 organizational development.",
            ),
            avatar: None,
        },
    )
    .await?;

    tracing::info!(employees = employee_ids.len(), "Sample data inserted");
    Ok(true)
}
