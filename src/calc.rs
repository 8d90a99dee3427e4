//! Derived-field rules for attendance, leave and payroll records.
//!
//! Every function here is pure: no state, no I/O. The record service calls
//! them when a row is created or replaced, so the stored derived values can
//! never disagree with the raw inputs they were computed from.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use utoipa::ToSchema;

/// Hours in a regular working day; anything beyond counts as overtime.
pub const STANDARD_WORKDAY_HOURS: f64 = 8.0;

/// Flat income tax rate applied to gross pay.
pub const TAX_RATE: f64 = 0.15;

/// Parses a local time of day written as `HH:MM` (or `HH:MM:SS`).
///
/// # Errors
///
/// Returns the chrono parse error when the value matches neither format.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

fn decimal_hours(time: NaiveTime) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0 + f64::from(time.second()) / 3600.0
}

/// Hours between check-in and check-out on the same day.
///
/// Returns `0.0` when either time is missing. A check-out earlier than the
/// check-in clamps to zero; shifts crossing midnight are not supported.
#[must_use]
pub fn hours_worked(check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> f64 {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => {
            (decimal_hours(check_out) - decimal_hours(check_in)).max(0.0)
        }
        _ => 0.0,
    }
}

#[must_use]
pub fn overtime(hours_worked: f64) -> f64 {
    (hours_worked - STANDARD_WORKDAY_HOURS).max(0.0)
}

/// Inclusive number of calendar days covered by a leave request.
///
/// The distance is taken as an absolute value, so a range entered
/// backwards still yields a positive count. Callers that care can detect
/// that case with [`is_reversed_range`].
#[must_use]
pub fn leave_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().abs() + 1
}

#[must_use]
pub fn is_reversed_range(start: NaiveDate, end: NaiveDate) -> bool {
    start > end
}

/// Gross, tax and net amounts for one payroll record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct PayBreakdown {
    pub gross: f64,
    pub tax: f64,
    pub net: f64,
}

impl PayBreakdown {
    /// True when deductions exceed earnings. Such records are stored as-is.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.gross < 0.0
    }
}

/// `gross = basic + allowances + overtime - deductions`, taxed at [`TAX_RATE`].
///
/// No floor is applied: large deductions produce a negative gross and net.
#[must_use]
pub fn payroll(basic: f64, allowances: f64, overtime_pay: f64, deductions: f64) -> PayBreakdown {
    let gross = basic + allowances + overtime_pay - deductions;
    let tax = gross * TAX_RATE;
    PayBreakdown {
        gross,
        tax,
        net: gross - tax,
    }
}
