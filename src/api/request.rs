//! Request types for the payroll engine API.
//!
//! Periods arrive as flat `month`/`year` fields, matching the forms the UI
//! submits; requests that may omit `session_id` mean "the active session",
//! which the handler resolves through the session provider before calling
//! into the core.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{NewSalaryRecord, PayStatus, Period, RecordId, SalaryAmendment};
use crate::query::{SortField, SortOrder};

/// Request body for `POST /salaries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSalaryRequest {
    /// The employee the record is for.
    pub employee_id: String,
    /// The session; the active session when omitted.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Period month (1..=12).
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// Base salary amount.
    pub base_amount: Decimal,
    /// Allowances; zero when omitted.
    #[serde(default)]
    pub allowances: Decimal,
    /// Bonus; zero when omitted.
    #[serde(default)]
    pub bonus: Decimal,
    /// Deductions; zero when omitted.
    #[serde(default)]
    pub deductions: Decimal,
    /// Explicit initial status; `PENDING` when omitted.
    #[serde(default)]
    pub status: Option<PayStatus>,
    /// Settlement date for records created as `PARTIAL`.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

impl CreateSalaryRequest {
    /// Converts to the core command, with the session already resolved.
    pub fn into_command(self, session_id: String) -> NewSalaryRecord {
        NewSalaryRecord {
            employee_id: self.employee_id,
            session_id,
            period: Period {
                month: self.month,
                year: self.year,
            },
            base_amount: self.base_amount,
            allowances: self.allowances,
            bonus: self.bonus,
            deductions: self.deductions,
            status: self.status,
            payment_date: self.payment_date,
        }
    }
}

/// Request body for `PATCH /salaries/:id`. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmendSalaryRequest {
    /// Replacement base salary amount.
    #[serde(default)]
    pub base_amount: Option<Decimal>,
    /// Replacement allowances.
    #[serde(default)]
    pub allowances: Option<Decimal>,
    /// Replacement bonus.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// Replacement deductions.
    #[serde(default)]
    pub deductions: Option<Decimal>,
    /// Replacement status (`PENDING` or `PARTIAL`).
    #[serde(default)]
    pub status: Option<PayStatus>,
    /// Replacement settlement date.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

impl From<AmendSalaryRequest> for SalaryAmendment {
    fn from(request: AmendSalaryRequest) -> Self {
        Self {
            base_amount: request.base_amount,
            allowances: request.allowances,
            bonus: request.bonus,
            deductions: request.deductions,
            status: request.status,
            payment_date: request.payment_date,
        }
    }
}

/// Request body for `POST /salaries/:id/pay`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayRequest {
    /// The payment date; today when omitted.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

/// Request body for `POST /salaries/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkPayRequest {
    /// The records to pay.
    pub salary_ids: Vec<RecordId>,
    /// The payment date; today when omitted.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

/// Request body for `POST /salaries/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// The records to delete; unknown ids are ignored.
    pub ids: Vec<RecordId>,
}

/// Request body for `POST /salaries/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Period month (1..=12).
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// The session; the active session when omitted.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Query parameters for `GET /salaries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// Restrict to one session.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Restrict to one period month.
    #[serde(default)]
    pub month: Option<u32>,
    /// Restrict to one period year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Restrict to one employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Restrict to one settlement state.
    #[serde(default)]
    pub status: Option<PayStatus>,
    /// Employee name substring search.
    #[serde(default)]
    pub search: Option<String>,
    /// Sort column; period date when omitted.
    #[serde(default)]
    pub sort_field: SortField,
    /// Sort direction; descending when omitted.
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    pub page: usize,
    /// Rows per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    50
}

/// Query parameters for the period-scoped projections
/// (`GET /salaries/missing`, `GET /salaries/pending-totals`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodParams {
    /// Period month (1..=12).
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// The session; the active session when omitted.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Query parameters for `GET /salaries/monthly-payouts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutParams {
    /// The year to chart.
    pub year: i32,
    /// Restrict to one session; all sessions when omitted.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Query parameters for `GET /employees/:id/annual-summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearParams {
    /// The year to summarize.
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_minimal_body() {
        let json = r#"{
            "employee_id": "emp_001",
            "month": 3,
            "year": 2025,
            "base_amount": 50000
        }"#;
        let request: CreateSalaryRequest = serde_json::from_str(json).unwrap();
        assert!(request.session_id.is_none());
        assert_eq!(request.allowances, Decimal::ZERO);
        assert!(request.status.is_none());

        let command = request.into_command("2025-2026".to_string());
        assert_eq!(command.session_id, "2025-2026");
        assert_eq!(command.period, Period { month: 3, year: 2025 });
    }

    #[test]
    fn test_amend_request_maps_to_amendment() {
        let json = r#"{"allowances": 2000, "status": "PARTIAL"}"#;
        let request: AmendSalaryRequest = serde_json::from_str(json).unwrap();
        let amendment: SalaryAmendment = request.into();
        assert_eq!(amendment.allowances, Some(Decimal::from(2000)));
        assert_eq!(amendment.status, Some(PayStatus::Partial));
        assert!(amendment.base_amount.is_none());
    }

    #[test]
    fn test_list_params_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 50);
        assert_eq!(params.sort_field, SortField::PeriodDate);
        assert_eq!(params.sort_order, SortOrder::Desc);
    }
}
