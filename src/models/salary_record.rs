//! Salary record model and related types.
//!
//! This module defines the [`SalaryRecord`] entity, its [`PayStatus`]
//! lifecycle states, the store-assigned [`RecordId`], and the command
//! payloads ([`NewSalaryRecord`], [`SalaryAmendment`]) accepted by the
//! lifecycle engine.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::Period;

/// Opaque, store-assigned identity of a salary record.
///
/// Backed by a UUID v4. Record ids have a total order, which the query layer
/// uses as the tie-break for stable pagination.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh record id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Settlement state of a salary record.
///
/// Modeled as a closed enum so invalid states are unrepresentable. Records
/// start `Pending`, may move between `Pending` and `Partial`, and end in
/// `Paid`, which is terminal: the only way out of `Paid` is deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayStatus {
    /// Created but not yet settled.
    Pending,
    /// Settled for less than the derived net pay; caller-declared.
    Partial,
    /// Fully settled; terminal.
    Paid,
}

impl fmt::Display for PayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayStatus::Pending => "PENDING",
            PayStatus::Partial => "PARTIAL",
            PayStatus::Paid => "PAID",
        };
        f.write_str(s)
    }
}

/// A monthly compensation record for one employee in one session.
///
/// At most one record exists per `(employee_id, period, session_id)` tuple;
/// the store enforces that uniqueness and it is the single concurrency guard
/// the engine relies on. Net pay is always derived via [`net_pay`], never
/// stored.
///
/// [`net_pay`]: SalaryRecord::net_pay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Reference to the employee owning this record.
    pub employee_id: String,
    /// Reference to the academic session scoping this record.
    pub session_id: String,
    /// The payroll cycle this record covers.
    pub period: Period,
    /// The employee's configured salary figure for the period.
    pub base_amount: Decimal,
    /// Additional allowances for the period.
    pub allowances: Decimal,
    /// Bonus for the period.
    pub bonus: Decimal,
    /// Deductions for the period.
    pub deductions: Decimal,
    /// Settlement state.
    pub status: PayStatus,
    /// Present only once the record is paid or partially settled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

impl SalaryRecord {
    /// Derives the net pay: `base + allowances + bonus - deductions`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{NewSalaryRecord, Period, SalaryRecord};
    /// use rust_decimal::Decimal;
    ///
    /// let record = SalaryRecord::create_pending(NewSalaryRecord {
    ///     employee_id: "emp_001".to_string(),
    ///     session_id: "2025-2026".to_string(),
    ///     period: Period::new(3, 2025).unwrap(),
    ///     base_amount: Decimal::from(50000),
    ///     allowances: Decimal::from(2000),
    ///     bonus: Decimal::from(1000),
    ///     deductions: Decimal::from(500),
    ///     status: None,
    ///     payment_date: None,
    /// }).unwrap();
    /// assert_eq!(record.net_pay(), Decimal::from(52500));
    /// ```
    pub fn net_pay(&self) -> Decimal {
        self.base_amount + self.allowances + self.bonus - self.deductions
    }

    /// Builds a new record from a validated [`NewSalaryRecord`] command.
    ///
    /// The record gets a fresh id and starts in the command's declared status
    /// (`Pending` by default). A `payment_date` is retained only for records
    /// created as `Partial`.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] for a malformed period, a
    /// negative/fractional amount, or a command declaring `Paid` as the
    /// initial status.
    pub fn create_pending(command: NewSalaryRecord) -> PayrollResult<Self> {
        command.validate()?;
        let status = command.status.unwrap_or(PayStatus::Pending);
        let payment_date = match status {
            PayStatus::Partial => command.payment_date,
            _ => None,
        };
        Ok(Self {
            id: RecordId::new(),
            employee_id: command.employee_id,
            session_id: command.session_id,
            period: command.period,
            base_amount: command.base_amount,
            allowances: command.allowances,
            bonus: command.bonus,
            deductions: command.deductions,
            status,
            payment_date,
        })
    }
}

/// Command payload for creating a salary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSalaryRecord {
    /// The employee the record is for.
    pub employee_id: String,
    /// The session scoping the record.
    pub session_id: String,
    /// The payroll cycle the record covers.
    pub period: Period,
    /// The base salary amount.
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
    /// Explicit initial status; `Pending` when omitted. `Paid` is rejected,
    /// since payment is a transition, not an initial state.
    #[serde(default)]
    pub status: Option<PayStatus>,
    /// Settlement date, meaningful only for records created as `Partial`.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

impl NewSalaryRecord {
    /// Validates the command before any store access.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.employee_id.is_empty() {
            return Err(PayrollError::Validation {
                field: "employee_id".to_string(),
                message: "employee id must not be empty".to_string(),
            });
        }
        if self.session_id.is_empty() {
            return Err(PayrollError::Validation {
                field: "session_id".to_string(),
                message: "session id must not be empty".to_string(),
            });
        }
        self.period.validate()?;
        validate_amount("base_amount", self.base_amount)?;
        validate_amount("allowances", self.allowances)?;
        validate_amount("bonus", self.bonus)?;
        validate_amount("deductions", self.deductions)?;
        if self.status == Some(PayStatus::Paid) {
            return Err(PayrollError::Validation {
                field: "status".to_string(),
                message: "a record cannot be created already PAID; create it and pay it"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// Command payload for amending a salary record.
///
/// Every field is optional; omitted fields are left unchanged. Status may
/// only be flipped between `Pending` and `Partial` here; `Paid` is reachable
/// solely through the pay operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryAmendment {
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
    /// Replacement status (`Pending` or `Partial` only).
    #[serde(default)]
    pub status: Option<PayStatus>,
    /// Replacement settlement date, meaningful with a `Partial` status.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

impl SalaryAmendment {
    /// Validates the amendment's amount fields.
    pub fn validate(&self) -> PayrollResult<()> {
        if let Some(amount) = self.base_amount {
            validate_amount("base_amount", amount)?;
        }
        if let Some(amount) = self.allowances {
            validate_amount("allowances", amount)?;
        }
        if let Some(amount) = self.bonus {
            validate_amount("bonus", amount)?;
        }
        if let Some(amount) = self.deductions {
            validate_amount("deductions", amount)?;
        }
        Ok(())
    }
}

/// Validates that a monetary field is a non-negative whole number of
/// currency units.
pub fn validate_amount(field: &str, amount: Decimal) -> PayrollResult<()> {
    if amount.is_sign_negative() {
        return Err(PayrollError::Validation {
            field: field.to_string(),
            message: format!("amount must not be negative, got {amount}"),
        });
    }
    if !amount.fract().is_zero() {
        return Err(PayrollError::Validation {
            field: field.to_string(),
            message: format!("amount must be a whole number of currency units, got {amount}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record_command() -> NewSalaryRecord {
        NewSalaryRecord {
            employee_id: "emp_001".to_string(),
            session_id: "2025-2026".to_string(),
            period: Period::new(3, 2025).unwrap(),
            base_amount: Decimal::from(50000),
            allowances: Decimal::ZERO,
            bonus: Decimal::ZERO,
            deductions: Decimal::ZERO,
            status: None,
            payment_date: None,
        }
    }

    #[test]
    fn test_create_pending_defaults_to_pending_without_payment_date() {
        let record = SalaryRecord::create_pending(new_record_command()).unwrap();
        assert_eq!(record.status, PayStatus::Pending);
        assert!(record.payment_date.is_none());
        assert_eq!(record.base_amount, Decimal::from(50000));
    }

    #[test]
    fn test_create_pending_accepts_explicit_partial() {
        let mut command = new_record_command();
        command.status = Some(PayStatus::Partial);
        command.payment_date = NaiveDate::from_ymd_opt(2025, 3, 28);
        let record = SalaryRecord::create_pending(command).unwrap();
        assert_eq!(record.status, PayStatus::Partial);
        assert_eq!(record.payment_date, NaiveDate::from_ymd_opt(2025, 3, 28));
    }

    #[test]
    fn test_create_pending_rejects_paid_initial_status() {
        let mut command = new_record_command();
        command.status = Some(PayStatus::Paid);
        let err = SalaryRecord::create_pending(command).unwrap_err();
        assert!(matches!(err, PayrollError::Validation { .. }));
    }

    #[test]
    fn test_create_pending_drops_payment_date_for_pending() {
        let mut command = new_record_command();
        command.payment_date = NaiveDate::from_ymd_opt(2025, 3, 28);
        let record = SalaryRecord::create_pending(command).unwrap();
        assert!(record.payment_date.is_none());
    }

    #[test]
    fn test_net_pay_derivation() {
        let mut record = SalaryRecord::create_pending(new_record_command()).unwrap();
        record.allowances = Decimal::from(2000);
        record.bonus = Decimal::from(1000);
        record.deductions = Decimal::from(500);
        assert_eq!(record.net_pay(), Decimal::from(52500));
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let mut command = new_record_command();
        command.deductions = Decimal::from(-1);
        let err = command.validate().unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_validate_rejects_fractional_amount() {
        let mut command = new_record_command();
        command.base_amount = Decimal::new(500005, 1); // 50000.5
        let err = command.validate().unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_validate_rejects_empty_employee_id() {
        let mut command = new_record_command();
        command.employee_id = String::new();
        assert!(command.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_period() {
        let mut command = new_record_command();
        command.period = Period { month: 0, year: 2025 };
        assert!(command.validate().is_err());
    }

    #[test]
    fn test_amendment_validate_checks_present_fields_only() {
        let amendment = SalaryAmendment {
            allowances: Some(Decimal::from(2000)),
            ..Default::default()
        };
        assert!(amendment.validate().is_ok());

        let bad = SalaryAmendment {
            bonus: Some(Decimal::from(-5)),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_status_serializes_as_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&PayStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&PayStatus::Partial).unwrap(),
            "\"PARTIAL\""
        );
        assert_eq!(serde_json::to_string(&PayStatus::Paid).unwrap(), "\"PAID\"");
    }

    #[test]
    fn test_record_id_round_trips_through_display() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = SalaryRecord::create_pending(new_record_command()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        // Unpaid records omit payment_date entirely.
        assert!(!json.contains("payment_date"));
        let back: SalaryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
