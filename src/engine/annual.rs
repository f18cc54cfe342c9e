//! Yearly salary roll-up for one employee.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollResult;
use crate::models::{SalaryRecord, validate_year};
use crate::store::{RecordFilter, SalaryRecordStore};

/// Column totals over the records included in an [`AnnualSummary`].
///
/// `net` always equals the sum of each included record's derived net pay;
/// it is computed, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualTotals {
    /// Sum of base amounts.
    pub base: Decimal,
    /// Sum of allowances.
    pub allowances: Decimal,
    /// Sum of bonuses.
    pub bonus: Decimal,
    /// Sum of deductions.
    pub deductions: Decimal,
    /// Sum of derived net pay.
    pub net: Decimal,
}

/// One employee's salary records for a calendar year, with totals.
///
/// Only months with an existing record appear in the breakdown; missing
/// months contribute nothing, not zeros. With no records at all the
/// breakdown is empty and every total is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// The employee the summary is for.
    pub employee_id: String,
    /// The calendar year covered.
    pub year: i32,
    /// The included records, sorted by month ascending.
    pub records: Vec<SalaryRecord>,
    /// Totals over the included records only.
    pub totals: AnnualTotals,
}

/// Groups an employee's records by fiscal year and computes totals.
///
/// Reads are snapshots: a record written concurrently with the aggregation
/// may or may not be included, which is acceptable for reporting.
#[derive(Clone)]
pub struct AnnualAggregator {
    store: Arc<dyn SalaryRecordStore>,
}

impl AnnualAggregator {
    /// Creates an aggregator over the given store.
    pub fn new(store: Arc<dyn SalaryRecordStore>) -> Self {
        Self { store }
    }

    /// Summarizes one employee's records for one calendar year.
    ///
    /// All statuses are included; the yearly slip shows pending months
    /// alongside paid ones.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`](crate::error::PayrollError::Validation)
    /// if the year is not a positive four-digit integer.
    pub fn summarize(&self, employee_id: &str, year: i32) -> PayrollResult<AnnualSummary> {
        validate_year(year)?;
        let mut records = self
            .store
            .find(&RecordFilter::for_employee_year(employee_id, year));
        records.sort_by_key(|record| record.period.month);

        let totals = records.iter().fold(AnnualTotals::default(), |acc, record| {
            AnnualTotals {
                base: acc.base + record.base_amount,
                allowances: acc.allowances + record.allowances,
                bonus: acc.bonus + record.bonus,
                deductions: acc.deductions + record.deductions,
                net: acc.net + record.net_pay(),
            }
        });

        Ok(AnnualSummary {
            employee_id: employee_id.to_string(),
            year,
            records,
            totals,
        })
    }
}
