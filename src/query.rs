//! Read-side projections over salary records.
//!
//! Everything the administration UI renders comes from here: the paginated
//! payroll table, the "Generate All Pending (N)" affordance backed by the
//! missing-employees set, the pending totals banner, the monthly payout
//! chart and the single-record salary slip.
//!
//! Pagination is stable: whatever the sort field and order, ties are broken
//! by record id ascending, so repeated page requests under concurrent writes
//! never skip or duplicate a row.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayStatus, Period, RecordId, SalaryRecord, validate_year};
use crate::providers::EmployeeDirectory;
use crate::store::{RecordFilter, SalaryRecordStore};

/// Sortable columns of the list projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Resolved employee display name.
    EmployeeName,
    /// Base salary amount.
    BaseAmount,
    /// Derived net pay.
    NetPay,
    /// The record's period, chronologically.
    #[default]
    PeriodDate,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending. The default, newest periods first.
    #[default]
    Desc,
}

/// Sort contract for the list projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSort {
    /// The column to sort by.
    pub field: SortField,
    /// The direction to sort in.
    pub order: SortOrder,
}

/// One page of the list projection, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl PageRequest {
    /// Validates that page and page size are positive.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.page == 0 {
            return Err(PayrollError::Validation {
                field: "page".to_string(),
                message: "page numbers start at 1".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(PayrollError::Validation {
                field: "page_size".to_string(),
                message: "page size must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Filter contract for the list projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    /// Restrict to one session.
    pub session_id: Option<String>,
    /// Restrict to one period month.
    pub month: Option<u32>,
    /// Restrict to one period year.
    pub year: Option<i32>,
    /// Restrict to one employee.
    pub employee_id: Option<String>,
    /// Restrict to one settlement state.
    pub status: Option<PayStatus>,
    /// Case-insensitive substring match on the employee display name.
    pub search: Option<String>,
}

/// One row of the list projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// The underlying record.
    #[serde(flatten)]
    pub record: SalaryRecord,
    /// The resolved employee display name (the employee id when the
    /// directory no longer knows the employee).
    pub employee_name: String,
    /// The record's derived net pay.
    pub net_pay: Decimal,
}

/// A page of rows plus the total match count before pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult {
    /// The requested page of rows.
    pub items: Vec<ListItem>,
    /// How many records matched the filter in total.
    pub total_count: usize,
}

/// Count and net sum of unsettled records for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTotals {
    /// Number of `PENDING` and `PARTIAL` records.
    pub count: usize,
    /// Sum of their derived net pay.
    pub sum_net: Decimal,
}

/// Paid-out total for one month of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayout {
    /// The month (1..=12).
    pub month: u32,
    /// Sum of `base + allowances + bonus` over `PAID` records in the month.
    pub amount: Decimal,
}

/// A single record prepared for slip rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySlip {
    /// The underlying record.
    pub record: SalaryRecord,
    /// The employee, when the directory still lists them for the record's
    /// session.
    pub employee: Option<Employee>,
    /// The record's derived net pay.
    pub net_pay: Decimal,
}

/// Read-side query layer over the store and the employee directory.
#[derive(Clone)]
pub struct RecordQuery {
    store: Arc<dyn SalaryRecordStore>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl RecordQuery {
    /// Creates a query layer over the given store and directory.
    pub fn new(store: Arc<dyn SalaryRecordStore>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { store, directory }
    }

    /// Lists records matching the filter, sorted and paginated.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] for a zero page or page size, an
    /// out-of-range filter month, or a malformed filter year.
    pub fn list(
        &self,
        filter: &ListFilter,
        sort: ListSort,
        page: PageRequest,
    ) -> PayrollResult<ListResult> {
        page.validate()?;
        if let Some(month) = filter.month {
            if !(1..=12).contains(&month) {
                return Err(PayrollError::Validation {
                    field: "month".to_string(),
                    message: format!("month must be between 1 and 12, got {month}"),
                });
            }
        }
        if let Some(year) = filter.year {
            validate_year(year)?;
        }

        let records = self.store.find(&RecordFilter {
            session_id: filter.session_id.clone(),
            month: filter.month,
            year: filter.year,
            employee_id: filter.employee_id.clone(),
            status: filter.status,
        });
        let names = self.resolve_names(filter.session_id.as_deref(), &records);

        let mut rows: Vec<ListItem> = records
            .into_iter()
            .map(|record| {
                let employee_name = names
                    .get(&record.employee_id)
                    .cloned()
                    .unwrap_or_else(|| record.employee_id.clone());
                let net_pay = record.net_pay();
                ListItem {
                    record,
                    employee_name,
                    net_pay,
                }
            })
            .collect();

        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            rows.retain(|row| row.employee_name.to_lowercase().contains(&needle));
        }

        let total_count = rows.len();
        rows.sort_by(|a, b| compare_rows(a, b, sort));

        let items = rows
            .into_iter()
            .skip((page.page - 1) * page.page_size)
            .take(page.page_size)
            .collect();

        Ok(ListResult { items, total_count })
    }

    /// Returns the active employees with no record for the period, in
    /// directory order.
    ///
    /// This is the exact set bulk generation would create records for; the
    /// UI shows its size as "Generate All Pending (N)".
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] for a malformed period.
    pub fn find_missing_employees(
        &self,
        period: Period,
        session_id: &str,
    ) -> PayrollResult<Vec<Employee>> {
        period.validate()?;
        let existing: std::collections::HashSet<String> = self
            .store
            .find(&RecordFilter::for_period(period, session_id))
            .into_iter()
            .map(|record| record.employee_id)
            .collect();
        Ok(self
            .directory
            .list_active(session_id)
            .into_iter()
            .filter(|employee| !existing.contains(&employee.employee_id))
            .collect())
    }

    /// Counts unsettled (`PENDING` or `PARTIAL`) records for the period and
    /// sums their derived net pay.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] for a malformed period.
    pub fn pending_totals(&self, period: Period, session_id: &str) -> PayrollResult<PendingTotals> {
        period.validate()?;
        let totals = self
            .store
            .find(&RecordFilter::for_period(period, session_id))
            .into_iter()
            .filter(|record| {
                matches!(record.status, PayStatus::Pending | PayStatus::Partial)
            })
            .fold(PendingTotals::default(), |acc, record| PendingTotals {
                count: acc.count + 1,
                sum_net: acc.sum_net + record.net_pay(),
            });
        Ok(totals)
    }

    /// Sums paid-out amounts (`base + allowances + bonus` over `PAID`
    /// records) per month of the year; always twelve entries.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] for a malformed year.
    pub fn monthly_payouts(
        &self,
        year: i32,
        session_id: Option<&str>,
    ) -> PayrollResult<Vec<MonthlyPayout>> {
        validate_year(year)?;
        let mut amounts = [Decimal::ZERO; 12];
        let filter = RecordFilter {
            session_id: session_id.map(str::to_string),
            year: Some(year),
            status: Some(PayStatus::Paid),
            ..RecordFilter::default()
        };
        for record in self.store.find(&filter) {
            let idx = (record.period.month - 1) as usize;
            amounts[idx] += record.base_amount + record.allowances + record.bonus;
        }
        Ok(amounts
            .into_iter()
            .enumerate()
            .map(|(idx, amount)| MonthlyPayout {
                month: idx as u32 + 1,
                amount,
            })
            .collect())
    }

    /// Fetches one record prepared for slip rendering.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NotFound`] for an unknown id.
    pub fn slip(&self, id: RecordId) -> PayrollResult<SalarySlip> {
        let record = self.store.get(id).ok_or(PayrollError::NotFound { id })?;
        let employee = self
            .directory
            .list_active(&record.session_id)
            .into_iter()
            .find(|employee| employee.employee_id == record.employee_id);
        let net_pay = record.net_pay();
        Ok(SalarySlip {
            record,
            employee,
            net_pay,
        })
    }

    /// Resolves employee display names for the sessions the records span.
    fn resolve_names(
        &self,
        session_id: Option<&str>,
        records: &[SalaryRecord],
    ) -> HashMap<String, String> {
        let mut sessions: Vec<&str> = match session_id {
            Some(session) => vec![session],
            None => records.iter().map(|r| r.session_id.as_str()).collect(),
        };
        sessions.sort_unstable();
        sessions.dedup();

        let mut names = HashMap::new();
        for session in sessions {
            for employee in self.directory.list_active(session) {
                names.insert(employee.employee_id, employee.employee_name);
            }
        }
        names
    }
}

/// Compares two rows by the sort contract, breaking ties by record id
/// ascending regardless of the requested order.
fn compare_rows(a: &ListItem, b: &ListItem, sort: ListSort) -> Ordering {
    let primary = match sort.field {
        SortField::EmployeeName => a.employee_name.cmp(&b.employee_name),
        SortField::BaseAmount => a.record.base_amount.cmp(&b.record.base_amount),
        SortField::NetPay => a.net_pay.cmp(&b.net_pay),
        SortField::PeriodDate => a.record.period.cmp(&b.record.period),
    };
    let primary = match sort.order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };
    primary.then_with(|| a.record.id.cmp(&b.record.id))
}
