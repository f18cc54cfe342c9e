//! Persistence abstraction for salary records.
//!
//! The [`SalaryRecordStore`] trait is the seam between the lifecycle engine
//! and whatever actually holds the rows. Its one non-negotiable duty is the
//! unique index on `(employee_id, month, year, session_id)`: every
//! higher-level idempotence guarantee, in particular re-runnable bulk
//! generation, is built on the store refusing a duplicate tuple.
//!
//! [`InMemoryStore`] is the bundled implementation, a pair of maps behind a
//! single `RwLock` so the uniqueness check and the insert are atomic.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayStatus, Period, RecordId, SalaryRecord};

/// Filter over stored salary records. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Match records in this session.
    pub session_id: Option<String>,
    /// Match records whose period has this month.
    pub month: Option<u32>,
    /// Match records whose period has this year.
    pub year: Option<i32>,
    /// Match records belonging to this employee.
    pub employee_id: Option<String>,
    /// Match records in this settlement state.
    pub status: Option<PayStatus>,
}

impl RecordFilter {
    /// Filter for one period within one session, the shape used by bulk
    /// generation and the missing-employees projection.
    pub fn for_period(period: Period, session_id: &str) -> Self {
        Self {
            session_id: Some(session_id.to_string()),
            month: Some(period.month),
            year: Some(period.year),
            ..Self::default()
        }
    }

    /// Filter for one employee's records within one calendar year, the shape
    /// used by the annual aggregator.
    pub fn for_employee_year(employee_id: &str, year: i32) -> Self {
        Self {
            employee_id: Some(employee_id.to_string()),
            year: Some(year),
            ..Self::default()
        }
    }

    fn matches(&self, record: &SalaryRecord) -> bool {
        if let Some(session_id) = &self.session_id {
            if &record.session_id != session_id {
                return false;
            }
        }
        if let Some(month) = self.month {
            if record.period.month != month {
                return false;
            }
        }
        if let Some(year) = self.year {
            if record.period.year != year {
                return false;
            }
        }
        if let Some(employee_id) = &self.employee_id {
            if &record.employee_id != employee_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        true
    }
}

/// Persistence seam for salary records.
///
/// Implementations must enforce the uniqueness of
/// `(employee_id, period, session_id)` atomically with respect to concurrent
/// inserts; callers rely on exactly one of two racing inserts winning.
pub trait SalaryRecordStore: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::DuplicateRecord`] if a record already exists
    /// for the same `(employee_id, period, session_id)` tuple.
    fn insert(&self, record: SalaryRecord) -> PayrollResult<SalaryRecord>;

    /// Fetches a record by id.
    fn get(&self, id: RecordId) -> Option<SalaryRecord>;

    /// Replaces a stored record, keyed by its id.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NotFound`] if the id is unknown, or
    /// [`PayrollError::DuplicateRecord`] if the replacement moves the record
    /// onto a tuple another record already occupies.
    fn update(&self, record: &SalaryRecord) -> PayrollResult<()>;

    /// Removes a record, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NotFound`] if the id is unknown.
    fn remove(&self, id: RecordId) -> PayrollResult<SalaryRecord>;

    /// Returns a snapshot of all records matching the filter, in unspecified
    /// order. Snapshot reads are not transactional with concurrent writers.
    fn find(&self, filter: &RecordFilter) -> Vec<SalaryRecord>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RecordKey {
    employee_id: String,
    month: u32,
    year: i32,
    session_id: String,
}

impl RecordKey {
    fn of(record: &SalaryRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            month: record.period.month,
            year: record.period.year,
            session_id: record.session_id.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    records: HashMap<RecordId, SalaryRecord>,
    unique_index: HashMap<RecordKey, RecordId>,
}

/// Thread-safe in-memory salary record store.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{NewSalaryRecord, Period, SalaryRecord};
/// use payroll_engine::store::{InMemoryStore, SalaryRecordStore};
/// use rust_decimal::Decimal;
///
/// let store = InMemoryStore::new();
/// let record = SalaryRecord::create_pending(NewSalaryRecord {
///     employee_id: "emp_001".to_string(),
///     session_id: "2025-2026".to_string(),
///     period: Period::new(3, 2025).unwrap(),
///     base_amount: Decimal::from(50000),
///     allowances: Decimal::ZERO,
///     bonus: Decimal::ZERO,
///     deductions: Decimal::ZERO,
///     status: None,
///     payment_date: None,
/// }).unwrap();
///
/// let stored = store.insert(record.clone()).unwrap();
/// assert!(store.insert(record).is_err()); // same tuple
/// assert_eq!(store.get(stored.id), Some(stored));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SalaryRecordStore for InMemoryStore {
    fn insert(&self, record: SalaryRecord) -> PayrollResult<SalaryRecord> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let key = RecordKey::of(&record);
        if inner.unique_index.contains_key(&key) {
            return Err(PayrollError::DuplicateRecord {
                employee_id: record.employee_id,
                period: record.period,
                session_id: record.session_id,
            });
        }
        inner.unique_index.insert(key, record.id);
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn get(&self, id: RecordId) -> Option<SalaryRecord> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.records.get(&id).cloned()
    }

    fn update(&self, record: &SalaryRecord) -> PayrollResult<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let Some(existing) = inner.records.get(&record.id).cloned() else {
            return Err(PayrollError::NotFound { id: record.id });
        };
        let old_key = RecordKey::of(&existing);
        let new_key = RecordKey::of(record);
        if new_key != old_key {
            if inner.unique_index.contains_key(&new_key) {
                return Err(PayrollError::DuplicateRecord {
                    employee_id: record.employee_id.clone(),
                    period: record.period,
                    session_id: record.session_id.clone(),
                });
            }
            inner.unique_index.remove(&old_key);
            inner.unique_index.insert(new_key, record.id);
        }
        inner.records.insert(record.id, record.clone());
        Ok(())
    }

    fn remove(&self, id: RecordId) -> PayrollResult<SalaryRecord> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let Some(record) = inner.records.remove(&id) else {
            return Err(PayrollError::NotFound { id });
        };
        inner.unique_index.remove(&RecordKey::of(&record));
        Ok(record)
    }

    fn find(&self, filter: &RecordFilter) -> Vec<SalaryRecord> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use rust_decimal::Decimal;

    use super::*;
    use crate::models::NewSalaryRecord;

    fn record(employee_id: &str, month: u32, year: i32, session_id: &str) -> SalaryRecord {
        SalaryRecord::create_pending(NewSalaryRecord {
            employee_id: employee_id.to_string(),
            session_id: session_id.to_string(),
            period: Period::new(month, year).unwrap(),
            base_amount: Decimal::from(50000),
            allowances: Decimal::ZERO,
            bonus: Decimal::ZERO,
            deductions: Decimal::ZERO,
            status: None,
            payment_date: None,
        })
        .unwrap()
    }

    #[test]
    fn test_insert_then_get() {
        let store = InMemoryStore::new();
        let stored = store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
        assert_eq!(store.get(stored.id), Some(stored));
    }

    #[test]
    fn test_insert_rejects_duplicate_tuple() {
        let store = InMemoryStore::new();
        store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
        let err = store.insert(record("emp_001", 3, 2025, "s1")).unwrap_err();
        assert!(matches!(err, PayrollError::DuplicateRecord { .. }));
    }

    #[test]
    fn test_same_employee_different_period_or_session_is_allowed() {
        let store = InMemoryStore::new();
        store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
        store.insert(record("emp_001", 4, 2025, "s1")).unwrap();
        store.insert(record("emp_001", 3, 2026, "s1")).unwrap();
        store.insert(record("emp_001", 3, 2025, "s2")).unwrap();
        assert_eq!(store.find(&RecordFilter::default()).len(), 4);
    }

    #[test]
    fn test_update_replaces_fields() {
        let store = InMemoryStore::new();
        let mut stored = store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
        stored.allowances = Decimal::from(2000);
        store.update(&stored).unwrap();
        assert_eq!(
            store.get(stored.id).unwrap().allowances,
            Decimal::from(2000)
        );
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let unsaved = record("emp_001", 3, 2025, "s1");
        assert!(matches!(
            store.update(&unsaved),
            Err(PayrollError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_onto_occupied_tuple_is_duplicate() {
        let store = InMemoryStore::new();
        store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
        let mut other = store.insert(record("emp_001", 4, 2025, "s1")).unwrap();
        other.period = Period::new(3, 2025).unwrap();
        assert!(matches!(
            store.update(&other),
            Err(PayrollError::DuplicateRecord { .. })
        ));
    }

    #[test]
    fn test_remove_frees_the_tuple() {
        let store = InMemoryStore::new();
        let stored = store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
        store.remove(stored.id).unwrap();
        assert!(store.get(stored.id).is_none());
        // The tuple is reusable after a hard delete.
        store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
    }

    #[test]
    fn test_remove_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.remove(RecordId::new()),
            Err(PayrollError::NotFound { .. })
        ));
    }

    #[test]
    fn test_find_filters_by_period_and_session() {
        let store = InMemoryStore::new();
        store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
        store.insert(record("emp_002", 3, 2025, "s1")).unwrap();
        store.insert(record("emp_003", 4, 2025, "s1")).unwrap();
        store.insert(record("emp_004", 3, 2025, "s2")).unwrap();

        let found = store.find(&RecordFilter::for_period(
            Period::new(3, 2025).unwrap(),
            "s1",
        ));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_find_filters_by_status() {
        let store = InMemoryStore::new();
        let mut paid = store.insert(record("emp_001", 3, 2025, "s1")).unwrap();
        paid.status = PayStatus::Paid;
        store.update(&paid).unwrap();
        store.insert(record("emp_002", 3, 2025, "s1")).unwrap();

        let filter = RecordFilter {
            status: Some(PayStatus::Paid),
            ..RecordFilter::default()
        };
        let found = store.find(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].employee_id, "emp_001");
    }

    #[test]
    fn test_concurrent_inserts_of_same_tuple_have_one_winner() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store.insert(record("emp_001", 3, 2025, "s1")).is_ok()
            }));
        }
        let wins: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();
        assert_eq!(wins, 1);
        assert_eq!(store.find(&RecordFilter::default()).len(), 1);
    }
}
