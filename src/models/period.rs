//! Payroll period model.
//!
//! This module defines the [`Period`] type identifying one monthly payroll
//! cycle within a calendar year.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// A `(month, year)` pair identifying one payroll cycle.
///
/// A period is valid when `month` is in `1..=12` and `year` is a positive
/// four-digit integer. Every engine operation validates its period before
/// touching the store, so a malformed period is always rejected as a
/// [`PayrollError::Validation`] and never persisted.
///
/// Periods order chronologically: first by year, then by month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Period;
///
/// let march = Period::new(3, 2025).unwrap();
/// let april = Period::new(4, 2025).unwrap();
/// assert!(march < april);
/// assert!(Period::new(13, 2025).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The month of the payroll cycle (1 = January .. 12 = December).
    pub month: u32,
    /// The four-digit calendar year of the payroll cycle.
    pub year: i32,
}

impl Period {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] if the month is outside `1..=12`
    /// or the year is not a positive four-digit integer.
    pub fn new(month: u32, year: i32) -> PayrollResult<Self> {
        let period = Self { month, year };
        period.validate()?;
        Ok(period)
    }

    /// Validates this period's month and year ranges.
    ///
    /// Deserialized periods arrive unchecked, so engine operations call this
    /// before any store access.
    pub fn validate(&self) -> PayrollResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(PayrollError::Validation {
                field: "month".to_string(),
                message: format!("month must be between 1 and 12, got {}", self.month),
            });
        }
        validate_year(self.year)
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Validates a standalone calendar year (positive four-digit integer).
///
/// Used by [`Period::validate`] and by year-scoped queries such as the
/// annual summary, which take a year without a month.
pub fn validate_year(year: i32) -> PayrollResult<()> {
    if !(1000..=9999).contains(&year) {
        return Err(PayrollError::Validation {
            field: "year".to_string(),
            message: format!("year must be a positive 4-digit integer, got {year}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_period() {
        let period = Period::new(3, 2025).unwrap();
        assert_eq!(period.month, 3);
        assert_eq!(period.year, 2025);
    }

    #[test]
    fn test_new_rejects_month_zero() {
        let err = Period::new(0, 2025).unwrap_err();
        assert!(err.to_string().contains("month must be between 1 and 12"));
    }

    #[test]
    fn test_new_rejects_month_thirteen() {
        assert!(Period::new(13, 2025).is_err());
    }

    #[test]
    fn test_new_rejects_three_digit_year() {
        let err = Period::new(6, 999).unwrap_err();
        assert!(err.to_string().contains("4-digit"));
    }

    #[test]
    fn test_new_rejects_negative_year() {
        assert!(Period::new(6, -2025).is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec_2024 = Period::new(12, 2024).unwrap();
        let jan_2025 = Period::new(1, 2025).unwrap();
        let feb_2025 = Period::new(2, 2025).unwrap();
        assert!(dec_2024 < jan_2025);
        assert!(jan_2025 < feb_2025);
    }

    #[test]
    fn test_display_formats_year_month() {
        let period = Period::new(4, 2025).unwrap();
        assert_eq!(period.to_string(), "2025-04");
    }

    #[test]
    fn test_serde_round_trip() {
        let period = Period::new(7, 2026).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"month\":7"));
        assert!(json.contains("\"year\":2026"));
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }

    #[test]
    fn test_deserialized_period_still_requires_validate() {
        // Deserialization itself is unchecked; validate catches the bad month.
        let period: Period = serde_json::from_str(r#"{"month":99,"year":2025}"#).unwrap();
        assert!(period.validate().is_err());
    }

    #[test]
    fn test_validate_year_bounds() {
        assert!(validate_year(1000).is_ok());
        assert!(validate_year(9999).is_ok());
        assert!(validate_year(10000).is_err());
        assert!(validate_year(0).is_err());
    }
}
