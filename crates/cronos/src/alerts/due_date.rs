use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Why a single item's due date could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InvalidDateError {
    #[error("reference date is missing or malformed")]
    MissingReferenceDate,
    #[error("validity period of {validity_days} days is negative")]
    NegativeValidity { validity_days: i64 },
    #[error("{reference_date} plus {validity_days} days is outside the supported calendar")]
    OutOfRange {
        reference_date: NaiveDate,
        validity_days: i64,
    },
}

/// Calendar-day addition; `validity_days == 0` means due on the reference date.
pub fn compute_due_date(
    reference_date: NaiveDate,
    validity_days: i64,
) -> Result<NaiveDate, InvalidDateError> {
    let days =
        u64::try_from(validity_days).map_err(|_| InvalidDateError::NegativeValidity {
            validity_days,
        })?;

    reference_date
        .checked_add_days(Days::new(days))
        .ok_or(InvalidDateError::OutOfRange {
            reference_date,
            validity_days,
        })
}

/// Whole days from `as_of` until `due_date`; negative once overdue.
pub fn days_to_due(due_date: NaiveDate, as_of: NaiveDate) -> i64 {
    due_date.signed_duration_since(as_of).num_days()
}
