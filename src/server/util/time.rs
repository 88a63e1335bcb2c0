//! Calendar date calculation utilities.
//!
//! This module provides the recurrence arithmetic that turns the due date of a policy's
//! latest installment into the due date of the next one, and the conversion of the current
//! instant into the business "today" that decides whether an installment is due yet.

use chrono::{DateTime, Months, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::server::{error::ledger::LedgerError, model::ledger::PaymentFrequency};

/// Calculates the due date of the installment following `last_due_date`.
///
/// Adds the number of calendar months implied by the frequency (1 for monthly and custom,
/// 3 for quarterly, 6 for semiannual, 12 for annual). When the target month is shorter than
/// the source day, the date is clamped to the last day of the target month, so January 31st
/// followed monthly becomes February 28th (or 29th in a leap year).
///
/// # Arguments
/// - `last_due_date` - Due date of the most recent installment
/// - `frequency_id` - Stored payment frequency id of the policy
///
/// # Returns
/// - `Ok(NaiveDate)` - Next due date, always strictly after `last_due_date`
/// - `Err(LedgerError::UnknownFrequency)` - The frequency id is not recognized
/// - `Err(LedgerError::DueDateOverflow)` - The next date falls outside the supported range
///
/// # Example
/// ```ignore
/// let jan_31 = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let next = next_due_date(jan_31, 1)?;
/// // next == 2025-02-28
/// ```
pub fn next_due_date(last_due_date: NaiveDate, frequency_id: i32) -> Result<NaiveDate, LedgerError> {
    let frequency = PaymentFrequency::from_id(frequency_id)
        .ok_or(LedgerError::UnknownFrequency { frequency_id })?;
    let months = frequency.months();

    last_due_date
        .checked_add_months(Months::new(months))
        .ok_or(LedgerError::DueDateOverflow {
            date: last_due_date,
            months,
        })
}

/// Converts an instant into the calendar date it falls on in the business time zone.
pub fn business_today(now: DateTime<Utc>, timezone: Tz) -> NaiveDate {
    now.with_timezone(&timezone).date_naive()
}
