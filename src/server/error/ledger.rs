//! Ledger domain error types.
//!
//! These errors describe conditions that stop installment generation for a single policy
//! (bad frequency, no payment to base the next due date on, arithmetic overflow) or that
//! refuse a whole run. Domain skip conditions such as a canceled policy or an exhausted
//! cycle are not errors and never appear here.

use chrono::NaiveDate;
use thiserror::Error;

/// Ledger domain error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The policy's payment frequency id does not map to a known recurrence.
    #[error("Unrecognized payment frequency id {frequency_id}")]
    UnknownFrequency { frequency_id: i32 },

    /// Adding the frequency's months to the last due date left the supported calendar range.
    #[error("Cannot advance due date {date} by {months} month(s)")]
    DueDateOverflow { date: NaiveDate, months: u32 },

    /// The policy has no payment to serve as the basis for its next due date.
    #[error("Policy {policy_id} has no payment to base its next due date on")]
    MissingBaseline { policy_id: i32 },

    /// The policy declares fewer than one installment per cycle.
    #[error("Policy {policy_id} has an invalid installment count of {number_of_payments}")]
    InvalidInstallmentCount {
        policy_id: i32,
        number_of_payments: i32,
    },

    /// The policy was listed as a candidate but could not be found when loaded.
    #[error("Policy {0} was not found")]
    PolicyNotFound(i32),

    /// Another run is already in flight in this process.
    #[error("An installment generation run is already in progress")]
    RunInProgress,
}
