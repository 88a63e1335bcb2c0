//! In-memory view of a policy's installment ledger.
//!
//! Repositories convert database models into these types once per policy; the generator
//! and orchestrator only ever work on [`PolicyLedger`] values. Appending a payment consumes
//! the ledger and returns the extended one, so every step of a catch-up loop is an explicit
//! state transition rather than a mutation of a shared object.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::server::model::db::{PaymentModel, PolicyModel, PolicyRenewalModel};

/// Status id given to every installment the generator creates.
pub const PAYMENT_STATUS_PENDING: i32 = 1;

/// Recurrence of a policy's installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentFrequency {
    /// Every month.
    Monthly,
    /// Every three months.
    Quarterly,
    /// Every six months.
    Semiannual,
    /// Every twelve months.
    Annual,
    /// Custom frequency, scheduled monthly.
    Other,
}

impl PaymentFrequency {
    /// Maps a stored frequency id, `None` when the id is not recognized.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Monthly),
            2 => Some(Self::Quarterly),
            3 => Some(Self::Semiannual),
            4 => Some(Self::Annual),
            5 => Some(Self::Other),
            _ => None,
        }
    }

    /// Stored id of the frequency.
    pub fn id(self) -> i32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 2,
            Self::Semiannual => 3,
            Self::Annual => 4,
            Self::Other => 5,
        }
    }

    /// Calendar months between two consecutive due dates.
    pub fn months(self) -> u32 {
        match self {
            Self::Monthly | Self::Other => 1,
            Self::Quarterly => 3,
            Self::Semiannual => 6,
            Self::Annual => 12,
        }
    }
}

/// Lifecycle status of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolicyStatus {
    /// In force, installments are generated.
    Active,
    /// Canceled, generation is permanently halted.
    Canceled,
    /// Fully completed, generation is permanently halted.
    Completed,
    /// Any other status managed by the back office.
    Other(i32),
}

impl PolicyStatus {
    /// Stored id of an active policy.
    pub const ACTIVE_ID: i32 = 1;
    /// Stored id of a canceled policy.
    pub const CANCELED_ID: i32 = 2;
    /// Stored id of a completed policy.
    pub const COMPLETED_ID: i32 = 3;

    /// Stored id of the status.
    pub fn id(self) -> i32 {
        match self {
            Self::Active => Self::ACTIVE_ID,
            Self::Canceled => Self::CANCELED_ID,
            Self::Completed => Self::COMPLETED_ID,
            Self::Other(id) => id,
        }
    }

    /// Whether the status permanently stops installment generation.
    pub fn halts_generation(self) -> bool {
        matches!(self, Self::Canceled | Self::Completed)
    }
}

impl From<i32> for PolicyStatus {
    fn from(id: i32) -> Self {
        match id {
            Self::ACTIVE_ID => Self::Active,
            Self::CANCELED_ID => Self::Canceled,
            Self::COMPLETED_ID => Self::Completed,
            other => Self::Other(other),
        }
    }
}

/// Policy fields the ledger engine reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub id: i32,
    pub policy_number: String,
    pub policy_value: Decimal,
    pub number_of_payments: i32,
    /// Raw frequency id; unrecognized ids are reported when the next due date is computed.
    pub payment_frequency_id: i32,
    pub start_date: NaiveDate,
    pub status: PolicyStatus,
}

impl From<PolicyModel> for Policy {
    fn from(model: PolicyModel) -> Self {
        Self {
            id: model.id,
            policy_number: model.policy_number,
            policy_value: model.policy_value,
            number_of_payments: model.number_of_payments,
            payment_frequency_id: model.payment_frequency_id,
            start_date: model.start_date,
            status: PolicyStatus::from(model.status_id),
        }
    }
}

/// A renewal extending a policy by one more cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renewal {
    pub renewal_number: i32,
    pub created_at: NaiveDateTime,
}

impl From<PolicyRenewalModel> for Renewal {
    fn from(model: PolicyRenewalModel) -> Self {
        Self {
            renewal_number: model.renewal_number,
            created_at: model.created_at,
        }
    }
}

/// A persisted installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: i32,
    pub policy_id: i32,
    pub number_payment: i32,
    pub value: Decimal,
    pub pending_value: Decimal,
    pub due_date: NaiveDate,
    pub status_payment_id: i32,
}

impl From<PaymentModel> for Payment {
    fn from(model: PaymentModel) -> Self {
        // SQLite hands decimals back through f64
        Self {
            id: model.id,
            policy_id: model.policy_id,
            number_payment: model.number_payment,
            value: model.value.round_dp(2),
            pending_value: model.pending_value.round_dp(2),
            due_date: model.due_date,
            status_payment_id: model.status_payment_id,
        }
    }
}

/// An installment computed by the generator that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub policy_id: i32,
    pub number_payment: i32,
    pub value: Decimal,
    pub pending_value: Decimal,
    pub due_date: NaiveDate,
    pub status_payment_id: i32,
}

/// Latest installment of a candidate policy, as returned when paging candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPayment {
    pub policy_id: i32,
    pub number_payment: i32,
    pub due_date: NaiveDate,
    pub pending_value: Decimal,
}

/// A policy together with its renewals and its full payment history.
///
/// Payments are kept ordered by `number_payment`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyLedger {
    pub policy: Policy,
    pub renewals: Vec<Renewal>,
    pub payments: Vec<Payment>,
}

impl PolicyLedger {
    /// Builds a ledger, ordering renewals and payments by their sequence numbers.
    pub fn new(policy: Policy, mut renewals: Vec<Renewal>, mut payments: Vec<Payment>) -> Self {
        renewals.sort_by_key(|r| r.renewal_number);
        payments.sort_by_key(|p| p.number_payment);

        Self {
            policy,
            renewals,
            payments,
        }
    }

    /// The installment with the highest number, the basis for the next due date.
    pub fn latest_payment(&self) -> Option<&Payment> {
        self.payments.iter().max_by_key(|p| p.number_payment)
    }

    /// Whether an installment is already due on `due_date`.
    pub fn has_due_date(&self, due_date: NaiveDate) -> bool {
        self.payments.iter().any(|p| p.due_date == due_date)
    }

    /// Whether installment number `number_payment` already exists.
    pub fn has_number(&self, number_payment: i32) -> bool {
        self.payments
            .iter()
            .any(|p| p.number_payment == number_payment)
    }

    /// Returns the ledger extended with a newly persisted installment.
    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payments.push(payment);
        self.payments.sort_by_key(|p| p.number_payment);
        self
    }
}
