//! Installment generation for a single policy.
//!
//! Deciding whether the next installment should exist is the pure [`plan_installment`]
//! function; [`PaymentGenerator`] adds persistence on top. Every condition that prevents an
//! installment from being created is a [`SkipReason`], never an error, so a run can count
//! them without treating them as failures.

pub mod cycle;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::server::{
    data::store::LedgerStore,
    error::{ledger::LedgerError, Error},
    model::{
        ledger::{NewPayment, Payment, PolicyLedger, PAYMENT_STATUS_PENDING},
        run::{RunMode, SkipReason},
    },
    service::payment::cycle::{cycle_position, CycleStatus},
};

/// Decision for the installment following a base payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallmentDecision {
    Create(NewPayment),
    Skip(SkipReason),
}

/// Result of asking the generator for the next installment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Created(Payment),
    Skipped(SkipReason),
}

/// Installment amount: the cycle value split evenly, rounded half away from zero to cents.
pub fn installment_value(policy_value: Decimal, number_of_payments: i32) -> Decimal {
    (policy_value / Decimal::from(number_of_payments))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Balance left in the cycle after installment `number_payment`.
///
/// Zero on the last installment of each cycle, otherwise the installments still to come in
/// the cycle multiplied by the installment value.
pub fn pending_after(number_payment: i32, number_of_payments: i32, value: Decimal) -> Decimal {
    let position = cycle_position(number_payment, number_of_payments);
    if position == number_of_payments {
        return Decimal::ZERO;
    }

    (Decimal::from(number_of_payments - position) * value).max(Decimal::ZERO)
}

/// Decides whether the installment after `base` should be created at `due_date`.
///
/// Skip conditions are checked in order: halted policy, an installment already due on
/// `due_date`, an installment already numbered `base + 1`, exhausted cycle, and (outside of
/// look-ahead mode) a base with nothing left to pay. A zero balance on the last installment of
/// a cycle is not a reason to wait once a renewal covers the next cycle.
///
/// # Arguments
/// - `ledger` - Policy with its renewals and every payment known so far
/// - `base` - Latest payment, the one the new installment follows
/// - `due_date` - Due date computed for the new installment
/// - `mode` - Run mode; look-ahead ignores the awaiting-renewal condition
///
/// # Returns
/// - `Ok(InstallmentDecision::Create)` - Installment to persist
/// - `Ok(InstallmentDecision::Skip)` - Installment must not be created
/// - `Err(LedgerError::InvalidInstallmentCount)` - The policy declares fewer than one installment
pub fn plan_installment(
    ledger: &PolicyLedger,
    base: &Payment,
    due_date: NaiveDate,
    mode: RunMode,
) -> Result<InstallmentDecision, LedgerError> {
    let policy = &ledger.policy;

    if policy.status.halts_generation() {
        return Ok(InstallmentDecision::Skip(SkipReason::PolicyHalted));
    }

    let n = policy.number_of_payments;
    if n < 1 {
        return Err(LedgerError::InvalidInstallmentCount {
            policy_id: policy.id,
            number_of_payments: n,
        });
    }

    let number_payment = base.number_payment + 1;

    if ledger.has_due_date(due_date) {
        return Ok(InstallmentDecision::Skip(SkipReason::DuplicateDueDate));
    }
    if ledger.has_number(number_payment) {
        return Ok(InstallmentDecision::Skip(SkipReason::DuplicateNumber));
    }

    let cycle = CycleStatus::of(ledger);
    if cycle.cycle_exhausted {
        return Ok(InstallmentDecision::Skip(SkipReason::CycleExhausted));
    }

    if mode == RunMode::CatchUp
        && base.pending_value.is_zero()
        && !cycle.renewal_covers_next_cycle(base.number_payment)
    {
        return Ok(InstallmentDecision::Skip(SkipReason::AwaitingRenewal));
    }

    let value = installment_value(policy.policy_value, n);

    Ok(InstallmentDecision::Create(NewPayment {
        policy_id: policy.id,
        number_payment,
        value,
        pending_value: pending_after(number_payment, n, value),
        due_date,
        status_payment_id: PAYMENT_STATUS_PENDING,
    }))
}

/// Creates installments through a [`LedgerStore`].
pub struct PaymentGenerator<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> PaymentGenerator<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// Creates the installment following `base` at `due_date` unless a skip condition applies.
    ///
    /// # Returns
    /// - `Ok(GenerationOutcome::Created)` - The persisted installment, the base for the next one
    /// - `Ok(GenerationOutcome::Skipped)` - Nothing was written
    /// - `Err(Error)` - The policy is misconfigured or the insert failed
    pub async fn generate(
        &self,
        ledger: &PolicyLedger,
        base: &Payment,
        due_date: NaiveDate,
        mode: RunMode,
    ) -> Result<GenerationOutcome, Error> {
        match plan_installment(ledger, base, due_date, mode)? {
            InstallmentDecision::Skip(reason) => Ok(GenerationOutcome::Skipped(reason)),
            InstallmentDecision::Create(new_payment) => {
                let payment = self.store.save_payment(new_payment).await?;

                tracing::debug!(
                    "Created installment {} of policy {} due {}",
                    payment.number_payment,
                    payment.policy_id,
                    payment.due_date
                );

                Ok(GenerationOutcome::Created(payment))
            }
        }
    }
}
