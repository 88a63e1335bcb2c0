//! Installment budget of a policy.

use crate::server::model::ledger::PolicyLedger;

/// How far a policy has progressed through the installments it is entitled to.
///
/// The original term allows `number_of_payments` installments and every renewal allows the
/// same number again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStatus {
    pub installments_per_cycle: u64,
    pub renewals: u64,
    pub max_allowed_payments: u64,
    pub payment_count: u64,
    pub cycle_exhausted: bool,
}

impl CycleStatus {
    pub fn of(ledger: &PolicyLedger) -> Self {
        let installments_per_cycle = ledger.policy.number_of_payments.max(0) as u64;
        let renewals = ledger.renewals.len() as u64;
        let max_allowed_payments = installments_per_cycle * (1 + renewals);
        let payment_count = ledger.payments.len() as u64;

        Self {
            installments_per_cycle,
            renewals,
            max_allowed_payments,
            payment_count,
            cycle_exhausted: payment_count >= max_allowed_payments,
        }
    }

    /// Whether installment `number_payment` closes its cycle and the renewals on file open the
    /// next one.
    ///
    /// Installment `k` belongs to cycle `ceil(k / n)`; the cycle after it is open once there
    /// are at least that many renewals. Installments in the middle of a cycle never qualify.
    pub fn renewal_covers_next_cycle(&self, number_payment: i32) -> bool {
        if self.installments_per_cycle == 0 || number_payment < 1 {
            return false;
        }
        if number_payment as u64 % self.installments_per_cycle != 0 {
            return false;
        }

        let completed_cycles = (number_payment.max(0) as u64).div_ceil(self.installments_per_cycle);
        self.renewals >= completed_cycles
    }
}

/// 1-based position of installment `number_payment` within its cycle of `n` installments.
pub fn cycle_position(number_payment: i32, n: i32) -> i32 {
    (number_payment - 1).rem_euclid(n) + 1
}
