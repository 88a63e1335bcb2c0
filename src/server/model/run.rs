//! Run modes, phases and summaries reported by the ledger orchestrator.

use chrono::NaiveDate;
use serde::Serialize;

/// How a run decides which installments to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Create every installment whose due date is today or earlier.
    CatchUp,
    /// Create exactly the next installment of each eligible policy, even if not yet due.
    LookAhead,
}

impl RunMode {
    /// Mode selected by a manual trigger.
    pub fn from_look_ahead(look_ahead: bool) -> Self {
        if look_ahead {
            Self::LookAhead
        } else {
            Self::CatchUp
        }
    }
}

/// Current phase of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    /// Counting candidates and sizing batches.
    Planning,
    /// Fetching a page of candidates.
    Paging,
    /// Generating installments for the current page.
    CatchUp,
    /// Notifying the cache that policy views are stale.
    Invalidating,
}

/// Why the generator declined to create an installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The policy is canceled or completed.
    PolicyHalted,
    /// An installment already exists at the target due date.
    DuplicateDueDate,
    /// The next installment number already exists.
    DuplicateNumber,
    /// Every installment allowed by the original term and its renewals exists.
    CycleExhausted,
    /// The current cycle is paid out and no renewal covers the next one.
    AwaitingRenewal,
}

/// Number of policies that stopped on each skip reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkipTally {
    pub policy_halted: u64,
    pub duplicate_due_date: u64,
    pub duplicate_number: u64,
    pub cycle_exhausted: u64,
    pub awaiting_renewal: u64,
}

impl SkipTally {
    pub fn record(&mut self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::PolicyHalted => &mut self.policy_halted,
            SkipReason::DuplicateDueDate => &mut self.duplicate_due_date,
            SkipReason::DuplicateNumber => &mut self.duplicate_number,
            SkipReason::CycleExhausted => &mut self.cycle_exhausted,
            SkipReason::AwaitingRenewal => &mut self.awaiting_renewal,
        };
        *counter += 1;
    }
}

/// Statistics of a completed (or cancelled) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub mode: RunMode,
    /// Business date the run evaluated due dates against.
    pub today: NaiveDate,
    /// Policies counted as candidates when the run was planned.
    pub candidates: u64,
    /// Batches the candidates were split into.
    pub batches: u64,
    /// Policies whose generation loop ran to a stop without error.
    pub policies_processed: u64,
    pub payments_created: u64,
    /// Policies whose loop ended on a skip reason.
    pub policies_skipped: u64,
    /// Policies whose loop aborted on a configuration or persistence error.
    pub policies_failed: u64,
    pub skips: SkipTally,
    pub cancelled: bool,
    /// Whether the cache invalidation publisher was invoked.
    pub cache_invalidated: bool,
}

impl RunSummary {
    pub fn new(mode: RunMode, today: NaiveDate) -> Self {
        Self {
            mode,
            today,
            candidates: 0,
            batches: 0,
            policies_processed: 0,
            payments_created: 0,
            policies_skipped: 0,
            policies_failed: 0,
            skips: SkipTally::default(),
            cancelled: false,
            cache_invalidated: false,
        }
    }
}
