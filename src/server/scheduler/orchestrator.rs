//! Ledger run orchestration.
//!
//! A run counts the policies with an outstanding balance, sizes batches for the host, pages
//! through the candidates and, for each one, drives a catch-up loop that creates installments
//! until the next one is not yet due, a skip condition applies, or the per-policy iteration
//! ceiling is reached. Policies are processed strictly one after another.
//!
//! Failures are isolated per policy: a misconfigured policy or a failed insert is logged and
//! counted while the run moves on to the next candidate. Only failures to count or page the
//! candidates abort a run. Once every batch is done, the cache publisher is invoked if, and
//! only if, at least one installment was created.

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use chrono_tz::Tz;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

use crate::server::{
    data::store::LedgerStore,
    error::{ledger::LedgerError, Error},
    model::{
        ledger::{Payment, PolicyLedger},
        run::{RunMode, RunPhase, RunSummary, SkipReason},
    },
    scheduler::{
        capacity::{detect_tier, CapacityProbe, HostCapacityProbe},
        config::ledger as ledger_config,
        schedule::{plan_batches, BatchPlannerConfig},
    },
    service::{
        cache::{CacheInvalidationPublisher, CacheLayer},
        payment::{GenerationOutcome, PaymentGenerator},
    },
    util::{
        clock::{Clock, SystemClock},
        time::{business_today, next_due_date},
    },
};

/// Tunables of a [`LedgerOrchestrator`].
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Time zone "today" is evaluated in.
    pub timezone: Tz,
    /// Pause between batches.
    pub batch_pause: Duration,
    /// Maximum installments created for one policy in one run.
    pub max_iterations: u32,
    pub planner: BatchPlannerConfig,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            batch_pause: ledger_config::BATCH_PAUSE,
            max_iterations: ledger_config::MAX_CATCH_UP_ITERATIONS,
            planner: BatchPlannerConfig::default(),
        }
    }
}

/// Why a policy's catch-up loop ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatchUpStop {
    /// The next installment is due after today.
    NotYetDue,
    Skipped(SkipReason),
    /// Look-ahead created its single installment.
    LookAheadComplete,
    IterationCeiling,
}

/// Accumulator threaded through a policy's catch-up loop.
struct CatchUpState {
    ledger: PolicyLedger,
    base: Payment,
    created: u64,
}

impl CatchUpState {
    fn new(ledger: PolicyLedger) -> Result<Self, LedgerError> {
        let base = ledger
            .latest_payment()
            .cloned()
            .ok_or(LedgerError::MissingBaseline {
                policy_id: ledger.policy.id,
            })?;

        Ok(Self {
            ledger,
            base,
            created: 0,
        })
    }

    fn advance(self, payment: Payment) -> Self {
        Self {
            ledger: self.ledger.with_payment(payment.clone()),
            base: payment,
            created: self.created + 1,
        }
    }

    fn stop(self, stop: CatchUpStop) -> CatchUpReport {
        CatchUpReport {
            created: self.created,
            stop: Ok(stop),
        }
    }

    fn fail(self, error: Error) -> CatchUpReport {
        CatchUpReport {
            created: self.created,
            stop: Err(error),
        }
    }
}

/// Outcome of one policy's catch-up loop.
struct CatchUpReport {
    /// Installments persisted before the loop ended, including when it failed.
    created: u64,
    stop: Result<CatchUpStop, Error>,
}

/// Drives installment generation runs over every candidate policy.
pub struct LedgerOrchestrator {
    store: Arc<dyn LedgerStore>,
    publisher: CacheInvalidationPublisher,
    clock: Arc<dyn Clock>,
    probe: Arc<dyn CapacityProbe>,
    settings: OrchestratorSettings,
    run_lock: Mutex<()>,
    phase: watch::Sender<RunPhase>,
}

impl LedgerOrchestrator {
    /// Creates an orchestrator using the system clock, the host capacity probe and default
    /// settings.
    pub fn new(store: Arc<dyn LedgerStore>, cache: Arc<dyn CacheLayer>) -> Self {
        let (phase, _) = watch::channel(RunPhase::Idle);

        Self {
            store,
            publisher: CacheInvalidationPublisher::new(cache),
            clock: Arc::new(SystemClock),
            probe: Arc::new(HostCapacityProbe),
            settings: OrchestratorSettings::default(),
            run_lock: Mutex::new(()),
            phase,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_capacity_probe(mut self, probe: Arc<dyn CapacityProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_settings(mut self, settings: OrchestratorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Receiver tracking the current [`RunPhase`].
    pub fn subscribe_phase(&self) -> watch::Receiver<RunPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> RunPhase {
        *self.phase.borrow()
    }

    /// Catch-up run triggered by the daily timer.
    pub async fn run_daily(&self) -> Result<RunSummary, Error> {
        self.run(RunMode::CatchUp, &CancellationToken::new()).await
    }

    /// Run triggered by an administrator, in look-ahead mode when `look_ahead` is set.
    pub async fn run_manual(&self, look_ahead: bool) -> Result<RunSummary, Error> {
        self.run(RunMode::from_look_ahead(look_ahead), &CancellationToken::new())
            .await
    }

    /// Executes a run in `mode`, stopping between policies once `cancel` is triggered.
    ///
    /// Installments persisted before cancellation are kept, and the cache is still invalidated
    /// if any were created.
    ///
    /// # Returns
    /// - `Ok(RunSummary)` - The run completed or was cancelled
    /// - `Err(Error::LedgerError(LedgerError::RunInProgress))` - Another run is in flight
    /// - `Err(Error)` - Counting or paging the candidates failed
    pub async fn run(
        &self,
        mode: RunMode,
        cancel: &CancellationToken,
    ) -> Result<RunSummary, Error> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| LedgerError::RunInProgress)?;

        let result = self.execute(mode, cancel).await;
        self.phase.send_replace(RunPhase::Idle);

        match &result {
            Ok(summary) => tracing::info!(
                "Ledger {:?} run for {} finished: {} policies processed, {} payment(s) created, {} skipped, {} failed{}",
                summary.mode,
                summary.today,
                summary.policies_processed,
                summary.payments_created,
                summary.policies_skipped,
                summary.policies_failed,
                if summary.cancelled { " (cancelled)" } else { "" }
            ),
            Err(e) => tracing::error!("Ledger {:?} run aborted: {}", mode, e),
        }

        result
    }

    async fn execute(
        &self,
        mode: RunMode,
        cancel: &CancellationToken,
    ) -> Result<RunSummary, Error> {
        let today = business_today(self.clock.now(), self.settings.timezone);
        let mut summary = RunSummary::new(mode, today);

        self.phase.send_replace(RunPhase::Planning);
        let total = self.store.count_pending_policies().await?;
        let tier = detect_tier(self.probe.as_ref());
        let plan = plan_batches(total, tier, &self.settings.planner);

        summary.candidates = total;
        summary.batches = plan.batch_count;

        tracing::info!(
            "Starting ledger {:?} run for {}: {} candidate(s) in {} batch(es) of {} on a {:?} host",
            mode,
            today,
            total,
            plan.batch_count,
            plan.batch_size,
            tier
        );

        'batches: for batch in 0..plan.batch_count {
            self.phase.send_replace(RunPhase::Paging);
            let page = self
                .store
                .page_pending_payments(plan.batch_size, batch * plan.batch_size)
                .await?;

            self.phase.send_replace(RunPhase::CatchUp);
            for pending in page {
                if cancel.is_cancelled() {
                    summary.cancelled = true;
                    break 'batches;
                }

                let report = self.catch_up_policy(pending.policy_id, mode, today).await;
                summary.payments_created += report.created;

                match report.stop {
                    Ok(stop) => {
                        summary.policies_processed += 1;
                        match stop {
                            CatchUpStop::Skipped(reason) => {
                                summary.policies_skipped += 1;
                                summary.skips.record(reason);
                                tracing::debug!(
                                    "Policy {} skipped after {} new payment(s): {:?}",
                                    pending.policy_id,
                                    report.created,
                                    reason
                                );
                            }
                            CatchUpStop::IterationCeiling => tracing::warn!(
                                "Policy {} reached the limit of {} payment(s) per run",
                                pending.policy_id,
                                self.settings.max_iterations
                            ),
                            CatchUpStop::NotYetDue | CatchUpStop::LookAheadComplete => {}
                        }
                    }
                    Err(e) => {
                        summary.policies_failed += 1;
                        tracing::error!(
                            "Failed to generate payments for policy {} after {} new payment(s): {}",
                            pending.policy_id,
                            report.created,
                            e
                        );
                    }
                }
            }

            if batch + 1 < plan.batch_count {
                tokio::select! {
                    _ = tokio::time::sleep(self.settings.batch_pause) => {}
                    _ = cancel.cancelled() => {
                        summary.cancelled = true;
                        break 'batches;
                    }
                }
            }
        }

        if summary.payments_created > 0 {
            self.phase.send_replace(RunPhase::Invalidating);
            self.publisher.publish(self.clock.now()).await;
            summary.cache_invalidated = true;
        }

        Ok(summary)
    }

    async fn catch_up_policy(
        &self,
        policy_id: i32,
        mode: RunMode,
        today: NaiveDate,
    ) -> CatchUpReport {
        let mut state = match self.load_state(policy_id).await {
            Ok(state) => state,
            Err(e) => {
                return CatchUpReport {
                    created: 0,
                    stop: Err(e),
                }
            }
        };

        let generator = PaymentGenerator::new(self.store.as_ref());

        for _ in 0..self.settings.max_iterations {
            let due_date = match next_due_date(
                state.base.due_date,
                state.ledger.policy.payment_frequency_id,
            ) {
                Ok(due_date) => due_date,
                Err(e) => return state.fail(e.into()),
            };

            if mode == RunMode::CatchUp && due_date > today {
                return state.stop(CatchUpStop::NotYetDue);
            }

            match generator
                .generate(&state.ledger, &state.base, due_date, mode)
                .await
            {
                Ok(GenerationOutcome::Created(payment)) => {
                    state = state.advance(payment);
                    if mode == RunMode::LookAhead {
                        return state.stop(CatchUpStop::LookAheadComplete);
                    }
                }
                Ok(GenerationOutcome::Skipped(reason)) => {
                    return state.stop(CatchUpStop::Skipped(reason))
                }
                Err(e) => return state.fail(e),
            }
        }

        state.stop(CatchUpStop::IterationCeiling)
    }

    async fn load_state(&self, policy_id: i32) -> Result<CatchUpState, Error> {
        let ledger = self
            .store
            .load_policy_ledger(policy_id)
            .await?
            .ok_or(LedgerError::PolicyNotFound(policy_id))?;

        Ok(CatchUpState::new(ledger)?)
    }
}
