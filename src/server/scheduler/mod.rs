//! Scheduler for the daily installment generation run.
//!
//! This module provides the cron-based job scheduler that triggers the ledger orchestrator once
//! a day in the business time zone, along with the pieces a run is built from: host capacity
//! detection, batch planning and the orchestrator itself.

use std::sync::Arc;

use chrono_tz::Tz;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, scheduler::orchestrator::LedgerOrchestrator};

pub mod capacity;
pub mod config;
pub mod orchestrator;
pub mod schedule;


/// Job scheduler triggering the daily ledger catch-up run.
///
/// The scheduler owns a `JobScheduler` and a shared [`LedgerOrchestrator`]; the same
/// orchestrator may also be used for manual runs, in which case its run lock keeps manual and
/// scheduled runs from overlapping.
pub struct LedgerScheduler {
    orchestrator: Arc<LedgerOrchestrator>,
    sched: JobScheduler,
}

impl LedgerScheduler {
    /// Creates a new instance of [`LedgerScheduler`].
    ///
    /// # Arguments
    /// - `orchestrator` - Orchestrator executed by the daily job
    ///
    /// # Returns
    /// - `Ok(LedgerScheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(orchestrator: Arc<LedgerOrchestrator>) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self {
            orchestrator,
            sched,
        })
    }

    /// Registers the daily catch-up job and starts the scheduler.
    ///
    /// # Arguments
    /// - `cron` - Cron expression with seconds, e.g. `"0 0 0 * * *"` for daily midnight
    /// - `timezone` - Time zone the cron expression is evaluated in
    ///
    /// # Returns
    /// - `Ok(())` - Job registered and scheduler started
    /// - `Err(Error)` - Invalid cron expression or scheduler failure
    pub async fn start(&mut self, cron: &str, timezone: Tz) -> Result<(), Error> {
        let orchestrator = Arc::clone(&self.orchestrator);

        self.sched
            .add(Job::new_async_tz(cron, timezone, move |_, _| {
                let orchestrator = Arc::clone(&orchestrator);

                Box::pin(async move {
                    match orchestrator.run_daily().await {
                        Ok(summary) => tracing::debug!(
                            "Daily ledger run created {} payment(s)",
                            summary.payments_created
                        ),
                        Err(e) => tracing::error!("Daily ledger run failed: {:?}", e),
                    }
                })
            })?)
            .await?;

        self.sched.start().await?;

        tracing::info!("Ledger scheduler started with cron {:?} in {}", cron, timezone);

        Ok(())
    }

    /// Stops the scheduler; a run already in flight finishes on its own task.
    pub async fn shutdown(&mut self) -> Result<(), Error> {
        self.sched.shutdown().await?;

        Ok(())
    }
}
