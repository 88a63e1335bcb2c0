//! Integration tests for ledger runs
//!
//! These tests drive the orchestrator against an in-memory SQLite ledger and verify:
//! - Catch-up generation of overdue installments and its idempotence
//! - Policy lifecycle and renewal handling
//! - Look-ahead generation
//! - Cache invalidation after runs that created payments
//! - Isolation of per-policy failures, cancellation and run exclusivity

use std::{sync::Arc, time::Duration};

use chrono::{NaiveDate, TimeZone, Utc};
use ledger_test_utils::prelude::*;
use premium_ledger::server::{
    data::store::{LedgerStore, SeaOrmLedgerStore},
    scheduler::{
        capacity::{CapacityTier, FixedCapacityProbe},
        orchestrator::{LedgerOrchestrator, OrchestratorSettings},
    },
    service::cache::memory::MemoryCache,
    util::clock::FixedClock,
};
use rust_decimal::Decimal;

mod catch_up;
mod invalidation;
mod look_ahead;
mod store;

/// Creates a test database with the policy ledger tables
async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new().with_ledger_tables().build().await
}

/// Orchestrator over `store` whose business date is `today`, on a basic host with no batch pause
fn orchestrator_with_store(
    store: Arc<dyn LedgerStore>,
    cache: Arc<MemoryCache>,
    today: NaiveDate,
) -> LedgerOrchestrator {
    let now = Utc.from_utc_datetime(&today.and_hms_opt(12, 0, 0).unwrap());
    let settings = OrchestratorSettings {
        timezone: chrono_tz::UTC,
        batch_pause: Duration::ZERO,
        ..OrchestratorSettings::default()
    };

    LedgerOrchestrator::new(store, cache)
        .with_clock(Arc::new(FixedClock(now)))
        .with_capacity_probe(Arc::new(FixedCapacityProbe::for_tier(CapacityTier::Basic)))
        .with_settings(settings)
}

fn orchestrator(test: &TestContext, cache: Arc<MemoryCache>, today: NaiveDate) -> LedgerOrchestrator {
    orchestrator_with_store(
        Arc::new(SeaOrmLedgerStore::new(test.db.clone())),
        cache,
        today,
    )
}

/// Amount in cents as a decimal
fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
