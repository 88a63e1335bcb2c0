//! Data access layer repositories.
//!
//! This module contains the database repositories for policies, their renewals and their
//! installments, plus the [`store::LedgerStore`] seam the orchestrator persists through.

pub mod ledger;
pub mod store;
