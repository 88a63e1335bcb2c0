//! Recurring installment generation for an insurance brokerage back office.
//!
//! The crate exposes the [`server`] module tree used by the `premium-ledger` binary: the
//! persistence layer over the policy ledger tables, the installment generation services, and
//! the scheduler that drives them once a day or on demand.

pub mod server;
