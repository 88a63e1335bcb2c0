//! Server application core modules.
//!
//! This module contains all server-side functionality for the premium ledger: configuration,
//! database access for policies, renewals and payments, installment generation services,
//! cache invalidation, and the daily scheduler that walks every policy with an outstanding
//! balance and materializes the installments that have come due.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
