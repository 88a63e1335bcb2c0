//! Service layer for business logic.
//!
//! This module contains the installment generator that decides and persists the next payment
//! of a policy, and the publisher that tells the shared cache which views a run made stale.

pub mod cache;
pub mod payment;
