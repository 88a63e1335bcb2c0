//! Utility functions and helpers for server operations.
//!
//! This module provides the clock abstraction the ledger reads "now" through and the
//! calendar arithmetic used to schedule installments.

pub mod clock;
pub mod time;
