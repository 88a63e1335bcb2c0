use std::time::Duration;

pub mod ledger {
    use super::*;

    /// Cron expression for the daily catch-up run
    /// Runs every day at midnight in the business time zone
    pub const CRON_EXPRESSION: &str = "0 0 0 * * *";

    /// Pause between candidate batches to spread database load
    pub const BATCH_PAUSE: Duration = Duration::from_millis(100);

    /// Maximum installments generated for a single policy in one run
    pub const MAX_CATCH_UP_ITERATIONS: u32 = 100;
}

pub mod capacity {
    const GIB: u64 = 1024 * 1024 * 1024;

    /// Minimum memory for the high capacity tier (12 GiB)
    pub const HIGH_MIN_MEMORY_BYTES: u64 = 12 * GIB;

    /// Minimum logical cores for the high capacity tier
    pub const HIGH_MIN_CORES: usize = 6;

    /// Minimum memory for the intermediate capacity tier (6 GiB)
    pub const INTERMEDIATE_MIN_MEMORY_BYTES: u64 = 6 * GIB;

    /// Minimum logical cores for the intermediate capacity tier
    pub const INTERMEDIATE_MIN_CORES: usize = 4;
}
