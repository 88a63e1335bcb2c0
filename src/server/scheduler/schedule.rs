//! Batch planning for ledger runs.
//!
//! This module splits the policies that need attention into batches sized for the host. Small
//! candidate sets get proportionally larger batches, very large sets smaller ones, and more
//! capable hosts scale every batch up, keeping each batch within bounds the host can absorb
//! between pauses.

use serde::Serialize;

use crate::server::scheduler::capacity::CapacityTier;

/// Minimum number of policies processed per batch.
pub static MIN_BATCH_SIZE: u64 = 10;

/// Tunable thresholds used by [`plan_batches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlannerConfig {
    /// Candidate counts below this use `small_volume_base`.
    pub small_volume_limit: u64,
    /// Candidate counts below this (and at or above `small_volume_limit`) use `medium_volume_base`.
    pub medium_volume_limit: u64,
    pub small_volume_base: u64,
    pub medium_volume_base: u64,
    pub large_volume_base: u64,
    pub min_batch_size: u64,
    pub basic_max: u64,
    pub intermediate_max: u64,
    pub high_max: u64,
}

impl Default for BatchPlannerConfig {
    fn default() -> Self {
        Self {
            small_volume_limit: 100,
            medium_volume_limit: 5000,
            small_volume_base: 5,
            medium_volume_base: 4,
            large_volume_base: 3,
            min_batch_size: MIN_BATCH_SIZE,
            basic_max: 20,
            intermediate_max: 100,
            high_max: 300,
        }
    }
}

impl BatchPlannerConfig {
    /// Largest batch allowed on a host of the given tier.
    pub fn max_batch_size(&self, tier: CapacityTier) -> u64 {
        match tier {
            CapacityTier::Basic => self.basic_max,
            CapacityTier::Intermediate => self.intermediate_max,
            CapacityTier::High => self.high_max,
        }
    }
}

/// Batch size and number of batches for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchPlan {
    pub batch_size: u64,
    pub batch_count: u64,
}

fn tier_multiplier(tier: CapacityTier) -> u64 {
    match tier {
        CapacityTier::Basic => 1,
        CapacityTier::Intermediate => 2,
        CapacityTier::High => 4,
    }
}

/// Calculates how many policies to process per batch and how many batches that takes.
///
/// The batch size is a volume-tiered base multiplied by the tier multiplier (1, 2 or 4), then
/// clamped to `[min_batch_size, max(tier)]`. The batch count is the candidate total divided by
/// the batch size, rounded up.
///
/// # Arguments
/// - `total_candidates` - Number of policies that need attention
/// - `tier` - Capacity tier of the host
/// - `config` - Planner thresholds
///
/// # Returns
/// A [`BatchPlan`]; `batch_count` is `0` when there are no candidates.
///
/// # Example
/// With 250 candidates on an intermediate host:
/// - Base: 4 (at least 100, below 5000)
/// - Size: 4 × 2 = 8, clamped up to 10
/// - Count: ceil(250 / 10) = 25
pub fn plan_batches(
    total_candidates: u64,
    tier: CapacityTier,
    config: &BatchPlannerConfig,
) -> BatchPlan {
    let base = if total_candidates < config.small_volume_limit {
        config.small_volume_base
    } else if total_candidates < config.medium_volume_limit {
        config.medium_volume_base
    } else {
        config.large_volume_base
    };

    let max = config.max_batch_size(tier).max(config.min_batch_size);
    let batch_size = (base * tier_multiplier(tier))
        .clamp(config.min_batch_size, max)
        .max(1);

    BatchPlan {
        batch_size,
        batch_count: total_candidates.div_ceil(batch_size),
    }
}
