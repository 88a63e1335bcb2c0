//! Tests for plan_batches function.

use crate::server::scheduler::{
    capacity::CapacityTier,
    schedule::{plan_batches, BatchPlannerConfig, MIN_BATCH_SIZE},
};

const TIERS: [CapacityTier; 3] = [
    CapacityTier::Basic,
    CapacityTier::Intermediate,
    CapacityTier::High,
];

/// Tests planning a run with no candidates.
///
/// Verifies that no batches are planned when nothing needs attention.
///
/// Expected: batch_count of 0 with the tier's clamped batch size
#[test]
fn returns_zero_batches_for_no_candidates() {
    let plan = plan_batches(0, CapacityTier::Basic, &BatchPlannerConfig::default());

    assert_eq!(plan.batch_count, 0);
    assert_eq!(plan.batch_size, MIN_BATCH_SIZE);

    let plan = plan_batches(0, CapacityTier::High, &BatchPlannerConfig::default());

    assert_eq!(plan.batch_count, 0);
    assert_eq!(plan.batch_size, 20);
}

/// Tests applying the minimum batch size.
///
/// Verifies that a basic host with a small candidate set (base 5 × 1) is raised to the
/// minimum batch size.
///
/// Expected: batch_size 10, 5 batches for 45 candidates
#[test]
fn raises_small_batches_to_minimum() {
    let plan = plan_batches(45, CapacityTier::Basic, &BatchPlannerConfig::default());

    assert_eq!(plan.batch_size, 10);
    assert_eq!(plan.batch_count, 5);
}

/// Tests scaling the batch size with the host tier.
///
/// Verifies that a high capacity host multiplies the small-volume base by 4.
///
/// Expected: batch_size 20 (5 × 4), 3 batches for 50 candidates
#[test]
fn scales_batch_size_with_tier() {
    let plan = plan_batches(50, CapacityTier::High, &BatchPlannerConfig::default());

    assert_eq!(plan.batch_size, 20);
    assert_eq!(plan.batch_count, 3);
}

/// Tests rounding the batch count up.
///
/// Verifies that a partial final batch still counts as a batch.
///
/// Expected: 11 candidates in batches of 10 need 2 batches
#[test]
fn rounds_batch_count_up() {
    let plan = plan_batches(11, CapacityTier::Basic, &BatchPlannerConfig::default());

    assert_eq!(plan.batch_count, 2);
}

/// Tests the volume thresholds of the base size.
///
/// Verifies the base drops from 5 to 4 at 100 candidates and from 4 to 3 at 5000, observed
/// on a high capacity host where the multiplied base is above the minimum.
///
/// Expected: 20, 16 and 12
#[test]
fn base_shrinks_as_volume_grows() {
    let config = BatchPlannerConfig::default();

    assert_eq!(plan_batches(99, CapacityTier::High, &config).batch_size, 20);
    assert_eq!(plan_batches(100, CapacityTier::High, &config).batch_size, 16);
    assert_eq!(plan_batches(4999, CapacityTier::High, &config).batch_size, 16);
    assert_eq!(plan_batches(5000, CapacityTier::High, &config).batch_size, 12);
}

/// Tests that every plan stays within the tier bounds.
///
/// Verifies batch sizes lie in `[10, max(tier)]` and batches cover every candidate for a
/// spread of candidate counts.
///
/// Expected: all plans within bounds
#[test]
fn batch_size_stays_within_tier_bounds() {
    let config = BatchPlannerConfig::default();

    for tier in TIERS {
        for total in [0, 1, 9, 10, 99, 100, 101, 4_999, 5_000, 250_000] {
            let plan = plan_batches(total, tier, &config);

            assert!(plan.batch_size >= MIN_BATCH_SIZE);
            assert!(plan.batch_size <= config.max_batch_size(tier));
            assert!(plan.batch_count * plan.batch_size >= total);
            if total > 0 {
                assert!((plan.batch_count - 1) * plan.batch_size < total);
            }
        }
    }
}

/// Tests tuned planner thresholds.
///
/// Verifies that deployments can raise the bases and have them clamped to the tier maximum.
///
/// Expected: basic tier capped at 20 and high tier reaching 200
#[test]
fn honors_tuned_thresholds() {
    let config = BatchPlannerConfig {
        small_volume_base: 50,
        ..BatchPlannerConfig::default()
    };

    assert_eq!(plan_batches(10, CapacityTier::Basic, &config).batch_size, 20);
    assert_eq!(plan_batches(10, CapacityTier::High, &config).batch_size, 200);
}
