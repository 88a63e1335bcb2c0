//! Host capacity detection.
//!
//! The orchestrator sizes its batches according to how much memory and how many logical cores
//! the host has. Reading the host is hidden behind [`CapacityProbe`] so runs can be tested
//! against a fixed machine profile; turning a reading into a [`CapacityTier`] is the pure
//! [`classify`] function.

use serde::Serialize;
use sysinfo::System;

use crate::server::{error::Error, scheduler::config::capacity as thresholds};

/// Memory and CPU resources of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapacity {
    /// Total physical memory in bytes.
    pub total_memory_bytes: u64,
    /// Logical CPU cores.
    pub logical_cores: usize,
}

/// Coarse classification of the host used to scale batch sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityTier {
    Basic,
    Intermediate,
    High,
}

/// Reads the resources of the host.
pub trait CapacityProbe: Send + Sync {
    /// Returns the host's memory and core count.
    fn probe(&self) -> Result<HostCapacity, Error>;
}

/// Probe reading the machine the process runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostCapacityProbe;

impl CapacityProbe for HostCapacityProbe {
    fn probe(&self) -> Result<HostCapacity, Error> {
        let mut system = System::new();
        system.refresh_memory();

        let total_memory_bytes = system.total_memory();
        if total_memory_bytes == 0 {
            return Err(Error::InternalError(
                "Host reported zero bytes of total memory".to_string(),
            ));
        }

        Ok(HostCapacity {
            total_memory_bytes,
            logical_cores: num_cpus::get(),
        })
    }
}

/// Probe returning a fixed machine profile.
#[derive(Debug, Clone, Copy)]
pub struct FixedCapacityProbe(HostCapacity);

impl FixedCapacityProbe {
    pub fn new(total_memory_bytes: u64, logical_cores: usize) -> Self {
        Self(HostCapacity {
            total_memory_bytes,
            logical_cores,
        })
    }

    /// Probe whose reading classifies exactly at the lower bound of `tier`.
    pub fn for_tier(tier: CapacityTier) -> Self {
        match tier {
            CapacityTier::Basic => Self::new(2 * 1024 * 1024 * 1024, 2),
            CapacityTier::Intermediate => Self::new(
                thresholds::INTERMEDIATE_MIN_MEMORY_BYTES,
                thresholds::INTERMEDIATE_MIN_CORES,
            ),
            CapacityTier::High => {
                Self::new(thresholds::HIGH_MIN_MEMORY_BYTES, thresholds::HIGH_MIN_CORES)
            }
        }
    }
}

impl CapacityProbe for FixedCapacityProbe {
    fn probe(&self) -> Result<HostCapacity, Error> {
        Ok(self.0)
    }
}

/// Classifies a host reading into a capacity tier.
///
/// - `High` when memory is at least 12 GiB and there are at least 6 cores
/// - `Intermediate` when memory is at least 6 GiB and there are at least 4 cores
/// - `Basic` otherwise
pub fn classify(capacity: HostCapacity) -> CapacityTier {
    if capacity.total_memory_bytes >= thresholds::HIGH_MIN_MEMORY_BYTES
        && capacity.logical_cores >= thresholds::HIGH_MIN_CORES
    {
        CapacityTier::High
    } else if capacity.total_memory_bytes >= thresholds::INTERMEDIATE_MIN_MEMORY_BYTES
        && capacity.logical_cores >= thresholds::INTERMEDIATE_MIN_CORES
    {
        CapacityTier::Intermediate
    } else {
        CapacityTier::Basic
    }
}

/// Probes the host and classifies it, falling back to `Basic` when the probe fails.
pub fn detect_tier(probe: &dyn CapacityProbe) -> CapacityTier {
    match probe.probe() {
        Ok(capacity) => classify(capacity),
        Err(e) => {
            tracing::warn!("Capacity probe failed, assuming basic tier: {}", e);
            CapacityTier::Basic
        }
    }
}
