//! Configuration system for the DRAM model.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the model. It provides:
//! 1. **Defaults:** Baseline store size and latency constants.
//! 2. **Structures:** Hierarchical config for memory, latency, and reset behavior.
//! 3. **Enums:** Latency model and reset policy selection.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()`, which reproduces the reference memory: 1 KiB, 10 cycles
//! of access time, up to 2 cycles of jitter, seed 42.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{DramError, DramResult};

/// Default configuration constants for the model.
mod defaults {
    use crate::common::constants;

    /// Memory store size in bytes (1 KiB).
    pub const SIZE_BYTES: usize = 1024;

    /// Minimum first-beat latency in cycles.
    pub const FIXED_CYCLES: u64 = constants::FIXED_LATENCY;

    /// Largest extra jitter (inclusive) in cycles.
    pub const MAX_JITTER: u64 = constants::MAX_JITTER;

    /// Jitter generator seed.
    pub const SEED: u64 = constants::DEFAULT_SEED;
}

/// Latency model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LatencyKind {
    /// Every request waits exactly `fixed_cycles`.
    Fixed,
    /// `fixed_cycles` plus seeded random jitter in `0..=max_jitter`.
    #[default]
    Jittered,
}

/// What a synchronous reset does to accepted but unfinished bursts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ResetPolicy {
    /// Reset clears the outputs only; queued bursts resume afterwards.
    ///
    /// This matches the behavior of the memory being modeled.
    #[default]
    KeepQueue,
    /// Reset also discards every queued burst.
    FlushQueue,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use axi_dram_core::config::{Config, LatencyKind, ResetPolicy};
///
/// let json = r#"{
///     "memory": { "size_bytes": 4096 },
///     "latency": { "model": "Fixed", "fixed_cycles": 3 },
///     "reset": { "policy": "FlushQueue" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.memory.size_bytes, 4096);
/// assert_eq!(config.latency.model, LatencyKind::Fixed);
/// assert_eq!(config.latency.fixed_cycles, 3);
/// assert_eq!(config.reset.policy, ResetPolicy::FlushQueue);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Memory store parameters.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// First-beat latency parameters.
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Reset behavior.
    #[serde(default)]
    pub reset: ResetConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`DramError::ConfigParse`] if the JSON does not deserialize, or
    /// [`DramError::InvalidConfig`] if [`validate`](Self::validate) rejects it.
    pub fn from_json(json: &str) -> DramResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`DramError::Io`] if the file cannot be read; otherwise as
    /// [`from_json`](Self::from_json).
    pub fn from_file(path: impl AsRef<Path>) -> DramResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks values that deserialize fine but cannot describe a memory.
    ///
    /// # Errors
    ///
    /// [`DramError::InvalidConfig`] if the store is empty or the worst-case
    /// latency does not fit in a cycle count.
    pub fn validate(&self) -> DramResult<()> {
        if self.memory.size_bytes == 0 {
            return Err(DramError::InvalidConfig(
                "memory.size_bytes must be non-zero".to_string(),
            ));
        }
        if self
            .latency
            .fixed_cycles
            .checked_add(self.latency.max_jitter)
            .is_none()
        {
            return Err(DramError::InvalidConfig(
                "latency.fixed_cycles + latency.max_jitter overflows".to_string(),
            ));
        }
        Ok(())
    }
}

/// Memory store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Size of the store in bytes.
    #[serde(default = "MemoryConfig::default_size_bytes")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    const fn default_size_bytes() -> usize {
        defaults::SIZE_BYTES
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::SIZE_BYTES,
        }
    }
}

/// Latency model configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    /// Which latency model to build.
    #[serde(default)]
    pub model: LatencyKind,

    /// Minimum access time in cycles.
    #[serde(default = "LatencyConfig::default_fixed_cycles")]
    pub fixed_cycles: u64,

    /// Inclusive jitter bound; ignored by the fixed model.
    #[serde(default = "LatencyConfig::default_max_jitter")]
    pub max_jitter: u64,

    /// Jitter generator seed; ignored by the fixed model.
    #[serde(default = "LatencyConfig::default_seed")]
    pub seed: u64,
}

impl LatencyConfig {
    const fn default_fixed_cycles() -> u64 {
        defaults::FIXED_CYCLES
    }

    const fn default_max_jitter() -> u64 {
        defaults::MAX_JITTER
    }

    const fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            model: LatencyKind::default(),
            fixed_cycles: defaults::FIXED_CYCLES,
            max_jitter: defaults::MAX_JITTER,
            seed: defaults::SEED,
        }
    }
}

/// Reset configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetConfig {
    /// Effect of reset on the pending queue.
    #[serde(default)]
    pub policy: ResetPolicy,
}
