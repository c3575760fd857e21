//! Storage configuration
//!
//! A [`StorageConfig`] picks the interning discipline of a backend, its
//! initial map capacities and whether it reports prometheus metrics.
//! Capacities come from a [`CapacityPreset`]; individual maps can be
//! overridden through [`CapacityHints`].
//!
//! ```yaml
//! version: 1
//! discipline: sync
//! preset: bulk
//! capacity:
//!   iris: 200000
//! metrics: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{Discipline, LiteralId, NodeId};
use crate::error::StorageError;
use crate::Result;

const SUPPORTED_VERSION: u32 = 1;

/// Validation hook shared by configuration types.
pub trait Validatable {
    fn validate(&self) -> Result<()>;

    /// Name used in error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Initial capacity profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityPreset {
    /// Empty maps, grown on demand
    Minimal,

    /// Small interactive graphs
    #[default]
    Balanced,

    /// Bulk loading: large tables allocated up front
    Bulk,
}

impl CapacityPreset {
    pub fn hints(&self) -> ResolvedCapacity {
        match self {
            Self::Minimal => ResolvedCapacity::default(),
            Self::Balanced => ResolvedCapacity {
                iris: 1 << 10,
                blank_nodes: 1 << 8,
                variables: 1 << 6,
                literals: 1 << 10,
            },
            Self::Bulk => ResolvedCapacity {
                iris: 1 << 18,
                blank_nodes: 1 << 16,
                variables: 1 << 8,
                literals: 1 << 18,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Balanced => "balanced",
            Self::Bulk => "bulk",
        }
    }
}

impl std::fmt::Display for CapacityPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-map overrides of the preset capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapacityHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iris: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blank_nodes: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<usize>,

    /// Applies to the lexical fallback map only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literals: Option<usize>,
}

/// Capacities after applying overrides to a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedCapacity {
    pub iris: usize,
    pub blank_nodes: usize,
    pub variables: usize,
    pub literals: usize,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub discipline: Discipline,

    #[serde(default)]
    pub preset: CapacityPreset,

    #[serde(default)]
    pub capacity: CapacityHints,

    /// Report into `StorageMetrics::global()`
    #[serde(default)]
    pub metrics: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            discipline: Discipline::Sync,
            preset: CapacityPreset::Balanced,
            capacity: CapacityHints::default(),
            metrics: false,
        }
    }
}

impl StorageConfig {
    pub fn preset(preset: CapacityPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    pub fn discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = discipline;
        self
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics = enabled;
        self
    }

    pub fn capacity(mut self, f: impl FnOnce(&mut CapacityHints)) -> Self {
        f(&mut self.capacity);
        self
    }

    pub fn resolved_capacity(&self) -> ResolvedCapacity {
        let base = self.preset.hints();
        ResolvedCapacity {
            iris: self.capacity.iris.unwrap_or(base.iris),
            blank_nodes: self.capacity.blank_nodes.unwrap_or(base.blank_nodes),
            variables: self.capacity.variables.unwrap_or(base.variables),
            literals: self.capacity.literals.unwrap_or(base.literals),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: StorageConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: StorageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn check_capacity(field: &str, value: usize, limit: u64) -> Result<()> {
    if value as u64 > limit {
        return Err(StorageError::config(format!(
            "capacity.{} = {} exceeds the id space ({})",
            field, value, limit
        )));
    }
    Ok(())
}

impl Validatable for StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.version != SUPPORTED_VERSION {
            return Err(StorageError::config(format!(
                "{}: unsupported version {} (supported: {})",
                self.config_name(),
                self.version,
                SUPPORTED_VERSION
            )));
        }

        let resolved = self.resolved_capacity();
        check_capacity("iris", resolved.iris, NodeId::MAX)?;
        check_capacity("blank_nodes", resolved.blank_nodes, NodeId::MAX)?;
        check_capacity("variables", resolved.variables, NodeId::MAX)?;
        check_capacity("literals", resolved.literals, LiteralId::MAX)?;
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "StorageConfig"
    }
}
