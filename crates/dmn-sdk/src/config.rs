//! Configuration types for DmnEngine

use crate::error::{Result, SdkError};
use dmn_compiler::CompilerOptions;
use dmn_core::ast::HitPolicy;
use dmn_parser::ParserOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main engine configuration
///
/// ```yaml
/// enable_cache: true
/// cache_capacity: 256
/// strict_fields: false
/// default_hit_policy: UNIQUE
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cache compiled decisions across parse calls
    pub enable_cache: bool,

    /// Maximum number of cached decisions
    pub cache_capacity: usize,

    /// Reject unknown model keys instead of logging a warning
    pub strict_fields: bool,

    /// Hit policy used when a table omits one
    pub default_hit_policy: HitPolicy,

    /// Fold constant sub-expressions of cells at compile time
    pub enable_constant_folding: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            enable_cache: true,
            cache_capacity: 256,
            strict_fields: false,
            default_hit_policy: HitPolicy::Unique,
            enable_constant_folding: true,
        }
    }

    /// Load a configuration from YAML; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| SdkError::ConfigError(format!("invalid engine configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Check option consistency
    pub fn validate(&self) -> Result<()> {
        if self.enable_cache && self.cache_capacity == 0 {
            return Err(SdkError::ConfigError(
                "cache_capacity must be positive when the cache is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Enable or disable the decision cache
    pub fn enable_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_strict_fields(mut self, strict: bool) -> Self {
        self.strict_fields = strict;
        self
    }

    pub fn with_default_hit_policy(mut self, hit_policy: HitPolicy) -> Self {
        self.default_hit_policy = hit_policy;
        self
    }

    pub fn with_constant_folding(mut self, enable: bool) -> Self {
        self.enable_constant_folding = enable;
        self
    }

    pub(crate) fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            strict_fields: self.strict_fields,
        }
    }

    pub(crate) fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            default_hit_policy: self.default_hit_policy,
            enable_constant_folding: self.enable_constant_folding,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
