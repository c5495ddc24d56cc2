//! Builder pattern for DmnEngine

use crate::config::EngineConfig;
use crate::decision_engine::DmnEngine;
use crate::error::Result;
use dmn_core::ast::HitPolicy;
use dmn_runtime::{DecisionTableExecutor, ExpressionEvaluator};
use std::sync::Arc;

/// Builder for DmnEngine
///
/// # Example
///
/// ```rust,ignore
/// use dmn_sdk::{DmnEngineBuilder, HitPolicy};
///
/// let engine = DmnEngineBuilder::new()
///     .cache_capacity(64)
///     .default_hit_policy(HitPolicy::First)
///     .build()?;
///
/// // Plug in a different expression language
/// let engine = DmnEngineBuilder::new()
///     .with_expression_evaluator(Arc::new(MyEvaluator::default()))
///     .build()?;
/// ```
#[derive(Default)]
pub struct DmnEngineBuilder {
    config: EngineConfig,
    evaluator: Option<Arc<dyn ExpressionEvaluator>>,
}

impl DmnEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable the decision cache
    pub fn enable_cache(mut self, enable: bool) -> Self {
        self.config.enable_cache = enable;
        self
    }

    /// Set the maximum number of cached decisions
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Reject unknown model keys instead of logging a warning
    pub fn strict_fields(mut self, strict: bool) -> Self {
        self.config.strict_fields = strict;
        self
    }

    /// Hit policy used when a table omits one
    pub fn default_hit_policy(mut self, hit_policy: HitPolicy) -> Self {
        self.config.default_hit_policy = hit_policy;
        self
    }

    pub fn enable_constant_folding(mut self, enable: bool) -> Self {
        self.config.enable_constant_folding = enable;
        self
    }

    /// Evaluate expressions and input entries with a custom evaluator
    pub fn with_expression_evaluator(mut self, evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<DmnEngine> {
        let executor = match self.evaluator {
            Some(evaluator) => DecisionTableExecutor::with_evaluator(evaluator),
            None => DecisionTableExecutor::new(),
        };

        DmnEngine::with_executor(self.config, executor)
    }
}
