//! Core DmnEngine implementation

use super::cache::{CacheKey, CacheStats, DecisionCache};
use super::decision::Decision;
use crate::builder::DmnEngineBuilder;
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::source::{path_label, ModelSource};
use dmn_compiler::Compiler;
use dmn_core::ast::DecisionModel;
use dmn_parser::{ModelParser, ParserOptions};
use dmn_runtime::{DecisionResult, DecisionTableExecutor, EvaluationContext};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Decision engine: parses models, compiles their decisions and evaluates them.
///
/// One engine may serve many concurrent callers. The only shared state is the
/// cache of compiled decisions.
#[derive(Debug)]
pub struct DmnEngine {
    config: EngineConfig,
    parser_options: ParserOptions,
    compiler: Compiler,
    executor: DecisionTableExecutor,
    cache: Option<DecisionCache>,
}

/// Model source after reading, before parsing
enum LoadedSource {
    Text {
        identity: String,
        label: String,
        content: String,
    },
    Model(Arc<DecisionModel>),
}

impl LoadedSource {
    fn cache_key(&self, decision_id: Option<&str>) -> CacheKey {
        match self {
            LoadedSource::Text {
                identity, content, ..
            } => CacheKey::new(identity.clone(), fingerprint(content), decision_id),
            LoadedSource::Model(model) => {
                // Labels of pre-parsed models are not unique ("<stream>", hand-built models)
                let digest = match serde_json::to_string(model.as_ref()) {
                    Ok(serialized) => fingerprint(&serialized),
                    Err(_) => fingerprint(&(Arc::as_ptr(model) as usize)),
                };
                CacheKey::new(model.source_label.clone(), digest, decision_id)
            }
        }
    }
}

fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

impl DmnEngine {
    /// Create a new engine from configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_executor(config, DecisionTableExecutor::new())
    }

    /// Create a builder
    pub fn builder() -> DmnEngineBuilder {
        DmnEngineBuilder::new()
    }

    pub(crate) fn with_executor(config: EngineConfig, executor: DecisionTableExecutor) -> Result<Self> {
        config.validate()?;

        let cache = config
            .enable_cache
            .then(|| DecisionCache::new(config.cache_capacity));

        Ok(Self {
            parser_options: config.parser_options(),
            compiler: Compiler::with_options(config.compiler_options()),
            executor,
            cache,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse a model source
    pub async fn parse_model(&self, source: impl Into<ModelSource>) -> Result<Arc<DecisionModel>> {
        let loaded = self.load(source.into()).await?;
        self.parse_loaded(&loaded)
    }

    /// Parse the single decision of a model.
    ///
    /// Fails with `NotFound` for a model without decisions and with
    /// `Ambiguous` for a model declaring several.
    pub async fn parse_decision(&self, source: impl Into<ModelSource>) -> Result<Decision> {
        self.parse_decision_inner(source.into(), None).await
    }

    /// Parse the decision with the given id
    pub async fn parse_decision_by_id(
        &self,
        source: impl Into<ModelSource>,
        decision_id: &str,
    ) -> Result<Decision> {
        self.parse_decision_inner(source.into(), Some(decision_id)).await
    }

    /// Parse every decision of a model in declaration order.
    ///
    /// Fails on the first decision that does not compile.
    pub async fn parse_decisions(&self, source: impl Into<ModelSource>) -> Result<Vec<Decision>> {
        let loaded = self.load(source.into()).await?;
        let model = self.parse_loaded(&loaded)?;

        let decisions: Vec<Decision> = self
            .compiler
            .compile_all(&model)?
            .into_iter()
            .map(|compiled| Decision::new(compiled, self.executor.clone()))
            .collect();

        if let Some(cache) = &self.cache {
            for decision in &decisions {
                cache
                    .insert(loaded.cache_key(Some(decision.id())), decision.clone())
                    .await;
            }
        }

        tracing::info!(
            "Parsed {} decisions from '{}'",
            decisions.len(),
            model.source_label
        );

        Ok(decisions)
    }

    /// Evaluate a decision against a context
    pub fn evaluate(&self, decision: &Decision, context: &EvaluationContext) -> Result<DecisionResult> {
        decision.evaluate(context)
    }

    /// Parse the decision with the given id and evaluate it
    pub async fn evaluate_by_id(
        &self,
        source: impl Into<ModelSource>,
        decision_id: &str,
        context: &EvaluationContext,
    ) -> Result<DecisionResult> {
        let decision = self.parse_decision_by_id(source, decision_id).await?;
        decision.evaluate(context)
    }

    /// Cache statistics; all zero when caching is disabled
    pub async fn cache_stats(&self) -> CacheStats {
        match &self.cache {
            Some(cache) => cache.stats().await,
            None => CacheStats::default(),
        }
    }

    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear().await;
        }
    }

    async fn parse_decision_inner(
        &self,
        source: ModelSource,
        decision_id: Option<&str>,
    ) -> Result<Decision> {
        let loaded = self.load(source).await?;
        let key = loaded.cache_key(decision_id);

        if let Some(cache) = &self.cache {
            if let Some(decision) = cache.get(&key).await {
                tracing::debug!("Using cached decision '{}'", decision.id());
                return Ok(decision);
            }
        }

        let model = self.parse_loaded(&loaded)?;
        let compiled = self.compiler.compile_decision(&model, decision_id)?;
        let decision = Decision::new(compiled, self.executor.clone());

        tracing::info!(
            "Parsed decision '{}' from '{}' (hit policy {})",
            decision.id(),
            decision.source_label(),
            decision.hit_policy()
        );

        if let Some(cache) = &self.cache {
            cache.insert(key, decision.clone()).await;
        }

        Ok(decision)
    }

    async fn load(&self, source: ModelSource) -> Result<LoadedSource> {
        match source {
            ModelSource::Path(path) => {
                let label = path_label(&path);
                tracing::debug!("Loading model file: {}", path.display());

                let content = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| SdkError::SourceError {
                        source_label: label.clone(),
                        source,
                    })?;

                Ok(LoadedSource::Text {
                    identity: path.display().to_string(),
                    label,
                    content,
                })
            }
            ModelSource::Text { label, content } => Ok(LoadedSource::Text {
                identity: label.clone(),
                label,
                content,
            }),
            ModelSource::Model(model) => Ok(LoadedSource::Model(model)),
        }
    }

    fn parse_loaded(&self, loaded: &LoadedSource) -> Result<Arc<DecisionModel>> {
        match loaded {
            LoadedSource::Text { label, content, .. } => {
                let model = ModelParser::parse_with_options(content, label, &self.parser_options)
                    .map_err(|source| SdkError::ParseError {
                        source_label: label.clone(),
                        source,
                    })?;
                Ok(Arc::new(model))
            }
            LoadedSource::Model(model) => Ok(Arc::clone(model)),
        }
    }
}
