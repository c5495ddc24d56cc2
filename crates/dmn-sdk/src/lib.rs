//! DMN Decision Engine SDK
//!
//! High-level API for parsing decision models, compiling their decisions and
//! evaluating them against input contexts.
//!
//! ```rust,ignore
//! use dmn_sdk::{DmnEngine, EvaluationContext, ModelSource};
//!
//! let engine = DmnEngine::builder().build()?;
//! let decision = engine.parse_decision(ModelSource::path("dinner.dmn.yaml")).await?;
//!
//! let ctx = EvaluationContext::new().with_variable("season", "Winter");
//! let result = decision.evaluate(&ctx)?;
//! ```

pub mod builder;
pub mod config;
pub mod decision_engine;
pub mod error;
pub mod source;

// Re-export main types
pub use builder::DmnEngineBuilder;
pub use config::EngineConfig;
pub use decision_engine::{CacheStats, Decision, DmnEngine};
pub use error::{ErrorKind, Result, SdkError};
pub use source::ModelSource;

// Re-export commonly used types from dependencies
pub use dmn_core::ast::{DecisionModel, HitPolicy, LogicKind};
pub use dmn_core::Value;
pub use dmn_runtime::{
    DecisionOutput, DecisionResult, EvaluationContext, ExpressionEvaluator, OutputValue,
};
