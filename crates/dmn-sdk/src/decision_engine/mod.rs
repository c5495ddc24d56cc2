//! DmnEngine - Main API for parsing and evaluating decisions
//!
//! The module is organized into:
//! - `engine`: the `DmnEngine` facade (parse, resolve, compile, evaluate)
//! - `decision`: the `Decision` handle returned by the engine
//! - `cache`: cache of compiled decisions owned by one engine
//! - `tests`: Unit tests (test-only)

mod cache;
mod decision;
mod engine;

// Re-export public types
pub use cache::CacheStats;
pub use decision::Decision;
pub use engine::DmnEngine;

// Tests module (only compiled in test mode)
#[cfg(test)]
mod tests;
