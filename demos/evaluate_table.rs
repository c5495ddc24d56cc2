//! Decision table evaluation example
//!
//! This example demonstrates:
//! - Building a DmnEngine
//! - Resolving decisions of a model by id
//! - Evaluating a UNIQUE and a COLLECT table
//!
//! Run from the workspace root: `RUST_LOG=dmn_sdk=debug cargo run --example evaluate_table`

use dmn_sdk::{DmnEngineBuilder, EvaluationContext, ModelSource, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MODEL: &str = "demos/models/dinner.dmn.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    println!("=== Decision Table Example ===\n");

    let engine = DmnEngineBuilder::new().enable_cache(true).build()?;

    let decisions = engine.parse_decisions(ModelSource::path(MODEL)).await?;
    println!("Decisions in {}:", MODEL);
    for decision in &decisions {
        println!(
            "  {} ({}), inputs: {:?}, outputs: {:?}",
            decision.id(),
            decision.hit_policy(),
            decision.input_names(),
            decision.output_names()
        );
    }
    println!();

    let dish = engine
        .parse_decision_by_id(ModelSource::path(MODEL), "dish")
        .await?;
    let beverages = engine
        .parse_decision_by_id(ModelSource::path(MODEL), "beverages")
        .await?;

    for (season, guests, children) in [("Fall", 4, true), ("Spring", 6, false), ("Winter", 12, true)] {
        let ctx = EvaluationContext::new()
            .with_variable("season", season)
            .with_variable("guestCount", guests);

        let Some(dish_output) = engine.evaluate(&dish, &ctx)?.into_outputs().into_iter().next() else {
            println!("{} with {} guests: no dish", season, guests);
            continue;
        };
        let desired = dish_output
            .value("desiredDish")
            .cloned()
            .unwrap_or(Value::Null);

        let ctx = EvaluationContext::new()
            .with_variable("desiredDish", desired.clone())
            .with_variable("guestsWithChildren", children);
        let drinks = engine.evaluate(&beverages, &ctx)?;

        println!("{} with {} guests (children: {}):", season, guests, children);
        println!("  Dish: {} (rule {:?})", desired, dish_output.rule_ids());
        println!("  Beverages: {:?}", drinks.collect_values("beverages"));
        println!("  Result: {}", serde_json::to_string(&drinks)?);
    }

    let stats = engine.cache_stats().await;
    println!(
        "\nCache: {} hits, {} misses, {} entries (hit rate {:.2})",
        stats.hits,
        stats.misses,
        stats.size,
        stats.hit_rate()
    );

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dmn_sdk=info,dmn_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
