//! Hit policy example
//!
//! This example demonstrates:
//! - Loading engine settings from YAML
//! - PRIORITY and COLLECT SUM tables over nested input data
//! - The same rules evaluated under every hit policy
//! - Inspecting rule conflicts

use dmn_sdk::{DmnEngine, EngineConfig, ErrorKind, EvaluationContext, ModelSource, Value};

const MODEL: &str = "demos/models/shipping.dmn.yaml";

const CONFIG: &str = r#"
enable_cache: true
cache_capacity: 16
strict_fields: true
"#;

const POLICIES: &[&str] = &[
    "UNIQUE",
    "FIRST",
    "PRIORITY",
    "ANY",
    "COLLECT",
    "RULE ORDER",
    "OUTPUT ORDER",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dmn_sdk=info".into()),
        )
        .init();

    println!("=== Hit Policy Example ===\n");

    let engine = DmnEngine::new(EngineConfig::from_yaml_str(CONFIG)?)?;

    let parcels = [
        ("local letter", 0.2, "DE", 0.0),
        ("parcel to France", 12.0, "FR", 800.0),
        ("pallet", 120.0, "DE", 2500.0),
    ];

    for (label, weight, country, insured) in parcels {
        let parcel: Value = serde_json::json!({
            "weight": weight,
            "country": country,
            "insured": insured,
        })
        .into();
        let ctx = EvaluationContext::new().with_variable("parcel", parcel);

        let carrier = engine
            .evaluate_by_id(ModelSource::path(MODEL), "carrier", &ctx)
            .await?;
        let surcharge = engine
            .evaluate_by_id(ModelSource::path(MODEL), "surcharges", &ctx)
            .await?;

        println!("{}:", label);
        println!(
            "  Carrier: {:?} (matched {:?})",
            carrier.collect_values("carrier"),
            carrier.matched_rules()
        );
        match surcharge.first() {
            Some(total) => println!(
                "  Surcharge: {:?} from rules {:?}",
                total.value("surcharge"),
                total.rule_ids()
            ),
            None => println!("  Surcharge: none"),
        }
    }

    println!("\nSame rules, every hit policy (score = 42):");
    let ctx = EvaluationContext::new().with_variable("score", 42);
    for policy in POLICIES {
        let source = ModelSource::text(format!("{}.dmn", policy), grading_model(policy));
        let decision = engine.parse_decision(source).await?;

        match decision.evaluate(&ctx) {
            Ok(result) => println!("  {:<12} {:?}", policy, result.collect_values("grade")),
            Err(e) if e.kind() == ErrorKind::RuleConflict => {
                println!("  {:<12} conflict: {}", policy, e)
            }
            Err(e) => return Err(e.into()),
        }
    }

    let stats = engine.cache_stats().await;
    println!("\nCache hit rate: {:.2}", stats.hit_rate());

    Ok(())
}

/// Overlapping grading rules under the given hit policy
fn grading_model(hit_policy: &str) -> String {
    format!(
        r#"definitions:
  decisions:
    - id: grade
      decision_table:
        hit_policy: {}
        inputs:
          - expression: score
            type: number
        outputs:
          - name: grade
            type: string
            values: ['"A"', '"B"', '"C"']
        rules:
          - id: passed
            input_entries: ['>= 40']
            output_entries: ['"C"']
          - id: good
            input_entries: ['[40..60]']
            output_entries: ['"B"']
          - id: excellent
            input_entries: ['> 80']
            output_entries: ['"A"']
"#,
        hit_policy
    )
}
