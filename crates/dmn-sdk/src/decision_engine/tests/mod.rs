//! Unit tests for DmnEngine

use crate::{DmnEngine, DmnEngineBuilder, EngineConfig, ErrorKind, EvaluationContext, ModelSource, Value};
use dmn_core::ast::{DecisionDefinition, DecisionLogic, DecisionModel, RawDecisionTable, RawOutputClause, RawRule};
use std::io::Write;
use std::sync::Arc;

const SINGLE: &str = r#"
definitions:
  id: single
  decisions:
    - id: answer
      decision_table:
        hit_policy: FIRST
        outputs:
          - name: value
        rules:
          - output_entries: ['42']
"#;

fn text(content: &str) -> ModelSource {
    ModelSource::text("single.dmn", content)
}

#[tokio::test]
async fn test_cache_hits_for_repeated_parse() {
    let engine = DmnEngine::new(EngineConfig::default()).unwrap();

    engine.parse_decision(text(SINGLE)).await.unwrap();
    engine.parse_decision(text(SINGLE)).await.unwrap();
    engine.parse_decision_by_id(text(SINGLE), "answer").await.unwrap();

    let stats = engine.cache_stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.size, 2);
    assert_eq!(stats.capacity, 256);
}

#[tokio::test]
async fn test_changed_content_is_not_served_from_cache() {
    let engine = DmnEngine::new(EngineConfig::default()).unwrap();

    let first = engine.parse_decision(text(SINGLE)).await.unwrap();
    let changed = SINGLE.replace("'42'", "'43'");
    let second = engine.parse_decision(text(&changed)).await.unwrap();

    let ctx = EvaluationContext::new();
    assert_eq!(first.evaluate(&ctx).unwrap().collect_values("value"), vec![&Value::from(42)]);
    assert_eq!(second.evaluate(&ctx).unwrap().collect_values("value"), vec![&Value::from(43)]);
}

#[tokio::test]
async fn test_cache_evicts_oldest_entry() {
    let engine = DmnEngineBuilder::new().cache_capacity(2).build().unwrap();

    for value in ["1", "2", "3"] {
        let content = SINGLE.replace("'42'", &format!("'{}'", value));
        engine.parse_decision(text(&content)).await.unwrap();
    }
    assert_eq!(engine.cache_stats().await.size, 2);

    // The first model was evicted
    engine.parse_decision(text(&SINGLE.replace("'42'", "'1'"))).await.unwrap();
    assert_eq!(engine.cache_stats().await.hits, 0);

    engine.clear_cache().await;
    assert_eq!(engine.cache_stats().await.size, 0);
}

#[tokio::test]
async fn test_disabled_cache() {
    let engine = DmnEngineBuilder::new().enable_cache(false).build().unwrap();

    engine.parse_decision(text(SINGLE)).await.unwrap();
    engine.parse_decision(text(SINGLE)).await.unwrap();

    let stats = engine.cache_stats().await;
    assert_eq!(stats.size, 0);
    assert_eq!(stats.hits + stats.misses, 0);
    assert_eq!(stats.hit_rate(), 0.0);
}

#[tokio::test]
async fn test_preparsed_model_source() {
    let model = DecisionModel::new("built.dmn").add_decision(DecisionDefinition::new(
        "constant",
        DecisionLogic::DecisionTable(
            RawDecisionTable::new()
                .add_output(RawOutputClause::new("greeting"))
                .add_rule(RawRule::new(vec![], vec![r#""hello""#])),
        ),
    ));

    let engine = DmnEngine::new(EngineConfig::default()).unwrap();
    let decision = engine.parse_decision(model).await.unwrap();

    assert_eq!(decision.source_label(), "built.dmn");
    let result = decision.evaluate(&EvaluationContext::new()).unwrap();
    assert_eq!(result.first().unwrap().single_value(), Some(&Value::from("hello")));
}

fn constant_model(label: &str, output: &str) -> DecisionModel {
    DecisionModel::new(label).add_decision(DecisionDefinition::new(
        "constant",
        DecisionLogic::DecisionTable(
            RawDecisionTable::new()
                .add_output(RawOutputClause::new("letter"))
                .add_rule(RawRule::new(vec![], vec![output])),
        ),
    ))
}

#[tokio::test]
async fn test_preparsed_models_with_same_label_are_cached_apart() {
    let engine = DmnEngine::new(EngineConfig::default()).unwrap();
    let first = Arc::new(constant_model("<stream>", r#""A""#));
    let second = Arc::new(constant_model("<stream>", r#""B""#));

    let decision_a = engine.parse_decision(ModelSource::Model(first.clone())).await.unwrap();
    let decision_b = engine.parse_decision(ModelSource::Model(second)).await.unwrap();

    let context = EvaluationContext::new();
    let result_a = decision_a.evaluate(&context).unwrap();
    let result_b = decision_b.evaluate(&context).unwrap();
    assert_eq!(result_a.first().unwrap().single_value(), Some(&Value::from("A")));
    assert_eq!(result_b.first().unwrap().single_value(), Some(&Value::from("B")));

    // The same model content still hits the cache
    engine.parse_decision(ModelSource::Model(first)).await.unwrap();
    let stats = engine.cache_stats().await;
    assert_eq!(stats.size, 2);
    assert_eq!(stats.hits, 1);
}

#[tokio::test]
async fn test_path_source_uses_file_name_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("answer.dmn.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(SINGLE.as_bytes()).unwrap();

    let engine = DmnEngine::new(EngineConfig::default()).unwrap();
    let decision = engine.parse_decision(path.clone()).await.unwrap();
    assert_eq!(decision.source_label(), "answer.dmn.yaml");

    let err = engine
        .parse_decision(dir.path().join("missing.dmn.yaml"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("missing.dmn.yaml"));
}

#[tokio::test]
async fn test_parse_error_names_source() {
    let engine = DmnEngine::new(EngineConfig::default()).unwrap();

    let err = engine
        .parse_decision(ModelSource::text("broken.dmn", "decisions: ["))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("broken.dmn"));
}
