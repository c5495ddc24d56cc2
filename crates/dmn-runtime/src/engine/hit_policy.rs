//! Hit policy application
//!
//! Reduces the output entries of the matched rules, in declaration order, to
//! the entries of the decision result.

use crate::error::{Result, RuntimeError};
use crate::result::{DecisionOutput, OutputValue};
use dmn_core::ast::{BuiltinAggregator, HitPolicy};
use dmn_core::ir::DecisionTableProgram;
use dmn_core::Value;

/// Whether a policy only needs the first matching rule
pub(crate) fn takes_first_only(hit_policy: HitPolicy) -> bool {
    hit_policy == HitPolicy::First
}

/// Fail when a UNIQUE table matched more than one rule
pub(crate) fn check_unique(
    decision_id: &str,
    table: &DecisionTableProgram,
    matched_rule_ids: &[&str],
) -> Result<()> {
    if table.hit_policy == HitPolicy::Unique && matched_rule_ids.len() > 1 {
        return Err(RuntimeError::RuleConflict {
            decision_id: decision_id.to_string(),
            hit_policy: table.hit_policy,
            rule_ids: matched_rule_ids.iter().map(|id| id.to_string()).collect(),
            message: format!(
                "{} rules matched but at most one may match: {}",
                matched_rule_ids.len(),
                matched_rule_ids.join(", ")
            ),
        });
    }
    Ok(())
}

/// Apply the table's hit policy to the entries of the matched rules
pub(crate) fn apply(
    decision_id: &str,
    table: &DecisionTableProgram,
    entries: Vec<DecisionOutput>,
) -> Result<Vec<DecisionOutput>> {
    match table.hit_policy {
        HitPolicy::Unique | HitPolicy::RuleOrder => Ok(entries),
        HitPolicy::First => Ok(entries.into_iter().take(1).collect()),
        HitPolicy::Any => apply_any(decision_id, entries),
        HitPolicy::Priority => Ok(apply_priority(table, entries)),
        HitPolicy::OutputOrder => Ok(apply_output_order(table, entries)),
        HitPolicy::Collect => match table.aggregation {
            Some(aggregator) => aggregate(decision_id, table, aggregator, entries),
            None => Ok(entries),
        },
    }
}

fn apply_any(decision_id: &str, entries: Vec<DecisionOutput>) -> Result<Vec<DecisionOutput>> {
    let Some(first) = entries.first() else {
        return Ok(entries);
    };

    if entries.iter().all(|entry| entry.same_values(first)) {
        return Ok(entries.into_iter().take(1).collect());
    }

    let rule_ids: Vec<String> = entries
        .iter()
        .flat_map(|entry| entry.rule_ids().iter().cloned())
        .collect();

    Err(RuntimeError::RuleConflict {
        decision_id: decision_id.to_string(),
        hit_policy: HitPolicy::Any,
        message: format!(
            "matched rules {} produce different outputs",
            rule_ids.join(", ")
        ),
        rule_ids,
    })
}

fn priority_key(table: &DecisionTableProgram, entry: &DecisionOutput) -> Vec<usize> {
    let values: Vec<Value> = entry.values().iter().map(|v| v.value.clone()).collect();
    table.priority_key(&values)
}

fn apply_priority(table: &DecisionTableProgram, entries: Vec<DecisionOutput>) -> Vec<DecisionOutput> {
    let mut best: Option<(Vec<usize>, DecisionOutput)> = None;

    // Strictly better keys replace the current best, so ties keep declaration order
    for entry in entries {
        let key = priority_key(table, &entry);
        let better = best.as_ref().map_or(true, |(best_key, _)| key < *best_key);
        if better {
            best = Some((key, entry));
        }
    }

    best.map(|(_, entry)| entry).into_iter().collect()
}

fn apply_output_order(
    table: &DecisionTableProgram,
    entries: Vec<DecisionOutput>,
) -> Vec<DecisionOutput> {
    let mut keyed: Vec<(Vec<usize>, DecisionOutput)> = entries
        .into_iter()
        .map(|entry| (priority_key(table, &entry), entry))
        .collect();

    // Stable sort
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

fn aggregate(
    decision_id: &str,
    table: &DecisionTableProgram,
    aggregator: BuiltinAggregator,
    entries: Vec<DecisionOutput>,
) -> Result<Vec<DecisionOutput>> {
    if entries.is_empty() {
        return Ok(entries);
    }

    let name = table
        .outputs
        .first()
        .map(|column| column.name.clone())
        .unwrap_or_default();

    let values: Vec<&Value> = entries
        .iter()
        .filter_map(|entry| entry.get(0))
        .map(|v| &v.value)
        .filter(|v| !v.is_null())
        .collect();

    let value = match aggregator {
        BuiltinAggregator::Count => Value::from(values.len() as i64),
        BuiltinAggregator::Sum | BuiltinAggregator::Min | BuiltinAggregator::Max => {
            let numbers = values
                .iter()
                .map(|v| {
                    v.as_f64().ok_or_else(|| RuntimeError::TypeError {
                        decision_id: decision_id.to_string(),
                        location: format!("aggregation {}", aggregator),
                        message: format!(
                            "cannot aggregate {} value '{}' of output '{}'",
                            v.type_name(),
                            v,
                            name
                        ),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            match aggregator {
                BuiltinAggregator::Sum => Value::Number(numbers.iter().sum()),
                BuiltinAggregator::Min => numbers
                    .into_iter()
                    .reduce(f64::min)
                    .map_or(Value::Null, Value::Number),
                _ => numbers
                    .into_iter()
                    .reduce(f64::max)
                    .map_or(Value::Null, Value::Number),
            }
        }
    };

    let rule_ids = entries
        .iter()
        .flat_map(|entry| entry.rule_ids().iter().cloned())
        .collect();

    Ok(vec![DecisionOutput::new(
        vec![OutputValue::new(name, value)],
        rule_ids,
    )])
}
