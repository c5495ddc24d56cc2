//! Main compiler
//!
//! Provides a unified interface for resolving and compiling decisions of a
//! parsed model.

use crate::codegen::DecisionTableCompiler;
use crate::error::{CompileError, Result};
use crate::resolver::DecisionResolver;
use dmn_core::ast::{DecisionDefinition, DecisionLogic, DecisionModel, HitPolicy};
use dmn_core::ir::{CompiledDecision, CompiledLogic, DecisionMetadata};
use tracing::debug;

/// Compiler options
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Hit policy used when a table omits one
    pub default_hit_policy: HitPolicy,
    /// Enable constant folding of cell expressions
    pub enable_constant_folding: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            default_hit_policy: HitPolicy::Unique,
            enable_constant_folding: true,
        }
    }
}

/// The decision compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompilerOptions,
}

impl Compiler {
    /// Create a new compiler instance with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new compiler instance with custom options
    pub fn with_options(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile one decision definition.
    ///
    /// Only decision tables are executable; every other logic variant is
    /// rejected with `UnsupportedLogic`.
    pub fn compile(
        &self,
        definition: &DecisionDefinition,
        source_label: &str,
    ) -> Result<CompiledDecision> {
        let table = match &definition.logic {
            DecisionLogic::DecisionTable(table) => table,
            DecisionLogic::LiteralExpression { .. }
            | DecisionLogic::Invocation { .. }
            | DecisionLogic::Context { .. }
            | DecisionLogic::Relation { .. }
            | DecisionLogic::Empty => {
                return Err(CompileError::UnsupportedLogic {
                    decision_id: definition.id.clone(),
                    kind: definition.logic_kind(),
                });
            }
        };

        let program = DecisionTableCompiler::new(&definition.id, self.options.enable_constant_folding)
            .compile(table, self.options.default_hit_policy)?;

        debug!(
            decision_id = %definition.id,
            source = source_label,
            hit_policy = %program.hit_policy,
            inputs = program.input_count(),
            outputs = program.output_count(),
            rules = program.rule_count(),
            "Compiled decision table"
        );

        let metadata =
            DecisionMetadata::for_decision_table(definition.id.clone(), source_label.to_string())
                .with_name(definition.name.clone());

        Ok(CompiledDecision::new(metadata, CompiledLogic::DecisionTable(program)))
    }

    /// Resolve a decision of a model and compile it
    pub fn compile_decision(
        &self,
        model: &DecisionModel,
        decision_id: Option<&str>,
    ) -> Result<CompiledDecision> {
        let definition = DecisionResolver::resolve(model, decision_id)?;
        self.compile(definition, &model.source_label)
    }

    /// Compile every decision of a model in declaration order
    pub fn compile_all(&self, model: &DecisionModel) -> Result<Vec<CompiledDecision>> {
        model
            .decisions()
            .map(|definition| self.compile(definition, &model.source_label))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmn_core::ast::{LogicKind, RawDecisionTable, RawOutputClause, RawRule};

    fn no_input_table() -> DecisionLogic {
        DecisionLogic::DecisionTable(
            RawDecisionTable::new()
                .add_output(RawOutputClause::new("result"))
                .add_rule(RawRule::new(vec![], vec![r#""okay""#])),
        )
    }

    #[test]
    fn test_compile_decision_table() {
        let definition =
            DecisionDefinition::new("decision", no_input_table()).with_name("Decision".to_string());

        let compiled = Compiler::new().compile(&definition, "NoInput.dmn").unwrap();
        assert_eq!(compiled.id(), "decision");
        assert_eq!(compiled.metadata.source_label, "NoInput.dmn");
        assert_eq!(compiled.metadata.name, Some("Decision".to_string()));
        assert_eq!(compiled.metadata.logic_kind, LogicKind::DecisionTable);

        let table = compiled.decision_table().unwrap();
        assert_eq!(table.hit_policy, HitPolicy::Unique);
        assert_eq!(table.rule_count(), 1);
    }

    #[test]
    fn test_unsupported_logic_variants() {
        let variants = vec![
            DecisionLogic::Invocation {
                payload: serde_json::json!({}),
            },
            DecisionLogic::LiteralExpression {
                text: "a + b".to_string(),
            },
            DecisionLogic::Context {
                payload: serde_json::json!([]),
            },
            DecisionLogic::Relation {
                payload: serde_json::json!(null),
            },
            DecisionLogic::Empty,
        ];

        for logic in variants {
            let kind = logic.kind();
            let definition = DecisionDefinition::new("decision", logic);
            let err = Compiler::new().compile(&definition, "InvocationDecision.dmn").unwrap_err();

            assert!(matches!(err, CompileError::UnsupportedLogic { .. }));
            let message = err.to_string();
            assert!(message.contains("expression type of the decision 'decision' is not supported"));
            assert!(message.contains(kind.as_str()));
        }
    }

    #[test]
    fn test_default_hit_policy_option() {
        let compiler = Compiler::with_options(CompilerOptions {
            default_hit_policy: HitPolicy::First,
            ..Default::default()
        });
        let definition = DecisionDefinition::new("decision", no_input_table());

        let compiled = compiler.compile(&definition, "NoInput.dmn").unwrap();
        assert_eq!(compiled.decision_table().unwrap().hit_policy, HitPolicy::First);
    }

    #[test]
    fn test_compile_decision_resolves() {
        let model = DecisionModel::new("NoInput.dmn")
            .add_decision(DecisionDefinition::new("decision", no_input_table()));
        let compiler = Compiler::new();

        let implicit = compiler.compile_decision(&model, None).unwrap();
        let explicit = compiler.compile_decision(&model, Some("decision")).unwrap();
        assert_eq!(implicit, explicit);

        let err = compiler.compile_decision(&model, Some("unknownDecision")).unwrap_err();
        assert!(matches!(err, CompileError::DecisionNotFound { .. }));
    }

    #[test]
    fn test_compile_all_stops_at_unsupported() {
        let model = DecisionModel::new("mixed.dmn")
            .add_decision(DecisionDefinition::new("table", no_input_table()))
            .add_decision(DecisionDefinition::new("empty", DecisionLogic::Empty));

        let err = Compiler::new().compile_all(&model).unwrap_err();
        assert_eq!(err.decision_id(), Some("empty"));

        let model = DecisionModel::new("empty.dmn");
        assert!(Compiler::new().compile_all(&model).unwrap().is_empty());
    }
}
