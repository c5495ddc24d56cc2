//! Decision resolver
//!
//! Locates a decision definition inside a parsed model, either by id or by
//! requiring the model to declare exactly one decision.

use crate::error::{CompileError, Result};
use dmn_core::ast::{DecisionDefinition, DecisionModel};

/// Decision resolver
pub struct DecisionResolver;

impl DecisionResolver {
    /// Resolve a decision.
    ///
    /// With an id the lookup is an exact match. Without one the model must
    /// declare exactly one decision.
    pub fn resolve<'a>(
        model: &'a DecisionModel,
        decision_id: Option<&str>,
    ) -> Result<&'a DecisionDefinition> {
        match decision_id {
            Some(id) => Self::resolve_by_id(model, id),
            None => Self::resolve_single(model),
        }
    }

    /// Resolve a decision by exact identifier
    pub fn resolve_by_id<'a>(model: &'a DecisionModel, id: &str) -> Result<&'a DecisionDefinition> {
        model.decision(id).ok_or_else(|| CompileError::DecisionNotFound {
            decision_id: id.to_string(),
            source_label: model.source_label.clone(),
        })
    }

    /// Resolve the only decision of a model
    pub fn resolve_single(model: &DecisionModel) -> Result<&DecisionDefinition> {
        match model.decisions.as_slice() {
            [decision] => Ok(decision),
            [] => Err(CompileError::NoDecision {
                source_label: model.source_label.clone(),
            }),
            decisions => Err(CompileError::AmbiguousDecision {
                source_label: model.source_label.clone(),
                count: decisions.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmn_core::ast::DecisionLogic;

    fn model(ids: &[&str]) -> DecisionModel {
        ids.iter().fold(DecisionModel::new("dish.dmn"), |model, id| {
            model.add_decision(DecisionDefinition::new(*id, DecisionLogic::Empty))
        })
    }

    #[test]
    fn test_resolve_single_decision() {
        let model = model(&["decision"]);
        let decision = DecisionResolver::resolve(&model, None).unwrap();
        assert_eq!(decision.id, "decision");

        let by_id = DecisionResolver::resolve(&model, Some("decision")).unwrap();
        assert_eq!(by_id, decision);
    }

    #[test]
    fn test_resolve_by_id_among_many() {
        let model = model(&["a", "b", "c"]);
        assert_eq!(DecisionResolver::resolve(&model, Some("b")).unwrap().id, "b");
    }

    #[test]
    fn test_resolve_no_decision() {
        let model = model(&[]);
        let err = DecisionResolver::resolve(&model, None).unwrap_err();
        assert!(matches!(err, CompileError::NoDecision { .. }));
        assert!(err.to_string().contains("Unable to find decision"));
        assert!(err.to_string().contains("dish.dmn"));

        let err = DecisionResolver::resolve(&model, Some("decision")).unwrap_err();
        assert!(matches!(err, CompileError::DecisionNotFound { .. }));
    }

    #[test]
    fn test_resolve_unknown_id() {
        let model = model(&["decision"]);
        let err = DecisionResolver::resolve(&model, Some("unknownDecision")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknownDecision"));
        assert!(message.contains("dish.dmn"));
        assert_eq!(err.decision_id(), Some("unknownDecision"));
    }

    #[test]
    fn test_resolve_ambiguous() {
        let model = model(&["a", "b"]);
        let err = DecisionResolver::resolve(&model, None).unwrap_err();
        assert!(matches!(err, CompileError::AmbiguousDecision { count: 2, .. }));
        assert!(err.to_string().contains("specify a decision id"));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let model = model(&["decision"]);
        assert!(DecisionResolver::resolve(&model, Some("Decision")).is_err());
    }
}
