//! Branch conditions for automated flows.
//!
//! The engine attaches a condition to an automated-flow event; the service
//! picks the outgoing element by looking a value up in the instance context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::ProcessContext;
use crate::domain::foundation::ElementId;

/// One `value -> element` mapping of a branch condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCase {
    pub equals: Value,
    pub element_id: ElementId,
}

/// Selects the next element from the instance context.
///
/// `field` is a dotted path into the context (`machine.state`). Cases are
/// checked in order; the first whose `equals` matches wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCondition {
    pub field: String,
    #[serde(default)]
    pub cases: Vec<BranchCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<ElementId>,
}

impl BranchCondition {
    /// Returns the element selected for `context`.
    ///
    /// `None` means no case matched and no fallback is configured; the engine
    /// then follows its own default flow.
    pub fn element_for_context(&self, context: &ProcessContext) -> Option<ElementId> {
        let selected = lookup(context, &self.field).and_then(|value| {
            self.cases
                .iter()
                .find(|case| case.equals == *value)
                .map(|case| case.element_id.clone())
        });

        selected.or_else(|| self.otherwise.clone())
    }
}

fn lookup<'a>(context: &'a ProcessContext, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = context.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
