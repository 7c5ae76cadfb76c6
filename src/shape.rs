//! Workflow shape detection and structural checks
//!
//! Two document shapes are recognized:
//! - Block: a clipboard snippet (`nodeId` + `serializedValue`), as produced by
//!   copying actions in the designer
//! - FullDefinition: an exported flow with a top-level `definition`
//!
//! Anything else is `Unrecognized` and skips the workflow-specific checks.

use serde_json::{Map, Value};
use tracing::debug;

use crate::findings::Finding;

/// Classification tag for a parsed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowShape {
    Block,
    FullDefinition,
    Unrecognized,
}

impl WorkflowShape {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, WorkflowShape::Unrecognized)
    }
}

impl std::fmt::Display for WorkflowShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowShape::Block => write!(f, "block"),
            WorkflowShape::FullDefinition => write!(f, "full definition"),
            WorkflowShape::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Shape plus the structural findings for that shape
#[derive(Debug, Clone)]
pub struct Classification {
    pub shape: WorkflowShape,
    pub issues: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

/// Where a Block keeps its payload
pub const BLOCK_PAYLOAD: &str = "serializedValue";
/// Where a full export keeps its payload
pub const DEFINITION: &str = "definition";

/// Classify a document and check the required keys for its shape
pub fn classify(doc: &Value) -> Classification {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let shape = match doc.as_object() {
        Some(root) if root.contains_key("nodeId") && root.contains_key(BLOCK_PAYLOAD) => {
            let payload = root.get(BLOCK_PAYLOAD);
            for field in ["type", "actions"] {
                if !has_key(payload, field) {
                    issues.push(Finding::MissingField {
                        container: BLOCK_PAYLOAD,
                        field,
                    });
                }
            }

            if !root.contains_key("allConnectionData") {
                warnings.push(Finding::MissingConnectionData);
            }

            WorkflowShape::Block
        }
        Some(root) if root.contains_key(DEFINITION) => {
            let definition = root.get(DEFINITION);
            for field in ["triggers", "actions"] {
                if !has_key(definition, field) {
                    issues.push(Finding::MissingField {
                        container: DEFINITION,
                        field,
                    });
                }
            }

            WorkflowShape::FullDefinition
        }
        _ => WorkflowShape::Unrecognized,
    };

    debug!(
        %shape,
        issues = issues.len(),
        warnings = warnings.len(),
        "classified document"
    );

    Classification {
        shape,
        issues,
        warnings,
    }
}

/// Locate the action map, preferring the Block payload.
///
/// Returns the map and its location path. The first container that has an
/// `actions` key wins even when that value is empty or not an object, in
/// which case there is no action map.
pub fn resolve_actions(doc: &Value) -> Option<(&Map<String, Value>, &'static str)> {
    let (actions, location) = [
        (BLOCK_PAYLOAD, "serializedValue.actions"),
        (DEFINITION, "definition.actions"),
    ]
    .into_iter()
    .find_map(|(container, location)| {
        doc.get(container)?
            .get("actions")
            .map(|actions| (actions, location))
    })?;

    actions
        .as_object()
        .filter(|actions| !actions.is_empty())
        .map(|actions| (actions, location))
}

fn has_key(value: Option<&Value>, key: &str) -> bool {
    value
        .and_then(Value::as_object)
        .is_some_and(|obj| obj.contains_key(key))
}
