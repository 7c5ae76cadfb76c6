//! runAfter chain checks
//!
//! Each action may declare `runAfter: { "<action>": ["<status>", ...] }`.
//! This module checks referential integrity and status values only. It does
//! not look for cycles or verify that the chain forms a DAG.

use serde_json::{Map, Value};
use tracing::debug;

use crate::findings::Finding;
use crate::jsonpath::child_field;
use crate::shape::resolve_actions;

/// Accepted completion statuses, canonical and all-caps spellings
pub const VALID_STATUSES: &[&str] = &[
    "Succeeded",
    "Failed",
    "Skipped",
    "TimedOut",
    "SUCCEEDED",
    "FAILED",
    "SKIPPED",
    "TIMEDOUT",
];

/// Check every runAfter block in the document's action map
pub fn check_run_after(doc: &Value) -> Vec<Finding> {
    let Some((actions, location)) = resolve_actions(doc) else {
        debug!("no action map, skipping runAfter check");
        return Vec::new();
    };

    let mut findings = Vec::new();
    for (name, action) in actions {
        let Some(run_after) = action.get("runAfter") else {
            continue;
        };
        let path = child_field(&child_field(location, name), "runAfter");
        check_action(name, run_after, actions, &path, &mut findings);
    }

    debug!(
        actions = actions.len(),
        findings = findings.len(),
        "runAfter check done"
    );
    findings
}

fn check_action(
    name: &str,
    run_after: &Value,
    actions: &Map<String, Value>,
    path: &str,
    findings: &mut Vec<Finding>,
) {
    let Some(targets) = run_after.as_object() else {
        findings.push(Finding::MalformedRunAfter {
            action: name.to_string(),
            reason: format!("expected an object, found {}", kind_of(run_after)),
            path: path.to_string(),
        });
        return;
    };

    for target in targets.keys() {
        if !actions.contains_key(target) {
            findings.push(Finding::UnknownRunAfterTarget {
                action: name.to_string(),
                target: target.clone(),
                path: path.to_string(),
            });
        }
    }

    for (target, statuses) in targets {
        let Some(statuses) = statuses.as_array() else {
            findings.push(Finding::MalformedRunAfter {
                action: name.to_string(),
                reason: format!(
                    "statuses for '{}' should be a list, found {}",
                    target,
                    kind_of(statuses)
                ),
                path: path.to_string(),
            });
            continue;
        };

        for status in statuses {
            let valid = status
                .as_str()
                .is_some_and(|s| VALID_STATUSES.contains(&s));
            if !valid {
                findings.push(Finding::InvalidRunAfterStatus {
                    action: name.to_string(),
                    status: status
                        .as_str()
                        .map(String::from)
                        .unwrap_or_else(|| status.to_string()),
                    path: path.to_string(),
                });
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
