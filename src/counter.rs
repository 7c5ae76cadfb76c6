//! Action occurrence counting

use serde_json::Value;

/// Action types that count towards the total
pub const COUNTED_TYPES: &[&str] = &[
    "Compose",
    "If",
    "Foreach",
    "Scope",
    "SetVariable",
    "Query",
    "Select",
    "OpenApiConnection",
    "Terminate",
];

/// Count objects whose `type` is a recognized action type, at any depth.
///
/// Nested actions count separately, so a Scope with two children is 3.
pub fn count_actions(value: &Value) -> usize {
    match value {
        Value::Object(map) => {
            let own = map
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| COUNTED_TYPES.contains(&t));

            usize::from(own) + map.values().map(count_actions).sum::<usize>()
        }
        Value::Array(items) => items.iter().map(count_actions).sum(),
        _ => 0,
    }
}
