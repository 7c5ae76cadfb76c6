//! Expression heuristics for `inputs` strings
//!
//! Workflow expressions are introduced with `@` (`@variables('x')`). Two
//! literal checks run on every string-valued `inputs` key in the document:
//! - duplicate calls: `@int(` or `@substring(` appearing more than once, the
//!   usual trace of an expression pasted twice
//! - missing prefix: a known function name followed by `(` whose preceding
//!   character is something other than `@`
//!
//! These are pattern matches, not an expression parser. Function names in
//! plain text are flagged, and so are calls nested inside another call
//! (`@if(equals(a, b), 1, 2)` reports `equals(`). A call at the very start of
//! the string has no preceding character and is never flagged.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::findings::Finding;
use crate::jsonpath::{child_field, child_index};

/// Key whose string values are treated as expressions
pub const EXPRESSION_KEY: &str = "inputs";

/// Expression introducer
pub const PREFIX: char = '@';

/// Calls that are suspicious when they occur twice in one string
pub const DUPLICATE_CALLS: &[&str] = &["@int(", "@substring("];

/// Conversion, collection, conditional and context-accessor functions
pub const KNOWN_FUNCTIONS: &[&str] = &[
    "int",
    "substring",
    "contains",
    "formatDateTime",
    "outputs",
    "variables",
    "body",
    "items",
    "first",
    "last",
    "split",
    "length",
    "equals",
    "and",
    "or",
    "if",
];

static FUNCTION_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b({})\s*\(", KNOWN_FUNCTIONS.join("|")))
        .expect("function call pattern is valid")
});

/// Walk the whole document and check every expression-bearing string
pub fn check_expressions(doc: &Value) -> Vec<Finding> {
    let mut findings = Vec::new();
    walk(doc, "", &mut findings);
    debug!(findings = findings.len(), "expression check done");
    findings
}

fn walk(value: &Value, path: &str, findings: &mut Vec<Finding>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = child_field(path, key);
                if key == EXPRESSION_KEY {
                    if let Value::String(text) = child {
                        check_string(text, &child_path, findings);
                    }
                }
                walk(child, &child_path, findings);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, &child_index(path, i), findings);
            }
        }
        _ => {}
    }
}

/// Apply both heuristics to one expression string
pub fn check_string(text: &str, path: &str, findings: &mut Vec<Finding>) {
    if DUPLICATE_CALLS
        .iter()
        .any(|call| text.matches(call).count() > 1)
    {
        findings.push(Finding::DuplicateExpression {
            path: path.to_string(),
        });
    }

    for m in FUNCTION_CALL.find_iter(text) {
        let preceding = text[..m.start()].chars().next_back();
        if matches!(preceding, Some(c) if c != PREFIX) {
            findings.push(Finding::MissingPrefix {
                path: path.to_string(),
                call: m.as_str().to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        check_string(text, "inputs", &mut findings);
        findings
    }

    fn duplicates(findings: &[Finding]) -> usize {
        findings
            .iter()
            .filter(|f| matches!(f, Finding::DuplicateExpression { .. }))
            .count()
    }

    fn missing_prefix(findings: &[Finding]) -> usize {
        findings
            .iter()
            .filter(|f| matches!(f, Finding::MissingPrefix { .. }))
            .count()
    }

    #[test]
    fn test_duplicate_int_call() {
        let findings = check("@int(x)@int(y)");
        assert_eq!(duplicates(&findings), 1);
        assert_eq!(missing_prefix(&findings), 0);
    }

    #[test]
    fn test_duplicate_reported_once_for_both_functions() {
        let findings = check("@int(a)@int(b)@substring(c,0,1)@substring(d,0,1)");
        assert_eq!(duplicates(&findings), 1);
    }

    #[test]
    fn test_single_call_is_not_duplicate() {
        assert!(check("@int(variables('n'))").iter().all(|f| !matches!(
            f,
            Finding::DuplicateExpression { .. }
        )));
    }

    #[test]
    fn test_call_at_start_not_flagged() {
        assert_eq!(missing_prefix(&check("int(1)")), 0);
        assert_eq!(missing_prefix(&check("length(x)")), 0);
    }

    #[test]
    fn test_call_after_text_flagged() {
        let findings = check("x int(1)");
        assert_eq!(missing_prefix(&findings), 1);
        assert_eq!(
            findings[0].to_string(),
            "Expression missing @ prefix in inputs: int("
        );
    }

    #[test]
    fn test_prefixed_call_not_flagged() {
        assert!(check("Total: @length(x)").is_empty());
    }

    #[test]
    fn test_interpolation_braces_are_flagged() {
        // `@{...}` puts `{` before the function name
        assert_eq!(missing_prefix(&check("Hi @{variables('name')}")), 1);
    }

    #[test]
    fn test_nested_call_flagged() {
        let findings = check("@if(equals(1, 1), 'a', 'b')");
        assert_eq!(missing_prefix(&findings), 1);
        assert!(findings[0].to_string().ends_with("equals("));
    }

    #[test]
    fn test_whitespace_before_paren_kept_in_match() {
        let findings = check("value: first (items)");
        assert_eq!(missing_prefix(&findings), 1);
        assert!(findings[0].to_string().ends_with("first ("));
    }

    #[test]
    fn test_word_boundary() {
        // "print(" contains "int(" but not on a word boundary
        assert!(check("x print(1)").is_empty());
        assert!(check("x formatDateTimeX(1)").is_empty());
    }

    #[test]
    fn test_walk_paths() {
        let doc = json!({
            "definition": {
                "actions": {
                    "Compose": {"type": "Compose", "inputs": "a int(1)"},
                    "Loop": {
                        "type": "Foreach",
                        "steps": [
                            {"inputs": "@int(1)@int(2)"},
                            {"inputs": {"body": "x if(y)"}}
                        ]
                    }
                }
            }
        });
        let findings = check_expressions(&doc);
        let paths: Vec<&str> = findings.iter().filter_map(|f| f.path()).collect();

        assert_eq!(
            paths,
            vec![
                "definition.actions.Compose.inputs",
                "definition.actions.Loop.steps[0].inputs",
            ]
        );
    }

    #[test]
    fn test_only_inputs_key_checked() {
        let doc = json!({"description": "call int(1) later", "inputs": 42});
        assert!(check_expressions(&doc).is_empty());
    }

    #[test]
    fn test_root_array_paths() {
        let doc = json!([{"inputs": "a or(b)"}]);
        let findings = check_expressions(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path(), Some("[0].inputs"));
    }

    #[test]
    fn test_exhaustive() {
        let doc = json!({"a": {"inputs": "x int(1) y split(z)"}, "b": {"inputs": "q and(1)"}});
        assert_eq!(check_expressions(&doc).len(), 3);
    }
}
