//! Library-level tests for the full validation pipeline
//!
//! Realistic Block and FullDefinition documents go through `Validator`.

use flowcheck::loader::parse_document;
use flowcheck::{Category, Finding, FlowError, Validator, WorkflowShape};
use serde_json::json;

const EXPORTED_FLOW: &str = r#"{
  "definition": {
    "$schema": "https://schema.management.azure.com/providers/Microsoft.Logic/schemas/2016-06-01/workflowdefinition.json#",
    "triggers": {
      "manual": {"type": "Request", "kind": "Button"}
    },
    "actions": {
      "Get_items": {
        "type": "OpenApiConnection",
        "inputs": {
          "host": {"connectionName": "shared_sharepointonline"},
          "parameters": {"dataset": "@parameters('site')"}
        }
      },
      "Filter": {
        "type": "Query",
        "inputs": {"from": "@body('Get_items')?['value']"},
        "runAfter": {"Get_items": ["Succeeded"]}
      },
      "Each": {
        "type": "Foreach",
        "foreach": "@body('Filter')",
        "actions": {
          "Label": {"type": "Compose", "inputs": "@substring(string(x), 0, 10)"}
        },
        "runAfter": {"Filter": ["Succeeded", "Skipped"]}
      },
      "Fail": {
        "type": "Terminate",
        "inputs": {"runStatus": "Failed"},
        "runAfter": {"Each": ["FAILED", "TIMEDOUT"]}
      }
    }
  }
}"#;

#[test]
fn test_exported_flow_is_ready() {
    let doc = parse_document(EXPORTED_FLOW).unwrap();
    let report = Validator::default().validate(&doc, "export.json");

    assert_eq!(report.shape, WorkflowShape::FullDefinition);
    assert!(report.is_ready(), "unexpected findings: {:?}", report);
    assert_eq!(report.action_count, 5);
}

#[test]
fn test_unrecognized_produces_no_structural_or_dependency_findings() {
    let doc = json!({
        "actions": {"A": {"runAfter": {"Missing": ["Nope"]}}},
        "serializedValue": {"actions": {}}
    });
    let report = Validator::default().validate(&doc, "misc.json");

    assert_eq!(report.shape, WorkflowShape::Unrecognized);
    assert!(report.findings(Category::Structure).is_empty());
    assert!(report.findings(Category::Dependency).is_empty());
}

#[test]
fn test_block_missing_actions_and_connection_data() {
    let doc = json!({"nodeId": "Scope", "serializedValue": {"type": "Scope"}});
    let report = Validator::default().validate(&doc, "block.json");

    assert_eq!(report.structure_issues.len(), 1);
    assert!(report.structure_issues[0].to_string().contains("actions"));
    assert_eq!(report.structure_warnings.len(), 1);

    // Only the structural issue fails the checklist's field item
    let failed: Vec<&str> = report
        .checklist()
        .into_iter()
        .filter(|item| !item.passed)
        .map(|item| item.description)
        .collect();
    assert_eq!(failed, vec!["All required fields present"]);
}

#[test]
fn test_run_after_reference_scenario() {
    let doc = json!({
        "definition": {
            "triggers": {},
            "actions": {
                "A": {},
                "B": {"runAfter": {"A": ["Succeeded"]}},
                "C": {"runAfter": {"Z": ["Succeeded"]}}
            }
        }
    });
    let report = Validator::default().validate(&doc, "refs.json");

    assert_eq!(report.dependency_issues.len(), 1);
    assert_eq!(
        report.dependency_issues[0].to_string(),
        "Action 'C' references non-existent action 'Z' in runAfter"
    );
}

#[test]
fn test_expression_paths_point_at_inputs() {
    let doc = json!({
        "definition": {
            "triggers": {},
            "actions": {
                "Outer": {
                    "type": "Scope",
                    "actions": {
                        "Dup": {"type": "Compose", "inputs": "@int(a)@int(b)"},
                        "Bare": {"type": "Compose", "inputs": "Count: length(x)"}
                    }
                }
            }
        }
    });
    let report = Validator::default().validate(&doc, "expr.json");

    let paths: Vec<&str> = report
        .expression_issues
        .iter()
        .filter_map(Finding::path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "definition.actions.Outer.actions.Dup.inputs",
            "definition.actions.Outer.actions.Bare.inputs",
        ]
    );
    assert!(matches!(
        report.expression_issues[0],
        Finding::DuplicateExpression { .. }
    ));
}

#[test]
fn test_security_scenarios() {
    let literal = json!({"definition": {"triggers": {}, "actions": {
        "Http": {"type": "Compose", "inputs": {"password": "hunter2"}}
    }}});
    let expression = json!({"definition": {"triggers": {}, "actions": {
        "Http": {"type": "Compose", "inputs": {"password": "@variables('p')"}}
    }}});

    let validator = Validator::default();
    assert_eq!(validator.validate(&literal, "a.json").security_issues.len(), 1);
    assert!(validator
        .validate(&expression, "b.json")
        .security_issues
        .is_empty());
}

#[test]
fn test_pipeline_is_idempotent() {
    let doc = json!({
        "nodeId": "n",
        "serializedValue": {
            "type": "Scope",
            "actions": {
                "A": {"type": "Compose", "inputs": "x if(y)", "runAfter": {"Q": ["Maybe"]}},
                "B": {"type": "Select", "inputs": {"apiKey": "k-123"}}
            }
        }
    });
    let validator = Validator::default();

    let first = validator.validate(&doc, "same.json");
    let second = validator.validate(&doc, "same.json");

    for category in [
        Category::Structure,
        Category::Warning,
        Category::Expression,
        Category::Dependency,
        Category::Security,
    ] {
        assert_eq!(first.findings(category), second.findings(category));
    }
    assert_eq!(first.action_count, second.action_count);
    assert_eq!(first.is_ready(), second.is_ready());
    assert_eq!(first.to_json(), second.to_json());
}

#[test]
fn test_deeply_nested_flow_is_checked() {
    let depth = 200;
    let text = format!(
        r#"{{"definition": {{"triggers": {{}}, "actions": {{"A": {{"type": "Compose", "inputs": "@variables('x')"}}}}, "x": {}{}}}}}"#,
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let doc = parse_document(&text).unwrap();
    let report = Validator::default().validate(&doc, "deep.json");

    assert_eq!(report.shape, WorkflowShape::FullDefinition);
    assert_eq!(report.action_count, 1);
    assert!(report.is_ready());
}

#[test]
fn test_nesting_beyond_limit_is_not_a_syntax_error() {
    let depth = flowcheck::loader::MAX_DEPTH + 1;
    let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));

    let err = parse_document(&text).unwrap_err();
    assert!(matches!(err, FlowError::TooDeep { line: 1, .. }));
    assert!(!err.to_string().contains("syntax"));
}
