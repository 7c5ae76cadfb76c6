//! Aggregated result of validating one document

use serde::Serialize;

use crate::findings::{Category, Finding, FindingRecord};
use crate::shape::WorkflowShape;

/// One line of the deployment readiness checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub passed: bool,
    pub description: &'static str,
}

/// Result of validating a workflow file
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub file_path: String,
    pub shape: WorkflowShape,
    pub structure_issues: Vec<Finding>,
    pub structure_warnings: Vec<Finding>,
    pub expression_issues: Vec<Finding>,
    pub dependency_issues: Vec<Finding>,
    pub security_issues: Vec<Finding>,
    pub action_count: usize,
}

impl ValidationReport {
    pub fn new(file_path: impl Into<String>, shape: WorkflowShape) -> Self {
        Self {
            file_path: file_path.into(),
            shape,
            structure_issues: Vec::new(),
            structure_warnings: Vec::new(),
            expression_issues: Vec::new(),
            dependency_issues: Vec::new(),
            security_issues: Vec::new(),
            action_count: 0,
        }
    }

    /// File the finding under its category
    pub fn add(&mut self, finding: Finding) {
        match finding.category() {
            Category::Structure => self.structure_issues.push(finding),
            Category::Warning => self.structure_warnings.push(finding),
            Category::Expression => self.expression_issues.push(finding),
            Category::Dependency => self.dependency_issues.push(finding),
            Category::Security => self.security_issues.push(finding),
        }
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.add(finding);
        }
    }

    /// Findings for one category, in the order they were added
    pub fn findings(&self, category: Category) -> &[Finding] {
        match category {
            Category::Structure => &self.structure_issues,
            Category::Warning => &self.structure_warnings,
            Category::Expression => &self.expression_issues,
            Category::Dependency => &self.dependency_issues,
            Category::Security => &self.security_issues,
        }
    }

    /// Ordered readiness checklist.
    ///
    /// A report only exists for a document that parsed, so the syntax item
    /// always passes.
    pub fn checklist(&self) -> Vec<ChecklistItem> {
        vec![
            ChecklistItem {
                passed: true,
                description: "JSON syntax valid",
            },
            ChecklistItem {
                passed: self.shape.is_recognized(),
                description: "Power Automate block format correct",
            },
            ChecklistItem {
                passed: self.structure_issues.is_empty(),
                description: "All required fields present",
            },
            ChecklistItem {
                passed: self.dependency_issues.is_empty(),
                description: "runAfter chains valid",
            },
            ChecklistItem {
                passed: self.expression_issues.is_empty(),
                description: "Expressions correct (no duplicates)",
            },
            ChecklistItem {
                passed: self.security_issues.is_empty(),
                description: "No security vulnerabilities",
            },
            ChecklistItem {
                passed: self.action_count > 0,
                description: "Actions defined",
            },
        ]
    }

    /// Overall verdict: every checklist item passed
    pub fn is_ready(&self) -> bool {
        self.checklist().iter().all(|item| item.passed)
    }

    /// Issues that count against the verdict (warnings excluded)
    pub fn total_issues(&self) -> usize {
        self.structure_issues.len()
            + self.expression_issues.len()
            + self.dependency_issues.len()
            + self.security_issues.len()
    }

    /// Machine-readable view used by `--format json`
    pub fn to_json(&self) -> serde_json::Value {
        let records = |findings: &[Finding]| -> Vec<FindingRecord> {
            findings.iter().map(FindingRecord::from).collect()
        };

        serde_json::json!({
            "file": self.file_path,
            "syntax_valid": true,
            "shape": self.shape,
            "issues": {
                "structure": records(self.findings(Category::Structure)),
                "warnings": records(self.findings(Category::Warning)),
                "expression": records(self.findings(Category::Expression)),
                "dependency": records(self.findings(Category::Dependency)),
                "security": records(self.findings(Category::Security)),
            },
            "action_count": self.action_count,
            "checklist": self.checklist(),
            "ready": self.is_ready(),
        })
    }
}
