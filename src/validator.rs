//! Unified Validator
//!
//! Runs the checkers over one parsed document and aggregates the result.
//! Checkers only read the document, so their order does not affect the report.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::ValidatorConfig;
use crate::counter::count_actions;
use crate::dependency::check_run_after;
use crate::error::FlowError;
use crate::expression::check_expressions;
use crate::loader::load_document;
use crate::report::ValidationReport;
use crate::security::check_security;
use crate::shape::classify;

/// What happened to a path handed to the validator
#[derive(Debug)]
pub enum Outcome {
    /// Not a target file (other extension or skip-listed)
    Skipped,
    /// Parsed and checked
    Checked(ValidationReport),
}

pub struct Validator {
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate an already-parsed document.
    ///
    /// Unrecognized documents get a report with their shape and nothing else:
    /// the workflow-specific checks do not apply to them.
    pub fn validate(&self, doc: &Value, file_path: &str) -> ValidationReport {
        let classification = classify(doc);
        let mut report = ValidationReport::new(file_path, classification.shape);

        if !classification.shape.is_recognized() {
            debug!(file = file_path, "not a workflow document");
            return report;
        }

        report.extend(classification.issues);
        report.extend(classification.warnings);
        report.extend(check_expressions(doc));
        report.extend(check_run_after(doc));
        report.extend(check_security(doc));
        report.action_count = count_actions(doc);

        info!(
            file = file_path,
            shape = %report.shape,
            issues = report.total_issues(),
            actions = report.action_count,
            "validated workflow"
        );

        report
    }

    /// Validate a workflow file from path, honouring the skip rules
    pub fn validate_file(&self, path: &Path) -> Result<Outcome, FlowError> {
        if !self.config.should_validate(path) {
            debug!(path = %path.display(), "skipping non-target file");
            return Ok(Outcome::Skipped);
        }

        let doc = load_document(path)?;
        let file_path = path.to_string_lossy().to_string();
        Ok(Outcome::Checked(self.validate(&doc, &file_path)))
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}
