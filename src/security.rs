//! Hardcoded credential scan
//!
//! Works on the serialized document, not the tree: each credential key
//! followed by a quoted value that does not start with `@` is reported once
//! per kind. Matching is case-insensitive. Because it is textual, an empty
//! value (`"password": ""`) also matches, and so does the key/value pair
//! appearing inside an escaped string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::findings::{CredentialKind, Finding};

static PATTERNS: Lazy<Vec<(CredentialKind, Regex)>> = Lazy::new(|| {
    CredentialKind::ALL
        .iter()
        .map(|kind| {
            let pattern = format!(r#"(?i)"{}"\s*:\s*"[^@]"#, regex::escape(kind.key()));
            let regex = Regex::new(&pattern).expect("credential pattern is valid");
            (*kind, regex)
        })
        .collect()
});

/// Scan the serialized document for literal credentials
pub fn check_security(doc: &Value) -> Vec<Finding> {
    scan_text(&doc.to_string())
}

/// Scan already-serialized JSON text
pub fn scan_text(text: &str) -> Vec<Finding> {
    let findings: Vec<Finding> = PATTERNS
        .iter()
        .filter(|(_, regex)| regex.is_match(text))
        .map(|(kind, _)| Finding::HardcodedCredential { kind: *kind })
        .collect();

    debug!(findings = findings.len(), "security scan done");
    findings
}
