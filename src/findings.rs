//! Validation finding types
//!
//! Every non-fatal observation a checker makes about a document is a
//! [`Finding`]. The `Display` text is the message shown to the user.

use serde::Serialize;
use thiserror::Error;

/// Which report section a finding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Structure,
    Warning,
    Expression,
    Dependency,
    Security,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Structure => write!(f, "Structure"),
            Category::Warning => write!(f, "Warning"),
            Category::Expression => write!(f, "Expression"),
            Category::Dependency => write!(f, "Dependency"),
            Category::Security => write!(f, "Security"),
        }
    }
}

/// Credential-like keys the security scan looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    Password,
    ApiKey,
    Secret,
    ConnectionString,
}

impl CredentialKind {
    pub const ALL: [CredentialKind; 4] = [
        CredentialKind::Password,
        CredentialKind::ApiKey,
        CredentialKind::Secret,
        CredentialKind::ConnectionString,
    ];

    /// JSON key name as it appears in workflow documents
    pub fn key(&self) -> &'static str {
        match self {
            CredentialKind::Password => "password",
            CredentialKind::ApiKey => "apiKey",
            CredentialKind::Secret => "secret",
            CredentialKind::ConnectionString => "connectionString",
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialKind::Password => write!(f, "password"),
            CredentialKind::ApiKey => write!(f, "API key"),
            CredentialKind::Secret => write!(f, "secret"),
            CredentialKind::ConnectionString => write!(f, "connection string"),
        }
    }
}

/// A single validation finding with its location
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Finding {
    // Structure
    #[error("Missing '{field}' in {container}")]
    MissingField {
        container: &'static str,
        field: &'static str,
    },

    #[error("Missing 'allConnectionData' - connections may need reconfiguration")]
    MissingConnectionData,

    // Expressions
    #[error("Possible duplicate expression in {path}")]
    DuplicateExpression { path: String },

    #[error("Expression missing @ prefix in {path}: {call}")]
    MissingPrefix { path: String, call: String },

    // runAfter chains
    #[error("Action '{action}' references non-existent action '{target}' in runAfter")]
    UnknownRunAfterTarget {
        action: String,
        target: String,
        path: String,
    },

    #[error("Invalid runAfter status '{status}' in action '{action}'")]
    InvalidRunAfterStatus {
        action: String,
        status: String,
        path: String,
    },

    #[error("Malformed runAfter in action '{action}': {reason}")]
    MalformedRunAfter {
        action: String,
        reason: String,
        path: String,
    },

    // Security
    #[error("Possible hardcoded {kind}")]
    HardcodedCredential { kind: CredentialKind },
}

impl Finding {
    /// Report section for this finding
    pub fn category(&self) -> Category {
        match self {
            Finding::MissingField { .. } => Category::Structure,
            Finding::MissingConnectionData => Category::Warning,
            Finding::DuplicateExpression { .. } | Finding::MissingPrefix { .. } => {
                Category::Expression
            }
            Finding::UnknownRunAfterTarget { .. }
            | Finding::InvalidRunAfterStatus { .. }
            | Finding::MalformedRunAfter { .. } => Category::Dependency,
            Finding::HardcodedCredential { .. } => Category::Security,
        }
    }

    /// Dotted/bracketed address inside the document, when the finding has one.
    ///
    /// Security findings come from the serialized text and have no path.
    pub fn path(&self) -> Option<&str> {
        match self {
            Finding::MissingField { container, .. } => Some(*container),
            Finding::MissingConnectionData => Some("allConnectionData"),
            Finding::DuplicateExpression { path }
            | Finding::MissingPrefix { path, .. }
            | Finding::UnknownRunAfterTarget { path, .. }
            | Finding::InvalidRunAfterStatus { path, .. }
            | Finding::MalformedRunAfter { path, .. } => Some(path.as_str()),
            Finding::HardcodedCredential { .. } => None,
        }
    }

    /// Get suggestion for fixing this finding
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Finding::MissingField { container, field } => {
                Some(format!("Add a '{}' entry under {}", field, container))
            }
            Finding::MissingConnectionData => {
                Some("Re-select the connections after pasting the block".to_string())
            }
            Finding::DuplicateExpression { .. } => {
                Some("Check for an expression pasted twice into the same field".to_string())
            }
            Finding::MissingPrefix { .. } => {
                Some("Start expressions with @, e.g. @variables('name')".to_string())
            }
            Finding::UnknownRunAfterTarget { target, .. } => {
                Some(format!("Rename the reference or add an action named '{}'", target))
            }
            Finding::InvalidRunAfterStatus { .. } => {
                Some("Use one of Succeeded, Failed, Skipped, TimedOut".to_string())
            }
            Finding::MalformedRunAfter { .. } => Some(
                "runAfter maps action names to status lists, e.g. {\"Init\": [\"Succeeded\"]}"
                    .to_string(),
            ),
            Finding::HardcodedCredential { kind } => Some(format!(
                "Move the {} into a secure parameter or Key Vault reference",
                kind
            )),
        }
    }
}

/// Flat, serializable view of a finding for machine-readable output
#[derive(Debug, Clone, Serialize)]
pub struct FindingRecord {
    pub category: Category,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&Finding> for FindingRecord {
    fn from(finding: &Finding) -> Self {
        Self {
            category: finding.category(),
            message: finding.to_string(),
            path: finding.path().map(String::from),
            suggestion: finding.suggestion(),
        }
    }
}
