//! flowcheck - validator for Power Automate workflow JSON

pub mod config;
pub mod counter;
pub mod dependency;
pub mod error;
pub mod expression;
pub mod findings;
pub mod jsonpath;
pub mod loader;
pub mod render;
pub mod report;
pub mod security;
pub mod shape;
pub mod validator;

pub use config::{OutputFormat, ValidatorConfig};
pub use error::{FixSuggestion, FlowError};
pub use findings::{Category, CredentialKind, Finding};
pub use report::{ChecklistItem, ValidationReport};
pub use shape::{Classification, WorkflowShape};
pub use validator::{Outcome, Validator};
