//! Validator configuration
//!
//! Controls which files are validated and how much of the report is shown.
//! Defaults match the editor-hook behaviour; CLI flags override them.

use std::path::Path;

/// File names that share the `.json` extension but are never workflows
pub const DEFAULT_SKIP_FILES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    "settings.json",
    "launch.json",
];

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable coloured report (default)
    #[default]
    Text,

    /// Single JSON object
    Json,
}

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Extension a path must end with to be validated (without the dot)
    pub extension: String,

    /// A file whose name contains any of these is skipped
    pub skip_files: Vec<String>,

    /// Expression issues listed before collapsing into "... and N more"
    pub display_limit: usize,

    pub format: OutputFormat,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            extension: "json".to_string(),
            skip_files: DEFAULT_SKIP_FILES.iter().map(|s| s.to_string()).collect(),
            display_limit: 5,
            format: OutputFormat::Text,
        }
    }
}

impl ValidatorConfig {
    /// Add a file name to the skip list
    pub fn with_skip(mut self, name: impl Into<String>) -> Self {
        self.skip_files.push(name.into());
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Whether a path should go through the pipeline at all.
    ///
    /// Paths with another extension and well-known non-workflow files pass
    /// through silently.
    pub fn should_validate(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };

        let suffix = format!(".{}", self.extension);
        if !name.ends_with(&suffix) {
            return false;
        }

        !self.skip_files.iter().any(|skip| name.contains(skip.as_str()))
    }
}
