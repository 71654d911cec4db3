//! Configuration schema for commentcov
//!
//! Config lives at `.config/commentcov/config.yaml` relative to the working
//! directory. Command line flags take precedence over it.

use facet::Facet;

/// Root configuration for commentcov
#[derive(Debug, Clone, Default, Facet)]
pub struct Config {
    /// Keep comment groups holding only a `nolint:` annotation or directives
    #[facet(default)]
    pub keep_lint_annotations: bool,

    /// Output format: text, json
    #[facet(default)]
    pub format: Option<String>,
}
