//! Error types for template rendering

use thiserror::Error;

/// Errors that can occur when rendering or reading back a template
#[derive(Debug, Error)]
pub enum RenderError {
    /// Workflow name is empty
    #[error("name can't be empty")]
    MissingName,

    /// Workflow image URL is empty
    #[error("imageURL can't be empty")]
    MissingImageUrl,

    /// Fixed template body failed to parse
    #[error("unable to parse template: {0}")]
    Parse(#[source] minijinja::Error),

    /// Fixed template body failed to execute against the supplied fields
    #[error("unable to execute template: {0}")]
    Execute(#[source] minijinja::Error),

    /// Rendered text is not valid YAML for the typed view
    #[error("invalid rendered YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RenderError {
    /// A required input field was missing
    pub fn is_validation(&self) -> bool {
        matches!(self, RenderError::MissingName | RenderError::MissingImageUrl)
    }

    /// The template engine failed to parse or execute
    pub fn is_template(&self) -> bool {
        matches!(self, RenderError::Parse(_) | RenderError::Execute(_))
    }
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, RenderError>;
