//! Output errors and the artifact writer trait

use thiserror::Error;

/// Errors that can occur while producing output artifacts
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for generated artifacts
///
/// Every artifact is written whole under a plain filename; implementations
/// decide where that name lives.
pub trait ArtifactWriter {
    /// Writes one artifact, replacing any previous content
    ///
    /// # Arguments
    ///
    /// * `filename` - Plain file name, no directory components
    /// * `contents` - The complete file contents
    fn write_artifact(&self, filename: &str, contents: &str) -> OutputResult<()>;
}
