//! Scaffolding error taxonomy.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The external generator ran and failed; stderr is preserved.
    #[error("{command} failed with {status}: {stderr}")]
    ExternalCommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
