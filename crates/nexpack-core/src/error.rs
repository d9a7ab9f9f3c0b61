//! Error types for nexpack

use std::path::PathBuf;
use thiserror::Error;

/// Result type for nexpack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the build orchestrator
///
/// Every variant is terminal: nothing is retried locally, the CLI reports the
/// message and exits with status 1. The cleanup step is the one place allowed
/// to swallow failures, and it never produces one of these.
#[derive(Error, Debug)]
pub enum Error {
    /// Framework dependency not declared in either dependency set
    #[error("'{package}' not found in dependencies or devDependencies of package.json")]
    MissingDependency { package: String },

    /// Version range could not be reduced to a major version
    #[error("cannot extract a major version from '{range}'")]
    VersionParse { range: String },

    /// distDir does not equal the one value the packager can consume
    #[error(
        "build results must land in the `app` directory; set \"distDir\" to \"../app\" in your next config (found {found})"
    )]
    InvalidDistDir { found: String },

    /// output is not "export" on a version that requires it
    #[error(
        "Electron can only serve static files; set \"output\" to \"export\" in your next config (found {found})"
    )]
    MissingExportOutput { found: String },

    /// Version/output combination outside the compatibility matrix
    #[error("unsupported combination for next major version {major}")]
    UnexpectedResolverState { major: u64 },

    /// Next config module could not be loaded or evaluated
    #[error("failed to load next config {path}: {message}")]
    ConfigLoad { path: PathBuf, message: String },

    /// package.json unreadable or malformed
    #[error("failed to read {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Required external tool missing from PATH
    #[error("required tool '{tool}' not found. {install_hint}")]
    ToolNotFound { tool: String, install_hint: String },

    /// An external build step exited non-zero or could not be spawned
    #[error("{stage} step failed: {message}")]
    StepFailed { stage: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a manifest error
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config load error
    pub fn config_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a step failure
    pub fn step_failed(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepFailed {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_message() {
        let err = Error::MissingDependency {
            package: "next".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'next' not found in dependencies or devDependencies of package.json"
        );
    }

    #[test]
    fn test_step_failed_message() {
        let err = Error::step_failed("renderer build", "exited with status 1");
        assert_eq!(err.to_string(), "renderer build step failed: exited with status 1");
    }
}
