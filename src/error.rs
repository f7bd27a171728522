use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the alignment pipeline and its data collaborators.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An external collaborator could not supply data.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Malformed or duplicate-keyed input handed to the aggregator/interpolator.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The report artifact could not be written.
    #[error("failed to write report '{}': {reason}", .path.display())]
    ArtifactWrite { path: PathBuf, reason: String },
}

impl PipelineError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        PipelineError::Fetch(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PipelineError::InvalidInput(msg.into())
    }

    pub fn artifact_write(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        PipelineError::ArtifactWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code used when this error reaches the binary boundary.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Fetch(_) => 3,
            PipelineError::InvalidInput(_) => 4,
            PipelineError::ArtifactWrite { .. } => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_errors_map_to_distinct_exit_codes() {
        let fetch: AppError = PipelineError::fetch("timeout").into();
        let input: AppError = PipelineError::invalid_input("duplicate date").into();
        let write: AppError = PipelineError::artifact_write("/nope/out.xlsx", "denied").into();

        assert_eq!(fetch.exit_code(), 3);
        assert_eq!(input.exit_code(), 4);
        assert_eq!(write.exit_code(), 5);
        assert_eq!(fetch.to_string(), "fetch failed: timeout");
        assert_eq!(write.to_string(), "failed to write report '/nope/out.xlsx': denied");
    }
}
