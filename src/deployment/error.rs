//! Deployment error definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::blockchain::types::BlockchainError;

/// Errors that abort a deployment run.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Submission, confirmation or named-key lookup failed.
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    /// Reading or writing a local file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The deployment count file does not hold an integer.
    #[error("Invalid deployment count in {path}: '{content}'")]
    InvalidCounter { path: PathBuf, content: String },

    /// A constructor argument could not be encoded.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A contract references one that has not been deployed in this run.
    #[error("{contract} requires {dependency}, which has not been deployed")]
    MissingDependency {
        contract: &'static str,
        dependency: &'static str,
    },

    /// A contract id that is not part of the plan.
    #[error("Unknown contract '{0}'")]
    UnknownContract(String),

    /// The configuration has no section for a planned contract.
    #[error("No [contracts.{0}] section in configuration")]
    MissingContractConfig(String),

    /// Creating the zip archive failed.
    #[error("Archive error: {0}")]
    Archive(String),

    /// The system clock reads earlier than the Unix epoch.
    #[error("System clock error: {0}")]
    Clock(String),
}

impl DeployError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeployError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for deployment operations.
pub type DeployResult<T> = Result<T, DeployError>;
