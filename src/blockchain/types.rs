//! Chain-specific types and error definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Hex-encoded deploy hash returned by the node on submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployHash(pub String);

impl DeployHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeployHash {
    fn from(hash: &str) -> Self {
        Self(hash.to_string())
    }
}

impl fmt::Display for DeployHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The deploy could not be built, signed or was rejected by the node.
    #[error("Deploy submission failed: {0}")]
    Submission(String),

    /// The deploy was executed and reported a failure.
    #[error("Contract execution of deploy {deploy_hash}: {message}")]
    ExecutionFailure { deploy_hash: DeployHash, message: String },

    /// No execution result appeared within the attempt budget.
    #[error("Deploy not executed after {attempts} attempts ({waited_secs}s)")]
    ConfirmationTimeout { attempts: u32, waited_secs: u64 },

    /// An expected named key is absent from the account.
    #[error("Named key '{name}' not found in account storage")]
    MissingNamedKey { name: String },

    /// Invalid key file or key pair mismatch.
    #[error("Wallet error: {0}")]
    Wallet(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Record of a deploy whose execution succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedDeploy {
    /// Block the deploy was executed in.
    pub block_hash: String,
    /// Execution cost in motes, when the node reports it.
    pub cost: Option<String>,
    /// The node's success payload as received.
    pub payload: Value,
}

/// What the node currently knows about a deploy's execution.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// No execution result yet.
    Pending,
    /// Executed successfully.
    Success(ExecutedDeploy),
    /// Executed and failed; the node's error message verbatim.
    Failure { error_message: String },
}

/// An entry of an account's named keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedKey {
    pub name: String,
    /// Formatted key, e.g. "hash-0123…".
    pub key: String,
}

/// Contract and package hashes of an installed contract, without prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub contract_hash: String,
    pub package_hash: String,
}
