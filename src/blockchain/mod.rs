//! Node integration subsystem.
//!
//! # Data Flow
//! ```text
//! Key directory (public_key.pem, secret_key.pem)
//!     → wallet.rs (key loading)
//!     → transaction.rs (build, sign, submit)
//!     → confirmation.rs (poll until executed)
//!     → client.rs (JSON-RPC with timeouts)
//! ```
//!
//! # Security Constraints
//! - Secret keys ONLY from PEM files
//! - Never log secret keys
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod confirmation;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::NodeClient;
pub use confirmation::{wait_for_execution, DeployStatusSource};
pub use transaction::{DeployRequest, DeploySubmitter};
pub use types::{
    BlockchainError, BlockchainResult, DeployHash, DeployedContract, ExecutedDeploy,
    ExecutionOutcome, NamedKey,
};
pub use wallet::KeyPair;
