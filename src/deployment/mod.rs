//! Deployment orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! DeployerConfig
//!     → plan.rs (order, cross-references, constructor arguments)
//!     → args.rs (typed values → runtime args)
//!     → orchestrator.rs (submit, wait, look up named keys)
//!     → store.rs (hash files, deployment count, archive)
//! ```

pub mod args;
pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod store;

pub use args::{ArgValue, NamedArgs};
pub use error::{DeployError, DeployResult};
pub use orchestrator::{DeployReport, Orchestrator};
pub use plan::ContractKind;
pub use store::{archive_directory, DeploymentCounter, HashStore};
