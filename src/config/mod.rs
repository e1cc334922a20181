//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, deserialize, apply CLI/env overrides)
//!     → validation.rs (semantic checks)
//!     → DeployerConfig (validated, immutable)
//!     → passed by reference to submitter, poller and orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is read once at start-up; nothing reads the environment afterwards
//! - All fields except contract sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ConfigOverrides};
pub use schema::DeployerConfig;
pub use schema::ContractConfig;
pub use schema::PollConfig;
