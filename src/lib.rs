//! Casper contract suite deployer.
//!
//! # Architecture Overview
//!
//! ```text
//!   config ──▶ deployment::orchestrator ──▶ deployment::store
//!                  │        ▲                 (hash files, count, archive)
//!                  ▼        │
//!        blockchain::transaction   blockchain::confirmation
//!                  │        ▲
//!                  ▼        │
//!             blockchain::client (JSON-RPC) ──▶ Casper node
//!
//!   Cross-cutting: observability (tracing), resilience (poll schedule)
//! ```

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod deployment;
pub mod observability;
pub mod resilience;

pub use config::schema::DeployerConfig;
pub use deployment::{DeployError, DeployReport, Orchestrator};
