//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (contract, deploy_hash, attempt fields)
//!     → logging.rs (filter + stdout formatting)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than interpolated messages
//! - Secret keys never appear in events

pub mod logging;

pub use logging::init_logging;
