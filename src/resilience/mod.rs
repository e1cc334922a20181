//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Waiting for a deploy:
//!     → retries.rs (attempt budget, delay schedule)
//!     → backoff.rs (optional exponential delay with jitter)
//! ```
//!
//! # Design Decisions
//! - Only "not executed yet" is retried; submission is a single attempt
//! - Every external call has a deadline (see blockchain::client)

pub mod backoff;
pub mod retries;

pub use retries::RetryPolicy;
