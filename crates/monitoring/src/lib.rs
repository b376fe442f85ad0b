//! Pool health evaluation engine and monitoring runtime.
//!
//! This crate provides:
//! - The pure health evaluator: band scoring, status classification,
//!   issue detection, and recommendation mapping
//! - The alert policy deciding when a critical alert is raised
//! - Notification sinks (console, webhook, fan-out)
//! - The health check runner with bounded concurrent per-pool fan-out
//! - An interval scheduler for periodic evaluation cycles

/// Prelude module for convenient imports.
pub mod prelude;

/// Environment-driven configuration.
pub mod config;
/// Error types.
pub mod error;
/// Pure health evaluation.
pub mod evaluator;
/// Alert notification sinks.
pub mod notify;
/// Alert policy.
pub mod policy;
/// Per-cycle run reports.
pub mod report;
/// Concurrent health check runner.
pub mod runner;
/// Evaluation cycle scheduling.
pub mod scheduler;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use evaluator::{HealthEvaluator, ScoringWeights};
pub use policy::{AlertContext, AlertPolicy};
pub use runner::{HealthCheckRunner, RunnerConfig};
