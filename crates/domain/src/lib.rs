//! Domain model for liquidity pool health monitoring.
//!
//! This crate defines the data model shared by the whole workspace:
//! - Monitored entities (projects and their pools)
//! - Market metrics supplied by data providers
//! - Health check results (score breakdown, status, issues, recommendations)
//! - Alert records raised for critical pools

/// Monitored entities.
pub mod entities;
/// Shared enumerations.
pub mod enums;
/// Domain error types.
pub mod errors;
/// Health check result model.
pub mod health;
/// Pool market metrics.
pub mod metrics;

pub use enums::{AlertSeverity, Dex, HealthStatus};
pub use errors::DomainError;
pub use health::{Alert, HealthCheckResult, IssueTag, ScoreBreakdown};
pub use metrics::PoolMetrics;
