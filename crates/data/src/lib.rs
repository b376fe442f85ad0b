//! Persistence and market-data access for the pool health monitor.
//!
//! This crate provides:
//! - Repository patterns over PostgreSQL for projects, pools, health check
//!   history, and alert history
//! - The `MarketDataProvider` boundary that normalizes upstream DEX payloads
//!   into the strict `PoolMetrics` shape before evaluation

/// Market data providers.
pub mod providers;
/// Database repositories.
pub mod repositories;

pub use providers::{MarketDataProvider, ProviderError};
pub use repositories::{
    AlertRecord, AlertRepository, Database, HealthCheckRecord, HealthCheckRepository, HealthStore,
    PoolRepository, ProjectRepository,
};
