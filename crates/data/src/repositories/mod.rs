//! Repository implementations for database persistence.
//!
//! This module provides repository patterns for storing and retrieving
//! projects, pools, health check history, and alert history. Health check
//! and alert tables are append-only: records are inserted and queried,
//! never updated in place.

mod alert_repository;
mod health_repository;
mod pool_repository;
mod project_repository;

pub use alert_repository::{AlertRecord, AlertRepository};
pub use health_repository::{HealthCheckRecord, HealthCheckRepository};
pub use pool_repository::PoolRepository;
pub use project_repository::ProjectRepository;

use async_trait::async_trait;
use pool_health_domain::health::{Alert, HealthCheckResult};
use pool_health_domain::metrics::PoolMetrics;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Append-only sink for evaluation outcomes. The monitoring runtime
/// writes through this trait so it can be exercised without a database.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Appends one health check to a pool's history.
    async fn record_check(
        &self,
        pool_id: Uuid,
        metrics: &PoolMetrics,
        result: &HealthCheckResult,
    ) -> Result<(), sqlx::Error>;

    /// Appends an alert raised for a pool.
    async fn record_alert(&self, pool_id: Uuid, alert: &Alert) -> Result<(), sqlx::Error>;
}

/// Database connection wrapper for repositories.
#[derive(Clone)]
pub struct Database {
    pool: Arc<PgPool>,
}

impl Database {
    /// Creates a new Database wrapper from a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Creates a new database connection from a connection string.
    ///
    /// # Arguments
    /// * `database_url` - PostgreSQL connection string
    ///
    /// # Errors
    /// Returns an error if the connection fails.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates a ProjectRepository instance.
    #[must_use]
    pub fn projects(&self) -> ProjectRepository {
        ProjectRepository::new(self.pool.clone())
    }

    /// Creates a PoolRepository instance.
    #[must_use]
    pub fn pools(&self) -> PoolRepository {
        PoolRepository::new(self.pool.clone())
    }

    /// Creates a HealthCheckRepository instance.
    #[must_use]
    pub fn health_checks(&self) -> HealthCheckRepository {
        HealthCheckRepository::new(self.pool.clone())
    }

    /// Creates an AlertRepository instance.
    #[must_use]
    pub fn alerts(&self) -> AlertRepository {
        AlertRepository::new(self.pool.clone())
    }

    /// Runs database migrations.
    ///
    /// # Errors
    /// Returns an error if migrations fail.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(include_str!("../../migrations/001_initial_schema.sql"))
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl HealthStore for Database {
    async fn record_check(
        &self,
        pool_id: Uuid,
        metrics: &PoolMetrics,
        result: &HealthCheckResult,
    ) -> Result<(), sqlx::Error> {
        self.health_checks().append(pool_id, metrics, result).await?;
        Ok(())
    }

    async fn record_alert(&self, pool_id: Uuid, alert: &Alert) -> Result<(), sqlx::Error> {
        self.alerts().append(pool_id, alert).await?;
        Ok(())
    }
}
