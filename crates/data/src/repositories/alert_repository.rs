//! Alert repository. Append-only, like health check history.

use pool_health_domain::enums::AlertSeverity;
use pool_health_domain::health::Alert;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

/// Database record for a raised alert.
#[derive(Debug, Clone)]
pub struct AlertRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Pool the alert refers to.
    pub pool_id: Uuid,
    /// Severity string (info, warning, critical).
    pub severity: String,
    /// Alert message.
    pub message: String,
    /// When the alert was raised.
    pub triggered_at: chrono::DateTime<chrono::Utc>,
}

impl AlertRecord {
    /// Creates an AlertRecord from a database row.
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            pool_id: row.try_get("pool_id")?,
            severity: row.try_get("severity")?,
            message: row.try_get("message")?,
            triggered_at: row.try_get("triggered_at")?,
        })
    }
}

/// Repository for appending and querying alert history.
#[derive(Clone)]
pub struct AlertRepository {
    pool: Arc<PgPool>,
}

impl AlertRepository {
    /// Creates a new AlertRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Appends an alert raised for a pool.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn append(&self, pool_id: Uuid, alert: &Alert) -> Result<AlertRecord, sqlx::Error> {
        let row = sqlx::query(
            r#"
            INSERT INTO alerts (id, pool_id, severity, message, triggered_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(alert.id)
        .bind(pool_id)
        .bind(alert.severity.as_str())
        .bind(&alert.message)
        .bind(alert.triggered_at)
        .fetch_one(self.pool.as_ref())
        .await?;
        AlertRecord::from_row(&row)
    }

    /// Finds the most recent alerts across all pools, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<AlertRecord>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM alerts ORDER BY triggered_at DESC LIMIT $1")
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(AlertRecord::from_row).collect()
    }

    /// Finds the most recent alerts for one pool, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn recent_for_pool(
        &self,
        pool_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AlertRecord>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT * FROM alerts WHERE pool_id = $1 ORDER BY triggered_at DESC LIMIT $2",
        )
        .bind(pool_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(AlertRecord::from_row).collect()
    }

    /// Counts critical alerts raised for a pool since a given time.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn critical_count_since(
        &self,
        pool_id: Uuid,
        since: chrono::DateTime<chrono::Utc>,
    ) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count FROM alerts
            WHERE pool_id = $1 AND severity = $2 AND triggered_at >= $3
            "#,
        )
        .bind(pool_id)
        .bind(AlertSeverity::Critical.as_str())
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;
        row.try_get("count")
    }
}
