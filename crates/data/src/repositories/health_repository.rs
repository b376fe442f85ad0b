//! Health check repository. History is append-only: rows are inserted
//! once per evaluation cycle and never mutated afterwards.

use pool_health_domain::enums::HealthStatus;
use pool_health_domain::health::{HealthCheckResult, IssueTag};
use pool_health_domain::metrics::PoolMetrics;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

/// Database record for one health check of one pool.
#[derive(Debug, Clone)]
pub struct HealthCheckRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Pool this check refers to (weak reference, no ownership).
    pub pool_id: Uuid,
    /// Health classification.
    pub status: HealthStatus,
    /// Liquidity band score.
    pub liquidity_score: i16,
    /// Slippage band score.
    pub slippage_score: i16,
    /// Volume band score.
    pub volume_score: i16,
    /// Weighted mean of the band scores.
    pub overall_score: f64,
    /// TVL at evaluation time, USD.
    pub total_liquidity_usd: f64,
    /// Slippage (%) for a 1%-of-liquidity trade.
    pub slippage_1pct: f64,
    /// Trailing 24h volume, USD.
    pub volume_24h_usd: f64,
    /// Distinct LP count.
    pub lp_count: i32,
    /// Detected issues, in detection order.
    pub issues: Vec<IssueTag>,
    /// Recommendations, one per issue.
    pub recommendations: Vec<String>,
    /// When the check ran.
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckRecord {
    /// Creates a HealthCheckRecord from a database row.
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = HealthStatus::from_str(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown health status: {status}").into(),
        })?;
        let issues: Json<Vec<IssueTag>> = row.try_get("issues")?;
        let recommendations: Json<Vec<String>> = row.try_get("recommendations")?;
        Ok(Self {
            id: row.try_get("id")?,
            pool_id: row.try_get("pool_id")?,
            status,
            liquidity_score: row.try_get("liquidity_score")?,
            slippage_score: row.try_get("slippage_score")?,
            volume_score: row.try_get("volume_score")?,
            overall_score: row.try_get("overall_score")?,
            total_liquidity_usd: row.try_get("total_liquidity_usd")?,
            slippage_1pct: row.try_get("slippage_1pct")?,
            volume_24h_usd: row.try_get("volume_24h_usd")?,
            lp_count: row.try_get("lp_count")?,
            issues: issues.0,
            recommendations: recommendations.0,
            checked_at: row.try_get("checked_at")?,
        })
    }
}

/// Repository for appending and querying health check history.
#[derive(Clone)]
pub struct HealthCheckRepository {
    pool: Arc<PgPool>,
}

impl HealthCheckRepository {
    /// Creates a new HealthCheckRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Appends one evaluation result to a pool's history.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn append(
        &self,
        pool_id: Uuid,
        metrics: &PoolMetrics,
        result: &HealthCheckResult,
    ) -> Result<HealthCheckRecord, sqlx::Error> {
        let row = sqlx::query(
            r#"
            INSERT INTO health_checks (id, pool_id, status, liquidity_score, slippage_score,
                                       volume_score, overall_score, total_liquidity_usd,
                                       slippage_1pct, volume_24h_usd, lp_count, issues,
                                       recommendations)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(pool_id)
        .bind(result.status.as_str())
        .bind(i16::from(result.scores.liquidity_score))
        .bind(i16::from(result.scores.slippage_score))
        .bind(i16::from(result.scores.volume_score))
        .bind(result.scores.overall_score)
        .bind(metrics.total_liquidity_usd)
        .bind(metrics.slippage_1pct)
        .bind(metrics.volume_24h_usd)
        .bind(metrics.liquidity_provider_count as i32)
        .bind(Json(&result.issues))
        .bind(Json(&result.recommendations))
        .fetch_one(self.pool.as_ref())
        .await?;
        HealthCheckRecord::from_row(&row)
    }

    /// Finds the most recent checks for a pool, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn recent_for_pool(
        &self,
        pool_id: Uuid,
        limit: i64,
    ) -> Result<Vec<HealthCheckRecord>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT * FROM health_checks WHERE pool_id = $1 ORDER BY checked_at DESC LIMIT $2",
        )
        .bind(pool_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(HealthCheckRecord::from_row).collect()
    }

    /// Finds the latest check for a pool.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn latest_for_pool(
        &self,
        pool_id: Uuid,
    ) -> Result<Option<HealthCheckRecord>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT * FROM health_checks WHERE pool_id = $1 ORDER BY checked_at DESC LIMIT 1",
        )
        .bind(pool_id)
        .fetch_optional(self.pool.as_ref())
        .await?;
        row.as_ref().map(HealthCheckRecord::from_row).transpose()
    }
}
