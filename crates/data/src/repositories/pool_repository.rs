//! Pool repository for monitored pool persistence.

use pool_health_domain::entities::Pool;
use pool_health_domain::enums::Dex;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

fn pool_from_row(row: &PgRow) -> Result<Pool, sqlx::Error> {
    let dex: String = row.try_get("dex")?;
    let dex = Dex::from_str(&dex).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "dex".to_string(),
        source: format!("unknown dex venue: {dex}").into(),
    })?;
    Ok(Pool {
        id: row.try_get("id")?,
        project_id: row.try_get("project_id")?,
        address: row.try_get("address")?,
        dex,
        base_symbol: row.try_get("base_symbol")?,
        quote_symbol: row.try_get("quote_symbol")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Repository for pool CRUD operations.
#[derive(Clone)]
pub struct PoolRepository {
    pool: Arc<PgPool>,
}

impl PoolRepository {
    /// Creates a new PoolRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Finds a pool by its ID.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Pool>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM pools WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        row.as_ref().map(pool_from_row).transpose()
    }

    /// Finds a pool by its on-chain address.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_by_address(&self, address: &str) -> Result<Option<Pool>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM pools WHERE address = $1")
            .bind(address)
            .fetch_optional(self.pool.as_ref())
            .await?;
        row.as_ref().map(pool_from_row).transpose()
    }

    /// Finds all pools registered under a project.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Pool>, sqlx::Error> {
        let rows =
            sqlx::query("SELECT * FROM pools WHERE project_id = $1 ORDER BY created_at ASC")
                .bind(project_id)
                .fetch_all(self.pool.as_ref())
                .await?;
        rows.iter().map(pool_from_row).collect()
    }

    /// Creates or updates a pool record, keyed by address.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn upsert(
        &self,
        id: Uuid,
        project_id: Uuid,
        address: &str,
        dex: Dex,
        base_symbol: &str,
        quote_symbol: &str,
    ) -> Result<Pool, sqlx::Error> {
        let row = sqlx::query(
            r#"
            INSERT INTO pools (id, project_id, address, dex, base_symbol, quote_symbol)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (address) DO UPDATE SET
                project_id = EXCLUDED.project_id,
                dex = EXCLUDED.dex,
                base_symbol = EXCLUDED.base_symbol,
                quote_symbol = EXCLUDED.quote_symbol
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(project_id)
        .bind(address)
        .bind(dex.as_str())
        .bind(base_symbol)
        .bind(quote_symbol)
        .fetch_one(self.pool.as_ref())
        .await?;
        pool_from_row(&row)
    }

    /// Deletes a pool by ID. Health history rows are kept.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pools WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
