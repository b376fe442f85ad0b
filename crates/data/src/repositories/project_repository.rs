//! Project repository for monitoring scopes.

use pool_health_domain::entities::Project;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

fn project_from_row(row: &PgRow) -> Result<Project, sqlx::Error> {
    Ok(Project {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Repository for project CRUD operations.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: Arc<PgPool>,
}

impl ProjectRepository {
    /// Creates a new ProjectRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Finds a project by its ID.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        row.as_ref().map(project_from_row).transpose()
    }

    /// Finds a project by name.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Project>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM projects WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;
        row.as_ref().map(project_from_row).transpose()
    }

    /// Creates a project, or returns the existing one with the same name.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn upsert(&self, id: Uuid, name: &str) -> Result<Project, sqlx::Error> {
        let row = sqlx::query(
            r#"
            INSERT INTO projects (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_one(self.pool.as_ref())
        .await?;
        project_from_row(&row)
    }

    /// Finds all projects.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Project>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM projects ORDER BY created_at DESC")
            .fetch_all(self.pool.as_ref())
            .await?;
        rows.iter().map(project_from_row).collect()
    }
}
