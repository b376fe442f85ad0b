use pool_health_data::ProviderError;
use pool_health_domain::errors::DomainError;
use thiserror::Error;

/// Errors surfaced while checking a single pool. The runner isolates
/// these per pool; one failure never aborts sibling checks.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Evaluation or alert policy failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Market data fetch or normalization failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Persistence failure.
    #[error("persistence failed: {0}")]
    Store(#[from] sqlx::Error),
}
