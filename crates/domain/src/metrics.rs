use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

/// Market metrics for a single pool, normalized from whatever upstream
/// provider supplied them. One value per evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolMetrics {
    /// Total value locked in USD.
    pub total_liquidity_usd: f64,
    /// Estimated slippage (%) for a trade sized at 1% of liquidity.
    pub slippage_1pct: f64,
    /// Trailing 24h volume in USD.
    pub volume_24h_usd: f64,
    /// Distinct liquidity provider count.
    pub liquidity_provider_count: u32,
}

impl PoolMetrics {
    /// Creates validated metrics.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidMetrics` if any numeric field is
    /// negative or non-finite.
    pub fn new(
        total_liquidity_usd: f64,
        slippage_1pct: f64,
        volume_24h_usd: f64,
        liquidity_provider_count: u32,
    ) -> Result<Self, DomainError> {
        let metrics = Self {
            total_liquidity_usd,
            slippage_1pct,
            volume_24h_usd,
            liquidity_provider_count,
        };
        metrics.validate()?;
        Ok(metrics)
    }

    /// Validates that every numeric field is finite and non-negative.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidMetrics` naming the first offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("total_liquidity_usd", self.total_liquidity_usd),
            ("slippage_1pct", self.slippage_1pct),
            ("volume_24h_usd", self.volume_24h_usd),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidMetrics { field, value });
            }
        }
        Ok(())
    }
}
