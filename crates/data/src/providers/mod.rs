//! Market data providers.
//!
//! Providers fetch raw pair data from upstream aggregators and normalize
//! it into the strict [`PoolMetrics`] shape at this boundary. Evaluation
//! code never sees provider-specific field names.

mod dexscreener;

pub use dexscreener::DexScreenerProvider;

use async_trait::async_trait;
use pool_health_domain::entities::Pool;
use pool_health_domain::errors::DomainError;
use pool_health_domain::metrics::PoolMetrics;
use thiserror::Error;

/// Errors raised while fetching or normalizing market data.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport or decoding failure.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream returned no pair for the requested address.
    #[error("pair not found upstream: {address}")]
    PairNotFound { address: String },

    /// The upstream payload is missing a field the monitor requires.
    #[error("malformed provider payload: {reason}")]
    MalformedPayload { reason: String },

    /// The normalized metrics failed domain validation.
    #[error(transparent)]
    InvalidMetrics(#[from] DomainError),
}

/// Source of per-pool market metrics.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches current metrics for a pool, normalized into `PoolMetrics`.
    async fn fetch_metrics(&self, pool: &Pool) -> Result<PoolMetrics, ProviderError>;
}

/// Estimates slippage (%) of a trade against a constant-product pool.
///
/// Each side of the pool holds roughly half the TVL, so a trade of
/// `trade_usd` moves one reserve by `2 * trade_usd / liquidity_usd`.
/// Execution price deviates from spot by `d / (1 + d)` for that move.
/// A drained or empty pool saturates at 100%.
#[must_use]
pub fn constant_product_slippage_pct(trade_usd: f64, liquidity_usd: f64) -> f64 {
    if liquidity_usd <= 0.0 {
        return 100.0;
    }
    let d = 2.0 * trade_usd / liquidity_usd;
    100.0 * d / (1.0 + d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_percent_trade_slippage() {
        // 1% of TVL moves one reserve by 2%, so slippage ~1.96%.
        let s = constant_product_slippage_pct(1_000.0, 100_000.0);
        assert!((s - 1.9607843137).abs() < 1e-6);
    }

    #[test]
    fn test_empty_pool_saturates() {
        assert_eq!(constant_product_slippage_pct(1_000.0, 0.0), 100.0);
    }

    #[test]
    fn test_larger_trades_slip_more() {
        let small = constant_product_slippage_pct(100.0, 100_000.0);
        let big = constant_product_slippage_pct(10_000.0, 100_000.0);
        assert!(big > small);
    }
}
