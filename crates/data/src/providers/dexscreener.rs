//! DexScreener-style market data provider.
//!
//! Talks to a DexScreener-compatible pairs endpoint and normalizes the
//! payload into [`PoolMetrics`]. The public DexScreener API does not
//! expose LP holder counts, so this provider expects the aggregator
//! deployment that enriches pair payloads with `lpCount`; payloads
//! without it are rejected rather than guessed at.

use super::{MarketDataProvider, ProviderError, constant_product_slippage_pct};
use async_trait::async_trait;
use pool_health_domain::entities::Pool;
use pool_health_domain::metrics::PoolMetrics;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.dexscreener.com";

#[derive(Debug, Deserialize)]
struct PairsResponse {
    pairs: Option<Vec<PairPayload>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairPayload {
    liquidity: Option<LiquidityPayload>,
    volume: Option<VolumePayload>,
    lp_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct LiquidityPayload {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct VolumePayload {
    h24: Option<f64>,
}

/// Market data provider backed by a DexScreener-compatible HTTP API.
///
/// The HTTP client is constructed by the caller and passed in, so its
/// lifecycle (timeouts, connection pool) is owned by the application,
/// not by a process-wide singleton.
#[derive(Clone)]
pub struct DexScreenerProvider {
    client: reqwest::Client,
    base_url: String,
}

impl DexScreenerProvider {
    /// Creates a provider against a custom endpoint.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Creates a provider against the public DexScreener endpoint.
    #[must_use]
    pub fn with_default_endpoint(client: reqwest::Client) -> Self {
        Self::new(client, DEFAULT_BASE_URL)
    }

    fn normalize(pair: &PairPayload, address: &str) -> Result<PoolMetrics, ProviderError> {
        let total_liquidity_usd = pair
            .liquidity
            .as_ref()
            .and_then(|l| l.usd)
            .ok_or_else(|| ProviderError::MalformedPayload {
                reason: format!("pair {address} has no liquidity.usd"),
            })?;
        let volume_24h_usd = pair
            .volume
            .as_ref()
            .and_then(|v| v.h24)
            .ok_or_else(|| ProviderError::MalformedPayload {
                reason: format!("pair {address} has no volume.h24"),
            })?;
        let lp_count = pair.lp_count.ok_or_else(|| ProviderError::MalformedPayload {
            reason: format!("pair {address} has no lpCount"),
        })?;

        // The aggregator does not quote slippage, so estimate the impact
        // of a 1%-of-liquidity trade from the constant-product curve.
        let slippage_1pct =
            constant_product_slippage_pct(0.01 * total_liquidity_usd, total_liquidity_usd);

        Ok(PoolMetrics::new(
            total_liquidity_usd,
            slippage_1pct,
            volume_24h_usd,
            lp_count,
        )?)
    }
}

#[async_trait]
impl MarketDataProvider for DexScreenerProvider {
    async fn fetch_metrics(&self, pool: &Pool) -> Result<PoolMetrics, ProviderError> {
        let url = format!(
            "{}/latest/dex/pairs/{}/{}",
            self.base_url,
            pool.dex.chain_id(),
            pool.address
        );
        debug!(pool = %pool.label(), url = %url, "Fetching pair data");

        let response: PairsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let pairs = response.pairs.unwrap_or_default();
        let pair = pairs.first().ok_or_else(|| ProviderError::PairNotFound {
            address: pool.address.clone(),
        })?;

        Self::normalize(pair, &pool.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> PairPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_complete_payload() {
        let pair = payload(
            r#"{"liquidity": {"usd": 120000.0}, "volume": {"h24": 60000.0}, "lpCount": 10}"#,
        );
        let metrics = DexScreenerProvider::normalize(&pair, "0xabc").unwrap();
        assert_eq!(metrics.total_liquidity_usd, 120_000.0);
        assert_eq!(metrics.volume_24h_usd, 60_000.0);
        assert_eq!(metrics.liquidity_provider_count, 10);
        assert!(metrics.slippage_1pct > 0.0 && metrics.slippage_1pct < 100.0);
    }

    #[test]
    fn test_normalize_missing_liquidity() {
        let pair = payload(r#"{"volume": {"h24": 60000.0}, "lpCount": 10}"#);
        let err = DexScreenerProvider::normalize(&pair, "0xabc").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedPayload { .. }));
    }

    #[test]
    fn test_normalize_missing_lp_count() {
        let pair = payload(r#"{"liquidity": {"usd": 120000.0}, "volume": {"h24": 60000.0}}"#);
        let err = DexScreenerProvider::normalize(&pair, "0xabc").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedPayload { .. }));
    }

    #[test]
    fn test_normalize_rejects_negative_volume() {
        let pair = payload(
            r#"{"liquidity": {"usd": 120000.0}, "volume": {"h24": -1.0}, "lpCount": 10}"#,
        );
        let err = DexScreenerProvider::normalize(&pair, "0xabc").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidMetrics(_)));
    }
}
