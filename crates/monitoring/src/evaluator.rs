//! Pure health evaluation.
//!
//! Maps a pool's market metrics to a [`HealthCheckResult`]: band scores
//! for liquidity, slippage, and volume, a weighted overall score, a
//! status classification, and an ordered issue/recommendation list.
//! No I/O and no hidden state; safe to call concurrently.

use pool_health_domain::enums::HealthStatus;
use pool_health_domain::errors::DomainError;
use pool_health_domain::health::{HealthCheckResult, IssueTag, ScoreBreakdown};
use pool_health_domain::metrics::PoolMetrics;
use serde::{Deserialize, Serialize};

/// Weights applied to the component scores when computing the overall
/// score. The defaults are equal, which reproduces the plain mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of the liquidity depth score.
    pub liquidity: f64,
    /// Weight of the slippage score.
    pub slippage: f64,
    /// Weight of the volume score.
    pub volume: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            liquidity: 1.0,
            slippage: 1.0,
            volume: 1.0,
        }
    }
}

impl ScoringWeights {
    /// Validates that every weight is finite and non-negative and that
    /// at least one weight is positive.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidWeights` otherwise.
    pub fn validate(&self) -> Result<(), DomainError> {
        let weights = [self.liquidity, self.slippage, self.volume];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DomainError::InvalidWeights {
                reason: "weights must be finite and non-negative",
            });
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(DomainError::InvalidWeights {
                reason: "at least one weight must be positive",
            });
        }
        Ok(())
    }
}

/// Stateless evaluator turning [`PoolMetrics`] into a [`HealthCheckResult`].
#[derive(Debug, Clone, Default)]
pub struct HealthEvaluator {
    weights: ScoringWeights,
}

impl HealthEvaluator {
    /// Creates an evaluator with custom scoring weights.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidWeights` if the weights are unusable.
    pub fn new(weights: ScoringWeights) -> Result<Self, DomainError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Evaluates one pool's metrics.
    ///
    /// Deterministic: identical input always yields an identical result.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidMetrics` if any metric field is
    /// negative or non-finite. No partial result is produced.
    pub fn evaluate(&self, metrics: &PoolMetrics) -> Result<HealthCheckResult, DomainError> {
        metrics.validate()?;

        let liquidity_score = liquidity_score(metrics.total_liquidity_usd);
        let slippage_score = slippage_score(metrics.slippage_1pct);
        let volume_score = volume_score(metrics.volume_24h_usd);
        let overall_score = self.overall_score(liquidity_score, slippage_score, volume_score);

        let status = HealthStatus::from_overall_score(overall_score);

        // Fixed-order checklist; each tag fires at most once.
        let mut issues = Vec::new();
        if liquidity_score < 60 {
            issues.push(IssueTag::LowLiquidityDepth);
        }
        if slippage_score < 60 {
            issues.push(IssueTag::HighSlippage);
        }
        if volume_score < 40 {
            issues.push(IssueTag::LowTradingVolume);
        }
        if metrics.liquidity_provider_count < 5 {
            issues.push(IssueTag::FewLiquidityProviders);
        }

        let recommendations = issues
            .iter()
            .map(|issue| issue.recommendation().to_string())
            .collect();

        Ok(HealthCheckResult {
            status,
            scores: ScoreBreakdown {
                liquidity_score,
                slippage_score,
                volume_score,
                overall_score,
            },
            issues,
            recommendations,
        })
    }

    fn overall_score(&self, liquidity: u8, slippage: u8, volume: u8) -> f64 {
        let w = &self.weights;
        let weighted = w.liquidity * f64::from(liquidity)
            + w.slippage * f64::from(slippage)
            + w.volume * f64::from(volume);
        weighted / (w.liquidity + w.slippage + w.volume)
    }
}

/// Bands total liquidity (USD). Inclusive lower bounds, tested top-down.
fn liquidity_score(total_liquidity_usd: f64) -> u8 {
    if total_liquidity_usd >= 100_000.0 {
        100
    } else if total_liquidity_usd >= 50_000.0 {
        80
    } else if total_liquidity_usd >= 25_000.0 {
        60
    } else if total_liquidity_usd >= 10_000.0 {
        40
    } else {
        20
    }
}

/// Bands slippage (%) for a 1%-of-liquidity trade. Lower is better.
fn slippage_score(slippage_1pct: f64) -> u8 {
    if slippage_1pct <= 1.0 {
        100
    } else if slippage_1pct <= 3.0 {
        80
    } else if slippage_1pct <= 5.0 {
        60
    } else if slippage_1pct <= 10.0 {
        40
    } else {
        20
    }
}

/// Bands trailing 24h volume (USD). Inclusive lower bounds.
fn volume_score(volume_24h_usd: f64) -> u8 {
    if volume_24h_usd >= 50_000.0 {
        100
    } else if volume_24h_usd >= 25_000.0 {
        80
    } else if volume_24h_usd >= 10_000.0 {
        60
    } else if volume_24h_usd >= 5_000.0 {
        40
    } else {
        20
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(liquidity: f64, slippage: f64, volume: f64, lps: u32) -> PoolMetrics {
        PoolMetrics::new(liquidity, slippage, volume, lps).unwrap()
    }

    #[test]
    fn test_liquidity_bands() {
        assert_eq!(liquidity_score(150_000.0), 100);
        assert_eq!(liquidity_score(100_000.0), 100);
        assert_eq!(liquidity_score(99_999.99), 80);
        assert_eq!(liquidity_score(50_000.0), 80);
        assert_eq!(liquidity_score(25_000.0), 60);
        assert_eq!(liquidity_score(10_000.0), 40);
        assert_eq!(liquidity_score(9_999.99), 20);
        assert_eq!(liquidity_score(0.0), 20);
    }

    #[test]
    fn test_slippage_bands() {
        assert_eq!(slippage_score(0.0), 100);
        assert_eq!(slippage_score(1.0), 100);
        assert_eq!(slippage_score(1.01), 80);
        assert_eq!(slippage_score(3.0), 80);
        assert_eq!(slippage_score(5.0), 60);
        assert_eq!(slippage_score(10.0), 40);
        assert_eq!(slippage_score(10.01), 20);
    }

    #[test]
    fn test_volume_bands() {
        assert_eq!(volume_score(50_000.0), 100);
        assert_eq!(volume_score(25_000.0), 80);
        assert_eq!(volume_score(10_000.0), 60);
        assert_eq!(volume_score(5_000.0), 40);
        assert_eq!(volume_score(4_999.99), 20);
    }

    #[test]
    fn test_band_monotonicity() {
        let mut last = 0;
        for liquidity in [0.0, 10_000.0, 25_000.0, 50_000.0, 100_000.0, 1e9] {
            let score = liquidity_score(liquidity);
            assert!(score >= last);
            last = score;
        }
        let mut last = 100;
        for slippage in [0.0, 1.0, 3.0, 5.0, 10.0, 50.0] {
            let score = slippage_score(slippage);
            assert!(score <= last);
            last = score;
        }
    }

    #[test]
    fn test_healthy_pool_has_no_issues() {
        let evaluator = HealthEvaluator::default();
        let result = evaluator
            .evaluate(&metrics(120_000.0, 0.5, 60_000.0, 10))
            .unwrap();

        assert_eq!(result.scores.liquidity_score, 100);
        assert_eq!(result.scores.slippage_score, 100);
        assert_eq!(result.scores.volume_score, 100);
        assert_eq!(result.scores.overall_score, 100.0);
        assert_eq!(result.status, HealthStatus::Healthy);
        assert!(result.issues.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_distressed_pool_fires_all_issues() {
        let evaluator = HealthEvaluator::default();
        let result = evaluator
            .evaluate(&metrics(8_000.0, 12.0, 2_000.0, 2))
            .unwrap();

        assert_eq!(result.scores.liquidity_score, 20);
        assert_eq!(result.scores.slippage_score, 20);
        assert_eq!(result.scores.volume_score, 20);
        assert_eq!(result.scores.overall_score, 20.0);
        assert_eq!(result.status, HealthStatus::Critical);
        assert_eq!(
            result.issues,
            vec![
                IssueTag::LowLiquidityDepth,
                IssueTag::HighSlippage,
                IssueTag::LowTradingVolume,
                IssueTag::FewLiquidityProviders,
            ]
        );
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_borderline_warning_pool() {
        let evaluator = HealthEvaluator::default();
        let result = evaluator
            .evaluate(&metrics(30_000.0, 4.0, 15_000.0, 6))
            .unwrap();

        assert_eq!(result.scores.liquidity_score, 60);
        assert_eq!(result.scores.slippage_score, 60);
        assert_eq!(result.scores.volume_score, 60);
        assert_eq!(result.scores.overall_score, 60.0);
        assert_eq!(result.status, HealthStatus::Warning);
        // Volume score 60 is not < 40 and 6 LPs is not < 5.
        assert!(result.issues.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_issue_order_and_recommendation_pairing() {
        let evaluator = HealthEvaluator::default();
        let result = evaluator
            .evaluate(&metrics(120_000.0, 12.0, 2_000.0, 2))
            .unwrap();

        assert_eq!(
            result.issues,
            vec![
                IssueTag::HighSlippage,
                IssueTag::LowTradingVolume,
                IssueTag::FewLiquidityProviders,
            ]
        );
        assert_eq!(result.recommendations.len(), result.issues.len());
        for (issue, recommendation) in result.issues.iter().zip(&result.recommendations) {
            assert_eq!(recommendation, issue.recommendation());
        }
    }

    #[test]
    fn test_overall_score_is_mean_of_components() {
        let evaluator = HealthEvaluator::default();
        for (liquidity, slippage, volume) in [
            (120_000.0, 0.5, 60_000.0),
            (60_000.0, 2.0, 30_000.0),
            (30_000.0, 4.0, 1_000.0),
            (5_000.0, 20.0, 100.0),
        ] {
            let result = evaluator
                .evaluate(&metrics(liquidity, slippage, volume, 10))
                .unwrap();
            let scores = result.scores;
            let mean = f64::from(
                u16::from(scores.liquidity_score)
                    + u16::from(scores.slippage_score)
                    + u16::from(scores.volume_score),
            ) / 3.0;
            assert!((scores.overall_score - mean).abs() < 1e-9);
            assert!((20.0..=100.0).contains(&scores.overall_score));
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let evaluator = HealthEvaluator::default();
        let input = metrics(42_000.0, 2.5, 12_000.0, 7);
        let first = evaluator.evaluate(&input).unwrap();
        let second = evaluator.evaluate(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_metrics_rejected() {
        let evaluator = HealthEvaluator::default();
        let bad = PoolMetrics {
            total_liquidity_usd: f64::NAN,
            slippage_1pct: 0.5,
            volume_24h_usd: 60_000.0,
            liquidity_provider_count: 10,
        };
        assert!(matches!(
            evaluator.evaluate(&bad),
            Err(DomainError::InvalidMetrics { .. })
        ));
    }

    #[test]
    fn test_custom_weights_shift_overall() {
        // Slippage-only weighting: overall equals the slippage score.
        let evaluator = HealthEvaluator::new(ScoringWeights {
            liquidity: 0.0,
            slippage: 1.0,
            volume: 0.0,
        })
        .unwrap();
        let result = evaluator
            .evaluate(&metrics(120_000.0, 12.0, 60_000.0, 10))
            .unwrap();
        assert_eq!(result.scores.overall_score, 20.0);
        assert_eq!(result.status, HealthStatus::Critical);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(
            HealthEvaluator::new(ScoringWeights {
                liquidity: -1.0,
                slippage: 1.0,
                volume: 1.0,
            })
            .is_err()
        );
        assert!(
            HealthEvaluator::new(ScoringWeights {
                liquidity: 0.0,
                slippage: 0.0,
                volume: 0.0,
            })
            .is_err()
        );
    }
}
