//! Health check result model.

use crate::enums::{AlertSeverity, HealthStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Component scores for one evaluation. Each component is a discrete
/// band score in {20, 40, 60, 80, 100}; the overall score is their
/// weighted mean and lives in [20, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub liquidity_score: u8,
    pub slippage_score: u8,
    pub volume_score: u8,
    pub overall_score: f64,
}

/// A problem detected during evaluation. Tags are checked in a fixed
/// order and each fires at most once, so a result never carries
/// duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueTag {
    LowLiquidityDepth,
    HighSlippage,
    LowTradingVolume,
    FewLiquidityProviders,
}

impl IssueTag {
    /// Human-readable description of the issue.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::LowLiquidityDepth => "Low liquidity depth - risk of high slippage",
            Self::HighSlippage => "High slippage impacting trading experience",
            Self::LowTradingVolume => "Low trading volume indicates poor market interest",
            Self::FewLiquidityProviders => "Very few liquidity providers - high concentration risk",
        }
    }

    /// Remediation suggested for the issue. The mapping is total: every
    /// issue has exactly one recommendation.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::LowLiquidityDepth => {
                "Consider increasing LP incentives or emergency liquidity injection"
            }
            Self::HighSlippage => "Add more liquidity to reduce slippage impact",
            Self::LowTradingVolume => "Review marketing strategy and community engagement",
            Self::FewLiquidityProviders => "Diversify LP base through targeted incentive programs",
        }
    }
}

impl std::fmt::Display for IssueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of evaluating one pool's metrics. Immutable once produced;
/// persisted as an append-only history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Health classification derived from the overall score.
    pub status: HealthStatus,
    /// Score breakdown.
    pub scores: ScoreBreakdown,
    /// Detected issues, in detection order.
    pub issues: Vec<IssueTag>,
    /// Recommendations, one per issue, in issue order.
    pub recommendations: Vec<String>,
}

impl HealthCheckResult {
    /// Whether this result must trigger a critical alert.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.status == HealthStatus::Critical
    }
}

/// Alert record raised for a critical pool. The record is handed to an
/// external notification sink; delivery is not the domain's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert ID.
    pub id: Uuid,
    /// Severity. Only critical alerts are produced today.
    pub severity: AlertSeverity,
    /// Identifier of the pool the alert refers to.
    pub pool_ref: String,
    /// Alert message.
    pub message: String,
    /// When the alert was raised.
    pub triggered_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_overall_score_bands() {
        assert_eq!(HealthStatus::from_overall_score(100.0), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_overall_score(80.0), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_overall_score(79.99), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_overall_score(60.0), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_overall_score(59.99), HealthStatus::Critical);
        assert_eq!(HealthStatus::from_overall_score(20.0), HealthStatus::Critical);
    }

    #[test]
    fn test_issue_recommendation_mapping_is_total() {
        let tags = [
            IssueTag::LowLiquidityDepth,
            IssueTag::HighSlippage,
            IssueTag::LowTradingVolume,
            IssueTag::FewLiquidityProviders,
        ];
        for tag in tags {
            assert!(!tag.message().is_empty());
            assert!(!tag.recommendation().is_empty());
        }
    }

    #[test]
    fn test_issue_display_is_message() {
        assert_eq!(
            IssueTag::HighSlippage.to_string(),
            "High slippage impacting trading experience"
        );
    }
}
