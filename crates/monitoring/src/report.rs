//! Per-cycle run reports.
//!
//! One report per evaluation cycle, listing every pool's outcome. A
//! failed pool is an entry in the report, never an aborted cycle.

use pool_health_domain::enums::HealthStatus;
use pool_health_domain::health::HealthCheckResult;
use serde::Serialize;
use std::time::Duration;

/// Stage at which a pool's check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStage {
    /// Fetching metrics from the market data provider.
    Fetch,
    /// Evaluating metrics.
    Evaluate,
    /// Persisting the result or the alert record.
    Persist,
}

impl CheckStage {
    /// Converts the stage to its report string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Evaluate => "evaluate",
            Self::Persist => "persist",
        }
    }
}

/// Outcome of one pool within a cycle.
#[derive(Debug, Clone, Serialize)]
pub enum PoolOutcome {
    /// The pool was checked; alerting outcome included.
    Checked {
        /// Pool display label.
        pool: String,
        /// Evaluation result.
        result: HealthCheckResult,
        /// Whether a critical alert was raised.
        alerted: bool,
    },
    /// The pool's check failed and was skipped for this cycle.
    Failed {
        /// Pool display label.
        pool: String,
        /// Stage that failed.
        stage: CheckStage,
        /// Failure description.
        error: String,
    },
}

impl PoolOutcome {
    /// Pool display label for this outcome.
    #[must_use]
    pub fn pool(&self) -> &str {
        match self {
            Self::Checked { pool, .. } | Self::Failed { pool, .. } => pool,
        }
    }
}

/// Report for one evaluation cycle over a project's pools.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Project the cycle ran for.
    pub project: String,
    /// Per-pool outcomes, in completion order.
    pub outcomes: Vec<PoolOutcome>,
    /// Pools checked successfully.
    pub checked: usize,
    /// Healthy pools.
    pub healthy: usize,
    /// Warning pools.
    pub warning: usize,
    /// Critical pools.
    pub critical: usize,
    /// Pools that failed and were skipped.
    pub failed: usize,
    /// Wall-clock duration of the cycle.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    /// Creates an empty report for a project.
    #[must_use]
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            outcomes: Vec::new(),
            checked: 0,
            healthy: 0,
            warning: 0,
            critical: 0,
            failed: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Records one pool outcome and updates the counters.
    pub fn push(&mut self, outcome: PoolOutcome) {
        match &outcome {
            PoolOutcome::Checked { result, .. } => {
                self.checked += 1;
                match result.status {
                    HealthStatus::Healthy => self.healthy += 1,
                    HealthStatus::Warning => self.warning += 1,
                    HealthStatus::Critical => self.critical += 1,
                }
            }
            PoolOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_health_domain::health::ScoreBreakdown;

    fn checked(status: HealthStatus) -> PoolOutcome {
        PoolOutcome::Checked {
            pool: "A/B (orca)".to_string(),
            result: HealthCheckResult {
                status,
                scores: ScoreBreakdown {
                    liquidity_score: 60,
                    slippage_score: 60,
                    volume_score: 60,
                    overall_score: 60.0,
                },
                issues: vec![],
                recommendations: vec![],
            },
            alerted: status == HealthStatus::Critical,
        }
    }

    #[test]
    fn test_report_counters() {
        let mut report = RunReport::new("demo");
        report.push(checked(HealthStatus::Healthy));
        report.push(checked(HealthStatus::Warning));
        report.push(checked(HealthStatus::Critical));
        report.push(PoolOutcome::Failed {
            pool: "C/D (orca)".to_string(),
            stage: CheckStage::Fetch,
            error: "timeout".to_string(),
        });

        assert_eq!(report.checked, 3);
        assert_eq!(report.healthy, 1);
        assert_eq!(report.warning, 1);
        assert_eq!(report.critical, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.outcomes.len(), 4);
    }
}
