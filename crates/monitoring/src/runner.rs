//! Concurrent health check runner.
//!
//! Runs one evaluation cycle over a project's pools: fetch metrics,
//! evaluate, append the result to history, and raise a critical alert
//! when the policy says so. Pools are checked concurrently under a
//! bounded permit; each pool's failure is isolated to its own report
//! entry and never aborts sibling checks.

use crate::error::MonitorError;
use crate::evaluator::HealthEvaluator;
use crate::notify::Notifier;
use crate::policy::{AlertContext, AlertPolicy};
use crate::report::{CheckStage, PoolOutcome, RunReport};
use pool_health_data::providers::MarketDataProvider;
use pool_health_data::repositories::HealthStore;
use pool_health_domain::entities::Pool;
use pool_health_domain::health::HealthCheckResult;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Configuration for the health check runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Maximum pools checked concurrently within one cycle.
    pub max_concurrency: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_concurrency: 8 }
    }
}

/// Orchestrates evaluation cycles over a project's pools.
#[derive(Clone)]
pub struct HealthCheckRunner {
    provider: Arc<dyn MarketDataProvider>,
    store: Arc<dyn HealthStore>,
    notifier: Arc<dyn Notifier>,
    evaluator: HealthEvaluator,
    policy: AlertPolicy,
    config: RunnerConfig,
}

impl HealthCheckRunner {
    /// Creates a new runner.
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        store: Arc<dyn HealthStore>,
        notifier: Arc<dyn Notifier>,
        evaluator: HealthEvaluator,
        config: RunnerConfig,
    ) -> Self {
        Self {
            provider,
            store,
            notifier,
            evaluator,
            policy: AlertPolicy,
            config,
        }
    }

    /// Runs one evaluation cycle over the given pools.
    ///
    /// Always returns a report; per-pool failures are entries in it.
    pub async fn run_cycle(&self, project: &str, pools: &[Pool]) -> RunReport {
        let started = Instant::now();
        let mut report = RunReport::new(project);

        info!(
            project = project,
            pools = pools.len(),
            max_concurrency = self.config.max_concurrency,
            "Starting health check cycle"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut set = JoinSet::new();

        for pool in pools.iter().cloned() {
            let runner = self.clone();
            let semaphore = semaphore.clone();
            set.spawn(async move {
                // Closing the semaphore is not part of this runner's
                // lifecycle, so acquisition cannot fail.
                let _permit = semaphore.acquire_owned().await;
                runner.check_pool(&pool).await
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(outcome) => report.push(outcome),
                Err(e) => {
                    warn!(error = %e, "Health check task panicked");
                    report.push(PoolOutcome::Failed {
                        pool: "<unknown>".to_string(),
                        stage: CheckStage::Evaluate,
                        error: e.to_string(),
                    });
                }
            }
        }

        report.elapsed = started.elapsed();

        info!(
            project = project,
            checked = report.checked,
            healthy = report.healthy,
            warning = report.warning,
            critical = report.critical,
            failed = report.failed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Health check cycle finished"
        );

        report
    }

    /// Checks one pool. Errors are folded into the returned outcome.
    async fn check_pool(&self, pool: &Pool) -> PoolOutcome {
        let label = pool.label();

        let metrics = match self.provider.fetch_metrics(pool).await {
            Ok(metrics) => metrics,
            Err(e) => {
                warn!(pool = %label, error = %e, "Metrics fetch failed; pool skipped this cycle");
                return PoolOutcome::Failed {
                    pool: label,
                    stage: CheckStage::Fetch,
                    error: e.to_string(),
                };
            }
        };

        let result = match self.evaluator.evaluate(&metrics) {
            Ok(result) => result,
            Err(e) => {
                warn!(pool = %label, error = %e, "Evaluation rejected metrics");
                return PoolOutcome::Failed {
                    pool: label,
                    stage: CheckStage::Evaluate,
                    error: e.to_string(),
                };
            }
        };

        debug!(
            pool = %label,
            status = result.status.as_str(),
            overall = result.scores.overall_score,
            issues = result.issues.len(),
            "Pool evaluated"
        );

        if let Err(e) = self.store.record_check(pool.id, &metrics, &result).await {
            warn!(pool = %label, error = %e, "Failed to persist health check");
            return PoolOutcome::Failed {
                pool: label,
                stage: CheckStage::Persist,
                error: e.to_string(),
            };
        }

        let alerted = match self
            .raise_alert_if_critical(pool, metrics.total_liquidity_usd, &result)
            .await
        {
            Ok(alerted) => alerted,
            Err(e) => {
                // The health check record stands; alerting is a best-effort
                // side channel and must not fail the pool's check.
                warn!(pool = %label, error = %e, "Alerting failed");
                false
            }
        };

        PoolOutcome::Checked {
            pool: label,
            result,
            alerted,
        }
    }

    /// Applies the alert policy and, for critical pools, persists the
    /// alert and hands it to the notification sink.
    async fn raise_alert_if_critical(
        &self,
        pool: &Pool,
        current_liquidity_usd: f64,
        result: &HealthCheckResult,
    ) -> Result<bool, MonitorError> {
        let ctx = AlertContext::new(pool.label(), current_liquidity_usd);
        let Some(alert) = self.policy.maybe_alert(result, &ctx)? else {
            return Ok(false);
        };

        self.store.record_alert(pool.id, &alert).await?;

        if let Err(e) = self.notifier.notify(&alert).await {
            warn!(pool = %alert.pool_ref, sink = self.notifier.name(), error = %e,
                "Alert notification delivery failed");
        }

        Ok(true)
    }
}
