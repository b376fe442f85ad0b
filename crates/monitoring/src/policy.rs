//! Alert policy.
//!
//! Decides, from one [`HealthCheckResult`], whether a critical alert is
//! raised. Only critical results alert; warnings stay silent. There is
//! no de-duplication window: every critical cycle re-raises the alert.

use pool_health_domain::enums::AlertSeverity;
use pool_health_domain::errors::DomainError;
use pool_health_domain::health::{Alert, HealthCheckResult};
use uuid::Uuid;

/// Identifying context for alert construction. Fields are optional
/// because they come from upstream fetches that can be incomplete;
/// the policy rejects incomplete context instead of guessing.
#[derive(Debug, Clone, Default)]
pub struct AlertContext {
    /// Pool identifier used in messages (address or display label).
    pub pool_ref: Option<String>,
    /// Current TVL, USD.
    pub current_liquidity_usd: Option<f64>,
}

impl AlertContext {
    /// Creates a fully populated context.
    #[must_use]
    pub fn new(pool_ref: impl Into<String>, current_liquidity_usd: f64) -> Self {
        Self {
            pool_ref: Some(pool_ref.into()),
            current_liquidity_usd: Some(current_liquidity_usd),
        }
    }
}

/// Stateless policy mapping critical results to alert records.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertPolicy;

impl AlertPolicy {
    /// Returns a critical alert iff the result is critical.
    ///
    /// The context is validated before the status check: invoking the
    /// policy without identifying data is a caller bug regardless of
    /// the pool's health.
    ///
    /// # Errors
    /// Returns `DomainError::MissingContext` naming the absent field.
    pub fn maybe_alert(
        &self,
        result: &HealthCheckResult,
        ctx: &AlertContext,
    ) -> Result<Option<Alert>, DomainError> {
        let pool_ref = ctx
            .pool_ref
            .as_deref()
            .ok_or(DomainError::MissingContext { field: "pool_ref" })?;
        let liquidity = ctx.current_liquidity_usd.ok_or(DomainError::MissingContext {
            field: "current_liquidity_usd",
        })?;

        if !result.is_critical() {
            return Ok(None);
        }

        Ok(Some(Alert {
            id: Uuid::new_v4(),
            severity: AlertSeverity::Critical,
            pool_ref: pool_ref.to_string(),
            message: format!("Pool {pool_ref} liquidity dropped to {liquidity:.2}"),
            triggered_at: chrono::Utc::now(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_health_domain::enums::HealthStatus;
    use pool_health_domain::health::ScoreBreakdown;

    fn result_with_status(status: HealthStatus, overall: f64) -> HealthCheckResult {
        HealthCheckResult {
            status,
            scores: ScoreBreakdown {
                liquidity_score: 20,
                slippage_score: 20,
                volume_score: 20,
                overall_score: overall,
            },
            issues: vec![],
            recommendations: vec![],
        }
    }

    #[test]
    fn test_critical_result_raises_alert() {
        let policy = AlertPolicy;
        let result = result_with_status(HealthStatus::Critical, 20.0);
        let ctx = AlertContext::new("0xpool", 8_000.0);

        let alert = policy.maybe_alert(&result, &ctx).unwrap().unwrap();
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.pool_ref, "0xpool");
        assert_eq!(alert.message, "Pool 0xpool liquidity dropped to 8000.00");
    }

    #[test]
    fn test_message_formats_two_decimals() {
        let policy = AlertPolicy;
        let result = result_with_status(HealthStatus::Critical, 20.0);
        let ctx = AlertContext::new("SOL/USDC (raydium)", 1234.567);

        let alert = policy.maybe_alert(&result, &ctx).unwrap().unwrap();
        assert_eq!(
            alert.message,
            "Pool SOL/USDC (raydium) liquidity dropped to 1234.57"
        );
    }

    #[test]
    fn test_healthy_and_warning_stay_silent() {
        let policy = AlertPolicy;
        let ctx = AlertContext::new("0xpool", 8_000.0);

        for (status, overall) in [(HealthStatus::Healthy, 100.0), (HealthStatus::Warning, 60.0)] {
            let result = result_with_status(status, overall);
            assert!(policy.maybe_alert(&result, &ctx).unwrap().is_none());
        }
    }

    #[test]
    fn test_missing_pool_ref_rejected() {
        let policy = AlertPolicy;
        let result = result_with_status(HealthStatus::Critical, 20.0);
        let ctx = AlertContext {
            pool_ref: None,
            current_liquidity_usd: Some(8_000.0),
        };
        assert!(matches!(
            policy.maybe_alert(&result, &ctx),
            Err(DomainError::MissingContext { field: "pool_ref" })
        ));
    }

    #[test]
    fn test_missing_liquidity_rejected_even_when_healthy() {
        let policy = AlertPolicy;
        let result = result_with_status(HealthStatus::Healthy, 100.0);
        let ctx = AlertContext {
            pool_ref: Some("0xpool".to_string()),
            current_liquidity_usd: None,
        };
        assert!(matches!(
            policy.maybe_alert(&result, &ctx),
            Err(DomainError::MissingContext {
                field: "current_liquidity_usd"
            })
        ));
    }
}
