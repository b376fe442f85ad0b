//! Alert notification sinks.
//!
//! The runner hands constructed [`Alert`] records to a [`Notifier`].
//! Delivery is best effort: a sink failure is reported to the caller
//! but never rolls back the health check that produced the alert.

use async_trait::async_trait;
use pool_health_domain::health::Alert;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Errors raised while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP transport failure.
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The sink answered with a non-success status.
    #[error("notification rejected with status {status}")]
    Rejected { status: u16 },
}

/// Destination for alert records.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one alert.
    async fn notify(&self, alert: &Alert) -> Result<(), NotifyError>;

    /// Sink name used in logs.
    fn name(&self) -> &str;
}

/// Notifier that writes alerts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        error!(
            pool = %alert.pool_ref,
            severity = alert.severity.as_str(),
            "{}",
            alert.message
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    severity: &'a str,
    pool: &'a str,
    message: &'a str,
    triggered_at: chrono::DateTime<chrono::Utc>,
}

/// Notifier that POSTs alerts to a webhook as JSON.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Creates a new webhook notifier.
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            severity: alert.severity.as_str(),
            pool: &alert.pool_ref,
            message: &alert.message,
            triggered_at: alert.triggered_at,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }
}

/// Fans one alert out to several sinks. Each sink is attempted even if
/// an earlier one failed; the first failure is returned.
pub struct MultiNotifier {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl MultiNotifier {
    /// Creates a fan-out notifier.
    #[must_use]
    pub fn new(notifiers: Vec<Arc<dyn Notifier>>) -> Self {
        Self { notifiers }
    }
}

#[async_trait]
impl Notifier for MultiNotifier {
    async fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        let mut first_failure = None;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(alert).await {
                warn!(sink = notifier.name(), error = %e, "Notification sink failed");
                first_failure.get_or_insert(e);
            }
        }
        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "multi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_health_domain::enums::AlertSeverity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct CountingNotifier {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn notify(&self, _alert: &Alert) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotifyError::Rejected { status: 500 })
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn alert() -> Alert {
        Alert {
            id: Uuid::new_v4(),
            severity: AlertSeverity::Critical,
            pool_ref: "0xpool".to_string(),
            message: "Pool 0xpool liquidity dropped to 8000.00".to_string(),
            triggered_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_console_notifier_succeeds() {
        assert!(ConsoleNotifier.notify(&alert()).await.is_ok());
    }

    #[tokio::test]
    async fn test_multi_notifier_attempts_all_sinks() {
        let failing = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let passing = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let multi = MultiNotifier::new(vec![
            failing.clone() as Arc<dyn Notifier>,
            passing.clone() as Arc<dyn Notifier>,
        ]);

        let result = multi.notify(&alert()).await;
        assert!(result.is_err());
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(passing.calls.load(Ordering::SeqCst), 1);
    }
}
