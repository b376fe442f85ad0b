//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use pool_health_monitoring::prelude::*;
//! ```

pub use crate::config::{ConfigError, MonitorConfig};
pub use crate::error::MonitorError;
pub use crate::evaluator::{HealthEvaluator, ScoringWeights};
pub use crate::notify::{ConsoleNotifier, MultiNotifier, Notifier, NotifyError, WebhookNotifier};
pub use crate::policy::{AlertContext, AlertPolicy};
pub use crate::report::{CheckStage, PoolOutcome, RunReport};
pub use crate::runner::{HealthCheckRunner, RunnerConfig};
pub use crate::scheduler::{CycleTick, Schedule, Scheduler};
