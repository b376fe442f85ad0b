//! Evaluation cycle scheduling.
//!
//! Drives periodic health check cycles. The scheduler only emits tick
//! events; running the cycle (and deciding what to do with the report)
//! belongs to the caller consuming the event channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, interval};
use tracing::{info, warn};

/// Schedule for cycle execution.
#[derive(Debug, Clone, Copy)]
pub enum Schedule {
    /// Run at fixed intervals.
    Interval(Duration),
    /// Run once after a delay.
    Once(Duration),
}

/// Event sent when a cycle should run.
#[derive(Debug, Clone)]
pub struct CycleTick {
    /// Sequence number, starting at 1.
    pub sequence: u64,
    /// Time the tick fired.
    pub fired_at: Instant,
}

/// Scheduler emitting cycle ticks on a bounded channel.
pub struct Scheduler {
    schedule: Schedule,
    tick_tx: mpsc::Sender<CycleTick>,
    tick_rx: Option<mpsc::Receiver<CycleTick>>,
    running: Arc<AtomicBool>,
}

impl Scheduler {
    /// Creates a new scheduler.
    #[must_use]
    pub fn new(schedule: Schedule) -> Self {
        let (tx, rx) = mpsc::channel(16);
        Self {
            schedule,
            tick_tx: tx,
            tick_rx: Some(rx),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Takes the tick receiver for processing events.
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<CycleTick>> {
        self.tick_rx.take()
    }

    /// Starts emitting ticks. Returns when stopped, or after the single
    /// tick for a `Once` schedule.
    pub async fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
        info!(schedule = ?self.schedule, "Starting scheduler");

        let mut sequence = 0u64;
        match self.schedule {
            Schedule::Once(delay) => {
                tokio::time::sleep(delay).await;
                if self.running.load(Ordering::SeqCst) {
                    sequence += 1;
                    self.emit(sequence).await;
                }
            }
            Schedule::Interval(period) => {
                let mut ticker = interval(period);
                // The first tick of tokio's interval fires immediately.
                ticker.tick().await;
                while self.running.load(Ordering::SeqCst) {
                    ticker.tick().await;
                    if !self.running.load(Ordering::SeqCst) {
                        break;
                    }
                    sequence += 1;
                    self.emit(sequence).await;
                }
            }
        }

        info!("Scheduler stopped");
    }

    /// Stops the scheduler after the current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Checks if the scheduler is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn emit(&self, sequence: u64) {
        let tick = CycleTick {
            sequence,
            fired_at: Instant::now(),
        };
        if let Err(e) = self.tick_tx.send(tick).await {
            warn!(error = %e, "Failed to send cycle tick");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_once_schedule_fires_single_tick() {
        let mut scheduler = Scheduler::new(Schedule::Once(Duration::from_millis(5)));
        let mut rx = scheduler.take_receiver().unwrap();

        scheduler.start().await;

        let tick = rx.recv().await.unwrap();
        assert_eq!(tick.sequence, 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_interval_schedule_fires_repeatedly() {
        let mut scheduler = Scheduler::new(Schedule::Interval(Duration::from_millis(5)));
        let mut rx = scheduler.take_receiver().unwrap();
        let handle = tokio::spawn(async move {
            scheduler.start().await;
        });

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        handle.abort();
    }

    #[test]
    fn test_receiver_taken_once() {
        let mut scheduler = Scheduler::new(Schedule::Once(Duration::from_millis(1)));
        assert!(scheduler.take_receiver().is_some());
        assert!(scheduler.take_receiver().is_none());
    }
}
