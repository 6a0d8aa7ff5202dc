use crate::types::RECONNECT_BACKOFF_FACTOR;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

/// Delay before reconnect attempt `attempt`: `min(min × 1.3^attempt, max)`.
///
/// Rounded to whole milliseconds. Non-decreasing in `attempt` and never
/// above `max_delay`.
pub fn reconnect_delay(attempt: u32, min_delay: u64, max_delay: u64) -> Duration {
    let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
    let delay = (min_delay as f64) * RECONNECT_BACKOFF_FACTOR.powi(exponent);
    let capped = delay.min(max_delay as f64);
    Duration::from_millis(capped.round() as u64)
}

/// Timer for reconnection logic with exponential backoff
pub struct Timer {
    attempts: u32,
    min_delay: u64,
    max_delay: u64,
}

impl Timer {
    /// The first delay handed out is for attempt 1.
    pub fn new(min_delay: u64, max_delay: u64) -> Self {
        Self {
            attempts: 1,
            min_delay,
            max_delay,
        }
    }

    /// Current attempt number
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Get the next delay duration
    pub fn next_delay(&mut self) -> Duration {
        let delay = reconnect_delay(self.attempts, self.min_delay, self.max_delay);
        self.attempts = self.attempts.saturating_add(1);
        delay
    }

    /// Reset the timer
    pub fn reset(&mut self) {
        self.attempts = 1;
    }

    /// Sleeps for the next backoff delay.
    ///
    /// Returns `false` without waiting out the delay if `shutdown` is (or
    /// becomes) `true`.
    pub async fn schedule_timeout(&mut self, shutdown: &mut watch::Receiver<bool>) -> bool {
        let delay = self.next_delay();
        if *shutdown.borrow() {
            return false;
        }

        tracing::debug!("Next reconnect attempt in {:?}", delay);
        tokio::select! {
            _ = sleep(delay) => true,
            _ = shutdown_requested(shutdown) => false,
        }
    }
}

/// Resolves once the flag is raised or its sender is gone
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|closed| *closed).await;
}
