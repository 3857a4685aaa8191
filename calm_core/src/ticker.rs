//! Periodic tick source.
//!
//! A [`Ticker`] owns one background task that emits a tick every period.
//! Dropping the ticker aborts the task and discards any tick that was
//! already queued, so nothing is delivered after cancellation.

use crate::config::MAX_TICK_INTERVAL_MS;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Handle to a running periodic tick task
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    rx: mpsc::Receiver<Instant>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a tick task on the current runtime
    ///
    /// The first tick arrives one full period after spawning. The period
    /// is clamped to between 1 ms and [`MAX_TICK_INTERVAL_MS`].
    pub fn spawn(period: Duration) -> Self {
        let period = clamp_period(period);
        let (tx, rx) = mpsc::channel(1);

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                let at = interval.tick().await;
                // A full channel means the consumer is behind; drop this tick
                match tx.try_send(at) {
                    Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => {}
                    Err(mpsc::error::TrySendError::Closed(_)) => break,
                }
            }
        });

        tracing::debug!("Tick source started ({:?} period)", period);
        Self { period, rx, handle }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick
    ///
    /// Returns `None` only if the task has stopped.
    pub async fn next(&mut self) -> Option<Instant> {
        self.rx.recv().await
    }

    /// Stop the tick task now
    pub fn cancel(self) {
        drop(self);
    }
}

fn clamp_period(period: Duration) -> Duration {
    let max = Duration::from_millis(MAX_TICK_INTERVAL_MS);
    let clamped = period.clamp(Duration::from_millis(1), max);
    if clamped != period {
        tracing::warn!("Tick period {:?} out of range, using {:?}", period, clamped);
    }
    clamped
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        self.rx.close();
        tracing::debug!("Tick source cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_arrive_once_per_period() {
        let start = Instant::now();
        let mut ticker = Ticker::spawn(Duration::from_secs(1));

        for expected in 1..=3u64 {
            let at = ticker.next().await.unwrap();
            assert_eq!(at - start, Duration::from_secs(expected));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_period_is_clamped() {
        let ticker = Ticker::spawn(Duration::from_millis(u64::MAX));
        assert_eq!(ticker.period(), Duration::from_millis(MAX_TICK_INTERVAL_MS));

        let ticker = Ticker::spawn(Duration::MAX);
        assert_eq!(ticker.period(), Duration::from_millis(MAX_TICK_INTERVAL_MS));

        let mut ticker = Ticker::spawn(Duration::ZERO);
        assert_eq!(ticker.period(), Duration::from_millis(1));
        assert!(ticker.next().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_consumer_does_not_see_burst() {
        let mut ticker = Ticker::spawn(Duration::from_secs(1));

        // Fall five periods behind
        time::sleep(Duration::from_secs(5) + Duration::from_millis(500)).await;

        // Only one queued tick is buffered
        ticker.next().await.unwrap();
        let resumed = Instant::now();
        ticker.next().await.unwrap();
        assert!(Instant::now() > resumed);
    }
}
