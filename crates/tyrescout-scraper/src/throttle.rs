//! Minimum spacing between consecutive outbound calls.

use std::time::Duration;

use tokio::time::Instant;

/// Enforces at least `min_interval` between the starts of consecutive calls.
///
/// The first [`Throttle::wait`] returns immediately. Time spent doing work
/// between calls counts toward the interval.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Sleeps until the interval since the previous call has elapsed, then
    /// records the current instant.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            tokio::time::sleep_until(last + self.min_interval).await;
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_wait_is_immediate() {
        let mut throttle = Throttle::from_millis(300);
        let start = Instant::now();
        throttle.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_waits_are_spaced() {
        let mut throttle = Throttle::from_millis(300);
        let start = Instant::now();
        throttle.wait().await;
        throttle.wait().await;
        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(600));
        assert!(start.elapsed() < Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_work_counts_toward_interval() {
        let mut throttle = Throttle::from_millis(300);
        let start = Instant::now();
        throttle.wait().await;
        tokio::time::advance(Duration::from_millis(500)).await;
        throttle.wait().await;
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_never_sleeps() {
        let mut throttle = Throttle::from_millis(0);
        let start = Instant::now();
        for _ in 0..5 {
            throttle.wait().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
