//! Simulated network latency.
//!
//! # Design
//! The backend itself is synchronous. Latency is a separate, injectable
//! source of delays that `Session::dispatch` awaits before answering, so
//! tests can plug in [`NoLatency`] and run without timers.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LatencyConfig;

pub trait Latency {
    /// The delay to apply to the next simulated request.
    fn next_delay(&mut self) -> Duration;
}

/// Answers immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

impl Latency for NoLatency {
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}

/// Uniformly distributed delay in `[min, max]`, at millisecond resolution.
#[derive(Debug, Clone)]
pub struct RandomLatency {
    min_ms: u64,
    max_ms: u64,
    rng: StdRng,
}

impl RandomLatency {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self::with_rng(min, max, StdRng::from_entropy())
    }

    /// Deterministic sequence of delays for a given seed.
    pub fn seeded(min: Duration, max: Duration, seed: u64) -> Self {
        Self::with_rng(min, max, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min: Duration, max: Duration, rng: StdRng) -> Self {
        let min_ms = min.as_millis() as u64;
        let max_ms = (max.as_millis() as u64).max(min_ms);
        Self {
            min_ms,
            max_ms,
            rng,
        }
    }
}

impl Latency for RandomLatency {
    fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(self.min_ms..=self.max_ms))
    }
}

/// Pick the latency source described by configuration.
pub fn from_config(config: &LatencyConfig) -> Box<dyn Latency> {
    if !config.enabled || config.max_ms == 0 {
        return Box::new(NoLatency);
    }
    Box::new(RandomLatency::new(
        Duration::from_millis(config.min_ms),
        Duration::from_millis(config.max_ms),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_latency_is_zero() {
        assert_eq!(NoLatency.next_delay(), Duration::ZERO);
    }

    #[test]
    fn random_latency_stays_in_range() {
        let mut latency =
            RandomLatency::seeded(Duration::from_millis(200), Duration::from_millis(700), 7);
        for _ in 0..200 {
            let d = latency.next_delay();
            assert!(d >= Duration::from_millis(200) && d <= Duration::from_millis(700), "{d:?}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let min = Duration::from_millis(10);
        let max = Duration::from_millis(90);
        let mut a = RandomLatency::seeded(min, max, 42);
        let mut b = RandomLatency::seeded(min, max, 42);
        for _ in 0..20 {
            assert_eq!(a.next_delay(), b.next_delay());
        }
    }

    #[test]
    fn inverted_range_collapses_to_min() {
        let mut latency =
            RandomLatency::seeded(Duration::from_millis(50), Duration::from_millis(10), 1);
        assert_eq!(latency.next_delay(), Duration::from_millis(50));
    }

    #[test]
    fn disabled_config_yields_no_delay() {
        let config = LatencyConfig {
            enabled: false,
            min_ms: 100,
            max_ms: 200,
        };
        assert_eq!(from_config(&config).next_delay(), Duration::ZERO);
    }
}
