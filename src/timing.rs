//! Pacing of the upstream model call
//!
//! Each analysis depth has a minimum wall-clock duration. The call and a
//! sleep of that length run concurrently; the result is released when both
//! have finished, or immediately when the call fails.

use crate::record::AnalysisMode;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Minimum durations per depth, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// When false the result is released as soon as the call completes.
    pub enabled: bool,
    pub quick_secs: u64,
    pub deep_secs: u64,
    pub comprehensive_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quick_secs: 30,
            deep_secs: 90,
            comprehensive_secs: 180,
        }
    }
}

impl TimingConfig {
    /// No pacing at all.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// The floor for `mode`, or zero when pacing is disabled.
    pub fn floor(&self, mode: AnalysisMode) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        Duration::from_secs(match mode {
            AnalysisMode::Quick => self.quick_secs,
            AnalysisMode::Deep => self.deep_secs,
            AnalysisMode::Comprehensive => self.comprehensive_secs,
        })
    }
}

/// Await `call`, but do not return a success before `floor` has elapsed.
/// A failure is returned as soon as it happens.
pub async fn paced<F, T, E>(call: F, floor: Duration) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    if floor.is_zero() {
        return call.await;
    }

    let sleep = async {
        tokio::time::sleep(floor).await;
        Ok::<(), E>(())
    };
    let (value, ()) = tokio::try_join!(call, sleep)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    fn assert_elapsed(start: Instant, secs: u64) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_secs(secs) && elapsed < Duration::from_secs(secs + 1),
            "expected ~{}s, got {:?}",
            secs,
            elapsed
        );
    }

    #[test]
    fn default_floors_per_depth() {
        let timing = TimingConfig::default();
        assert_eq!(timing.floor(AnalysisMode::Quick), Duration::from_secs(30));
        assert_eq!(timing.floor(AnalysisMode::Deep), Duration::from_secs(90));
        assert_eq!(timing.floor(AnalysisMode::Comprehensive), Duration::from_secs(180));
    }

    #[test]
    fn disabled_pacing_has_no_floor() {
        assert_eq!(TimingConfig::disabled().floor(AnalysisMode::Comprehensive), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn fast_success_waits_for_floor() {
        let start = Instant::now();
        let result: Result<&str, ()> = paced(
            async {
                sleep(Duration::from_secs(2)).await;
                Ok("done")
            },
            Duration::from_secs(30),
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_elapsed(start, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_success_is_not_delayed_further() {
        let start = Instant::now();
        let result: Result<u8, ()> = paced(
            async {
                sleep(Duration::from_secs(45)).await;
                Ok(1)
            },
            Duration::from_secs(30),
        )
        .await;

        assert_eq!(result, Ok(1));
        assert_elapsed(start, 45);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_returns_immediately() {
        let start = Instant::now();
        let result: Result<(), &str> = paced(
            async {
                sleep(Duration::from_secs(5)).await;
                Err("upstream down")
            },
            Duration::from_secs(180),
        )
        .await;

        assert_eq!(result, Err("upstream down"));
        assert_elapsed(start, 5);
    }
}
