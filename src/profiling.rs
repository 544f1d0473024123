//! Monotonic call timing for the benchmark harness
//!
//! Brackets a single call or a batch of calls with `Instant` readings.

use std::time::{Duration, Instant};

/// Wall-clock profiler for one measured span
#[derive(Debug)]
pub struct CallProfiler {
    /// Start of the span
    start_time: Instant,
}

impl CallProfiler {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Restart the span at the current instant
    pub fn start(&mut self) {
        self.start_time = Instant::now();
    }

    /// Elapsed time since `start`
    pub fn stop(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Time a single call
    pub fn measure<F, R>(mut self, f: F) -> (R, Duration)
    where
        F: FnOnce() -> R,
    {
        self.start();
        let result = f();
        (result, self.stop())
    }

    /// Time `calls` consecutive calls, stopping at the first error
    ///
    /// Returns the last call's result alongside the total elapsed time.
    pub fn measure_batch<F, R, E>(mut self, calls: usize, mut f: F) -> Result<(Option<R>, Duration), E>
    where
        F: FnMut() -> Result<R, E>,
    {
        self.start();
        let mut last = None;
        for _ in 0..calls {
            last = Some(f()?);
        }
        Ok((last, self.stop()))
    }
}

impl Default for CallProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Duration as fractional milliseconds, the unit every report uses
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Macro for quick timing of an expression
#[macro_export]
macro_rules! time_call {
    ($expr:expr) => {{
        let profiler = $crate::profiling::CallProfiler::new();
        profiler.measure(|| $expr)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_measure_returns_result() {
        let (result, elapsed) = CallProfiler::new().measure(|| (0..1000).sum::<i32>());
        assert_eq!(result, 499500);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_sleep_measurement() {
        let (_, elapsed) = crate::time_call!(thread::sleep(Duration::from_millis(1)));
        assert!(elapsed >= Duration::from_millis(1));
    }

    #[test]
    fn test_batch_counts_calls() {
        let mut calls = 0;
        let (last, _) = CallProfiler::new()
            .measure_batch::<_, _, ()>(100, || {
                calls += 1;
                Ok(calls)
            })
            .unwrap();
        assert_eq!(calls, 100);
        assert_eq!(last, Some(100));
    }

    #[test]
    fn test_batch_stops_at_first_error() {
        let mut calls = 0;
        let result = CallProfiler::new().measure_batch(10, || {
            calls += 1;
            if calls == 3 {
                Err("boom")
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_millis_conversion() {
        assert_eq!(as_millis_f64(Duration::from_micros(1500)), 1.5);
    }
}
