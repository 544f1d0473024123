//! Benchmark and validation harness
//!
//! Every strategy goes through the same protocol against a freshly built
//! sample graph: one timed first call, one timed second call, then a timed
//! batch. The last clone produced is validated against the source.

pub mod report;
pub mod validate;

pub use validate::DeepVerdict;

use crate::error::CloneResult;
use crate::model::{create_sample_graph, Customer};
use crate::profiling::{as_millis_f64, CallProfiler};
use crate::strategy::CloneStrategy;
use std::time::Duration;

/// Harness configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Calls in the timed batch that follows the first two calls
    pub batch_calls: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { batch_calls: 100 }
    }
}

/// Timings and verdict for one strategy
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyResult {
    pub name: String,
    pub first_call: Duration,
    pub second_call: Duration,
    /// Total for the whole batch
    pub batch: Duration,
    pub batch_calls: usize,
    /// Outcome of the shallow check on the last clone
    pub passed: bool,
}

/// A finished run: the result plus the graphs it was judged on
#[derive(Debug)]
pub struct BenchmarkRun {
    pub result: StrategyResult,
    pub source: Customer,
    pub clone: Customer,
}

impl BenchmarkRun {
    /// Full structural validation of the run's last clone
    pub fn deep_check(&self) -> CloneResult<DeepVerdict> {
        validate::deep_check(&self.source, &self.clone)
    }
}

/// Drives strategies through the timing protocol
#[derive(Debug, Clone, Default)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run the protocol for one strategy; the first clone error ends the run
    pub fn run(&self, strategy: &mut dyn CloneStrategy<Customer>) -> CloneResult<BenchmarkRun> {
        let source = create_sample_graph();
        let name = strategy.name().to_string();

        let (first, first_call) = CallProfiler::new().measure(|| strategy.clone_graph(&source));
        first?;

        let (second, second_call) = CallProfiler::new().measure(|| strategy.clone_graph(&source));
        let second = second?;

        let (last, batch) = CallProfiler::new()
            .measure_batch(self.config.batch_calls, || strategy.clone_graph(&source))?;
        let clone = last.unwrap_or(second);

        let passed = validate::shallow_check(&source, &clone);
        if passed {
            log::info!(
                "{}: first {:.4} ms, second {:.4} ms, {} calls {:.4} ms",
                name,
                as_millis_f64(first_call),
                as_millis_f64(second_call),
                self.config.batch_calls,
                as_millis_f64(batch)
            );
        } else {
            log::warn!("{}: clone failed validation", name);
        }

        Ok(BenchmarkRun {
            result: StrategyResult {
                name,
                first_call,
                second_call,
                batch,
                batch_calls: self.config.batch_calls,
                passed,
            },
            source,
            clone,
        })
    }

    /// Run every strategy in order, handing each finished run to `on_run`
    /// before the next strategy starts.
    ///
    /// An error stops the lineup; runs that completed before it have already
    /// been reported through `on_run`.
    pub fn run_all<F>(
        &self,
        strategies: &mut [Box<dyn CloneStrategy<Customer>>],
        mut on_run: F,
    ) -> CloneResult<Vec<BenchmarkRun>>
    where
        F: FnMut(&BenchmarkRun),
    {
        let mut runs = Vec::with_capacity(strategies.len());
        for strategy in strategies.iter_mut() {
            let run = self.run(strategy.as_mut())?;
            on_run(&run);
            runs.push(run);
        }
        Ok(runs)
    }
}
