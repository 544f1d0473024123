//! The clone strategy capability
//!
//! Every duplication mechanism in the crate implements [`CloneStrategy`] so
//! the benchmark harness can drive them interchangeably.

use crate::error::CloneResult;

/// A mechanism that produces a deep copy of a node graph.
///
/// Implementations must not mutate `source`, and the returned graph must not
/// share any reference-typed node with it. Strategies take `&mut self` so they
/// may build and keep one-time state (compiled routines, cached plans) on
/// first use.
pub trait CloneStrategy<T> {
    /// Display name used in benchmark reports
    fn name(&self) -> &str;

    /// Duplicate `source`
    fn clone_graph(&mut self, source: &T) -> CloneResult<T>;
}
