//! Fixed-width report rows
//!
//! Columns: strategy name (30), first call, second call and batch total
//! (20 each, milliseconds), then the verdict.

use super::StrategyResult;
use crate::profiling::as_millis_f64;
use std::time::Duration;

const NAME_WIDTH: usize = 30;
const TIME_WIDTH: usize = 20;

fn millis(duration: Duration) -> String {
    format!("{:.4} ms", as_millis_f64(duration))
}

/// Column headings, naming the batch size
pub fn header_row(batch_calls: usize) -> String {
    format!(
        "{:<name$}{:>time$}{:>time$}{:>time$}  {}",
        "Strategy",
        "First call",
        "Second call",
        format!("{} calls", batch_calls),
        "Result",
        name = NAME_WIDTH,
        time = TIME_WIDTH
    )
}

/// One row per strategy
pub fn format_row(result: &StrategyResult) -> String {
    format!(
        "{:<name$}{:>time$}{:>time$}{:>time$}  {}",
        result.name,
        millis(result.first_call),
        millis(result.second_call),
        millis(result.batch),
        if result.passed { "passed" } else { "FAILED" },
        name = NAME_WIDTH,
        time = TIME_WIDTH
    )
}
