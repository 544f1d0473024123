//! Runs every clone strategy against the sample graph and prints a report
//!
//! Usage: cargo run --bin graphclone_bench
//! Set RUST_LOG=debug to see compilation and codec details.

use graphclone::harness::report;
use graphclone::{kind_registry, standard_lineup, CloneError, Harness};
use std::io::{self, BufRead};

fn main() -> Result<(), CloneError> {
    env_logger::init();

    let registry = kind_registry();
    let harness = Harness::default();
    let mut strategies = standard_lineup(&registry);

    println!("{}", report::header_row(harness.config().batch_calls));
    println!("{}", "=".repeat(100));
    // Rows print as each strategy finishes, so a later failure keeps them
    let runs = harness.run_all(&mut strategies, |run| {
        println!("{}", report::format_row(&run.result));
    })?;

    for run in &runs {
        println!();
        println!("{}: {}", run.result.name, run.deep_check()?);
        println!("{}", serde_json::to_string_pretty(&run.clone)?);
    }

    println!();
    println!("Press Enter to exit");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
