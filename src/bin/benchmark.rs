//! Replays a benchmark fixture file and reports pass rates and search
//! throughput.
//!
//! Usage: benchmark [FIXTURE_PATH] [DEPTH] [TIME_LIMIT_SECS]

use anyhow::{Context, Result};

use std::env;
use std::time::Duration;

use connect4_minimax::benchmark::{read_benchmarks, run_benchmarks};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);

    let path = args
        .next()
        .unwrap_or_else(|| "test_data/quiet_positions".to_string());
    let depth = match args.next() {
        Some(arg) => arg.parse::<usize>().context("invalid depth argument")?,
        None => 8,
    };
    let time_limit = match args.next() {
        Some(arg) => Duration::from_secs(arg.parse::<u64>().context("invalid time limit")?),
        None => Duration::from_secs(8),
    };

    let cases = read_benchmarks(&path)?;
    println!(
        "Loaded {} cases from {}, searching to depth {} with a {:?} budget per case",
        cases.len(),
        path,
        depth,
        time_limit
    );

    let report = run_benchmarks(&cases, depth, time_limit)?;

    for failure in &report.failures {
        if failure.expected != 0 {
            println!(
                "For moves {}, expected {}, got {}.",
                failure.moves, failure.expected, failure.actual
            );
        }
    }

    println!("Passed {} out of {} tests.", report.passed, report.total);
    println!("Passed {:.2}% of tests.", report.pass_rate());
    println!(
        "Passed {} out of {} tests with score 0.",
        report.passed_zero, report.expected_zero
    );
    println!(
        "Passed {} out of {} tests without the zeroes ({:.2}%).",
        report.passed - report.passed_zero,
        report.total - report.expected_zero,
        report.pass_rate_nonzero()
    );

    let secs = report.total_time.as_secs_f64();
    println!(
        "Mean time: {:.6}ms, total nodes: {}, knodes/s: {:.1}",
        report.mean_time().as_secs_f64() * 1000.0,
        report.total_nodes,
        if secs > 0.0 {
            report.total_nodes as f64 / secs / 1000.0
        } else {
            0.0
        }
    );

    Ok(())
}
