//! Benchmark fixture parsing and replay
//!
//! Fixture files hold one test case per line: a move string (each character
//! a 1-based column digit, players alternating starting with player one)
//! followed by the expected score of the resulting position. Each case is
//! replayed onto a fresh board and searched with pruning and iterative
//! deepening; cases are independent, so they run in parallel with one
//! engine each.

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::board::BoardState;
use crate::search::SearchEngine;

/// One fixture line: a move string and the score expected for the position
/// it produces
#[derive(Clone, Debug)]
pub struct BenchmarkCase {
    pub moves: String,
    pub expected: i32,
}

/// A case whose searched score did not match the expected score
#[derive(Clone, Debug)]
pub struct BenchmarkFailure {
    pub moves: String,
    pub expected: i32,
    pub actual: f64,
}

/// Aggregate results of a benchmark run
#[derive(Clone, Debug, Default)]
pub struct BenchmarkReport {
    pub total: usize,
    pub passed: usize,
    /// Cases whose expected score is zero, and how many of those passed;
    /// zero scores pass trivially whenever the position is quiet, so the
    /// split keeps them from inflating the pass rate
    pub expected_zero: usize,
    pub passed_zero: usize,
    pub failures: Vec<BenchmarkFailure>,
    pub total_nodes: usize,
    pub total_time: Duration,
}

impl BenchmarkReport {
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }

    /// Pass rate over the cases with a non-zero expected score
    pub fn pass_rate_nonzero(&self) -> f64 {
        let total = self.total - self.expected_zero;
        if total == 0 {
            0.0
        } else {
            (self.passed - self.passed_zero) as f64 / total as f64 * 100.0
        }
    }

    pub fn mean_time(&self) -> Duration {
        if self.total == 0 {
            Duration::from_secs(0)
        } else {
            self.total_time / self.total as u32
        }
    }
}

/// Reads benchmark cases from a fixture file, one whitespace-separated
/// "moves score" pair per line
pub fn read_benchmarks<P: AsRef<Path>>(path: P) -> Result<Vec<BenchmarkCase>> {
    let path = path.as_ref();
    let file = BufReader::new(
        File::open(path).with_context(|| format!("failed to open benchmark file {:?}", path))?,
    );

    let mut cases = Vec::new();
    for line in file.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let moves = fields
            .next()
            .ok_or_else(|| anyhow!("invalid benchmark line: {}", line))?;
        let expected = fields
            .next()
            .ok_or_else(|| anyhow!("invalid benchmark line: {}", line))?
            .parse::<i32>()
            .with_context(|| format!("invalid expected score in line: {}", line))?;

        cases.push(BenchmarkCase {
            moves: moves.to_string(),
            expected,
        });
    }
    Ok(cases)
}

/// Replays and searches every case, comparing searched scores against the
/// expected ones
pub fn run_benchmarks(
    cases: &[BenchmarkCase],
    calculation_depth: usize,
    time_limit: Duration,
) -> Result<BenchmarkReport> {
    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Running benchmarks: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    struct CaseOutcome {
        failure: Option<BenchmarkFailure>,
        expected_zero: bool,
        nodes: usize,
        elapsed: Duration,
    }

    let outcomes = cases
        .par_iter()
        .map(|case| -> Result<CaseOutcome> {
            let mut board = BoardState::from_moves(&case.moves)?;
            let mut engine = SearchEngine::new(calculation_depth, time_limit);

            let start_time = Instant::now();
            let (_best_move, score) = engine.choose_move(&mut board, true, true)?;
            let elapsed = start_time.elapsed();

            progress.inc(1);
            let failure = if score == case.expected as f64 {
                None
            } else {
                Some(BenchmarkFailure {
                    moves: case.moves.clone(),
                    expected: case.expected,
                    actual: score,
                })
            };
            Ok(CaseOutcome {
                failure,
                expected_zero: case.expected == 0,
                nodes: engine.stats.nodes_searched,
                elapsed,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish();

    let mut report = BenchmarkReport {
        total: outcomes.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        if outcome.expected_zero {
            report.expected_zero += 1;
        }
        match outcome.failure {
            None => {
                report.passed += 1;
                if outcome.expected_zero {
                    report.passed_zero += 1;
                }
            }
            Some(failure) => report.failures.push(failure),
        }
        report.total_nodes += outcome.nodes;
        report.total_time += outcome.elapsed;
    }
    Ok(report)
}
