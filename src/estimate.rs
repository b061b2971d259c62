//! Pre-search throughput benchmark and time-to-match estimate.
//!
//! The estimate is advisory. It is printed once before the workers start and
//! never bounds the search.

use std::fmt;
use std::time::Instant;

use tracing::info;

use crate::crypto::{KeyError, Keypair};
use crate::matcher::Pattern;

/// Default number of generations timed by [`benchmark_throughput`].
pub const DEFAULT_SAMPLE_SIZE: u32 = 1000;

/// Probability of still having no match after [`attempts_needed`] attempts.
pub const MISS_PROBABILITY: f64 = 0.05;

#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("benchmark sample size must be at least 1")]
    EmptySample,
    #[error("key generation failed during benchmark: {0}")]
    KeyGeneration(#[from] KeyError),
}

/// Times `sample_size` generate-and-derive cycles on the current thread.
///
/// Returns generations per second, floored.
pub fn benchmark_throughput(sample_size: u32) -> Result<u64, EstimateError> {
    if sample_size == 0 {
        return Err(EstimateError::EmptySample);
    }

    let start = Instant::now();
    for _ in 0..sample_size {
        let keypair = Keypair::generate()?;
        std::hint::black_box(keypair.address());
    }
    let elapsed = start.elapsed().as_secs_f64();

    let rate = if elapsed > 0.0 {
        (f64::from(sample_size) / elapsed).floor() as u64
    } else {
        u64::MAX
    };

    info!(sample_size, elapsed_secs = elapsed, rate, "benchmark complete");
    Ok(rate.max(1))
}

/// Attempts needed to see at least one match with 95% probability.
///
/// Geometric distribution with per-attempt probability `16^-match_length`.
pub fn attempts_needed(match_length: usize) -> u64 {
    saturate(attempts_for_difficulty(16f64.powi(match_length as i32)))
}

/// Attempts, as a float, for a per-attempt probability of `1 / difficulty`.
fn attempts_for_difficulty(difficulty: f64) -> f64 {
    (-MISS_PROBABILITY.ln() * difficulty).ceil()
}

fn saturate(attempts: f64) -> u64 {
    if attempts >= u64::MAX as f64 {
        u64::MAX
    } else {
        attempts as u64
    }
}

/// Estimated wall-clock time to the first match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    /// No prefix or suffix: the first generated address matches.
    Instant,
    Timed {
        /// Saturates at `u64::MAX` for very long patterns; `seconds` does not.
        attempts: u64,
        /// Combined generations per second over all threads.
        rate: u64,
        seconds: f64,
    },
}

impl Estimate {
    /// Builds an estimate from a known single-thread rate.
    pub fn from_rate(pattern: &Pattern, per_thread_rate: u64, threads: usize) -> Self {
        if pattern.is_empty() {
            return Estimate::Instant;
        }

        let attempts = attempts_for_difficulty(pattern.estimated_difficulty());
        let rate = per_thread_rate.saturating_mul(threads as u64).max(1);

        Estimate::Timed {
            attempts: saturate(attempts),
            rate,
            seconds: attempts / rate as f64,
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Instant => write!(f, "instant"),
            Estimate::Timed { seconds, .. } => write!(f, "{}", format_duration(*seconds)),
        }
    }
}

/// Benchmarks the local machine and estimates time to a match for `pattern`.
pub fn estimate_search(pattern: &Pattern, threads: usize) -> Result<Estimate, EstimateError> {
    if pattern.is_empty() {
        return Ok(Estimate::Instant);
    }
    let rate = benchmark_throughput(DEFAULT_SAMPLE_SIZE)?;
    Ok(Estimate::from_rate(pattern, rate, threads))
}

/// Renders seconds at a coarse, human-readable granularity.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.1 {
        format!("{:.0} milliseconds", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.1} seconds", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1} minutes", seconds / 60.0)
    } else if seconds < 86_400.0 {
        format!("{:.1} hours", seconds / 3600.0)
    } else {
        format!("{:.1} days", seconds / 86_400.0)
    }
}
