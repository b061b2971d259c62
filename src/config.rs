//! Runtime configuration for the vanity address generator.

use std::time::Duration;

use clap::Parser;

use crate::crypto::ADDRESS_LENGTH;
use crate::matcher::Pattern;

/// Maximum number of hex characters an address can be matched on.
pub const MAX_PATTERN_LENGTH: usize = ADDRESS_LENGTH * 2;

/// Aptos Vanity Address Generator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Required hex prefix at the start of the address (no 0x)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Required hex suffix at the end of the address
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Search over derived multisig account addresses instead of standard addresses
    #[arg(short, long, default_value_t = false)]
    pub multisig: bool,

    /// Number of matching addresses to find before stopping
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Live throughput refresh interval in milliseconds
    #[arg(short = 'r', long, default_value_t = 1000)]
    pub report_interval: u64,
}

/// Validated, immutable search parameters shared by every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub pattern: Pattern,
    pub multisig: bool,
    pub target_count: usize,
    pub thread_count: usize,
    pub report_interval: Duration,
}

impl SearchConfig {
    /// Builds a search config with the default one-second report interval.
    ///
    /// Prefix and suffix are taken as-is; use [`Config::validate`] for user input.
    pub fn new(pattern: Pattern, multisig: bool, target_count: usize, thread_count: usize) -> Self {
        Self {
            pattern,
            multisig,
            target_count,
            thread_count,
            report_interval: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration and produces the shared search config.
    pub fn validate(&self) -> Result<SearchConfig, ConfigError> {
        let prefix = normalize_hex("Prefix", self.prefix.as_deref())?;
        let suffix = normalize_hex("Suffix", self.suffix.as_deref())?;

        let total_len =
            prefix.as_ref().map_or(0, String::len) + suffix.as_ref().map_or(0, String::len);
        if total_len > MAX_PATTERN_LENGTH {
            return Err(ConfigError::InvalidPattern(format!(
                "Combined prefix + suffix cannot be longer than {} characters",
                MAX_PATTERN_LENGTH
            )));
        }

        if self.count == 0 {
            return Err(ConfigError::InvalidCount);
        }

        let thread_count = self.worker_count();
        if thread_count == 0 {
            return Err(ConfigError::InvalidThreads);
        }

        if self.report_interval < 100 {
            return Err(ConfigError::InvalidReportInterval(self.report_interval));
        }

        Ok(SearchConfig {
            pattern: Pattern::new(prefix, suffix),
            multisig: self.multisig,
            target_count: self.count,
            thread_count,
            report_interval: Duration::from_millis(self.report_interval),
        })
    }
}

/// Lowercases, strips an optional `0x`, and checks for hex digits only.
fn normalize_hex(label: &str, raw: Option<&str>) -> Result<Option<String>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let lower = raw.trim().to_lowercase();
    let hex = lower.strip_prefix("0x").unwrap_or(&lower);

    if hex.is_empty() {
        return Ok(None);
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidPattern(format!(
            "{} must contain only hex characters (0-9, a-f), got {:?}",
            label, raw
        )));
    }

    Ok(Some(hex.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Count must be at least 1")]
    InvalidCount,
    #[error("Thread count must be at least 1")]
    InvalidThreads,
    #[error("Report interval must be at least 100ms, got {0}ms")]
    InvalidReportInterval(u64),
}
