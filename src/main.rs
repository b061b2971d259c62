//! Aptos Vanity Address Generator CLI
//!
//! Usage:
//!   aptos-vanity -p cafe              # Find an address starting with "cafe"
//!   aptos-vanity -s beef -c 5         # Find 5 addresses ending with "beef"
//!   aptos-vanity -p 00 -m             # Find a key whose multisig account starts with "00"

use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use aptos_vanity::{
    estimate_search, Config, Coordinator, SearchObserver, SearchSummary, VanityResult,
};

/// Exit status after Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run() {
        Ok(summary) if summary.interrupted => process::exit(EXIT_INTERRUPTED),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<SearchSummary> {
    let config = Config::parse()
        .validate()
        .context("Configuration error")?;

    println!("Aptos Vanity Address Generator");
    println!("==============================");
    println!("Pattern:    {}", config.pattern);
    println!(
        "Searching:  {} addresses",
        if config.multisig { "multisig" } else { "standard" }
    );
    println!("Workers:    {}", config.thread_count);
    println!("Target:     {} address(es)", config.target_count);
    println!();

    print!("Benchmarking... ");
    flush();
    let estimate =
        estimate_search(&config.pattern, config.thread_count).context("Benchmark failed")?;
    println!("estimated time to first match (95% confidence): {}", estimate);
    println!();

    let coordinator = Coordinator::new(config);
    ctrlc_handler(coordinator.stop_flag())?;

    let mut console = Console::default();
    let summary = coordinator.run(&mut console).context("Search failed")?;
    console.clear_line();

    if summary.interrupted {
        println!("Stopped by user.");
    } else {
        println!("Target reached! Found {} address(es).", summary.results.len());
    }

    println!("\n--- Final Statistics ---");
    println!(
        "Average speed:        {}/s",
        format_number(summary.keys_per_second() as u64)
    );
    println!("Time elapsed:         {:.2}s", summary.elapsed.as_secs_f64());
    println!("Total keys generated: {}", format_number(summary.total_generated));

    Ok(summary)
}

/// Prints results on their own lines and keeps the throughput on one
/// carriage-return overwritten line.
#[derive(Default)]
struct Console {
    progress_shown: bool,
}

impl Console {
    fn clear_line(&mut self) {
        if self.progress_shown {
            print!("\r{:60}\r", "");
            flush();
            self.progress_shown = false;
        }
    }
}

impl SearchObserver for Console {
    fn on_progress(&mut self, total_generated: u64, keys_per_second: f64) {
        print!(
            "\rGenerated {} keys ({}/s)    ",
            format_number(total_generated),
            format_number(keys_per_second as u64)
        );
        flush();
        self.progress_shown = true;
    }

    fn on_result(&mut self, _index: usize, result: &VanityResult) {
        self.clear_line();
        print_result(result);
    }
}

fn print_result(result: &VanityResult) {
    if let Some(multisig) = &result.multisig_address {
        println!("Multisig account address: 0x{}", multisig);
    }
    println!("Standard account address: 0x{}", result.standard_address);
    println!("Private key: 0x{}", result.private_key);
    println!();
}

fn flush() {
    let _ = io::stdout().flush();
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn ctrlc_handler(stop_flag: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    })
    .context("Error setting Ctrl-C handler")
}
