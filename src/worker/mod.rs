//! Worker pool for parallel vanity address generation.
//!
//! This module provides:
//! - Multi-threaded CPU workers
//! - One-way event channel from workers to the coordinator
//! - Broadcast stop signal and deterministic join

mod cpu;
mod pool;

pub use cpu::{Attempt, CpuWorker, PROGRESS_BATCH};
pub use pool::{PoolEvent, VanityResult, WorkerEvent, WorkerPool};
