//! Worker pool management.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, error};

use crate::config::SearchConfig;

use super::cpu::CpuWorker;

/// Capacity of the worker-to-coordinator event channel.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// A matching key found by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityResult {
    /// The standard account address (hex, no 0x prefix)
    pub standard_address: String,
    /// The multisig account address, when searching multisig addresses
    pub multisig_address: Option<String>,
    /// The private key (hex, no 0x prefix)
    pub private_key: String,
    /// The ID of the worker that found this result
    pub worker_id: usize,
}

impl VanityResult {
    /// The address that was checked against the pattern.
    pub fn address(&self) -> &str {
        self.multisig_address.as_deref().unwrap_or(&self.standard_address)
    }
}

/// Message from a worker to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// This many more attempts were made
    Progress(u64),
    /// A matching key was found
    Found(VanityResult),
}

/// Outcome of waiting on the event channel.
#[derive(Debug)]
pub enum PoolEvent {
    Worker(WorkerEvent),
    /// Nothing arrived before the timeout
    Idle,
    /// Every worker has exited
    Exhausted,
}

/// Owns the worker threads and the receiving end of their event channel.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Channel receiver for worker events (Option so shutdown can close it)
    event_rx: Option<Receiver<WorkerEvent>>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
}

impl WorkerPool {
    /// Spawns `config.thread_count` workers over the same search config.
    pub fn spawn(config: SearchConfig) -> io::Result<Self> {
        Self::spawn_with_stop_flag(config, Arc::new(AtomicBool::new(false)))
    }

    /// Spawns workers that also observe an externally owned stop flag.
    pub fn spawn_with_stop_flag(
        config: SearchConfig,
        stop_flag: Arc<AtomicBool>,
    ) -> io::Result<Self> {
        let (event_tx, event_rx) = bounded(EVENT_CHANNEL_CAPACITY);
        let num_workers = config.thread_count;
        let config = Arc::new(config);

        let mut pool = Self {
            num_workers,
            handles: Some(Vec::with_capacity(num_workers)),
            event_rx: Some(event_rx),
            stop_flag,
        };

        for id in 0..num_workers {
            // On failure, dropping `pool` stops and joins the workers already started.
            let handle =
                Self::spawn_worker(id, config.clone(), event_tx.clone(), pool.stop_flag.clone())?;
            if let Some(handles) = pool.handles.as_mut() {
                handles.push(handle);
            }
        }

        debug!(workers = num_workers, multisig = config.multisig, "worker pool started");
        Ok(pool)
    }

    fn spawn_worker(
        id: usize,
        config: Arc<SearchConfig>,
        event_tx: Sender<WorkerEvent>,
        stop_flag: Arc<AtomicBool>,
    ) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(format!("vanity-worker-{}", id))
            .spawn(move || {
                let worker = CpuWorker::new(id, config, event_tx, stop_flag);
                match worker.run() {
                    Ok(()) => debug!(worker = id, "worker stopped"),
                    Err(e) => {
                        error!(worker = id, error = %e, "worker failed, no further events from it")
                    }
                }
            })
    }

    /// Waits up to `timeout` for the next worker event.
    pub fn next_event(&self, timeout: Duration) -> PoolEvent {
        let Some(rx) = self.event_rx.as_ref() else {
            return PoolEvent::Exhausted;
        };

        match rx.recv_timeout(timeout) {
            Ok(event) => PoolEvent::Worker(event),
            Err(RecvTimeoutError::Timeout) => PoolEvent::Idle,
            Err(RecvTimeoutError::Disconnected) => PoolEvent::Exhausted,
        }
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops the workers, discards pending events, and joins every thread.
    pub fn shutdown(&mut self) {
        self.stop();
        // Closing the receiver unblocks workers waiting on a full channel.
        drop(self.event_rx.take());
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
            debug!(workers = self.num_workers, "worker pool joined");
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
