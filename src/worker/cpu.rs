//! CPU-based worker for vanity address generation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::config::SearchConfig;
use crate::crypto::{derive_multisig_address, KeyError, Keypair};

use super::{VanityResult, WorkerEvent};

/// Attempts between two progress events.
pub const PROGRESS_BATCH: u64 = 1000;

/// Multisig accounts are derived at the creator's first sequence number.
const MULTISIG_NONCE: u64 = 0;

/// Outcome of a single generate/derive/match attempt.
#[derive(Debug)]
pub enum Attempt {
    Miss,
    Hit(VanityResult),
}

/// A CPU worker that generates and tests keypairs.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    /// Shared, read-only search parameters
    config: Arc<SearchConfig>,
    /// Channel to the coordinator
    event_tx: Sender<WorkerEvent>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        config: Arc<SearchConfig>,
        event_tx: Sender<WorkerEvent>,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        Self {
            id,
            config,
            event_tx,
            stop_flag,
        }
    }

    /// Runs the worker loop.
    ///
    /// Generates keypairs and tests them against the pattern until:
    /// - Stop flag is set
    /// - Channel is closed
    /// - Key generation fails (returned to the caller)
    pub fn run(&self) -> Result<(), KeyError> {
        let mut attempts: u64 = 0;

        while !self.stop_flag.load(Ordering::Relaxed) {
            let attempt = self.attempt()?;
            attempts += 1;

            if attempts % PROGRESS_BATCH == 0 && !self.emit(WorkerEvent::Progress(PROGRESS_BATCH)) {
                break;
            }

            if let Attempt::Hit(result) = attempt {
                if !self.emit(WorkerEvent::Found(result)) {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Generates one keypair and tests its search address.
    ///
    /// Non-matching key material is dropped before returning.
    #[inline]
    pub fn attempt(&self) -> Result<Attempt, KeyError> {
        let keypair = Keypair::generate()?;
        let standard = keypair.address();
        let multisig = self
            .config
            .multisig
            .then(|| derive_multisig_address(&standard, MULTISIG_NONCE));

        let search_hex = multisig.as_ref().unwrap_or(&standard).to_hex();
        if !self.config.pattern.matches(&search_hex).is_match() {
            return Ok(Attempt::Miss);
        }

        Ok(Attempt::Hit(VanityResult {
            standard_address: standard.to_hex(),
            multisig_address: multisig.map(|_| search_hex),
            private_key: keypair.private_key_hex(),
            worker_id: self.id,
        }))
    }

    fn emit(&self, event: WorkerEvent) -> bool {
        self.event_tx.send(event).is_ok()
    }
}
