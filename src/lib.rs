//! # aptos_vanity
//!
//! Multi-threaded Aptos vanity address generator.
//!
//! ## Architecture
//!
//! - `crypto`: Ed25519 key generation and address derivation
//! - `matcher`: Prefix/suffix matching
//! - `estimate`: Throughput benchmark and time-to-match estimate
//! - `worker`: Worker threads and the pool that owns them
//! - `coordinator`: Event aggregation until the target count is reached
//! - `config`: Runtime configuration

pub mod config;
pub mod coordinator;
pub mod crypto;
pub mod estimate;
pub mod matcher;
pub mod worker;

pub use config::{Config, SearchConfig};
pub use coordinator::{Coordinator, SearchError, SearchObserver, SearchSummary, SilentObserver};
pub use crypto::{derive_multisig_address, derive_standard_address, Address, Keypair};
pub use estimate::{estimate_search, Estimate};
pub use matcher::{matches, MatchResult, Pattern};
pub use worker::{VanityResult, WorkerEvent, WorkerPool};
