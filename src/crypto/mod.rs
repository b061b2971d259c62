//! Cryptographic operations for Aptos key and address generation.
//!
//! This module provides:
//! - Secure random Ed25519 key generation
//! - Standard and multisig address derivation using SHA3-256

mod address;
mod derive;
mod keypair;

pub use address::{Address, ADDRESS_LENGTH};
pub use derive::{derive_multisig_address, derive_standard_address, MULTISIG_SEED};
pub use keypair::{KeyError, Keypair, SEED_LENGTH};
