//! Aptos address derivation.
//!
//! Standard address: `SHA3-256(public_key || 0x00)`.
//!
//! Multisig address: `SHA3-256(creator || "aptos_framework::multisig_account" || nonce || 0xFF)`,
//! where the nonce is the minimal big-endian byte string of its value
//! (no bytes at all for zero).

use tiny_keccak::{Hasher, Sha3};

use super::address::{Address, ADDRESS_LENGTH};

/// Scheme identifier appended to an Ed25519 public key.
pub const ED25519_SCHEME: u8 = 0x00;

/// Domain separator for multisig account addresses.
pub const MULTISIG_SEED: &[u8] = b"aptos_framework::multisig_account";

/// Terminator byte appended to seeded (resource-style) address preimages.
pub const SEEDED_ADDRESS_SCHEME: u8 = 0xFF;

/// Derives the standard account address for a raw public key.
#[inline]
pub fn derive_standard_address(public_key: &[u8]) -> Address {
    let mut hasher = Sha3::v256();
    hasher.update(public_key);
    hasher.update(&[ED25519_SCHEME]);
    finalize(hasher)
}

/// Derives the multisig account address created by `creator` at sequence number `nonce`.
#[inline]
pub fn derive_multisig_address(creator: &Address, nonce: u64) -> Address {
    derive_seeded_address(creator.as_bytes(), MULTISIG_SEED, nonce, SEEDED_ADDRESS_SCHEME)
}

fn derive_seeded_address(creator: &[u8], seed: &[u8], nonce: u64, terminator: u8) -> Address {
    let nonce_bytes = nonce.to_be_bytes();
    let leading_zeros = (nonce.leading_zeros() / 8) as usize;

    let mut hasher = Sha3::v256();
    hasher.update(creator);
    hasher.update(seed);
    hasher.update(&nonce_bytes[leading_zeros..]);
    hasher.update(&[terminator]);
    finalize(hasher)
}

#[inline]
fn finalize(hasher: Sha3) -> Address {
    let mut hash = [0u8; ADDRESS_LENGTH];
    hasher.finalize(&mut hash);
    Address::from_bytes(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_address() -> Address {
        Address::from_bytes([0u8; ADDRESS_LENGTH])
    }

    #[test]
    fn test_standard_address_vector() {
        let addr = derive_standard_address(&[0u8; 32]);
        assert_eq!(
            addr.to_hex(),
            "dc33296e4d20f0ef35ff9fd449e23ebbaa5a049a17779db3c2fe194b499aaf74"
        );
    }

    #[test]
    fn test_standard_address_is_deterministic() {
        let pk = [7u8; 32];
        assert_eq!(derive_standard_address(&pk), derive_standard_address(&pk));
        assert_ne!(derive_standard_address(&pk), derive_standard_address(&[8u8; 32]));
    }

    #[test]
    fn test_standard_address_length_is_fixed() {
        for len in [0usize, 1, 31, 32, 33, 64] {
            let pk = vec![0x42u8; len];
            assert_eq!(derive_standard_address(&pk).as_bytes().len(), ADDRESS_LENGTH);
        }
    }

    #[test]
    fn test_multisig_address_vector() {
        let addr = derive_multisig_address(&zero_address(), 0);
        assert_eq!(
            addr.to_hex(),
            "e747abc1854ed35e60ae97a58d9fdc14d1b72e274b4d04ec0aef6c86220273bc"
        );
    }

    #[test]
    fn test_multisig_nonce_is_minimal_big_endian() {
        // 256 renders as [0x01, 0x00]
        let addr = derive_multisig_address(&zero_address(), 256);
        assert_eq!(
            addr.to_hex(),
            "b0348f494200b9637482534abacb5338ddd5e04a8dc4180f3f1cadbbcf3aa1ce"
        );
    }

    #[test]
    fn test_multisig_is_sensitive_to_seed_and_terminator() {
        let creator = derive_standard_address(&[3u8; 32]);
        let reference = derive_multisig_address(&creator, 0);

        assert_eq!(reference, derive_multisig_address(&creator, 0));

        let other_seed = derive_seeded_address(
            creator.as_bytes(),
            b"aptos_framework::multisig_accounts",
            0,
            SEEDED_ADDRESS_SCHEME,
        );
        assert_ne!(reference, other_seed);

        let other_terminator =
            derive_seeded_address(creator.as_bytes(), MULTISIG_SEED, 0, 0xFE);
        assert_ne!(reference, other_terminator);

        assert_ne!(reference, derive_multisig_address(&creator, 1));
    }
}
