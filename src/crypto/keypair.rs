//! Ed25519 keypair generation.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;

use super::derive::derive_standard_address;
use super::Address;

/// Length of an Ed25519 private key seed.
pub const SEED_LENGTH: usize = 32;

/// Errors raised while producing key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("random number generator failure: {0}")]
    Rng(#[from] rand::Error),
}

/// An Ed25519 keypair. The signing key is zeroized on drop.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generates a new random keypair from the operating system RNG.
    #[inline]
    pub fn generate() -> Result<Self, KeyError> {
        let mut seed = [0u8; SEED_LENGTH];
        OsRng.try_fill_bytes(&mut seed)?;
        Ok(Self::from_seed(&seed))
    }

    /// Builds a keypair from an existing 32-byte private key seed.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Returns the raw public key bytes.
    #[inline]
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Returns the raw private key bytes.
    pub fn private_key_bytes(&self) -> [u8; SEED_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Returns the private key as a hex string (without 0x prefix).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.private_key_bytes())
    }

    /// Derives the standard account address of this keypair.
    #[inline]
    pub fn address(&self) -> Address {
        derive_standard_address(&self.public_key_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let keypair = Keypair::generate().unwrap();
        assert_eq!(keypair.private_key_bytes().len(), 32);
        assert_eq!(keypair.public_key_bytes().len(), 32);
        assert_eq!(keypair.address().as_bytes().len(), 32);
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = Keypair::generate().unwrap();
        let b = Keypair::generate().unwrap();
        assert_ne!(a.private_key_bytes(), b.private_key_bytes());
    }

    #[test]
    fn test_deterministic_address() {
        let keypair = Keypair::from_seed(&[1u8; 32]);
        assert_eq!(
            hex::encode(keypair.public_key_bytes()),
            "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c"
        );
        assert_eq!(
            keypair.address().to_hex(),
            "7df415e5b21bdaa8b2946e8f1f4278b39904e51a69627494cd3e6f2996732fbd"
        );
        assert_eq!(keypair.private_key_hex(), "01".repeat(32));
    }

    #[test]
    fn test_zero_seed_address() {
        let keypair = Keypair::from_seed(&[0u8; 32]);
        assert_eq!(
            keypair.address().to_hex(),
            "08e845d10bbb594fcffceb36d934a188bb84d9cdf7362e4e2522265b185127cb"
        );
    }
}
