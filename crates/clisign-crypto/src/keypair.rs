//! One-time-use RSA keypair generation.

use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::CryptoError;

/// RSA modulus size for release-signing keys.
pub const MODULUS_BITS: usize = 4096;

/// A freshly generated keypair, held only in process memory.
///
/// Used for exactly one sign-then-verify sequence and dropped when the
/// signing operation returns or fails. Never written to disk.
///
/// No `Debug`/`Display` impls: keeps the private key out of log output.
pub struct Keypair {
    /// SPKI/PEM public key.
    pub public_key: String,
    /// PKCS#8/PEM private key.
    pub private_key: String,
}

impl Keypair {
    /// Generate a fresh RSA-4096 keypair from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyGeneration`] if the RSA primitive or the
    /// PEM encoding fails. Propagated, never retried.
    pub fn generate() -> Result<Self, CryptoError> {
        let private = {
            let mut rng = rand::thread_rng();
            RsaPrivateKey::new(&mut rng, MODULUS_BITS)
                .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?
        };
        let public = RsaPublicKey::from(&private);

        let public_key = public
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let private_key = private
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?
            .to_string();

        Ok(Self {
            public_key,
            private_key,
        })
    }
}
