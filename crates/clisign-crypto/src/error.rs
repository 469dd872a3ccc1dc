//! Error types for key generation, signing, and verification.

use thiserror::Error;

/// Errors that can occur while generating keys, signing, or verifying.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The underlying RSA primitive failed to produce a keypair.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
    /// A key blob does not contain a recognizable PEM-encoded RSA key.
    #[error("key is not a recognizable PEM-encoded RSA key")]
    InvalidKeyFormat,
    /// Signature bytes are missing, empty, or not a decodable signature.
    #[error("signature is missing or not a valid RSA-SHA256 signature")]
    InvalidSignature,
    /// An I/O error occurred reading the artifact.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
