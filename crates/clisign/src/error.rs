//! Error type for the signing orchestrator.

use thiserror::Error;

use crate::store::StoreError;
use clisign_crypto::error::CryptoError;

/// Errors surfaced by a signing operation. Every failure is terminal for
/// the whole operation; there is no partially-succeeded outcome.
#[derive(Debug, Error)]
pub enum SigningError {
    /// Key generation, signing, self-verification, or artifact I/O failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    /// Publishing the key or signature to object storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
