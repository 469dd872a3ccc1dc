//! Signature verification against a public key and artifact stream.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::DigestVerifier;
use rsa::RsaPublicKey;
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// Verify `signature_b64` over the file at `artifact`.
///
/// # Errors
///
/// Same contract as [`verify_reader`], plus the underlying I/O error
/// verbatim if the artifact cannot be opened.
pub fn verify_file(
    public_key_pem: &str,
    signature_b64: &str,
    artifact: &Path,
) -> Result<bool, CryptoError> {
    debug!("verifying signature over {}", artifact.display());
    let file = File::open(artifact)?;
    verify_reader(public_key_pem, signature_b64, BufReader::new(file))
}

/// Recompute the RSA-SHA256 digest over `reader` and validate
/// `signature_b64` against `public_key_pem`.
///
/// Returns `Ok(true)` only on an exact cryptographic match; a mismatch is
/// `Ok(false)`, never an error, so callers can treat it as a boolean
/// check.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidSignature`] if the signature is empty or
/// not decodable, [`CryptoError::InvalidKeyFormat`] if the public key is
/// malformed, and stream I/O errors verbatim.
pub fn verify_reader<R: Read>(
    public_key_pem: &str,
    signature_b64: &str,
    mut reader: R,
) -> Result<bool, CryptoError> {
    let trimmed = signature_b64.trim();
    if trimmed.is_empty() {
        return Err(CryptoError::InvalidSignature);
    }
    let raw = STANDARD
        .decode(trimmed)
        .map_err(|_| CryptoError::InvalidSignature)?;
    let signature =
        Signature::try_from(raw.as_slice()).map_err(|_| CryptoError::InvalidSignature)?;

    let verifying_key = parse_public_key(public_key_pem)?;

    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;

    Ok(verifying_key.verify_digest(hasher, &signature).is_ok())
}

fn parse_public_key(pem: &str) -> Result<VerifyingKey<Sha256>, CryptoError> {
    if !pem.contains("-----BEGIN") {
        return Err(CryptoError::InvalidKeyFormat);
    }
    let key = RsaPublicKey::from_public_key_pem(pem).map_err(|_| CryptoError::InvalidKeyFormat)?;
    Ok(VerifyingKey::new(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_signature_fails_fast() {
        let err = verify_reader("unused", "", io::Cursor::new(b"data")).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidSignature));
    }

    #[test]
    fn whitespace_signature_fails_fast() {
        let err = verify_reader("unused", "  \n", io::Cursor::new(b"data")).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidSignature));
    }

    #[test]
    fn garbage_base64_is_invalid_signature() {
        let err = verify_reader("unused", "not base64!!", io::Cursor::new(b"data")).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidSignature));
    }
}
