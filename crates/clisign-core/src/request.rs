//! Signing request and response value types.

use std::path::PathBuf;

use serde::Serialize;

use crate::descriptor::TrustDescriptor;

/// Caller-supplied input for one signing operation. Read-only once built.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// Path to the packaged release tarball to sign.
    pub target_file_to_sign: PathBuf,
    /// Package name, optionally namespaced (`@scope/name`), kept verbatim.
    pub package_name: String,
    /// Opaque version string. Semver expected but not validated here.
    pub package_version: String,
    /// Whether to publish the key and signature to object storage.
    pub upload: bool,
}

/// Everything a successful signing operation produces.
///
/// Immutable once constructed. The descriptor is what the caller embeds
/// into the package manifest before the artifact is packaged for
/// distribution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningResponse {
    /// SPKI/PEM public key text.
    pub public_key_contents: String,
    /// Base64-encoded RSA-SHA256 signature over the artifact bytes.
    pub signature_contents: String,
    /// URLs where the key and signature resolve once published.
    pub trust_descriptor: TrustDescriptor,
    /// The artifact that was signed.
    pub file_tar_path: PathBuf,
    /// Package name the descriptor was derived from.
    pub package_name: String,
    /// Package version the descriptor was derived from.
    pub package_version: String,
}
