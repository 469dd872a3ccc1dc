//! Embeds a trust descriptor into a `package.json`-style manifest.

use std::path::Path;

use thiserror::Error;

use crate::descriptor::TrustDescriptor;

/// Manifest property the trust descriptor is written under.
pub const TRUST_PROPERTY: &str = "sfdx";

/// Errors that can occur while rewriting a package manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The manifest is not valid JSON.
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The manifest parses but its top level is not a JSON object.
    #[error("manifest root must be a JSON object")]
    NotAnObject,
}

/// Write `descriptor` into the manifest at `path` under [`TRUST_PROPERTY`],
/// preserving the rest of the document.
///
/// Must run before the artifact is packaged so installers find the URLs
/// inside the shipped manifest.
///
/// # Errors
///
/// Returns [`ManifestError::NotAnObject`] if the manifest root is not a
/// JSON object, and I/O or JSON errors from reading, parsing, or writing
/// the file.
pub fn embed_trust_descriptor(
    path: &Path,
    descriptor: &TrustDescriptor,
) -> Result<(), ManifestError> {
    let raw = std::fs::read_to_string(path)?;
    let mut manifest: serde_json::Value = serde_json::from_str(&raw)?;

    manifest
        .as_object_mut()
        .ok_or(ManifestError::NotAnObject)?
        .insert(TRUST_PROPERTY.to_owned(), serde_json::to_value(descriptor)?);

    std::fs::write(path, serde_json::to_string_pretty(&manifest)?)?;
    Ok(())
}
