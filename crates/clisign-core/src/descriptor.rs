//! Trust descriptor: deterministic URLs for published verification material.

use serde::{Deserialize, Serialize};

/// Base URL under which all verification material is served.
pub const BASE_URL: &str = "https://developer.salesforce.com";

/// Path between the base URL and the package identity segments.
pub const SECURITY_PATH: &str = "media/salesforce-cli/security";

/// Bucket the verification material is uploaded to.
///
/// Fixed on purpose: releases pointing at any other bucket are not
/// trusted, so this is a constant rather than configuration.
pub const SIGNING_BUCKET: &str = "dfc-data-production";

/// The `{publicKeyUrl, signatureUrl}` pair embedded into a package
/// manifest so installers can locate verification material without any
/// out-of-band lookup.
///
/// Serialized with camelCase field names because it lands verbatim in a
/// JSON package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustDescriptor {
    /// URL where the PEM public key (`.crt`) resolves once published.
    pub public_key_url: String,
    /// URL where the base64 signature (`.sig`) resolves once published.
    pub signature_url: String,
}

impl TrustDescriptor {
    /// Derive the descriptor for a package identity.
    ///
    /// Pure and reproducible: the same `(name, version)` pair always
    /// yields byte-identical URLs. Namespaced names (`@scope/name`) are
    /// kept verbatim, with no URL-encoding of `@` or `/`, so they produce
    /// multi-segment paths.
    #[must_use]
    pub fn for_package(package_name: &str, package_version: &str) -> Self {
        let prefix = format!("{BASE_URL}/{SECURITY_PATH}/{package_name}/{package_version}");
        Self {
            public_key_url: format!("{prefix}.crt"),
            signature_url: format!("{prefix}.sig"),
        }
    }
}

/// Strip the base URL from a descriptor URL, yielding the object-storage
/// key the material is uploaded under.
///
/// A URL that does not start with [`BASE_URL`] is returned unchanged.
#[must_use]
pub fn object_key(url: &str) -> &str {
    url.strip_prefix(BASE_URL)
        .map_or(url, |rest| rest.trim_start_matches('/'))
}
