//! Signing orchestrator: keygen, sign, self-verify, optional publish.

use log::{debug, info};

use clisign_core::descriptor::{object_key, TrustDescriptor, SIGNING_BUCKET};
use clisign_core::request::{SigningRequest, SigningResponse};
use clisign_crypto::error::CryptoError;
use clisign_crypto::keypair::Keypair;
use clisign_crypto::{signer, verifier};

use crate::error::SigningError;
use crate::store::ObjectStore;

/// Sign `request.target_file_to_sign` with a fresh one-time keypair and,
/// when `request.upload` is set, publish the verification material to
/// [`SIGNING_BUCKET`].
///
/// Linear flow, no retries: any stage failure aborts the whole operation,
/// so callers see either a complete, self-verified [`SigningResponse`] or
/// an error. The signature is always validated against the fresh public
/// key and the artifact before anything touches storage. With
/// `upload: false` no storage call is made at all and the response is
/// still fully populated.
///
/// The keypair lives only inside this call and is dropped on return or
/// error. Concurrent calls share no state.
///
/// # Errors
///
/// Returns [`SigningError::Crypto`] if key generation, signing, artifact
/// I/O, or the self-verify fails, and [`SigningError::Store`] if either
/// upload fails. A publish failure yields no response even though the
/// artifact was signed; re-running the whole operation is the supported
/// recovery.
pub async fn sign_package(
    store: &dyn ObjectStore,
    request: &SigningRequest,
) -> Result<SigningResponse, SigningError> {
    info!(
        "signing {} for {}@{}",
        request.target_file_to_sign.display(),
        request.package_name,
        request.package_version
    );

    let keypair = Keypair::generate()?;
    let signature = signer::sign_file(&keypair.private_key, &request.target_file_to_sign)?;

    // Mandatory self-check: nothing is published unless the fresh
    // signature validates against the fresh key and the artifact.
    if !verifier::verify_file(&keypair.public_key, &signature, &request.target_file_to_sign)? {
        return Err(CryptoError::InvalidSignature.into());
    }
    debug!("self-verify passed for {}", request.package_name);

    let descriptor =
        TrustDescriptor::for_package(&request.package_name, &request.package_version);

    if request.upload {
        tokio::try_join!(
            store.put_object(
                SIGNING_BUCKET,
                object_key(&descriptor.signature_url),
                signature.clone().into_bytes(),
            ),
            store.put_object(
                SIGNING_BUCKET,
                object_key(&descriptor.public_key_url),
                keypair.public_key.clone().into_bytes(),
            ),
        )?;
        info!(
            "published trust material for {}@{}",
            request.package_name, request.package_version
        );
    }

    Ok(SigningResponse {
        public_key_contents: keypair.public_key,
        signature_contents: signature,
        trust_descriptor: descriptor,
        file_tar_path: request.target_file_to_sign.clone(),
        package_name: request.package_name.clone(),
        package_version: request.package_version.clone(),
    })
}
