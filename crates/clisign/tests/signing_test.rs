use std::path::{Path, PathBuf};

use clisign::error::SigningError;
use clisign::signing::sign_package;
use clisign::store::{BoxFuture, MemoryObjectStore, ObjectStore, StoreError};
use clisign_core::descriptor::SIGNING_BUCKET;
use clisign_core::request::SigningRequest;
use clisign_crypto::error::CryptoError;

fn write_artifact(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "Mary had a little lamb").unwrap();
    path
}

fn request_for(artifact: PathBuf, name: &str, version: &str, upload: bool) -> SigningRequest {
    SigningRequest {
        target_file_to_sign: artifact,
        package_name: name.to_owned(),
        package_version: version.to_owned(),
        upload,
    }
}

#[tokio::test]
async fn no_upload_returns_full_response_without_storage_calls() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_artifact(dir.path(), "no-namespace-1.0.0.tgz");
    let store = MemoryObjectStore::new();

    let response = sign_package(&store, &request_for(artifact.clone(), "no-namespace", "1.0.0", false))
        .await
        .unwrap();

    assert!(response.public_key_contents.contains("BEGIN PUBLIC KEY"));
    assert!(!response.signature_contents.is_empty());
    assert_eq!(
        response.trust_descriptor.public_key_url,
        "https://developer.salesforce.com/media/salesforce-cli/security/no-namespace/1.0.0.crt"
    );
    assert_eq!(
        response.trust_descriptor.signature_url,
        "https://developer.salesforce.com/media/salesforce-cli/security/no-namespace/1.0.0.sig"
    );
    assert_eq!(response.file_tar_path, artifact);
    assert!(store.objects().is_empty());
}

#[tokio::test]
async fn upload_publishes_signature_and_public_key() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_artifact(dir.path(), "has-namespace-1.0.0.tgz");
    let store = MemoryObjectStore::new();

    let response = sign_package(
        &store,
        &request_for(artifact, "@salesforce/has-namespace", "1.0.0", true),
    )
    .await
    .unwrap();

    let objects = store.objects();
    assert_eq!(objects.len(), 2);
    assert!(objects.iter().all(|o| o.bucket == SIGNING_BUCKET));

    let sig = objects
        .iter()
        .find(|o| o.key == "media/salesforce-cli/security/@salesforce/has-namespace/1.0.0.sig")
        .unwrap();
    assert_eq!(sig.body, response.signature_contents.as_bytes());

    let crt = objects
        .iter()
        .find(|o| o.key == "media/salesforce-cli/security/@salesforce/has-namespace/1.0.0.crt")
        .unwrap();
    assert_eq!(crt.body, response.public_key_contents.as_bytes());
}

/// Accepts `.sig` uploads and fails `.crt` uploads, simulating one of the
/// two concurrent writes going down.
struct CrtOutageStore;

impl ObjectStore for CrtOutageStore {
    fn put_object<'a>(
        &'a self,
        _bucket: &'a str,
        key: &'a str,
        _body: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            if key.ends_with(".crt") {
                Err(StoreError::Upload {
                    key: key.to_owned(),
                    reason: "simulated outage".to_owned(),
                })
            } else {
                Ok(())
            }
        })
    }
}

#[tokio::test]
async fn partial_upload_failure_rejects_the_whole_operation() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_artifact(dir.path(), "pkg-1.0.0.tgz");

    let err = sign_package(&CrtOutageStore, &request_for(artifact, "pkg", "1.0.0", true))
        .await
        .unwrap_err();

    assert!(matches!(err, SigningError::Store(StoreError::Upload { .. })));
}

#[tokio::test]
async fn missing_artifact_propagates_io_error() {
    let store = MemoryObjectStore::new();
    let request = request_for(PathBuf::from("/nonexistent/pkg-1.0.0.tgz"), "pkg", "1.0.0", true);

    let err = sign_package(&store, &request).await.unwrap_err();
    assert!(matches!(err, SigningError::Crypto(CryptoError::Io(_))));
    assert!(store.objects().is_empty());
}

#[tokio::test]
async fn response_serializes_descriptor_for_manifest_embedding() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_artifact(dir.path(), "pkg-2.0.0.tgz");
    let store = MemoryObjectStore::new();

    let response = sign_package(&store, &request_for(artifact, "pkg", "2.0.0", false))
        .await
        .unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json["trustDescriptor"]["publicKeyUrl"],
        response.trust_descriptor.public_key_url.as_str()
    );
    assert_eq!(
        json["trustDescriptor"]["signatureUrl"],
        response.trust_descriptor.signature_url.as_str()
    );
}
