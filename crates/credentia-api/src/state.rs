//! # Application State
//!
//! The explicit context object passed to every handler: document store,
//! blob store, and the certificate issuer built over them. There is no
//! process-wide "current principal" — the caller is resolved per request
//! by the [`Caller`](crate::auth::Caller) extractor.

use std::sync::Arc;

use credentia_issuance::CertificateIssuer;
use credentia_store::{BlobStore, DocumentStore, MemoryBlobStore};

/// Shared application state. Cheap to clone; all fields are handles.
#[derive(Clone)]
pub struct AppState {
    /// The record collections.
    pub documents: Arc<DocumentStore>,
    /// Certificate file bytes.
    pub blobs: Arc<dyn BlobStore>,
    /// Issuance pipeline over the two stores.
    pub issuer: CertificateIssuer,
}

impl AppState {
    /// Build state over the given stores.
    pub fn new(documents: Arc<DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        let issuer = CertificateIssuer::new(Arc::clone(&documents), Arc::clone(&blobs));
        Self {
            documents,
            blobs,
            issuer,
        }
    }

    /// Fully in-memory state for tests and ephemeral deployments.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(DocumentStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
    }
}
