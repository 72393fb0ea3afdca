//! # Blob Store — Certificate File Bytes
//!
//! Stores and resolves certificate file bytes by location string. The
//! location recorded on a certificate is the only handle to its bytes:
//! `schools/{school}/students/{student}/{uuid}-{file_name}`.
//!
//! The freshly generated UUID suffix makes every upload land at a new
//! location — re-uploading identical bytes produces a second, independent
//! blob. No dedup, no versioning.
//!
//! ## Security Invariant
//!
//! [`FsBlobStore`] refuses location strings containing `..`, absolute
//! segments, or empty components before touching the filesystem, so a
//! crafted location can never escape the store root.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use parking_lot::RwLock;
use uuid::Uuid;

use credentia_core::{SchoolId, StudentId};

use crate::error::StoreError;

/// Storage for certificate file bytes, addressed by location string.
pub trait BlobStore: Send + Sync {
    /// Store bytes at a location. Overwriting is not an expected case —
    /// locations carry a fresh UUID — but is permitted and last-write-wins.
    fn put(&self, location: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Fetch the bytes stored at a location.
    fn get(&self, location: &str) -> Result<Vec<u8>, StoreError>;
}

/// Build the blob location for a new certificate upload.
///
/// Scoped by school and student identifiers plus a freshly generated
/// unique suffix. The original file name is kept (sanitized) so a human
/// inspecting the store can tell blobs apart.
pub fn certificate_location(school: &SchoolId, student: &StudentId, file_name: &str) -> String {
    format!(
        "schools/{}/students/{}/{}-{}",
        school.as_uuid(),
        student.as_uuid(),
        Uuid::new_v4(),
        sanitize_file_name(file_name),
    )
}

/// Strip path separators and control characters from a submitted file
/// name, keeping it a single safe path component.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    // All-dots names ("..", ".") would read as path navigation.
    if cleaned.chars().all(|c| c == '.') || cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

// ─── Filesystem backend ──────────────────────────────────────────────

/// A blob store backed by the filesystem beneath a root directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create a blob store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a location string to a path under the root, refusing
    /// anything that could navigate outside it.
    fn resolve(&self, location: &str) -> Result<PathBuf, StoreError> {
        if location.is_empty() {
            return Err(StoreError::InvalidLocation(location.to_string()));
        }
        let relative = Path::new(location);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(StoreError::InvalidLocation(location.to_string())),
            }
        }
        Ok(self.root.join(relative))
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, location: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(location)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        Ok(())
    }

    fn get(&self, location: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(location)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::BlobMissing(location.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

// ─── In-memory backend ───────────────────────────────────────────────

/// An in-memory blob store for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, location: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.blobs
            .write()
            .insert(location.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, location: &str) -> Result<Vec<u8>, StoreError> {
        self.blobs
            .read()
            .get(location)
            .cloned()
            .ok_or_else(|| StoreError::BlobMissing(location.to_string()))
    }
}
