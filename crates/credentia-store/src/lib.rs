//! # credentia-store — Storage Layer
//!
//! The storage boundary of Credentia. In the deployed system these
//! collections live in a remote document store and a remote object store;
//! this crate gives them a narrow, typed surface so the rest of the stack
//! never touches raw collections.
//!
//! ## Components
//!
//! - [`DocumentStore`] — per-collection `RwLock`ed maps for principals,
//!   student records, certificates, and access grants. Single-record
//!   writes only; no cross-record transactions exist and none are needed.
//!
//! - [`BlobStore`] — certificate file bytes, addressed by the location
//!   string recorded on the certificate. [`FsBlobStore`] writes beneath a
//!   configured root; [`MemoryBlobStore`] backs tests.
//!
//! ## The Pending-Grant Constraint
//!
//! At most one access grant may be `pending` for a given
//! (company, student) pair. The constraint is enforced *inside*
//! [`DocumentStore::insert_grant`], under the grant collection's write
//! lock — not by a caller-side pre-read. Two concurrent requests for the
//! same pair therefore cannot both succeed; the loser gets
//! [`StoreError::PendingGrantExists`].

pub mod blob;
pub mod documents;
pub mod error;

pub use blob::{certificate_location, BlobStore, FsBlobStore, MemoryBlobStore};
pub use documents::DocumentStore;
pub use error::StoreError;
