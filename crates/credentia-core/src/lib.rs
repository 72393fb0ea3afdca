//! # credentia-core — Foundational Types for Credentia
//!
//! This crate is the bedrock of the Credentia stack. It defines the
//! type-system primitives shared by every other crate in the workspace;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `SchoolId`, `StudentId`,
//!    `CompanyId`, `CertificateId`, `GrantId` — all newtypes over `Uuid`.
//!    No bare strings or raw UUIDs for identifiers: you cannot pass a
//!    `StudentId` where a `CompanyId` is expected.
//!
//! 2. **Single `Role` enum.** One closed definition with three variants and
//!    exhaustive `match` everywhere. Adding a role forces every consumer to
//!    handle it at compile time — role branching is never done by comparing
//!    strings.
//!
//! 3. **`ContentDigest` for file integrity.** All certificate file digests
//!    flow through [`sha256_digest()`] and carry an algorithm tag. Digests
//!    serialize as `sha256:<64 hex>` strings.
//!
//! 4. **Immutable records.** `StudentRecord` and `Certificate` have no
//!    mutating methods — once written they are never changed, matching the
//!    storage model where neither has an update or delete path.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `credentia-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod digest;
pub mod error;
pub mod identity;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::CoreError;
pub use identity::{
    CertificateId, CompanyId, GrantId, Principal, PrincipalId, Role, SchoolId, StudentId,
};
pub use record::{Certificate, StudentRecord};
