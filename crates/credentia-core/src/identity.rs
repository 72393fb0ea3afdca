//! # Roles and Identifier Newtypes
//!
//! Newtype wrappers for every identifier namespace in Credentia, plus the
//! closed [`Role`] enum and the [`Principal`] record.
//!
//! ## Security Invariant
//!
//! Type-level distinction between identifier namespaces prevents
//! cross-namespace confusion — a `StudentId` cannot be passed where a
//! `CompanyId` is expected, so a grant can never be keyed on the wrong
//! side of the relationship.
//!
//! Roles are a closed tagged variant, never strings. Every decision point
//! that branches on role does so with an exhaustive `match`; adding a role
//! is a compile-time-checked change across the whole workspace.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

// ─── Role ────────────────────────────────────────────────────────────

/// The role of an authenticated principal. Fixed at account creation and
/// never re-derived from any other signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A school: enrolls students and issues certificates.
    School,
    /// A student: views their certificates and answers access requests.
    Student,
    /// A company: searches students and requests certificate access.
    Company,
}

impl Role {
    /// Returns the role identifier string used in stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Student => "student",
            Self::Company => "company",
        }
    }

    /// The workspace path a principal with this role is routed to after
    /// identity resolution.
    pub fn workspace_path(&self) -> &'static str {
        match self {
            Self::School => "/dashboard/school",
            Self::Student => "/dashboard/student",
            Self::Company => "/dashboard/company",
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school" => Ok(Self::School),
            "student" => Ok(Self::Student),
            "company" => Ok(Self::Company),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Identifier newtypes ─────────────────────────────────────────────

/// Unique identifier for an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(pub Uuid);

/// Unique identifier for a school. A school's identifier is its
/// principal identifier — the enrolling account and the owning school
/// are the same actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchoolId(pub Uuid);

/// Unique identifier for a student record.
///
/// Distinct from any principal identifier: a student record is created by
/// a school before the student ever signs up. The student principal is
/// linked to the record by email match at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub Uuid);

/// Unique identifier for a company. Like [`SchoolId`], this is the
/// company's principal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub Uuid);

/// Unique identifier for a certificate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId(pub Uuid);

/// Unique identifier for an access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrantId(pub Uuid);

macro_rules! impl_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

impl_id!(PrincipalId, "principal");
impl_id!(SchoolId, "school");
impl_id!(StudentId, "student");
impl_id!(CompanyId, "company");
impl_id!(CertificateId, "certificate");
impl_id!(GrantId, "grant");

// ─── Principal ───────────────────────────────────────────────────────

/// An authenticated actor with exactly one fixed role.
///
/// Created at sign-up. The role is immutable after creation — there is no
/// method that changes it, and no consumer re-derives it from any other
/// signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable identifier, assigned at sign-up.
    pub id: PrincipalId,
    /// Contact email; unique across principals.
    pub email: String,
    /// Fixed role.
    pub role: Role,
}

impl Principal {
    /// Create a new principal with a fresh identifier.
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            id: PrincipalId::new(),
            email: email.into(),
            role,
        }
    }

    /// The school identifier of this principal, if it is a school.
    pub fn school_id(&self) -> Option<SchoolId> {
        match self.role {
            Role::School => Some(SchoolId(self.id.0)),
            Role::Student | Role::Company => None,
        }
    }

    /// The company identifier of this principal, if it is a company.
    pub fn company_id(&self) -> Option<CompanyId> {
        match self.role {
            Role::Company => Some(CompanyId(self.id.0)),
            Role::School | Role::Student => None,
        }
    }
}
