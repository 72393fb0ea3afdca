//! # Document Store — Typed Record Collections
//!
//! In-process stand-in for the remote document store: one `RwLock`ed map
//! per collection, with the query methods the dashboards need. Every
//! write touches a single record under its collection's write lock;
//! there are no multi-record transactions to roll back.
//!
//! ## Security Invariant
//!
//! The pending-grant uniqueness check and the grant insert happen under
//! the same write lock in [`DocumentStore::insert_grant`]. The
//! check-then-act window that would exist with a caller-side pre-read is
//! structurally absent.

use std::collections::HashMap;

use parking_lot::RwLock;

use credentia_core::{
    Certificate, CertificateId, CompanyId, GrantId, Principal, PrincipalId, SchoolId, StudentId,
    StudentRecord,
};
use credentia_grant::{sort_for_display, AccessGrant, GrantError, GrantStatus};

use crate::error::StoreError;

/// The typed record collections of Credentia.
///
/// Cheap to share: wrap in an `Arc` and clone the handle. All methods
/// take `&self`; interior mutability is per-collection.
#[derive(Debug, Default)]
pub struct DocumentStore {
    principals: RwLock<HashMap<PrincipalId, Principal>>,
    students: RwLock<HashMap<StudentId, StudentRecord>>,
    certificates: RwLock<HashMap<CertificateId, Certificate>>,
    grants: RwLock<HashMap<GrantId, AccessGrant>>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Principals ──────────────────────────────────────────────────

    /// Insert a principal, refusing duplicate email registration.
    pub fn insert_principal(&self, principal: Principal) -> Result<(), StoreError> {
        let mut principals = self.principals.write();
        if principals.values().any(|p| p.email == principal.email) {
            return Err(StoreError::EmailTaken(principal.email));
        }
        principals.insert(principal.id, principal);
        Ok(())
    }

    /// Fetch a principal by identifier.
    pub fn principal(&self, id: &PrincipalId) -> Option<Principal> {
        self.principals.read().get(id).cloned()
    }

    /// Fetch a principal by email.
    pub fn principal_by_email(&self, email: &str) -> Option<Principal> {
        self.principals
            .read()
            .values()
            .find(|p| p.email == email)
            .cloned()
    }

    // ─── Student records ─────────────────────────────────────────────

    /// Insert a student record, refusing a duplicate enrollment email.
    /// Records are immutable once inserted; there is no update or delete
    /// path.
    ///
    /// The email check and the insert happen under one write lock, like
    /// [`insert_grant`](Self::insert_grant): the principal-to-record link
    /// resolves by email, so two records sharing one would make the link
    /// ambiguous.
    pub fn insert_student(&self, record: StudentRecord) -> Result<(), StoreError> {
        let mut students = self.students.write();
        if students.values().any(|s| s.email == record.email) {
            return Err(StoreError::StudentEmailTaken(record.email));
        }
        students.insert(record.id, record);
        Ok(())
    }

    /// Fetch a student record by identifier.
    pub fn student(&self, id: &StudentId) -> Option<StudentRecord> {
        self.students.read().get(id).cloned()
    }

    /// Fetch the student record enrolled under this email, if any.
    ///
    /// This is the principal-to-record link: a student principal sees the
    /// record whose enrollment email matches their sign-up email.
    pub fn student_by_email(&self, email: &str) -> Option<StudentRecord> {
        self.students
            .read()
            .values()
            .find(|s| s.email == email)
            .cloned()
    }

    /// All students enrolled by a school, most recent enrollment year
    /// first, then by name.
    pub fn students_by_school(&self, school_id: &SchoolId) -> Vec<StudentRecord> {
        let mut records: Vec<StudentRecord> = self
            .students
            .read()
            .values()
            .filter(|s| s.owner_school_id == *school_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.enrollment_year
                .cmp(&a.enrollment_year)
                .then_with(|| a.name.cmp(&b.name))
        });
        records
    }

    /// Case-insensitive substring search over name, email, and external
    /// student id. An empty query matches nothing.
    pub fn search_students(&self, query: &str) -> Vec<StudentRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut records: Vec<StudentRecord> = self
            .students
            .read()
            .values()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.email.to_lowercase().contains(&needle)
                    || s.external_student_id.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    // ─── Certificates ────────────────────────────────────────────────

    /// Insert a certificate record. Immutable once inserted.
    pub fn insert_certificate(&self, certificate: Certificate) {
        self.certificates
            .write()
            .insert(certificate.id, certificate);
    }

    /// Fetch a certificate by identifier.
    pub fn certificate(&self, id: &CertificateId) -> Option<Certificate> {
        self.certificates.read().get(id).cloned()
    }

    /// All certificates issued to a student, most recent upload first.
    pub fn certificates_by_student(&self, student_id: &StudentId) -> Vec<Certificate> {
        let mut records: Vec<Certificate> = self
            .certificates
            .read()
            .values()
            .filter(|c| c.student_id == *student_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        records
    }

    /// All certificates issued by a school, most recent upload first.
    pub fn certificates_by_school(&self, school_id: &SchoolId) -> Vec<Certificate> {
        let mut records: Vec<Certificate> = self
            .certificates
            .read()
            .values()
            .filter(|c| c.owner_school_id == *school_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        records
    }

    // ─── Access grants ───────────────────────────────────────────────

    /// Insert an access grant, enforcing the pending-grant uniqueness
    /// constraint: at most one `pending` grant per (company, student)
    /// pair. The check and the insert happen under one write lock, so
    /// concurrent duplicate requests cannot both succeed.
    pub fn insert_grant(&self, grant: AccessGrant) -> Result<(), StoreError> {
        let mut grants = self.grants.write();
        let duplicate = grants.values().any(|g| {
            g.company_id == grant.company_id
                && g.student_id == grant.student_id
                && g.status == GrantStatus::Pending
        });
        if duplicate {
            return Err(StoreError::PendingGrantExists {
                company_id: grant.company_id,
                student_id: grant.student_id,
            });
        }
        grants.insert(grant.id, grant);
        Ok(())
    }

    /// Fetch a grant by identifier.
    pub fn grant(&self, id: &GrantId) -> Option<AccessGrant> {
        self.grants.read().get(id).cloned()
    }

    /// Apply a state-machine transition to a grant in place, returning
    /// the updated record. The closure runs under the write lock; a
    /// rejected transition leaves the stored grant unchanged because the
    /// state machine itself refuses to mutate on error.
    pub fn update_grant(
        &self,
        id: &GrantId,
        transition: impl FnOnce(&mut AccessGrant) -> Result<(), GrantError>,
    ) -> Result<AccessGrant, StoreError> {
        let mut grants = self.grants.write();
        let grant = grants.get_mut(id).ok_or(StoreError::GrantNotFound(*id))?;
        transition(grant)?;
        Ok(grant.clone())
    }

    /// All grants involving a student, in display order.
    pub fn grants_by_student(&self, student_id: &StudentId) -> Vec<AccessGrant> {
        let mut grants: Vec<AccessGrant> = self
            .grants
            .read()
            .values()
            .filter(|g| g.student_id == *student_id)
            .cloned()
            .collect();
        sort_for_display(&mut grants);
        grants
    }

    /// All grants submitted by a company, in display order.
    pub fn grants_by_company(&self, company_id: &CompanyId) -> Vec<AccessGrant> {
        let mut grants: Vec<AccessGrant> = self
            .grants
            .read()
            .values()
            .filter(|g| g.company_id == *company_id)
            .cloned()
            .collect();
        sort_for_display(&mut grants);
        grants
    }

    /// The visibility rule: whether this company currently holds an
    /// approved grant for this student.
    pub fn has_approved_grant(&self, company_id: &CompanyId, student_id: &StudentId) -> bool {
        self.grants.read().values().any(|g| {
            g.company_id == *company_id
                && g.student_id == *student_id
                && g.grants_visibility()
        })
    }
}
