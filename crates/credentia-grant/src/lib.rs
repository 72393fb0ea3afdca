//! # credentia-grant — The Access-Grant State Machine
//!
//! Implements the one entity in Credentia with a lifecycle: the
//! [`AccessGrant`] mediating whether a company may view a given student's
//! certificates.
//!
//! ## State Machine
//!
//! ```text
//! (company requests) ──▶ Pending ──▶ Approved ──▶ Revoked (terminal)
//!                           │
//!                           └──▶ Denied (terminal)
//! ```
//!
//! Only the transitions above exist. `Denied` and `Revoked` are terminal;
//! the distinction between them is purely informational (why access is
//! unavailable), not behavioral — both remove visibility.
//!
//! ## Design
//!
//! Transitions are methods on `AccessGrant` that check the current state
//! and return a structured [`GrantError`] on violation, leaving the grant
//! unchanged. There are no string-typed state names at decision points —
//! every `match` on [`GrantStatus`] is exhaustive.
//!
//! The at-most-one-pending-per-pair invariant is *not* enforced here: it
//! is a property of the grant collection, enforced atomically by the
//! storage layer (`credentia-store`), not by any individual record.

pub mod grant;

pub use grant::{sort_for_display, AccessGrant, GrantError, GrantStatus};
