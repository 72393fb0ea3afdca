//! # Route Modules
//!
//! Each module defines an Axum Router for one role's surface area.
//! Routers are assembled in [`crate::app`] into the application.

pub mod company;
pub mod school;
pub mod session;
pub mod student;
