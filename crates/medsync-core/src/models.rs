//! Domain models for MedSync.
//!
//! The three independently-created entities the linkage engine keeps
//! associated: login identities, clinical records, employment records.

pub mod patient;
pub mod staff;
pub mod user;
