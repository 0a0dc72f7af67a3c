//! Heuristic counterpart matching.
//!
//! Matching is a pure function over normalized contact keys, fully
//! separated from the orchestration that decides what to do with a
//! match — that isolation is what keeps it unit-testable without a
//! store. Matching never mutates state and never errors: no match is
//! an empty result, not a failure.

use crate::models::{patient::Patient, staff::Staff, user::User};
use crate::normalize::{email_key, phone_key};

/// Contact fields a record exposes for cross-entity matching.
pub trait ContactRecord {
    fn phone(&self) -> Option<&str>;
    fn email(&self) -> Option<&str>;
}

impl ContactRecord for User {
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl ContactRecord for Patient {
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl ContactRecord for Staff {
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

fn source_phone_key(source: &impl ContactRecord) -> Option<String> {
    source.phone().and_then(phone_key)
}

fn source_email_key(source: &impl ContactRecord) -> Option<String> {
    source.email().and_then(email_key)
}

/// Find the zero-or-one counterpart for `source` in `pool`.
///
/// A normalized-phone match anywhere in the pool wins over any email
/// match; within each key the first candidate in pool (creation)
/// order wins. Records whose keys normalize to empty never join.
pub fn find_counterpart<'a, T: ContactRecord>(
    source: &impl ContactRecord,
    pool: &'a [T],
) -> Option<&'a T> {
    if let Some(key) = source_phone_key(source) {
        if let Some(hit) = pool
            .iter()
            .find(|c| c.phone().and_then(phone_key).as_deref() == Some(&key))
        {
            return Some(hit);
        }
    }
    if let Some(key) = source_email_key(source) {
        if let Some(hit) = pool
            .iter()
            .find(|c| c.email().and_then(email_key).as_deref() == Some(&key))
        {
            return Some(hit);
        }
    }
    None
}

/// Phone-only variant used by the staff relink pass.
pub fn find_counterpart_by_phone<'a, T: ContactRecord>(
    source: &impl ContactRecord,
    pool: &'a [T],
) -> Option<&'a T> {
    let key = source_phone_key(source)?;
    pool.iter()
        .find(|c| c.phone().and_then(phone_key).as_deref() == Some(&key))
}

/// How many pool records match `source` on the key that decides the
/// match (phone when it hits anything, email otherwise).
///
/// Anything above one means the first-in-pool tie-break silently
/// picked a winner; orchestrators report that so operators can see
/// duplicate contact data instead of it linking the wrong record
/// invisibly. A phone hit plus an email hit on a different record is
/// not ambiguous: phone-first resolves it.
pub fn count_candidates<T: ContactRecord>(source: &impl ContactRecord, pool: &[T]) -> usize {
    if let Some(key) = source_phone_key(source) {
        let hits = pool
            .iter()
            .filter(|c| c.phone().and_then(phone_key).as_deref() == Some(&key))
            .count();
        if hits > 0 {
            return hits;
        }
    }
    if let Some(key) = source_email_key(source) {
        return pool
            .iter()
            .filter(|c| c.email().and_then(email_key).as_deref() == Some(&key))
            .count();
    }
    0
}
