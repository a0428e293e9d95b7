//! Password digest primitives.
//!
//! Handles computing password digests in the store's formats and comparing
//! them without leaking timing information.

mod compare;
mod digest;

pub use compare::digests_match;
pub use digest::{hash_password, DigestAlgorithm};
