//! Content-addressing primitives.
//!
//! Every object in the store is named by the hash of its own bytes. This
//! crate owns that single responsibility: hex encode/decode and the
//! [`ObjectId`] type that carries a 20-byte digest around the rest of the
//! workspace. There is exactly one hash algorithm (SHA-1-shaped, 40 hex
//! characters) — no pluggable algorithm, no abbreviation/prefix matching.

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use hasher::hash_object;
pub use oid::ObjectId;

/// Length in bytes of a digest.
pub const DIGEST_LEN: usize = 20;

/// Length in hex characters of a digest's string form.
pub const HEX_LEN: usize = DIGEST_LEN * 2;
