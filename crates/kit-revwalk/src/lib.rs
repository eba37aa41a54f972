//! Commit graph traversal: breadth-first history walking, merge-base
//! computation, and enumeration of every object reachable from a set of
//! commits (used by replication to know what to copy).

mod merge_base;
mod objects;
mod walk;

pub use merge_base::get_merge_base;
pub use objects::iter_objects_in_commits;
pub use walk::{iter_commits_and_parents, RevWalk};

use kit_hash::ObjectId;

/// Errors produced by revision walking operations.
#[derive(Debug, thiserror::Error)]
pub enum RevWalkError {
    #[error("object is not a commit: {0}")]
    NotACommit(ObjectId),

    #[error(transparent)]
    Odb(#[from] kit_odb::OdbError),

    #[error(transparent)]
    Object(#[from] kit_object::ObjectError),
}
