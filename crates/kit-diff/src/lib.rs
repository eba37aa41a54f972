//! Comparison of flattened trees (`path -> blob oid` maps) and line-level
//! diffing of the blobs behind changed paths.
//!
//! The tree-level operations here never load tree objects themselves — they
//! work on the `path -> OID` maps produced by the working-tree adapter, so
//! the same code compares a commit's tree, the index, or the working tree
//! uniformly.

pub mod algorithm;
pub mod tree;

use kit_hash::ObjectId;

pub use tree::{compare_trees, diff_trees, iter_changed_files, ChangeAction, TreeMap};

/// A hook that produces human-readable diff bytes for one path, given the
/// blob OID on each side (`None` meaning "this side has no file here").
/// The hook is responsible for loading blob content itself; the core only
/// depends on this signature, never on how the bytes are produced.
pub type BlobDiff<'a> = dyn Fn(Option<ObjectId>, Option<ObjectId>, &str) -> Vec<u8> + 'a;

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error(transparent)]
    Odb(#[from] kit_odb::OdbError),
}
