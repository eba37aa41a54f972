//! Three-way merge: line-level content merge with conflict markers, and
//! tree-level merge that applies it path by path over flattened trees.

pub mod content;
pub mod tree;

pub use content::{merge_content, ContentMergeResult, MergeLabels};
pub use tree::{default_blob_merge, merge_trees, BlobMerge};

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error(transparent)]
    Odb(#[from] kit_odb::OdbError),
}
