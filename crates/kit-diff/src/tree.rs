//! Flattened-tree comparison: `compare_trees`, `iter_changed_files`, `diff_trees`.

use std::collections::{BTreeMap, BTreeSet};

use kit_hash::ObjectId;
use kit_object::ObjectType;
use kit_odb::ObjectStore;

use crate::algorithm;
use crate::BlobDiff;

/// A flattened tree: every blob path mapped to its OID. Produced by the
/// working-tree adapter's `get_tree`/`get_working_tree`/`get_index_tree`.
pub type TreeMap = BTreeMap<String, ObjectId>;

/// The kind of change at a path between two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    New,
    Deleted,
    Modified,
}

/// Align N flattened trees by path. Paths missing from a given tree appear
/// as `None` in that tree's column. Order is unspecified.
pub fn compare_trees(trees: &[&TreeMap]) -> Vec<(String, Vec<Option<ObjectId>>)> {
    let mut paths: BTreeSet<&str> = BTreeSet::new();
    for tree in trees {
        paths.extend(tree.keys().map(String::as_str));
    }

    paths
        .into_iter()
        .map(|path| {
            let row = trees.iter().map(|tree| tree.get(path).copied()).collect();
            (path.to_string(), row)
        })
        .collect()
}

/// Paths that differ between `t1` and `t2`, with the kind of difference.
pub fn iter_changed_files(t1: &TreeMap, t2: &TreeMap) -> Vec<(String, ChangeAction)> {
    compare_trees(&[t1, t2])
        .into_iter()
        .filter_map(|(path, row)| {
            let (a, b) = (row[0], row[1]);
            let action = match (a, b) {
                (None, Some(_)) => ChangeAction::New,
                (Some(_), None) => ChangeAction::Deleted,
                (Some(a), Some(b)) if a != b => ChangeAction::Modified,
                _ => return None,
            };
            Some((path, action))
        })
        .collect()
}

/// Concatenate per-path diff hunks for every changed path between `t1` and
/// `t2`, produced by the injected `blob_diff` hook. Output is opaque bytes
/// meant for human display, not further parsing.
pub fn diff_trees(t1: &TreeMap, t2: &TreeMap, blob_diff: &BlobDiff) -> Vec<u8> {
    let mut out = Vec::new();
    for (path, action) in iter_changed_files(t1, t2) {
        let _ = action;
        let from = t1.get(&path).copied();
        let to = t2.get(&path).copied();
        out.extend(blob_diff(from, to, &path));
    }
    out
}

/// A `blob_diff` hook that loads blobs from `store` and renders a minimal
/// unified-style text diff using the Myers line algorithm.
pub fn unified_blob_diff<'a>(store: &'a ObjectStore) -> impl Fn(Option<ObjectId>, Option<ObjectId>, &str) -> Vec<u8> + 'a {
    move |from, to, path| {
        let old = from
            .and_then(|oid| store.get_object(&oid, Some(ObjectType::Blob)).ok())
            .unwrap_or_default();
        let new = to
            .and_then(|oid| store.get_object(&oid, Some(ObjectType::Blob)).ok())
            .unwrap_or_default();

        let mut out = Vec::new();
        out.extend_from_slice(format!("--- {path}\n+++ {path}\n").as_bytes());
        for edit in algorithm::diff_edits(&old, &new) {
            match edit.op {
                algorithm::EditOp::Equal => {}
                algorithm::EditOp::Delete => {
                    let lines = algorithm::split_lines(&old);
                    out.push(b'-');
                    out.extend_from_slice(lines[edit.old_index]);
                }
                algorithm::EditOp::Insert => {
                    let lines = algorithm::split_lines(&new);
                    out.push(b'+');
                    out.extend_from_slice(lines[edit.new_index]);
                }
            }
        }
        out
    }
}
