//! Three-way merge over flattened trees (`path -> blob oid` maps).

use std::collections::{BTreeMap, BTreeSet};

use kit_hash::ObjectId;
use kit_object::ObjectType;
use kit_odb::ObjectStore;

use crate::content::{merge_content, MergeLabels};

/// A hook that three-way merges one path, given the blob OID on each side
/// (`None` meaning "absent on that side"). Returns the merged bytes, with
/// conflict markers embedded when the merge could not be resolved cleanly.
/// The hook loads blob content itself.
pub type BlobMerge<'a> =
    dyn Fn(Option<ObjectId>, Option<ObjectId>, Option<ObjectId>, &str) -> Vec<u8> + 'a;

/// Merge `head` and `other` against their common `base`, path by path. Every
/// path present in any of the three trees is visited once. The result is a
/// new `path -> bytes` map meant to be written directly to the working
/// tree — it is never hashed into a tree object here.
pub fn merge_trees(
    base: &BTreeMap<String, ObjectId>,
    head: &BTreeMap<String, ObjectId>,
    other: &BTreeMap<String, ObjectId>,
    blob_merge: &BlobMerge,
) -> BTreeMap<String, Vec<u8>> {
    let mut paths: BTreeSet<&str> = BTreeSet::new();
    paths.extend(base.keys().map(String::as_str));
    paths.extend(head.keys().map(String::as_str));
    paths.extend(other.keys().map(String::as_str));

    paths
        .into_iter()
        .map(|path| {
            let merged = blob_merge(
                base.get(path).copied(),
                head.get(path).copied(),
                other.get(path).copied(),
                path,
            );
            (path.to_string(), merged)
        })
        .collect()
}

/// A `blob_merge` hook that loads blobs from `store` and three-way merges
/// them with the line-level content merge. Absent sides are treated as
/// empty content.
pub fn default_blob_merge<'a>(
    store: &'a ObjectStore,
) -> impl Fn(Option<ObjectId>, Option<ObjectId>, Option<ObjectId>, &str) -> Vec<u8> + 'a {
    move |base, head, other, _path| {
        let load = |oid: Option<ObjectId>| {
            oid.and_then(|oid| store.get_object(&oid, Some(ObjectType::Blob)).ok())
                .unwrap_or_default()
        };
        let base = load(base);
        let ours = load(head);
        let theirs = load(other);
        merge_content(&base, &ours, &theirs, &MergeLabels::default())
            .content()
            .to_vec()
    }
}
