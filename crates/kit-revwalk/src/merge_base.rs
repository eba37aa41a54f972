//! Merge-base computation.
//!
//! Not the paint algorithm: walk the full ancestor set of `a`, then walk the
//! ancestors of `b` in traversal order and return the first one already in
//! that set. Simple, and sufficient since the only consumer is `merge`,
//! which only needs one common ancestor.

use std::collections::HashSet;

use kit_hash::ObjectId;
use kit_odb::ObjectStore;

use crate::walk::iter_commits_and_parents;
use crate::RevWalkError;

pub fn get_merge_base(
    store: &ObjectStore,
    a: ObjectId,
    b: ObjectId,
) -> Result<Option<ObjectId>, RevWalkError> {
    let ancestors_of_a: HashSet<ObjectId> =
        iter_commits_and_parents(store, [a]).collect::<Result<_, _>>()?;

    for oid in iter_commits_and_parents(store, [b]) {
        let oid = oid?;
        if ancestors_of_a.contains(&oid) {
            return Ok(Some(oid));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_object::{Commit, Object, ObjectType};

    fn store() -> (tempfile::TempDir, ObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().join("objects"));
        (dir, store)
    }

    fn commit(store: &ObjectStore, parents: Vec<ObjectId>, message: &str) -> ObjectId {
        let tree = store.hash_object(b"", ObjectType::Tree).unwrap();
        let c = Commit::new(tree, parents, message.as_bytes().into());
        store
            .hash_object(&Object::Commit(c).serialize_content(), ObjectType::Commit)
            .unwrap()
    }

    #[test]
    fn common_ancestor_of_diverged_branches() {
        let (_dir, store) = store();
        let root = commit(&store, vec![], "root");
        let left = commit(&store, vec![root], "left");
        let right = commit(&store, vec![root], "right");

        assert_eq!(get_merge_base(&store, left, right).unwrap(), Some(root));
    }

    #[test]
    fn identical_commit_is_its_own_base() {
        let (_dir, store) = store();
        let root = commit(&store, vec![], "root");
        assert_eq!(get_merge_base(&store, root, root).unwrap(), Some(root));
    }

    #[test]
    fn ancestor_is_the_base_of_its_descendant() {
        let (_dir, store) = store();
        let root = commit(&store, vec![], "root");
        let tip = commit(&store, vec![root], "tip");
        assert_eq!(get_merge_base(&store, root, tip).unwrap(), Some(root));
    }

    #[test]
    fn unrelated_histories_have_no_base() {
        let (_dir, store) = store();
        let a = commit(&store, vec![], "a");
        let b = commit(&store, vec![], "b");
        assert_eq!(get_merge_base(&store, a, b).unwrap(), None);
    }
}
