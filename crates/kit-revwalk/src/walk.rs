//! Breadth-first commit traversal: mainline-first, each commit visited once.
//!
//! Each commit's first parent is pushed to the front of the frontier, so the
//! mainline is exhausted before the walk backtracks into side branches;
//! remaining parents go to the back. Deterministic for a given start set.

use std::collections::{HashSet, VecDeque};

use kit_hash::ObjectId;
use kit_object::{Commit, ObjectType};
use kit_odb::ObjectStore;

use crate::RevWalkError;

fn read_commit(store: &ObjectStore, oid: &ObjectId) -> Result<Commit, RevWalkError> {
    let (obj_type, content) = store.get_object_with_type(oid)?;
    if obj_type != ObjectType::Commit {
        return Err(RevWalkError::NotACommit(*oid));
    }
    Ok(Commit::parse(&content)?)
}

/// Iterator over a commit's history: itself and every ancestor, mainline-first.
pub struct RevWalk<'a> {
    store: &'a ObjectStore,
    frontier: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'a> RevWalk<'a> {
    pub fn new(store: &'a ObjectStore, starts: impl IntoIterator<Item = ObjectId>) -> Self {
        let mut frontier = VecDeque::new();
        let mut visited = HashSet::new();
        for oid in starts {
            if visited.insert(oid) {
                frontier.push_back(oid);
            }
        }
        Self {
            store,
            frontier,
            visited,
        }
    }
}

impl Iterator for RevWalk<'_> {
    type Item = Result<ObjectId, RevWalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.frontier.pop_front()?;

        let commit = match read_commit(self.store, &oid) {
            Ok(c) => c,
            Err(e) => return Some(Err(e)),
        };

        let mut parents = commit.parents.into_iter();
        if let Some(first) = parents.next() {
            if self.visited.insert(first) {
                self.frontier.push_front(first);
            }
        }
        for parent in parents {
            if self.visited.insert(parent) {
                self.frontier.push_back(parent);
            }
        }

        Some(Ok(oid))
    }
}

/// Walk `starts` and every ancestor reachable through `parent` links.
pub fn iter_commits_and_parents(
    store: &ObjectStore,
    starts: impl IntoIterator<Item = ObjectId>,
) -> RevWalk<'_> {
    RevWalk::new(store, starts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_object::Object;

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
    fn linear_history_visits_each_once_oldest_last() {
        let (_dir, store) = store();
        let root = commit(&store, vec![], "root");
        let mid = commit(&store, vec![root], "mid");
        let tip = commit(&store, vec![mid], "tip");

        let seq: Vec<ObjectId> = iter_commits_and_parents(&store, [tip])
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(seq, vec![tip, mid, root]);
    }

    #[test]
    fn merge_commit_visits_first_parent_before_second() {
        let (_dir, store) = store();
        let root = commit(&store, vec![], "root");
        let left = commit(&store, vec![root], "left");
        let right = commit(&store, vec![root], "right");
        let merge = commit(&store, vec![left, right], "merge");

        let seq: Vec<ObjectId> = iter_commits_and_parents(&store, [merge])
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(seq, vec![merge, left, right, root]);
    }

    #[test]
    fn shared_ancestor_visited_only_once() {
        let (_dir, store) = store();
        let root = commit(&store, vec![], "root");
        let left = commit(&store, vec![root], "left");
        let right = commit(&store, vec![root], "right");

        let seq: Vec<ObjectId> = iter_commits_and_parents(&store, [left, right])
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(seq.iter().filter(|oid| **oid == root).count(), 1);
    }
}
