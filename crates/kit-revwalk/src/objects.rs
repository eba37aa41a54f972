//! Enumeration of every object reachable from a set of commits: the commits
//! themselves, their trees, and every tree/blob nested inside. Replication
//! uses this to compute what one repository is missing relative to another.

use std::collections::HashSet;

use kit_hash::ObjectId;
use kit_object::{Commit, ObjectType, Tree};
use kit_odb::ObjectStore;

use crate::RevWalkError;

pub fn iter_objects_in_commits(
    store: &ObjectStore,
    commit_oids: impl IntoIterator<Item = ObjectId>,
) -> Result<Vec<ObjectId>, RevWalkError> {
    let mut seen: HashSet<ObjectId> = HashSet::new();
    let mut out = Vec::new();
    let mut stack: Vec<ObjectId> = commit_oids.into_iter().collect();

    while let Some(oid) = stack.pop() {
        if !seen.insert(oid) {
            continue;
        }

        let (obj_type, content) = store.get_object_with_type(&oid)?;
        out.push(oid);

        match obj_type {
            ObjectType::Commit => {
                let commit = Commit::parse(&content)?;
                stack.push(commit.tree);
                stack.extend(commit.parents);
            }
            ObjectType::Tree => {
                let tree = Tree::parse(&content)?;
                stack.extend(tree.entries.into_iter().map(|e| e.oid));
            }
            ObjectType::Blob => {}
        }
    }

    Ok(out)
}
