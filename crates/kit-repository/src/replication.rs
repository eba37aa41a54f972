//! Local replication: `fetch` and `push` against a second repository
//! directory on the same filesystem. Both rebind the repository context to
//! the peer directory to read or write its stores directly, rather than
//! duplicating store-construction logic for "the other side".

use std::collections::HashSet;
use std::path::PathBuf;

use kit_hash::ObjectId;
use kit_odb::ObjectStore;
use kit_ref::RefValue;
use kit_revwalk::iter_objects_in_commits;

use crate::context;
use crate::error::RepoError;
use crate::stores;

fn branch_oids(prefix: &str) -> Result<Vec<(String, ObjectId)>, RepoError> {
    Ok(stores::refs()
        .iter_refs(prefix, true)?
        .into_iter()
        .filter_map(|(name, value)| value.as_oid().map(|oid| (name, *oid)))
        .collect())
}

/// Copy every object reachable from the remote's branches that's missing
/// locally, then mirror each `refs/heads/<x>` as a local `refs/remotes/<x>`.
pub fn fetch(remote_dir: impl Into<PathBuf>) -> Result<(), RepoError> {
    let remote_dir = remote_dir.into();

    let (remote_branches, remote_store): (Vec<(String, ObjectId)>, ObjectStore) =
        context::with_repo_dir(remote_dir, || -> Result<_, RepoError> {
            Ok((branch_oids("refs/heads/")?, stores::odb()))
        })?;

    let reachable = iter_objects_in_commits(
        &remote_store,
        remote_branches.iter().map(|(_, oid)| *oid),
    )?;

    let local_store = stores::odb();
    for oid in &reachable {
        local_store.copy_from(&remote_store, oid)?;
    }

    let local_refs = stores::refs();
    for (name, oid) in &remote_branches {
        let mirror = name.replacen("refs/heads/", "refs/remotes/", 1);
        local_refs.update_ref(&mirror, RefValue::Direct(*oid), true)?;
    }

    Ok(())
}

/// Push everything reachable from the local `refname` that the remote
/// doesn't already have reachable from its own refs, then update `refname`
/// on the remote to point at the same commit.
///
/// Neither side attempts a fast-forward check; the caller is trusted.
pub fn push(remote_dir: impl Into<PathBuf>, refname: &str) -> Result<(), RepoError> {
    let remote_dir = remote_dir.into();
    let local_store = stores::odb();

    let local_oid = stores::refs()
        .get_ref(refname, true)?
        .and_then(|v| v.as_oid().copied())
        .ok_or_else(|| RepoError::UnknownName(refname.to_string()))?;

    let remote_all: Vec<(String, ObjectId)> =
        context::with_repo_dir(remote_dir.clone(), || branch_oids(""))?;

    // Targets the remote already has, filtered to objects that also exist
    // locally (a remote ref pointing somewhere we can't traverse is treated
    // as "the remote has nothing known there").
    let known_remote_targets: Vec<ObjectId> = remote_all
        .into_iter()
        .map(|(_, oid)| oid)
        .filter(|oid| local_store.object_exists(oid))
        .collect();

    // Traversed against the local store: every target here is already
    // known to exist locally by construction, so its full transitive
    // closure is guaranteed reachable here, which isn't guaranteed of a
    // possibly-stale remote.
    let remote_objects: HashSet<ObjectId> =
        iter_objects_in_commits(&local_store, known_remote_targets)?
            .into_iter()
            .collect();
    let local_objects = iter_objects_in_commits(&local_store, [local_oid])?;

    let to_push: Vec<ObjectId> = local_objects
        .into_iter()
        .filter(|oid| !remote_objects.contains(oid))
        .collect();

    context::with_repo_dir(remote_dir, || -> Result<(), RepoError> {
        let remote_store = stores::odb();
        for oid in &to_push {
            remote_store.copy_from(&local_store, oid)?;
        }
        stores::refs().update_ref(refname, RefValue::Direct(local_oid), true)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commits, index, orchestrator};
    use kit_object::ObjectType;
    use kit_ref::HEAD;
    use std::fs;

    fn init_repo(workdir: &std::path::Path) -> std::path::PathBuf {
        let repo_dir = workdir.join(".agit");
        context::with_repo_dir(repo_dir.clone(), || {
            crate::init::init().unwrap();
        });
        repo_dir
    }

    #[test]
    fn fetch_mirrors_remote_branches() {
        let remote_work = tempfile::tempdir().unwrap();
        let remote_dir = init_repo(remote_work.path());
        let remote_commit = context::with_repo_dir(remote_dir.clone(), || {
            fs::write(remote_work.path().join("r.txt"), b"remote").unwrap();
            index::add(["r.txt"]).unwrap();
            orchestrator::commit("r1").unwrap()
        });

        let local_work = tempfile::tempdir().unwrap();
        let local_dir = init_repo(local_work.path());
        context::with_repo_dir(local_dir, || {
            fetch(remote_dir).unwrap();
            assert_eq!(
                stores::refs().get_ref("refs/remotes/master", true).unwrap(),
                Some(RefValue::Direct(remote_commit))
            );
            assert!(stores::odb().object_exists(&remote_commit));
            let commit = commits::get_commit(remote_commit).unwrap();
            assert!(stores::odb()
                .get_object(&commit.tree, Some(ObjectType::Tree))
                .is_ok());
        });
    }

    #[test]
    fn push_copies_objects_and_updates_remote_ref() {
        let local_work = tempfile::tempdir().unwrap();
        let local_dir = init_repo(local_work.path());
        let local_commit = context::with_repo_dir(local_dir.clone(), || {
            fs::write(local_work.path().join("l.txt"), b"local").unwrap();
            index::add(["l.txt"]).unwrap();
            orchestrator::commit("l1").unwrap()
        });

        let remote_work = tempfile::tempdir().unwrap();
        let remote_dir = init_repo(remote_work.path());

        context::with_repo_dir(local_dir, || {
            push(remote_dir.clone(), HEAD).unwrap();
        });

        context::with_repo_dir(remote_dir, || {
            assert!(stores::odb().object_exists(&local_commit));
        });
    }
}
