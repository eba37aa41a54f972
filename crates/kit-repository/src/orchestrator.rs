//! The top-level operations: `commit`, `checkout`, `reset`, `merge`,
//! `create_branch`, `create_tag`, `status`. Everything else in this crate
//! exists to make these few functions simple.

use bstr::BString;
use kit_diff::{iter_changed_files, ChangeAction, TreeMap};
use kit_hash::ObjectId;
use kit_merge::{default_blob_merge, merge_trees};
use kit_object::{Commit, Object, ObjectType};
use kit_ref::{RefValue, HEAD, MERGE_HEAD};
use kit_revwalk::get_merge_base;

use crate::error::RepoError;
use crate::{commits, index, stores, tree};

/// Outcome of a `merge` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// `other` is already an ancestor of `HEAD`; nothing to do.
    AlreadyUpToDate,
    /// `HEAD` was already an ancestor of `other`; `HEAD` was moved forward.
    FastForwarded,
    /// A real merge was performed; `MERGE_HEAD` is set and a `commit` call
    /// is needed to conclude it.
    NeedsCommit,
}

/// A snapshot of repository state for display.
#[derive(Debug, Clone)]
pub struct Status {
    /// Current branch name, or `None` if `HEAD` is detached.
    pub branch: Option<String>,
    /// The in-progress merge target, if any.
    pub merge_head: Option<ObjectId>,
    /// Changes staged but not committed.
    pub head_vs_index: Vec<(String, ChangeAction)>,
    /// Changes in the working tree not yet staged.
    pub index_vs_working: Vec<(String, ChangeAction)>,
}

fn head_oid() -> Result<Option<ObjectId>, RepoError> {
    Ok(stores::refs()
        .get_ref(HEAD, true)?
        .and_then(|v| v.as_oid().copied()))
}

fn merge_head_oid() -> Result<Option<ObjectId>, RepoError> {
    Ok(stores::refs()
        .get_ref(MERGE_HEAD, false)?
        .and_then(|v| v.as_oid().copied()))
}

/// Write a tree from the current index, construct a commit with `parent`
/// lines for `HEAD` (if it resolves) and `MERGE_HEAD` (if present), drop
/// `MERGE_HEAD`, and advance `HEAD` to the new commit.
pub fn commit(message: &str) -> Result<ObjectId, RepoError> {
    let tree_oid = index::get_index_tree()?;

    let mut parents = Vec::new();
    if let Some(oid) = head_oid()? {
        parents.push(oid);
    }
    if let Some(oid) = merge_head_oid()? {
        parents.push(oid);
    }

    let commit = Commit::new(tree_oid, parents, BString::from(message));
    let commit_oid = stores::odb().hash_object(
        &Object::Commit(commit).serialize_content(),
        ObjectType::Commit,
    )?;

    stores::refs().delete_ref(MERGE_HEAD, false)?;
    stores::refs().update_ref(HEAD, RefValue::Direct(commit_oid), true)?;

    Ok(commit_oid)
}

/// Resolve `name` to a commit, restore its tree, then point `HEAD` at it:
/// symbolically at `refs/heads/<name>` if that branch exists, direct
/// (detached) otherwise.
pub fn checkout(name: &str) -> Result<(), RepoError> {
    let oid = crate::name_resolution::get_oid(name)?;
    let commit = commits::get_commit(oid)?;
    tree::read_tree(commit.tree)?;

    let branch_ref = format!("refs/heads/{name}");
    let refs = stores::refs();
    if refs.get_ref(&branch_ref, false)?.is_some() {
        refs.update_ref(HEAD, RefValue::Symbolic(branch_ref), false)?;
    } else {
        refs.update_ref(HEAD, RefValue::Direct(oid), false)?;
    }
    Ok(())
}

/// Move `HEAD` to `oid`, leaving the working tree and index untouched.
pub fn reset(oid: ObjectId) -> Result<(), RepoError> {
    stores::refs().update_ref(HEAD, RefValue::Direct(oid), true)?;
    Ok(())
}

/// Merge `other` into the current branch.
pub fn merge(other: ObjectId) -> Result<MergeOutcome, RepoError> {
    let head = head_oid()?.ok_or_else(|| RepoError::UnknownName(HEAD.to_string()))?;
    let store = stores::odb();
    let base = get_merge_base(&store, head, other)?;

    if base == Some(other) {
        return Ok(MergeOutcome::AlreadyUpToDate);
    }

    let c_other = commits::get_commit(other)?;

    if base == Some(head) {
        stores::refs().update_ref(HEAD, RefValue::Direct(other), true)?;
        tree::read_tree(c_other.tree)?;
        return Ok(MergeOutcome::FastForwarded);
    }

    let c_head = commits::get_commit(head)?;
    let base_map: TreeMap = match base {
        Some(base_oid) => tree::get_tree(commits::get_commit(base_oid)?.tree)?,
        None => TreeMap::new(),
    };
    let head_map = tree::get_tree(c_head.tree)?;
    let other_map = tree::get_tree(c_other.tree)?;

    let blob_merge = default_blob_merge(&store);
    let merged = merge_trees(&base_map, &head_map, &other_map, &blob_merge);

    stores::refs().update_ref(MERGE_HEAD, RefValue::Direct(other), false)?;
    tree::clear_working_directory()?;
    tree::write_files(&merged)?;

    Ok(MergeOutcome::NeedsCommit)
}

/// Write `refs/heads/<name>` directly.
pub fn create_branch(name: &str, oid: ObjectId) -> Result<(), RepoError> {
    stores::refs().update_ref(&format!("refs/heads/{name}"), RefValue::Direct(oid), true)?;
    Ok(())
}

/// Write `refs/tags/<name>` directly.
pub fn create_tag(name: &str, oid: ObjectId) -> Result<(), RepoError> {
    stores::refs().update_ref(&format!("refs/tags/{name}"), RefValue::Direct(oid), true)?;
    Ok(())
}

/// Report the current branch (or detached state), any in-progress merge,
/// and the changes between `HEAD`, the index, and the working tree.
pub fn status() -> Result<Status, RepoError> {
    let refs = stores::refs();
    let branch = match refs.get_ref(HEAD, false)? {
        Some(RefValue::Symbolic(target)) => {
            Some(target.strip_prefix("refs/heads/").unwrap_or(&target).to_string())
        }
        _ => None,
    };
    let merge_head = merge_head_oid()?;

    let head_map = match head_oid()? {
        Some(oid) => tree::get_tree(commits::get_commit(oid)?.tree)?,
        None => TreeMap::new(),
    };
    let index_map = index::get_index()?;
    let working_map = tree::get_working_tree()?;

    Ok(Status {
        branch,
        merge_head,
        head_vs_index: iter_changed_files(&head_map, &index_map),
        index_vs_working: iter_changed_files(&index_map, &working_map),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context;
    use std::fs;

    fn repo() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join(".agit");
        context::with_repo_dir(repo_dir.clone(), || {
            crate::init::init().unwrap();
        });
        (dir, repo_dir)
    }

    #[test]
    fn linear_history_and_log() {
        let (dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            fs::write(dir.path().join("a.txt"), b"1").unwrap();
            index::add(["a.txt"]).unwrap();
            let c1 = commit("c1").unwrap();

            fs::write(dir.path().join("a.txt"), b"2").unwrap();
            index::add(["a.txt"]).unwrap();
            let c2 = commit("c2").unwrap();

            let history: Vec<ObjectId> =
                kit_revwalk::iter_commits_and_parents(&stores::odb(), [c2])
                    .collect::<Result<_, _>>()
                    .unwrap();
            assert_eq!(history, vec![c2, c1]);
            assert_eq!(commits::get_commit(c2).unwrap().parents, vec![c1]);
        });
    }

    #[test]
    fn branch_then_detached_checkout() {
        let (dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            fs::write(dir.path().join("a.txt"), b"1").unwrap();
            index::add(["a.txt"]).unwrap();
            let c1 = commit("c1").unwrap();
            fs::write(dir.path().join("a.txt"), b"2").unwrap();
            index::add(["a.txt"]).unwrap();
            let c2 = commit("c2").unwrap();

            create_branch("dev", c1).unwrap();
            checkout("dev").unwrap();
            assert_eq!(
                stores::refs().get_ref(HEAD, false).unwrap(),
                Some(RefValue::Symbolic("refs/heads/dev".to_string()))
            );

            checkout(&c2.to_hex()).unwrap();
            assert_eq!(
                stores::refs().get_ref(HEAD, false).unwrap(),
                Some(RefValue::Direct(c2))
            );
        });
    }

    #[test]
    fn three_way_merge_produces_expected_path_set() {
        let (dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            fs::write(dir.path().join("x"), b"X0").unwrap();
            fs::write(dir.path().join("y"), b"Y").unwrap();
            index::add(["x", "y"]).unwrap();
            let base = commit("base").unwrap();

            fs::write(dir.path().join("x"), b"X1").unwrap();
            index::add(["x"]).unwrap();
            let head = commit("head").unwrap();

            create_branch("other", base).unwrap();
            checkout("other").unwrap();
            fs::write(dir.path().join("z"), b"Z").unwrap();
            index::add(["x", "y", "z"]).unwrap();
            let other = commit("other").unwrap();

            checkout(&head.to_hex()).unwrap();
            let outcome = merge(other).unwrap();
            assert_eq!(outcome, MergeOutcome::NeedsCommit);
            assert_eq!(fs::read(dir.path().join("x")).unwrap(), b"X1");
            assert_eq!(fs::read(dir.path().join("z")).unwrap(), b"Z");
            assert!(merge_head_oid().unwrap().is_some());
        });
    }

    #[test]
    fn merge_already_ancestor_is_up_to_date() {
        let (dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            fs::write(dir.path().join("a"), b"1").unwrap();
            index::add(["a"]).unwrap();
            let c1 = commit("c1").unwrap();
            fs::write(dir.path().join("a"), b"2").unwrap();
            index::add(["a"]).unwrap();
            let _c2 = commit("c2").unwrap();

            assert_eq!(merge(c1).unwrap(), MergeOutcome::AlreadyUpToDate);
        });
    }
}
