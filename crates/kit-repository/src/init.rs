//! `init`: lay out a fresh repository directory.

use std::fs;

use kit_ref::{RefValue, HEAD};

use crate::context;
use crate::error::RepoError;
use crate::stores;

/// Name `HEAD` is bound to symbolically on a fresh repository.
pub const DEFAULT_BRANCH: &str = "master";

/// Create `objects/` and `refs/{heads,tags}/` under the current repository
/// directory and point `HEAD` symbolically at `refs/heads/master`.
///
/// Safe to call again on an already-initialized repository: existing
/// objects and refs are left untouched.
pub fn init() -> Result<(), RepoError> {
    let repo_dir = context::current_dir();
    fs::create_dir_all(repo_dir.join("objects"))?;
    fs::create_dir_all(repo_dir.join("refs").join("heads"))?;
    fs::create_dir_all(repo_dir.join("refs").join("tags"))?;

    let refs = stores::refs();
    if refs.get_ref(HEAD, false)?.is_none() {
        refs.update_ref(
            HEAD,
            RefValue::Symbolic(format!("refs/heads/{DEFAULT_BRANCH}")),
            false,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_layout_and_symbolic_head() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join(".agit");
        context::with_repo_dir(repo_dir.clone(), || {
            init().unwrap();
            assert!(repo_dir.join("objects").is_dir());
            assert!(repo_dir.join("refs").join("heads").is_dir());
            assert!(repo_dir.join("refs").join("tags").is_dir());
            assert_eq!(
                stores::refs().get_ref(HEAD, false).unwrap(),
                Some(RefValue::Symbolic("refs/heads/master".to_string()))
            );
        });
    }

    #[test]
    fn reinit_is_a_safe_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join(".agit");
        context::with_repo_dir(repo_dir, || {
            init().unwrap();
            let oid = kit_hash::ObjectId::from_hex("0000000000000000000000000000000000000001")
                .unwrap();
            let refs = stores::refs();
            refs.update_ref("refs/heads/master", RefValue::Direct(oid), true)
                .unwrap();
            init().unwrap();
            assert_eq!(
                refs.get_ref("refs/heads/master", false).unwrap(),
                Some(RefValue::Direct(oid))
            );
        });
    }
}
