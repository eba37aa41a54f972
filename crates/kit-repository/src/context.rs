//! The current repository directory as a scoped, thread-local binding.
//!
//! Every store accessor in [`crate::stores`] resolves against whatever
//! directory sits on top of this stack. Rebinding it (see [`with_repo_dir`])
//! is how replication talks to a peer repository without duplicating the
//! store-construction logic: the same `odb()`/`refs()` calls just resolve
//! somewhere else for the duration of the closure.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Name of the repository directory within a working tree.
pub const REPO_DIR_NAME: &str = ".agit";

thread_local! {
    static STACK: RefCell<Vec<PathBuf>> = RefCell::new(vec![PathBuf::from(REPO_DIR_NAME)]);
}

/// The repository directory the current operation targets.
pub fn current_dir() -> PathBuf {
    STACK.with(|s| s.borrow().last().cloned().expect("repo dir stack is never empty"))
}

/// The working directory the current repository directory sits inside.
/// Falls back to `"."` when the repository directory has no parent
/// component (e.g. it was given as a bare name).
pub fn working_dir() -> PathBuf {
    let repo_dir = current_dir();
    match repo_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Restores the previous repository directory binding when dropped. Pushed
/// and popped in strict stack order, so nested rebindings unwind correctly
/// on every exit path, including a panic unwinding through the guard.
pub struct RepoDirGuard {
    _private: (),
}

impl Drop for RepoDirGuard {
    fn drop(&mut self) {
        STACK.with(|s| {
            s.borrow_mut().pop();
        });
    }
}

/// Push `dir` as the current repository directory. The binding is restored
/// when the returned guard is dropped.
pub fn push_repo_dir(dir: impl Into<PathBuf>) -> RepoDirGuard {
    STACK.with(|s| s.borrow_mut().push(dir.into()));
    RepoDirGuard { _private: () }
}

/// Run `f` with the repository directory rebound to `dir`, restoring the
/// previous binding afterward — on success, on error, and on panic.
pub fn with_repo_dir<T>(dir: impl Into<PathBuf>, f: impl FnOnce() -> T) -> T {
    let _guard = push_repo_dir(dir);
    f()
}

/// Is `path` (relative to the working directory) inside the repository
/// directory? The ignore rule per spec: a path whose `/`-split contains the
/// literal component `.agit`.
pub fn is_ignored(path: &Path) -> bool {
    path.components().any(|c| c.as_os_str() == REPO_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dot_agit() {
        assert_eq!(current_dir(), PathBuf::from(REPO_DIR_NAME));
    }

    #[test]
    fn with_repo_dir_restores_previous_binding() {
        let before = current_dir();
        with_repo_dir("/tmp/other/.agit", || {
            assert_eq!(current_dir(), PathBuf::from("/tmp/other/.agit"));
        });
        assert_eq!(current_dir(), before);
    }

    #[test]
    fn restores_binding_even_when_closure_panics() {
        let before = current_dir();
        let result = std::panic::catch_unwind(|| {
            with_repo_dir("/tmp/panics/.agit", || {
                panic!("boom");
            });
        });
        assert!(result.is_err());
        assert_eq!(current_dir(), before);
    }

    #[test]
    fn nested_rebindings_unwind_in_order() {
        let before = current_dir();
        with_repo_dir("/a/.agit", || {
            assert_eq!(current_dir(), PathBuf::from("/a/.agit"));
            with_repo_dir("/b/.agit", || {
                assert_eq!(current_dir(), PathBuf::from("/b/.agit"));
            });
            assert_eq!(current_dir(), PathBuf::from("/a/.agit"));
        });
        assert_eq!(current_dir(), before);
    }

    #[test]
    fn ignore_rule_matches_literal_component() {
        assert!(is_ignored(Path::new("sub/.agit/objects/abc")));
        assert!(!is_ignored(Path::new("sub/agit-like/file")));
    }
}
