//! Tree codec and working-tree adapter: the bridge between the filesystem
//! and tree objects. `write_tree`/`get_working_tree` go working-dir → map;
//! `get_tree` flattens a tree object into the same `path -> blob OID` shape;
//! `read_tree`/`write_files` go the other way, back onto disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use kit_diff::TreeMap;
use kit_hash::ObjectId;
use kit_object::{EntryKind, ObjectType, Tree, TreeEntry};
use kit_odb::ObjectStore;

use crate::context::{self, is_ignored};
use crate::error::RepoError;
use crate::stores;

/// Snapshot the working directory into a tree object, recursively. Entries
/// under the repository directory are skipped.
pub fn write_tree() -> Result<ObjectId, RepoError> {
    let store = stores::odb();
    write_tree_at(&store, &context::working_dir())
}

fn write_tree_at(store: &ObjectStore, dir: &Path) -> Result<ObjectId, RepoError> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if is_ignored(&path) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            let oid = write_tree_at(store, &path)?;
            entries.push(TreeEntry {
                kind: EntryKind::Tree,
                oid,
                name: name.into(),
            });
        } else if file_type.is_file() {
            let content = fs::read(&path)?;
            let oid = store.hash_object(&content, ObjectType::Blob)?;
            entries.push(TreeEntry {
                kind: EntryKind::Blob,
                oid,
                name: name.into(),
            });
        }
    }

    let mut tree = Tree { entries };
    tree.sort();
    Ok(store.hash_object(&tree.serialize_content(), ObjectType::Tree)?)
}

/// Recursively flatten the tree at `oid` into a `path -> blob OID` map.
pub fn get_tree(oid: ObjectId) -> Result<TreeMap, RepoError> {
    let store = stores::odb();
    let mut out = BTreeMap::new();
    flatten_tree(&store, oid, "", &mut out)?;
    Ok(out)
}

fn flatten_tree(
    store: &ObjectStore,
    oid: ObjectId,
    base: &str,
    out: &mut TreeMap,
) -> Result<(), RepoError> {
    let content = store.get_object(&oid, Some(ObjectType::Tree))?;
    let tree = Tree::parse(&content)?;

    for entry in tree.iter() {
        let name = entry.name.to_str().map_err(|_| RepoError::MalformedTreeEntry {
            path: base.to_string(),
            reason: "non-UTF-8 entry name".to_string(),
        })?;
        let path = format!("{base}{name}");

        match entry.kind {
            EntryKind::Blob => {
                out.insert(path, entry.oid);
            }
            EntryKind::Tree => {
                flatten_tree(store, entry.oid, &format!("{path}/"), out)?;
            }
        }
    }
    Ok(())
}

/// Walk the working directory into a `path -> blob OID` map, hashing (but
/// not otherwise touching) every regular file. Hashing is idempotent, so
/// this has no effect on an object already on disk.
pub fn get_working_tree() -> Result<TreeMap, RepoError> {
    let store = stores::odb();
    let root = context::working_dir();
    let mut out = BTreeMap::new();
    walk_working_tree(&store, &root, &root, &mut out)?;
    Ok(out)
}

fn walk_working_tree(
    store: &ObjectStore,
    dir: &Path,
    root: &Path,
    out: &mut TreeMap,
) -> Result<(), RepoError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if is_ignored(&path) {
            continue;
        }
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk_working_tree(store, &path, root, out)?;
        } else if file_type.is_file() {
            let content = fs::read(&path)?;
            let oid = store.hash_object(&content, ObjectType::Blob)?;
            let rel = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            out.insert(rel, oid);
        }
    }
    Ok(())
}

/// Empty the current working directory, skipping ignored paths, then
/// materialize every blob from the tree at `oid`.
pub fn read_tree(oid: ObjectId) -> Result<(), RepoError> {
    clear_working_directory()?;
    let store = stores::odb();
    let map = get_tree(oid)?;
    let root = context::working_dir();
    for (path, blob_oid) in map {
        let content = store.get_object(&blob_oid, Some(ObjectType::Blob))?;
        write_file(&root.join(&path), &content)?;
    }
    Ok(())
}

/// Materialize a `path -> bytes` map directly to disk, as produced by
/// [`kit_merge::merge_trees`] — bytes here are never hashed into an object;
/// committing the result is a separate, explicit step.
pub fn write_files(files: &BTreeMap<String, Vec<u8>>) -> Result<(), RepoError> {
    let root = context::working_dir();
    for (path, content) in files {
        write_file(&root.join(path), content)?;
    }
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), RepoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Remove the working directory's contents, ignoring the repository
/// directory. Regular files are removed unconditionally; empty directories
/// are removed best-effort; a directory that can't be removed (because it's
/// not actually empty, e.g. it holds only ignored paths) is left behind —
/// the subsequent write recreates whatever paths it needs.
pub fn clear_working_directory() -> Result<(), RepoError> {
    empty_dir(&context::working_dir())
}

fn empty_dir(dir: &Path) -> Result<(), RepoError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if is_ignored(&path) {
            continue;
        }
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            empty_dir(&path)?;
            let _ = fs::remove_dir(&path);
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join(".agit");
        fs::create_dir_all(&repo_dir).unwrap();
        (dir, repo_dir)
    }

    #[test]
    fn write_then_get_tree_round_trips_paths() {
        let (dir, repo_dir) = repo();
        fs::write(dir.path().join("a.txt"), b"A").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.txt"), b"B").unwrap();

        context::with_repo_dir(repo_dir, || {
            let oid = write_tree().unwrap();
            let map = get_tree(oid).unwrap();
            assert_eq!(map.len(), 2);
            assert!(map.contains_key("a.txt"));
            assert!(map.contains_key("sub/b.txt"));
        });
    }

    #[test]
    fn read_tree_restores_files_after_emptying() {
        let (dir, repo_dir) = repo();
        fs::write(dir.path().join("a.txt"), b"A").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.txt"), b"B").unwrap();

        context::with_repo_dir(repo_dir, || {
            let oid = write_tree().unwrap();
            fs::remove_file(dir.path().join("a.txt")).unwrap();
            fs::remove_file(dir.path().join("sub").join("b.txt")).unwrap();
            read_tree(oid).unwrap();
            assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"A");
            assert_eq!(fs::read(dir.path().join("sub").join("b.txt")).unwrap(), b"B");
        });
    }

    #[test]
    fn get_working_tree_skips_repo_dir() {
        let (dir, repo_dir) = repo();
        fs::write(dir.path().join("a.txt"), b"A").unwrap();

        context::with_repo_dir(repo_dir, || {
            let map = get_working_tree().unwrap();
            assert_eq!(map.len(), 1);
            assert!(map.contains_key("a.txt"));
        });
    }

    #[test]
    fn write_files_materializes_bytes_directly() {
        let (dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            let mut files = BTreeMap::new();
            files.insert("x.txt".to_string(), b"hello".to_vec());
            files.insert("nested/y.txt".to_string(), b"world".to_vec());
            write_files(&files).unwrap();
        });
        assert_eq!(fs::read(dir.path().join("x.txt")).unwrap(), b"hello");
        assert_eq!(fs::read(dir.path().join("nested").join("y.txt")).unwrap(), b"world");
    }
}
