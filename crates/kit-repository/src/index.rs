//! The index: a persisted `path -> blob OID` staging map, conceptually a
//! pre-commit tree. Loaded/saved atomically around each mutation via
//! [`with_index`]; `commit` reads it but never clears it.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use kit_diff::TreeMap;
use kit_hash::ObjectId;
use kit_object::{EntryKind, ObjectType, Tree, TreeEntry};
use kit_odb::ObjectStore;
use kit_utils::tempfile::TempFile;

use crate::context::{self, is_ignored};
use crate::error::RepoError;
use crate::stores;

/// Load the persisted index, or an empty map if none has been written yet.
pub fn get_index() -> Result<TreeMap, RepoError> {
    let path = stores::index_path();
    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(TreeMap::new()),
        Err(e) => return Err(e.into()),
    };
    let raw: BTreeMap<String, String> = serde_json::from_slice(&data)?;
    let mut map = TreeMap::new();
    for (path, hex) in raw {
        map.insert(path, ObjectId::from_hex(&hex)?);
    }
    Ok(map)
}

fn save_index(map: &TreeMap) -> Result<(), RepoError> {
    let raw: BTreeMap<String, String> =
        map.iter().map(|(p, oid)| (p.clone(), oid.to_hex())).collect();
    let bytes = serde_json::to_vec_pretty(&raw)?;

    let path = stores::index_path();
    let mut tmp = TempFile::new_for(&path)?;
    tmp.write_all(&bytes)?;
    tmp.persist(&path)?;
    Ok(())
}

/// Load the index, hand it to `f`, and persist the result only if `f`
/// succeeds. Nothing is written if `f` returns an error.
pub fn with_index<T>(f: impl FnOnce(&mut TreeMap) -> Result<T, RepoError>) -> Result<T, RepoError> {
    let mut index = get_index()?;
    let result = f(&mut index)?;
    save_index(&index)?;
    Ok(result)
}

/// Stage each path: a file is hashed and recorded directly; a directory is
/// recursed into, adding every non-ignored regular file it contains.
pub fn add(paths: impl IntoIterator<Item = impl AsRef<Path>>) -> Result<(), RepoError> {
    let store = stores::odb();
    let root = context::working_dir();
    let paths: Vec<_> = paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();

    with_index(|index| {
        for path in &paths {
            let absolute = if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            };
            add_path(&store, &root, &absolute, index)?;
        }
        Ok(())
    })
}

fn add_path(
    store: &ObjectStore,
    root: &Path,
    path: &Path,
    index: &mut TreeMap,
) -> Result<(), RepoError> {
    if is_ignored(path) {
        return Ok(());
    }
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            add_path(store, root, &entry.path(), index)?;
        }
    } else if metadata.is_file() {
        let content = fs::read(path)?;
        let oid = store.hash_object(&content, ObjectType::Blob)?;
        let rel = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        index.insert(rel, oid);
    }
    Ok(())
}

/// Materialize the persisted index into a nested tree of objects, the same
/// way `write_tree` does from the filesystem, and return its root OID.
pub fn get_index_tree() -> Result<ObjectId, RepoError> {
    let index = get_index()?;
    build_tree_from_map(&stores::odb(), &index)
}

/// Build a tree object from a flat `path -> blob OID` map, grouping entries
/// by path-prefix the way `write_tree` groups by filesystem directory.
pub fn build_tree_from_map(store: &ObjectStore, map: &TreeMap) -> Result<ObjectId, RepoError> {
    if map.is_empty() {
        return Ok(store.hash_object(&Tree::new().serialize_content(), ObjectType::Tree)?);
    }
    let entries: Vec<(&str, ObjectId)> = map.iter().map(|(p, o)| (p.as_str(), *o)).collect();
    build_tree_level(store, &entries)
}

fn build_tree_level(store: &ObjectStore, entries: &[(&str, ObjectId)]) -> Result<ObjectId, RepoError> {
    let mut groups: BTreeMap<&str, Vec<(&str, ObjectId)>> = BTreeMap::new();
    for &(path, oid) in entries {
        match path.split_once('/') {
            Some((head, rest)) => groups.entry(head).or_default().push((rest, oid)),
            None => groups.entry(path).or_default().push(("", oid)),
        }
    }

    let mut tree_entries = Vec::new();
    for (name, items) in groups {
        if items.len() == 1 && items[0].0.is_empty() {
            tree_entries.push(TreeEntry {
                kind: EntryKind::Blob,
                oid: items[0].1,
                name: name.into(),
            });
        } else {
            let oid = build_tree_level(store, &items)?;
            tree_entries.push(TreeEntry {
                kind: EntryKind::Tree,
                oid,
                name: name.into(),
            });
        }
    }

    let mut tree = Tree { entries: tree_entries };
    tree.sort();
    Ok(store.hash_object(&tree.serialize_content(), ObjectType::Tree)?)
}
