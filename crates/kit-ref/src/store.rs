use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use kit_hash::ObjectId;
use kit_utils::lockfile::LockFile;

use crate::{RefError, RefValue, HEAD, MERGE_HEAD};

/// Following a chain of symbolic refs longer than this is treated as a loop.
const MAX_SYMREF_DEPTH: usize = 10;

const SYMREF_PREFIX: &str = "ref: ";

/// A loose-file-only reference store rooted at the repository directory
/// (the same directory that holds `objects/` and `refs/`).
pub struct RefStore {
    root: PathBuf,
}

impl RefStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ref_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Read the raw value stored at `name`, without following symbolic chains.
    fn read_raw(&self, name: &str) -> Result<Option<RefValue>, RefError> {
        let path = self.ref_path(name);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RefError::Io(e)),
        };
        let trimmed = data.trim_end_matches(['\n', '\r']);

        if let Some(target) = trimmed.strip_prefix(SYMREF_PREFIX) {
            return Ok(Some(RefValue::Symbolic(target.trim().to_string())));
        }

        let oid = ObjectId::from_hex(trimmed.trim()).map_err(|_| RefError::MalformedRef {
            name: name.to_string(),
            reason: format!("not a valid object id: {trimmed:?}"),
        })?;
        Ok(Some(RefValue::Direct(oid)))
    }

    /// Read the value at `name`. If `deref` is true and the value is
    /// symbolic, follow the chain to its final value (or `None` if the
    /// chain ends at a ref that doesn't exist yet, e.g. an unborn branch).
    pub fn get_ref(&self, name: &str, deref: bool) -> Result<Option<RefValue>, RefError> {
        let value = self.read_raw(name)?;
        if !deref {
            return Ok(value);
        }
        match value {
            None => Ok(None),
            Some(RefValue::Direct(oid)) => Ok(Some(RefValue::Direct(oid))),
            Some(RefValue::Symbolic(target)) => self.get_ref_depth(&target, MAX_SYMREF_DEPTH),
        }
    }

    fn get_ref_depth(&self, name: &str, depth: usize) -> Result<Option<RefValue>, RefError> {
        if depth == 0 {
            return Err(RefError::SymrefLoop(name.to_string()));
        }
        match self.read_raw(name)? {
            None => Ok(None),
            Some(RefValue::Direct(oid)) => Ok(Some(RefValue::Direct(oid))),
            Some(RefValue::Symbolic(target)) => self.get_ref_depth(&target, depth - 1),
        }
    }

    /// Resolve `name` to the name of the ref that should actually be
    /// written or deleted: itself if direct or deref is false, or the far
    /// end of its symbolic chain if deref is true.
    fn resolve_target_name(&self, name: &str, deref: bool) -> Result<String, RefError> {
        if !deref {
            return Ok(name.to_string());
        }
        let mut current = name.to_string();
        for _ in 0..MAX_SYMREF_DEPTH {
            match self.read_raw(&current)? {
                Some(RefValue::Symbolic(target)) => current = target,
                _ => return Ok(current),
            }
        }
        Err(RefError::SymrefLoop(name.to_string()))
    }

    fn write_value(&self, name: &str, value: &RefValue) -> Result<(), RefError> {
        let path = self.ref_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = match value {
            RefValue::Direct(oid) => format!("{}\n", oid.to_hex()),
            RefValue::Symbolic(target) => format!("{SYMREF_PREFIX}{target}\n"),
        };
        let mut lock = LockFile::acquire(&path)?;
        lock.write_all(contents.as_bytes())?;
        lock.commit()?;
        Ok(())
    }

    /// Write `value` at `name`. When `deref` is true and `name` currently
    /// resolves through one or more symbolic refs, the write lands on the
    /// final ref in the chain instead (e.g. updating `HEAD` moves the
    /// branch it points at, rather than making `HEAD` direct).
    pub fn update_ref(&self, name: &str, value: RefValue, deref: bool) -> Result<(), RefError> {
        let target = self.resolve_target_name(name, deref)?;
        self.write_value(&target, &value)
    }

    /// Remove the ref at `name`, following symbolic chains first if `deref`.
    pub fn delete_ref(&self, name: &str, deref: bool) -> Result<(), RefError> {
        let target = self.resolve_target_name(name, deref)?;
        let path = self.ref_path(&target);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(RefError::Io(e)),
        }
        Ok(())
    }

    /// Enumerate every ref whose name begins with `prefix`: `HEAD` and
    /// `MERGE_HEAD` if present, plus every file under `refs/`.
    pub fn iter_refs(
        &self,
        prefix: &str,
        deref: bool,
    ) -> Result<Vec<(String, RefValue)>, RefError> {
        let mut out = Vec::new();

        for special in [HEAD, MERGE_HEAD] {
            if special.starts_with(prefix) || prefix.is_empty() {
                if let Some(value) = self.get_ref(special, deref)? {
                    out.push((special.to_string(), value));
                }
            }
        }

        let refs_dir = self.root.join("refs");
        if refs_dir.is_dir() {
            let mut names = Vec::new();
            collect_ref_files(&refs_dir, "refs", &mut names)?;
            names.sort();
            for name in names {
                if !name.starts_with(prefix) {
                    continue;
                }
                if let Some(value) = self.get_ref(&name, deref)? {
                    out.push((name, value));
                }
            }
        }

        Ok(out)
    }
}

fn collect_ref_files(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<(), RefError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.ends_with(".lock") {
            continue;
        }
        let name = format!("{prefix}/{file_name}");
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_ref_files(&entry.path(), &name, out)?;
        } else {
            out.push(name);
        }
    }
    Ok(())
}
