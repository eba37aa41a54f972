//! Object database: write-once/read-many persistence of typed, content-addressed bytes.
//!
//! One file per object, named by hex OID, under a single flat `objects/`
//! directory — no fan-out, no packfiles, no alternates. Objects are never
//! mutated or deleted once written.

use std::fs;
use std::path::{Path, PathBuf};

use kit_hash::{hash_object, ObjectId};
use kit_object::{header, ObjectType};
use kit_utils::tempfile::TempFile;

#[derive(Debug, thiserror::Error)]
pub enum OdbError {
    #[error("object not found: {0}")]
    MissingObject(ObjectId),

    #[error("type mismatch for {oid}: expected {expected}, got {actual}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: ObjectId, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A flat, loose-object store rooted at `<repo>/objects/`.
pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    pub fn new(objects_dir: impl Into<PathBuf>) -> Self {
        Self {
            objects_dir: objects_dir.into(),
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.to_hex())
    }

    /// Hash `"<type>\0<content>"` and write it if not already present.
    ///
    /// Writing over an existing object with identical content is a no-op by
    /// construction: the file name is the hash of the bytes, so a second
    /// write of the same content targets the same path.
    pub fn hash_object(&self, content: &[u8], obj_type: ObjectType) -> Result<ObjectId, OdbError> {
        let oid = hash_object(obj_type.as_str(), content);
        let path = self.object_path(&oid);
        if !path.exists() {
            fs::create_dir_all(&self.objects_dir)?;
            let mut tmp = TempFile::new_in(&self.objects_dir)?;
            {
                use std::io::Write;
                let hdr = header::write_header(obj_type);
                tmp.write_all(&hdr)?;
                tmp.write_all(content)?;
            }
            tmp.persist(&path)?;
            tracing::debug!(oid = %oid, %obj_type, "wrote object");
        }
        Ok(oid)
    }

    /// Read an object's content, checking its type against `expected` if given.
    pub fn get_object(
        &self,
        oid: &ObjectId,
        expected: Option<ObjectType>,
    ) -> Result<Vec<u8>, OdbError> {
        let path = self.object_path(oid);
        let data = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OdbError::MissingObject(*oid)
            } else {
                OdbError::Io(e)
            }
        })?;

        let (actual, content) = header::split_header(&data).map_err(|e| OdbError::MalformedObject {
            oid: *oid,
            reason: e.to_string(),
        })?;

        if let Some(expected) = expected {
            if actual != expected {
                return Err(OdbError::TypeMismatch {
                    oid: *oid,
                    expected,
                    actual,
                });
            }
        }

        Ok(content.to_vec())
    }

    /// Read an object's raw type tag and content together.
    pub fn get_object_with_type(&self, oid: &ObjectId) -> Result<(ObjectType, Vec<u8>), OdbError> {
        let path = self.object_path(oid);
        let data = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OdbError::MissingObject(*oid)
            } else {
                OdbError::Io(e)
            }
        })?;
        let (obj_type, content) =
            header::split_header(&data).map_err(|e| OdbError::MalformedObject {
                oid: *oid,
                reason: e.to_string(),
            })?;
        Ok((obj_type, content.to_vec()))
    }

    pub fn object_exists(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Copy the raw on-disk file for `oid` from `other` into this store, if missing here.
    pub fn copy_from(&self, other: &ObjectStore, oid: &ObjectId) -> Result<(), OdbError> {
        if self.object_exists(oid) {
            return Ok(());
        }
        fs::create_dir_all(&self.objects_dir)?;
        fs::copy(other.object_path(oid), self.object_path(oid))?;
        Ok(())
    }
}
