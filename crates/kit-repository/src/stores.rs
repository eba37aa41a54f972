//! Store handles bound to the current repository directory.
//!
//! These are cheap to construct (a couple of `PathBuf`s), so callers just
//! ask for one whenever they need it rather than threading a handle
//! through every function. That is what makes [`crate::context::with_repo_dir`]
//! transparent: rebind the context, call `odb()`/`refs()` again, and the
//! same code now talks to a different repository.

use std::path::PathBuf;

use kit_odb::ObjectStore;
use kit_ref::RefStore;

use crate::context;

/// Path to the `objects/` directory of the current repository.
pub fn objects_dir() -> PathBuf {
    context::current_dir().join("objects")
}

/// Path to the `index` file of the current repository.
pub fn index_path() -> PathBuf {
    context::current_dir().join("index")
}

/// The object store for the current repository.
pub fn odb() -> ObjectStore {
    ObjectStore::new(objects_dir())
}

/// The reference store for the current repository.
pub fn refs() -> RefStore {
    RefStore::new(context::current_dir())
}
