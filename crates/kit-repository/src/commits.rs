//! Commit lookup. Factored out from the orchestrator's `commit()` operation
//! to keep "read a commit" and "create a commit" from sharing a name.

use kit_hash::ObjectId;
use kit_object::{Commit, ObjectType};

use crate::error::RepoError;
use crate::stores;

/// Parse the commit at `oid`: headers up to the blank line, then the
/// remainder as the message.
pub fn get_commit(oid: ObjectId) -> Result<Commit, RepoError> {
    let content = stores::odb().get_object(&oid, Some(ObjectType::Commit))?;
    Ok(Commit::parse(&content)?)
}
