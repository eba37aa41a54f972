//! Resolve a user-supplied name — `@`, a bare ref name, or a raw hex OID —
//! to an object id.

use kit_hash::{ObjectId, HEX_LEN};
use kit_ref::HEAD;

use crate::error::RepoError;
use crate::stores;

/// Resolve `name` to an OID:
/// 1. `@` is shorthand for `HEAD`.
/// 2. Try, in order, `<name>`, `refs/<name>`, `refs/tags/<name>`,
///    `refs/heads/<name>` — the first whose non-dereffed value exists is
///    dereferenced and returned.
/// 3. Otherwise, a bare 40-hex string is returned as-is.
/// 4. Otherwise, `UnknownName`.
pub fn get_oid(name: &str) -> Result<ObjectId, RepoError> {
    let name = if name == "@" { HEAD.to_string() } else { name.to_string() };
    let refs = stores::refs();

    let candidates = [
        name.clone(),
        format!("refs/{name}"),
        format!("refs/tags/{name}"),
        format!("refs/heads/{name}"),
    ];

    for candidate in &candidates {
        if refs.get_ref(candidate, false)?.is_some() {
            return match refs.get_ref(candidate, true)?.and_then(|v| v.as_oid().copied()) {
                Some(oid) => Ok(oid),
                None => Err(RepoError::UnknownName(name)),
            };
        }
    }

    if name.len() == HEX_LEN && name.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Ok(ObjectId::from_hex(&name)?);
    }

    Err(RepoError::UnknownName(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context;
    use kit_ref::RefValue;

    fn repo() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join(".agit");
        std::fs::create_dir_all(&repo_dir).unwrap();
        (dir, repo_dir)
    }

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_hex(&format!("{:02x}", byte).repeat(20)).unwrap()
    }

    #[test]
    fn at_resolves_through_head() {
        let (_dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            let refs = stores::refs();
            let id = oid(1);
            refs.update_ref("refs/heads/master", RefValue::Direct(id), true).unwrap();
            refs.update_ref(HEAD, RefValue::Symbolic("refs/heads/master".to_string()), false)
                .unwrap();
            assert_eq!(get_oid("@").unwrap(), id);
        });
    }

    #[test]
    fn bare_branch_name_resolves_via_refs_heads() {
        let (_dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            let id = oid(2);
            stores::refs()
                .update_ref("refs/heads/dev", RefValue::Direct(id), true)
                .unwrap();
            assert_eq!(get_oid("dev").unwrap(), id);
        });
    }

    #[test]
    fn tag_name_resolves_via_refs_tags() {
        let (_dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            let id = oid(3);
            stores::refs()
                .update_ref("refs/tags/v1", RefValue::Direct(id), true)
                .unwrap();
            assert_eq!(get_oid("v1").unwrap(), id);
        });
    }

    #[test]
    fn raw_hex_oid_passes_through() {
        let (_dir, repo_dir) = repo();
        let hex = "0".repeat(40);
        context::with_repo_dir(repo_dir, || {
            assert_eq!(get_oid(&hex).unwrap().to_hex(), hex);
        });
    }

    #[test]
    fn unknown_name_errors() {
        let (_dir, repo_dir) = repo();
        context::with_repo_dir(repo_dir, || {
            assert!(matches!(get_oid("nope"), Err(RepoError::UnknownName(_))));
        });
    }
}
