use bstr::{BStr, BString, ByteSlice};
use kit_hash::ObjectId;

use crate::ObjectError;

/// A commit: a tree snapshot, its parents, and a free-form message.
///
/// No author/committer identity, no encoding header, no signatures — an
/// unrecognized header is a format error rather than a preserved extra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// OID of the root tree.
    pub tree: ObjectId,
    /// Parent commit OIDs in recorded order; the first is the mainline predecessor.
    pub parents: Vec<ObjectId>,
    /// Everything after the blank line separator.
    pub message: BString,
}

impl Commit {
    pub fn new(tree: ObjectId, parents: Vec<ObjectId>, message: BString) -> Self {
        Self {
            tree,
            parents,
            message,
        }
    }

    /// Parse commit content: header lines until a blank line, then the message.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut tree: Option<ObjectId> = None;
        let mut parents = Vec::new();

        let mut pos = 0;
        loop {
            if pos >= content.len() {
                break;
            }
            if content[pos] == b'\n' {
                pos += 1;
                break;
            }

            let line_end = content[pos..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|p| p + pos)
                .unwrap_or(content.len());
            let line = &content[pos..line_end];

            let space_pos = line.iter().position(|&b| b == b' ').ok_or_else(|| {
                ObjectError::InvalidHeader("commit header missing space".into())
            })?;
            let key = &line[..space_pos];
            let value = &line[space_pos + 1..];

            match key {
                b"tree" => {
                    let hex = std::str::from_utf8(value)
                        .map_err(|_| ObjectError::InvalidHeader("non-UTF8 tree oid".into()))?;
                    tree = Some(ObjectId::from_hex(hex)?);
                }
                b"parent" => {
                    let hex = std::str::from_utf8(value)
                        .map_err(|_| ObjectError::InvalidHeader("non-UTF8 parent oid".into()))?;
                    parents.push(ObjectId::from_hex(hex)?);
                }
                other => {
                    return Err(ObjectError::UnknownCommitHeader(
                        String::from_utf8_lossy(other).into_owned(),
                    ));
                }
            }

            pos = line_end + 1;
        }

        let tree = tree.ok_or(ObjectError::MissingCommitField { field: "tree" })?;
        let message = BString::from(&content[pos..]);

        Ok(Self {
            tree,
            parents,
            message,
        })
    }

    /// Serialize to `tree`/`parent` header lines, a blank line, then the message.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut out = Vec::new();

        out.extend_from_slice(b"tree ");
        out.extend_from_slice(self.tree.to_hex().as_bytes());
        out.push(b'\n');

        for parent in &self.parents {
            out.extend_from_slice(b"parent ");
            out.extend_from_slice(parent.to_hex().as_bytes());
            out.push(b'\n');
        }

        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn summary(&self) -> &BStr {
        let msg: &[u8] = self.message.as_ref();
        match msg.find_byte(b'\n') {
            Some(pos) => BStr::new(&msg[..pos]),
            None => BStr::new(msg),
        }
    }
}
