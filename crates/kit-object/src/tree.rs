use bstr::{BStr, BString, ByteSlice};
use kit_hash::ObjectId;

use crate::ObjectError;

/// What kind of object a tree entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Blob,
    Tree,
}

impl EntryKind {
    fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Blob => b"blob",
            Self::Tree => b"tree",
        }
    }

    fn from_bytes(s: &[u8]) -> Option<Self> {
        match s {
            b"blob" => Some(Self::Blob),
            b"tree" => Some(Self::Tree),
            _ => None,
        }
    }
}

/// A single entry in a tree object: a two-case tagged variant, never a mode bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub oid: ObjectId,
    pub name: BString,
}

fn validate_name(name: &[u8], line: usize) -> Result<(), ObjectError> {
    if name.is_empty() {
        return Err(ObjectError::InvalidTreeEntry {
            line,
            reason: "empty name".into(),
        });
    }
    if name.contains(&b'/') {
        return Err(ObjectError::InvalidTreeEntry {
            line,
            reason: "name contains '/'".into(),
        });
    }
    if name == b"." || name == b".." {
        return Err(ObjectError::InvalidTreeEntry {
            line,
            reason: "name is '.' or '..'".into(),
        });
    }
    Ok(())
}

/// A directory snapshot — a sorted set of entries, unique by name.
///
/// Encoded as one line per entry: `"<type> <oid> <name>\n"`, sorted by name
/// ascending (byte-wise). No file modes: every blob is a plain file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse tree content from the text-line format.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut entries = Vec::new();
        for (line_no, line) in content.split(|&b| b == b'\n').enumerate() {
            if line.is_empty() {
                continue;
            }
            let mut parts = line.splitn(3, |&b| b == b' ');
            let kind_bytes = parts.next().ok_or_else(|| ObjectError::InvalidTreeEntry {
                line: line_no,
                reason: "missing type field".into(),
            })?;
            let oid_bytes = parts.next().ok_or_else(|| ObjectError::InvalidTreeEntry {
                line: line_no,
                reason: "missing oid field".into(),
            })?;
            let name_bytes = parts.next().ok_or_else(|| ObjectError::InvalidTreeEntry {
                line: line_no,
                reason: "missing name field".into(),
            })?;

            let kind = EntryKind::from_bytes(kind_bytes).ok_or_else(|| {
                ObjectError::InvalidTreeEntry {
                    line: line_no,
                    reason: format!(
                        "unknown entry type: {}",
                        String::from_utf8_lossy(kind_bytes)
                    ),
                }
            })?;

            let oid_hex = std::str::from_utf8(oid_bytes).map_err(|_| {
                ObjectError::InvalidTreeEntry {
                    line: line_no,
                    reason: "non-UTF8 oid".into(),
                }
            })?;
            let oid = ObjectId::from_hex(oid_hex)?;

            validate_name(name_bytes, line_no)?;
            let name = BString::from(name_bytes);

            entries.push(TreeEntry { kind, oid, name });
        }

        let mut tree = Self { entries };
        tree.sort();
        Ok(tree)
    }

    /// Serialize to the canonical text-line format, sorted by name.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = Vec::new();
        for entry in &sorted {
            out.extend_from_slice(entry.kind.as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.oid.to_hex().as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(b'\n');
        }
        out
    }

    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn find(&self, name: &BStr) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name.as_bstr() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_tree() {
        let tree = Tree::parse(b"").unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn parse_single_entry() {
        let oid = ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let line = format!("blob {} hello.txt\n", oid);
        let tree = Tree::parse(line.as_bytes()).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.entries[0].kind, EntryKind::Blob);
        assert_eq!(tree.entries[0].name, "hello.txt");
        assert_eq!(tree.entries[0].oid, oid);
    }

    #[test]
    fn serialize_sorts_by_name() {
        let oid1 = ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let oid2 = ObjectId::from_hex("0000000000000000000000000000000000000001").unwrap();

        let tree = Tree {
            entries: vec![
                TreeEntry {
                    kind: EntryKind::Blob,
                    oid: oid1,
                    name: BString::from("b.txt"),
                },
                TreeEntry {
                    kind: EntryKind::Tree,
                    oid: oid2,
                    name: BString::from("a-dir"),
                },
            ],
        };

        let serialized = tree.serialize_content();
        let parsed = Tree::parse(&serialized).unwrap();
        assert_eq!(parsed.entries[0].name, "a-dir");
        assert_eq!(parsed.entries[1].name, "b.txt");
    }

    #[test]
    fn find_entry() {
        let oid = ObjectId::NULL;
        let tree = Tree {
            entries: vec![
                TreeEntry {
                    kind: EntryKind::Blob,
                    oid,
                    name: BString::from("README.md"),
                },
                TreeEntry {
                    kind: EntryKind::Tree,
                    oid,
                    name: BString::from("src"),
                },
            ],
        };
        assert!(tree.find(BStr::new("README.md")).is_some());
        assert!(tree.find(BStr::new("nonexistent")).is_none());
    }

    #[test]
    fn rejects_name_with_slash() {
        let oid = ObjectId::NULL;
        let line = format!("blob {} a/b\n", oid);
        assert!(Tree::parse(line.as_bytes()).is_err());
    }

    #[test]
    fn rejects_dot_and_dotdot_names() {
        let oid = ObjectId::NULL;
        assert!(Tree::parse(format!("blob {} .\n", oid).as_bytes()).is_err());
        assert!(Tree::parse(format!("blob {} ..\n", oid).as_bytes()).is_err());
    }

    #[test]
    fn rejects_unknown_entry_type() {
        let oid = ObjectId::NULL;
        let line = format!("gitlink {} sub\n", oid);
        assert!(Tree::parse(line.as_bytes()).is_err());
    }

    #[test]
    fn roundtrip_preserves_content() {
        let oid1 = ObjectId::from_hex("0000000000000000000000000000000000000001").unwrap();
        let tree = Tree {
            entries: vec![TreeEntry {
                kind: EntryKind::Blob,
                oid: oid1,
                name: BString::from("a.txt"),
            }],
        };
        let bytes = tree.serialize_content();
        assert_eq!(Tree::parse(&bytes).unwrap(), tree);
    }
}
