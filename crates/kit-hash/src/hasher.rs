use sha1::{Digest, Sha1};

use crate::ObjectId;

/// Hash an object's header plus content: `"{type} {len}\0{content}"`.
///
/// This is the one place the object identity scheme is defined; every
/// object written to the store gets its OID from here.
pub fn hash_object(obj_type: &str, content: &[u8]) -> ObjectId {
    let header = format!("{} {}\0", obj_type, content.len());
    let mut hasher = Sha1::new();
    hasher.update(header.as_bytes());
    hasher.update(content);
    let digest = hasher.finalize();
    // A Sha1 digest is always 20 bytes; from_bytes cannot fail here.
    ObjectId::from_bytes(&digest).expect("sha1 digest is 20 bytes")
}
