use crate::{ObjectError, ObjectType};

/// Split an object's raw bytes at the header's NUL terminator.
///
/// The on-disk format is `"<type>\0<content>"` — no length field; the
/// store writes exactly one object per file, so EOF marks the content end.
pub fn split_header(data: &[u8]) -> Result<(ObjectType, &[u8]), ObjectError> {
    let null_pos = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| ObjectError::InvalidHeader("missing NUL separator".into()))?;
    let obj_type = ObjectType::from_bytes(&data[..null_pos])?;
    Ok((obj_type, &data[null_pos + 1..]))
}

/// Write an object header: `"<type>\0"`.
pub fn write_header(obj_type: ObjectType) -> Vec<u8> {
    let mut out = obj_type.as_bytes().to_vec();
    out.push(0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_blob_header() {
        let data = b"blob\0hello world!";
        let (ty, content) = split_header(data).unwrap();
        assert_eq!(ty, ObjectType::Blob);
        assert_eq!(content, b"hello world!");
    }

    #[test]
    fn write_and_split_roundtrip() {
        let hdr = write_header(ObjectType::Tree);
        let mut data = hdr.clone();
        data.extend_from_slice(b"payload");
        let (ty, content) = split_header(&data).unwrap();
        assert_eq!(ty, ObjectType::Tree);
        assert_eq!(content, b"payload");
    }

    #[test]
    fn missing_null() {
        assert!(split_header(b"blob").is_err());
    }

    #[test]
    fn invalid_type() {
        assert!(split_header(b"invalid\0x").is_err());
    }
}
