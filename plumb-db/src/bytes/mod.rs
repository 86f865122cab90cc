use std::io::Write as _;

use plumb_hash::Oid;

use crate::{err::CorruptObjectError, Kind, ObjectKind};

pub(crate) mod blob;
pub(crate) mod commit;
pub(crate) mod rw;
pub(crate) mod tree;

pub(crate) type Result<T> = std::result::Result<T, crate::err::Error>;

const NUL: u8 = b'\0';
const SPACE: u8 = b' ';

/// Longest possible header: `commit ` followed by the digits of `usize::MAX`.
const MAX_HEADER_LEN: usize = 32;

/// An object that can be rendered to its canonical encoding.
pub trait Hash: crate::sealed::Sealed {
    const KIND: ObjectKind;

    fn payload(&self) -> Result<Vec<u8>>;

    /// Returns the address together with the full `<kind> <len>\0<payload>` encoding.
    fn hash(&self) -> Result<(Oid, Vec<u8>)> {
        let encoded = encode(Self::KIND, &self.payload()?);
        Ok((address_of(&encoded), encoded))
    }
}

impl<T: Hash> Hash for &T {
    const KIND: ObjectKind = T::KIND;

    fn payload(&self) -> Result<Vec<u8>> {
        (*self).payload()
    }
}

pub fn encode(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_HEADER_LEN + payload.len());
    // writes into a Vec cannot fail
    let _ = write!(buf, "{} {}", kind.as_tag(), payload.len());
    buf.push(NUL);
    buf.extend_from_slice(payload);
    buf
}

pub fn address_of(encoded: &[u8]) -> Oid {
    plumb_hash::hash(encoded)
}

/// Splits an encoding into its kind and payload.
///
/// Only the first NUL is looked for; the payload may contain any bytes and
/// is delimited by the declared length.
pub fn decode(encoded: &[u8]) -> std::result::Result<(ObjectKind, &[u8]), CorruptObjectError> {
    let nul = encoded
        .iter()
        .take(MAX_HEADER_LEN + 1)
        .position(|&b| b == NUL)
        .ok_or(CorruptObjectError::MissingNul)?;

    let header = &encoded[..nul];
    let payload = &encoded[nul + 1..];

    let malformed = || CorruptObjectError::MalformedHeader(String::from_utf8_lossy(header).into_owned());

    let space = header
        .iter()
        .position(|&b| b == SPACE)
        .ok_or_else(malformed)?;
    let (tag, digits) = (&header[..space], &header[space + 1..]);

    let kind = ObjectKind::try_from_tag(tag)?;

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(malformed());
    }
    let declared: usize = std::str::from_utf8(digits)
        .ok()
        .and_then(|d| d.parse().ok())
        .ok_or_else(malformed)?;

    if declared != payload.len() {
        return Err(CorruptObjectError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok((kind, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_header() {
        assert_eq!(encode(ObjectKind::Blob, b"hello\n"), b"blob 6\0hello\n");
        assert_eq!(encode(ObjectKind::Tree, b""), b"tree 0\0");
    }

    #[test]
    fn test_decode_binary_payload() {
        let payload = b"\0\x01\0tree 3\0\xff";
        let encoded = encode(ObjectKind::Commit, payload);
        let (kind, decoded) = decode(&encoded).unwrap();
        assert_eq!(kind, ObjectKind::Commit);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_decode_every_kind() {
        for kind in ObjectKind::VARIANTS {
            let encoded = encode(*kind, b"x");
            assert_eq!(decode(&encoded).unwrap(), (*kind, &b"x"[..]));
        }
    }

    #[test]
    fn test_address_changes_with_payload() {
        let a = address_of(&encode(ObjectKind::Blob, b"hello\n"));
        let b = address_of(&encode(ObjectKind::Blob, b"hellp\n"));
        assert_eq!(a, address_of(&encode(ObjectKind::Blob, b"hello\n")));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "ce013625030ba8dba906f756967f9e9ca394464a");
    }

    #[test]
    fn test_decode_rejects_bad_headers() {
        assert!(matches!(decode(b"blob 6hello\n"), Err(CorruptObjectError::MissingNul)));
        assert!(matches!(
            decode(b"blob6\0hello\n"),
            Err(CorruptObjectError::MalformedHeader(_))
        ));
        assert!(matches!(
            decode(b"blob +6\0hello\n"),
            Err(CorruptObjectError::MalformedHeader(_))
        ));
        assert!(matches!(
            decode(b"blob \0"),
            Err(CorruptObjectError::MalformedHeader(_))
        ));
        assert!(matches!(
            decode(b"tag 1\0x"),
            Err(CorruptObjectError::ObjectKind(_))
        ));
        assert!(matches!(
            decode(b"blob 7\0hello\n"),
            Err(CorruptObjectError::LengthMismatch {
                declared: 7,
                actual: 6
            })
        ));
        assert!(matches!(
            decode(b"blob 5\0hello\n"),
            Err(CorruptObjectError::LengthMismatch {
                declared: 5,
                actual: 6
            })
        ));
    }
}
