use plumb_hash::Oid;

use super::Result;
use crate::err::FormatError;
use crate::tree::{EntryMode, TreeData};
use crate::{EntryName, Kind, ObjectKind};

const AVG_NAME_SIZE: usize = 20;

// mode, space, name, NUL, digest
const ENTRY_SIZE: usize = 6 + 1 + AVG_NAME_SIZE + 1 + Oid::LEN;

impl super::Hash for TreeData {
    const KIND: ObjectKind = ObjectKind::Tree;

    fn payload(&self) -> Result<Vec<u8>> {
        let buf = Vec::with_capacity(self.len() * ENTRY_SIZE);
        let mut buf = super::rw::Writer(buf);

        // BTreeMap iteration is already byte-wise ascending by name
        for (name, entry) in self.iter() {
            buf.write_kind(entry.mode)?;
            buf.write_byte(b' ')?;
            buf.write_null_terminated(name.as_bytes())?;
            buf.write_oid(entry.oid)?;
        }

        Ok(buf.into_inner())
    }
}

pub(crate) fn read(payload: &[u8]) -> Result<TreeData> {
    let mut reader = super::rw::Reader::new(payload);
    let mut tree = TreeData::new();

    while !reader.is_empty() {
        let offset = reader.position();

        let mode = reader
            .read_until(b' ')
            .ok_or(FormatError::MissingModeSeparator(offset))?;
        let mode = EntryMode::try_from_tag(mode).map_err(FormatError::from)?;

        let name = reader
            .read_null_terminated()
            .ok_or(FormatError::MissingNameTerminator(offset))?;
        let name = EntryName::try_from(name)?;

        let oid = reader.read_oid().ok_or(FormatError::TruncatedEntry {
            offset,
            remaining: reader.remaining().len(),
        })?;

        if tree.insert(name.clone(), mode, oid).is_some() {
            return Err(FormatError::DuplicateEntry(name.to_string()).into());
        }
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::Hash;
    use crate::err::Error;

    fn name(n: &str) -> EntryName {
        EntryName::try_from(n).unwrap()
    }

    #[test]
    fn test_entries_serialize_sorted() {
        let mut tree = TreeData::new();
        tree.insert(name("b"), EntryMode::File, Oid::from_bytes([2; 20]));
        tree.insert(name("a"), EntryMode::Directory, Oid::from_bytes([1; 20]));
        tree.insert(name("c"), EntryMode::File, Oid::from_bytes([3; 20]));

        let payload = tree.payload().unwrap();

        let mut expected = b"40000 a\0".to_vec();
        expected.extend_from_slice(&[1; 20]);
        expected.extend_from_slice(b"100644 b\0");
        expected.extend_from_slice(&[2; 20]);
        expected.extend_from_slice(b"100644 c\0");
        expected.extend_from_slice(&[3; 20]);
        assert_eq!(payload, expected);

        assert_eq!(read(&payload).unwrap(), tree);
    }

    #[test]
    fn test_truncated_entry() {
        let mut payload = b"100644 a.txt\0".to_vec();
        payload.extend_from_slice(&[9; 19]);

        match read(&payload) {
            Err(Error::Format(FormatError::TruncatedEntry { offset, remaining })) => {
                assert_eq!(offset, 0);
                assert_eq!(remaining, 19);
            }
            other => panic!("expected truncated entry, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_mode_and_separators() {
        assert!(matches!(
            read(b"100644"),
            Err(Error::Format(FormatError::MissingModeSeparator(0)))
        ));
        assert!(matches!(
            read(b"100644 name-without-nul"),
            Err(Error::Format(FormatError::MissingNameTerminator(0)))
        ));

        let mut payload = b"777777 x\0".to_vec();
        payload.extend_from_slice(&[0; 20]);
        assert!(matches!(
            read(&payload),
            Err(Error::Format(FormatError::EntryMode(_)))
        ));
    }

    #[test]
    fn test_duplicate_entry() {
        let mut payload = Vec::new();
        for _ in 0..2 {
            payload.extend_from_slice(b"100644 same\0");
            payload.extend_from_slice(&[5; 20]);
        }
        assert!(matches!(
            read(&payload),
            Err(Error::Format(FormatError::DuplicateEntry(_)))
        ));
    }

    #[test]
    fn test_digest_may_contain_nul_and_space() {
        let mut tree = TreeData::new();
        let oid = Oid::from_bytes(*b" \0 \0 \0 \0 \0 \0 \0 \0 \0 \0");
        tree.insert(name("x"), EntryMode::File, oid);
        tree.insert(name("y"), EntryMode::Executable, oid);

        let parsed = read(&tree.payload().unwrap()).unwrap();
        assert_eq!(parsed.entry("y").unwrap().oid(), oid);
        assert_eq!(parsed.entry("y").unwrap().mode(), EntryMode::Executable);
    }
}
