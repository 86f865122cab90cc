use std::borrow::Borrow;

/// A single path component as stored in a tree entry.
///
/// Names compare byte-wise, so a map keyed by `EntryName` iterates in the
/// order tree payloads are written.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryName(Vec<u8>);

impl EntryName {
    pub fn try_from(source: impl Into<Vec<u8>>) -> Result<Self, InvalidEntryNameError> {
        let source = source.into();
        if source.is_empty() {
            return Err(InvalidEntryNameError {
                name: String::new(),
                reason: InvalidReason::Empty,
            });
        }
        if let Some(&byte) = source.iter().find(|&&b| is_invalid_name_byte(b)) {
            return Err(InvalidEntryNameError {
                name: String::from_utf8_lossy(&source).into_owned(),
                reason: InvalidReason::Byte(byte),
            });
        }
        Ok(Self(source))
    }

    #[cfg(unix)]
    pub fn from_os_str(name: &std::ffi::OsStr) -> Result<Self, InvalidEntryNameError> {
        use std::os::unix::ffi::OsStrExt;
        Self::try_from(name.as_bytes())
    }

    #[cfg(not(unix))]
    pub fn from_os_str(name: &std::ffi::OsStr) -> Result<Self, InvalidEntryNameError> {
        Self::try_from(name.to_string_lossy().into_owned())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for EntryName {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for EntryName {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for EntryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl std::fmt::Debug for EntryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Empty,
    Byte(u8),
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid entry name {name:?}: {reason:?}")]
pub struct InvalidEntryNameError {
    pub name: String,
    pub reason: InvalidReason,
}

#[inline]
pub(crate) const fn is_invalid_name_byte(b: u8) -> bool {
    matches!(b, b'/' | b'\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_separators_and_nul() {
        assert!(EntryName::try_from("a/b").is_err());
        assert!(EntryName::try_from(b"a\0b".to_vec()).is_err());
        let err = EntryName::try_from("").unwrap_err();
        assert_eq!(err.reason, InvalidReason::Empty);
    }

    #[test]
    fn test_orders_bytewise() {
        let mut names: Vec<_> = ["b", "a.txt", "B", "a", "a-b"]
            .into_iter()
            .map(|n| EntryName::try_from(n).unwrap())
            .collect();
        names.sort();
        let names: Vec<_> = names.iter().map(|n| n.to_string()).collect();
        assert_eq!(names, ["B", "a", "a-b", "a.txt", "b"]);
    }
}
