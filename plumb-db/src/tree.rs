use std::collections::BTreeMap;

use plumb_hash::Oid;

use crate::EntryName;

kind! {
    pub enum EntryMode {
        File = "100644",
        Executable = "100755",
        Symlink = "120000",
        Directory = "40000",
    }

    EntryModeError => "Invalid tree entry mode: {0:?}"
}

impl EntryMode {
    /// The kind of object an entry with this mode points at.
    pub const fn object_kind(self) -> crate::ObjectKind {
        match self {
            Self::Directory => crate::ObjectKind::Tree,
            Self::File | Self::Executable | Self::Symlink => crate::ObjectKind::Blob,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryData {
    pub(crate) mode: EntryMode,
    pub(crate) oid: Oid,
}

impl EntryData {
    pub fn new(mode: EntryMode, oid: Oid) -> Self {
        Self { mode, oid }
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn oid(&self) -> Oid {
        self.oid
    }
}

/// The entries of one directory level, kept in byte-wise name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeData(BTreeMap<EntryName, EntryData>);

impl crate::sealed::Sealed for TreeData {}

impl TreeData {
    pub const EMPTY_ID: Oid = Oid::from_bytes([
        0x4b, 0x82, 0x5d, 0xc6, 0x42, 0xcb, 0x6e, 0xb9, 0xa0, 0x60, 0xe5, 0x4b, 0xf8, 0xd6, 0x92,
        0x88, 0xfb, 0xee, 0x49, 0x04,
    ]);

    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts an entry, returning the one it replaced.
    pub fn insert(&mut self, name: EntryName, mode: EntryMode, oid: Oid) -> Option<EntryData> {
        self.0.insert(name, EntryData::new(mode, oid))
    }

    pub fn get(&self, name: &[u8]) -> Option<&EntryData> {
        self.0.get(name)
    }

    pub fn entry(&self, name: impl AsRef<[u8]>) -> Option<EntryData> {
        self.get(name.as_ref()).copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&EntryName, &EntryData)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(EntryName, EntryData)> for TreeData {
    fn from_iter<T: IntoIterator<Item = (EntryName, EntryData)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TreeData {
    type Item = (EntryName, EntryData);
    type IntoIter = std::collections::btree_map::IntoIter<EntryName, EntryData>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
