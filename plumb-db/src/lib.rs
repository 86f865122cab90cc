#[macro_use]
mod kind;
mod backend;
mod bytes;
mod err;
mod key;

pub mod blob;
pub mod commit;
pub mod compress;
pub mod layout;
pub mod snapshot;
pub mod tree;

pub use backend::fs::{Database, Iter, Validate};
pub use bytes::{address_of, decode, encode, Hash};
pub use err::{CorruptObjectError, Error, FormatError};
pub use key::{EntryName, InvalidEntryNameError};
pub use plumb_hash::Oid;
pub use snapshot::SnapshotOptions;

pub type Result<T> = std::result::Result<T, err::Error>;

pub(crate) use kind::Kind;

kind! {
    pub enum ObjectKind {
        Blob = "blob",
        Tree = "tree",
        Commit = "commit",
    }

    ObjectKindError => "Invalid object kind: {0:?}"
}

/// A decoded object as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub(crate) oid: Oid,
    pub(crate) kind: ObjectKind,
    pub(crate) data: Vec<u8>,
}

impl Object {
    pub fn oid(&self) -> Oid {
        self.oid
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

pub(crate) mod sealed {
    pub trait Sealed {}

    impl<T: Sealed> Sealed for &T {}
}
