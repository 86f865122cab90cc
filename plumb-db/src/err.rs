use plumb_hash::{Oid, ParseOidError};
use thiserror::Error;

use crate::ObjectKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object not found: {0}")]
    ObjectNotFound(Oid),

    #[error("No object matches prefix `{0}`")]
    PrefixNotFound(String),

    #[error("Prefix `{0}` is ambiguous")]
    AmbiguousPrefix(String),

    #[error("Prefix `{0}` is not a valid abbreviated object id")]
    InvalidPrefix(String),

    #[error("Corrupt object: {0}")]
    CorruptObject(#[from] CorruptObjectError),

    #[error("Malformed object payload: {0}")]
    Format(#[from] FormatError),

    #[error("Expected object kind {expected:?}, but got {actual:?}")]
    UnexpectedKind {
        expected: ObjectKind,
        actual: ObjectKind,
    },

    #[error("Invalid object id: {0}")]
    InvalidOid(#[from] ParseOidError),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(time::error::ComponentRange),

    #[error("Invalid offset: {0}")]
    InvalidOffset(time::error::ComponentRange),

    #[error(transparent)]
    InvalidEntryName(#[from] crate::key::InvalidEntryNameError),
}

/// Stored bytes that cannot be turned back into a `<kind> <len>\0<payload>` encoding.
#[derive(Debug, Error)]
pub enum CorruptObjectError {
    #[error("decompression failed: {0}")]
    Decompress(std::io::Error),

    #[error("missing NUL after header")]
    MissingNul,

    #[error("malformed header {0:?}")]
    MalformedHeader(String),

    #[error(transparent)]
    ObjectKind(#[from] crate::ObjectKindError),

    #[error("declared length {declared} does not match payload length {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}

/// A well-formed object whose payload does not follow its kind's grammar.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("tree entry at offset {0} is missing the space after its mode")]
    MissingModeSeparator(usize),

    #[error("tree entry at offset {0} is missing the NUL after its name")]
    MissingNameTerminator(usize),

    #[error("tree entry at offset {offset} has {remaining} digest bytes, expected 20")]
    TruncatedEntry { offset: usize, remaining: usize },

    #[error(transparent)]
    EntryMode(#[from] crate::tree::EntryModeError),

    #[error("duplicate tree entry {0:?}")]
    DuplicateEntry(String),

    #[error("commit is missing the `{0}` header")]
    MissingHeader(&'static str),

    #[error("unexpected commit header line {0:?}")]
    UnexpectedHeader(String),

    #[error("malformed signature {0:?}")]
    MalformedSignature(String),

    #[error("commit payload is not valid UTF-8")]
    NotUtf8,
}
