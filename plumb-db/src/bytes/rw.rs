use std::io::Write;

use plumb_hash::Oid;

use super::Result;
use crate::Kind;

/// Cursor over an in-memory payload.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Reads up to (not including) `delim` and steps past it.
    #[inline]
    pub(crate) fn read_until(&mut self, delim: u8) -> Option<&'a [u8]> {
        let rest = self.remaining();
        let end = rest.iter().position(|&b| b == delim)?;
        self.pos += end + 1;
        Some(&rest[..end])
    }

    #[inline]
    pub(crate) fn read_null_terminated(&mut self) -> Option<&'a [u8]> {
        self.read_until(b'\0')
    }

    #[inline]
    pub(crate) fn read_oid(&mut self) -> Option<Oid> {
        let rest = self.remaining();
        let bytes = rest.get(..Oid::LEN)?;
        self.pos += Oid::LEN;
        Oid::try_from_slice(bytes).ok()
    }
}

pub(crate) struct Writer<W>(pub(crate) W);

impl<W: Write> Writer<W> {
    #[inline]
    pub(crate) fn write_kind(&mut self, kind: impl Kind) -> Result<()> {
        self.write_str(kind.as_tag())
    }

    #[inline]
    pub(crate) fn write_oid(&mut self, oid: Oid) -> Result<()> {
        self.0.write_all(oid.as_bytes())?;
        Ok(())
    }

    #[inline]
    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.0.write_all(bytes)?;
        Ok(())
    }

    #[inline]
    pub(crate) fn write_str(&mut self, string: &str) -> Result<()> {
        self.write_bytes(string.as_bytes())
    }

    #[inline]
    pub(crate) fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_bytes(&[byte])
    }

    #[inline]
    pub(crate) fn write_null_terminated(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_bytes(bytes)?;
        self.write_byte(b'\0')
    }

    #[inline]
    pub(crate) fn write_line(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        self.0.write_fmt(args)?;
        self.write_byte(b'\n')
    }

    #[inline]
    pub(crate) fn into_inner(self) -> W {
        self.0
    }
}
