use sha1::{Digest, Sha1};

pub const OID_LEN: usize = 20;
pub const OID_HEX_LEN: usize = OID_LEN * 2;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid([u8; OID_LEN]);

impl Oid {
    pub const ZERO: Self = Self([0; OID_LEN]);
    pub const LEN: usize = OID_LEN;
    pub const HEX_LEN: usize = OID_HEX_LEN;

    pub const fn from_bytes(bytes: [u8; OID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, ParseOidError> {
        let bytes: [u8; OID_LEN] = bytes
            .try_into()
            .map_err(|_| ParseOidError::Length(bytes.len()))?;
        Ok(Self(bytes))
    }

    pub fn try_from_str(hex: impl AsRef<str>) -> Result<Self, ParseOidError> {
        let hex = hex.as_ref();
        if hex.len() != OID_HEX_LEN {
            return Err(ParseOidError::HexLength(hex.len()));
        }
        let mut bytes = [0; OID_LEN];
        hex::decode_to_slice(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; OID_LEN] {
        &self.0
    }

    pub const fn into_inner(self) -> [u8; OID_LEN] {
        self.0
    }

    /// Splits the hex form into the two-character shard and the remaining 38 characters.
    pub fn shard(&self) -> (String, String) {
        let hex = self.to_string();
        let rest = hex[2..].to_owned();
        let mut first = hex;
        first.truncate(2);
        (first, rest)
    }

    #[cfg(test)]
    pub(crate) fn repeat(byte: u8) -> Self {
        Self([byte; OID_LEN])
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::str::FromStr for Oid {
    type Err = ParseOidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseOidError {
    #[error("expected {OID_HEX_LEN} hex characters, got {0}")]
    HexLength(usize),

    #[error("expected {OID_LEN} digest bytes, got {0}")]
    Length(usize),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

pub fn hash(data: &[u8]) -> Oid {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

pub struct Hasher(Sha1);

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    pub fn new() -> Self {
        Self(Sha1::new())
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    pub fn finalize(self) -> Oid {
        let mut bytes = [0; OID_LEN];
        bytes.copy_from_slice(&self.0.finalize());
        Oid(bytes)
    }
}

impl std::io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
