use plumb_hash::Oid;
use time::{OffsetDateTime, UtcOffset};

use crate::err::{Error, FormatError};
use crate::Result;

/// Who made a change and when, as rendered on `author` / `committer` lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature<S = String> {
    pub(crate) name: S,
    pub(crate) email: S,
    pub(crate) when: OffsetDateTime,
}

impl<S> Signature<S> {
    pub fn new(name: S, email: S, when: OffsetDateTime) -> Self {
        Self { name, email, when }
    }

    pub fn name(&self) -> &S {
        &self.name
    }

    pub fn email(&self) -> &S {
        &self.email
    }

    pub fn when(&self) -> OffsetDateTime {
        self.when
    }

    pub fn timestamp(&self) -> i64 {
        self.when.unix_timestamp()
    }

    pub fn timezone(&self) -> String {
        format_offset(self.when.offset())
    }
}

impl<S: AsRef<str>> Signature<S> {
    /// Builds a signature from unix seconds and a `+HHMM` / `-HHMM` offset.
    ///
    /// Names and emails containing `<`, `>` or a newline cannot be rendered
    /// unambiguously and are rejected.
    pub fn from_parts(name: S, email: S, timestamp: i64, timezone: &str) -> Result<Self> {
        for field in [name.as_ref(), email.as_ref()] {
            if field.contains(|c: char| matches!(c, '<' | '>' | '\n')) {
                return Err(FormatError::MalformedSignature(field.to_owned()).into());
            }
        }

        let offset = parse_offset(timezone)?;
        let when = OffsetDateTime::from_unix_timestamp(timestamp)
            .map_err(Error::InvalidTimestamp)?
            .to_offset(offset);
        Ok(Self { name, email, when })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitData<S = String> {
    pub(crate) tree: Oid,
    pub(crate) parents: Vec<Oid>,
    pub(crate) author: Signature<S>,
    pub(crate) committer: Signature<S>,
    pub(crate) message: S,
}

impl<S> CommitData<S> {
    pub fn new(
        tree: Oid,
        parents: Vec<Oid>,
        author: Signature<S>,
        committer: Signature<S>,
        message: S,
    ) -> Self {
        Self {
            tree,
            parents,
            author,
            committer,
            message,
        }
    }

    pub fn tree(&self) -> Oid {
        self.tree
    }

    pub fn parents(&self) -> &[Oid] {
        &self.parents
    }

    pub fn parent(&self) -> Option<Oid> {
        self.parents.first().copied()
    }

    pub fn author(&self) -> &Signature<S> {
        &self.author
    }

    pub fn committer(&self) -> &Signature<S> {
        &self.committer
    }

    pub fn message(&self) -> &S {
        &self.message
    }
}

impl<S> crate::sealed::Sealed for CommitData<S> {}

pub(crate) fn parse_offset(timezone: &str) -> Result<UtcOffset> {
    let malformed = || FormatError::MalformedSignature(timezone.to_owned());

    let bytes = timezone.as_bytes();
    if bytes.len() != 5 || !bytes[1..].iter().all(u8::is_ascii_digit) {
        return Err(malformed().into());
    }
    let sign: i8 = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(malformed().into()),
    };
    let hours: i8 = timezone[1..3].parse().map_err(|_| malformed())?;
    let minutes: i8 = timezone[3..5].parse().map_err(|_| malformed())?;

    UtcOffset::from_hms(sign * hours, sign * minutes, 0).map_err(Error::InvalidOffset)
}

pub(crate) fn format_offset(offset: UtcOffset) -> String {
    let (hours, minutes, _) = offset.as_hms();
    let sign = if offset.is_negative() { '-' } else { '+' };
    format!("{}{:02}{:02}", sign, hours.unsigned_abs(), minutes.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        for tz in ["+0000", "+0130", "-0800", "+1400"] {
            let offset = parse_offset(tz).unwrap();
            assert_eq!(format_offset(offset), tz);
        }
        assert!(parse_offset("0000").is_err());
        assert!(parse_offset("+00:00").is_err());
        assert!(parse_offset("*0000").is_err());
    }

    #[test]
    fn test_signature_keeps_timestamp() {
        let sig = Signature::from_parts("A", "a@x", 1000, "-0230").unwrap();
        assert_eq!(sig.timestamp(), 1000);
        assert_eq!(sig.timezone(), "-0230");
    }

    #[test]
    fn test_signature_rejects_delimiters() {
        for (name, email) in [
            ("A <B>", "a@x"),
            ("A", "<a@x>"),
            ("A\ncommitter B", "a@x"),
            ("A", "a@x\n"),
            ("A > B", "a@x"),
        ] {
            assert!(matches!(
                Signature::from_parts(name, email, 1000, "+0000"),
                Err(Error::Format(FormatError::MalformedSignature(_)))
            ));
        }

        let sig = Signature::from_parts("Jane Q. Doe", "jane+ci@example.com", 0, "+0000").unwrap();
        assert_eq!(sig.name(), &"Jane Q. Doe");
    }
}
