use plumb_hash::Oid;

use super::Result;
use crate::commit::{format_offset, CommitData, Signature};
use crate::err::FormatError;
use crate::ObjectKind;

const TREE: &str = "tree";
const PARENT: &str = "parent";
const AUTHOR: &str = "author";
const COMMITTER: &str = "committer";

impl<S: AsRef<str>> super::Hash for CommitData<S> {
    const KIND: ObjectKind = ObjectKind::Commit;

    fn payload(&self) -> Result<Vec<u8>> {
        let message = self.message.as_ref();

        let buf = Vec::with_capacity(256 + message.len());
        let mut buf = super::rw::Writer(buf);

        buf.write_line(format_args!("{} {}", TREE, self.tree))?;
        for parent in &self.parents {
            buf.write_line(format_args!("{} {}", PARENT, parent))?;
        }
        write_signature(&mut buf, AUTHOR, &self.author)?;
        write_signature(&mut buf, COMMITTER, &self.committer)?;
        buf.write_byte(b'\n')?;

        buf.write_str(message)?;
        if !message.ends_with('\n') {
            buf.write_byte(b'\n')?;
        }

        Ok(buf.into_inner())
    }
}

fn write_signature<S: AsRef<str>>(
    buf: &mut super::rw::Writer<Vec<u8>>,
    header: &str,
    sig: &Signature<S>,
) -> Result<()> {
    buf.write_line(format_args!(
        "{} {} <{}> {} {}",
        header,
        sig.name.as_ref(),
        sig.email.as_ref(),
        sig.when.unix_timestamp(),
        format_offset(sig.when.offset()),
    ))
}

pub(crate) fn read(payload: &[u8]) -> Result<CommitData> {
    let text = std::str::from_utf8(payload).map_err(|_| FormatError::NotUtf8)?;

    let (headers, message) = text
        .split_once("\n\n")
        .ok_or(FormatError::MissingHeader("message separator"))?;

    let mut lines = headers.lines().peekable();

    let tree = expect_header(lines.next(), TREE)?;
    let tree = Oid::try_from_str(tree)?;

    let mut parents = Vec::new();
    while let Some(parent) = lines.peek().copied().and_then(|l| header_value(l, PARENT)) {
        parents.push(Oid::try_from_str(parent)?);
        lines.next();
    }

    let author = read_signature(expect_header(lines.next(), AUTHOR)?)?;
    let committer = read_signature(expect_header(lines.next(), COMMITTER)?)?;

    // anything after the committer (encoding, signatures) is carried by the
    // stored bytes and not modelled here
    for line in lines {
        tracing::trace!(line, "ignoring extra commit header");
    }

    Ok(CommitData {
        tree,
        parents,
        author,
        committer,
        message: message.to_owned(),
    })
}

fn header_value<'a>(line: &'a str, header: &str) -> Option<&'a str> {
    line.strip_prefix(header)?.strip_prefix(' ')
}

fn expect_header<'a>(line: Option<&'a str>, header: &'static str) -> Result<&'a str> {
    let line = line.ok_or(FormatError::MissingHeader(header))?;
    header_value(line, header).ok_or_else(|| FormatError::UnexpectedHeader(line.to_owned()).into())
}

fn read_signature(value: &str) -> Result<Signature<String>> {
    let malformed = || FormatError::MalformedSignature(value.to_owned());

    let open = value.find('<').ok_or_else(malformed)?;
    let close = open + value[open..].find('>').ok_or_else(malformed)?;

    let name = value[..open].strip_suffix(' ').unwrap_or(&value[..open]);
    let email = &value[open + 1..close];

    let (timestamp, timezone) = value[close + 1..]
        .trim_start()
        .split_once(' ')
        .ok_or_else(malformed)?;
    let timestamp: i64 = timestamp.parse().map_err(|_| malformed())?;

    Signature::from_parts(name.to_owned(), email.to_owned(), timestamp, timezone)
}
