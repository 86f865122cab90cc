use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use plumb_db::commit::{CommitData, Signature};
use plumb_db::Oid;

use super::Store;

/// Who the commit is attributed to. The committer defaults to the author.
#[derive(Args, Debug)]
pub struct Identity {
    #[arg(long, env = "PLUMB_AUTHOR_NAME", default_value = "plumb")]
    author_name: String,
    #[arg(long, env = "PLUMB_AUTHOR_EMAIL", default_value = "plumb@localhost")]
    author_email: String,
    #[arg(long, env = "PLUMB_COMMITTER_NAME")]
    committer_name: Option<String>,
    #[arg(long, env = "PLUMB_COMMITTER_EMAIL")]
    committer_email: Option<String>,
    /// Offset recorded in signatures, `+HHMM` or `-HHMM`
    #[arg(long, env = "PLUMB_TIMEZONE", default_value = "+0000")]
    timezone: String,
}

pub fn run(
    git_dir: Option<&Path>,
    tree: &str,
    parents: &[String],
    message: &str,
    identity: &Identity,
) -> Result<()> {
    let store = Store::open(git_dir)?;
    let resolve = |name: &str| -> Result<Oid> {
        store
            .db
            .resolve(name)
            .with_context(|| format!("resolving {}", name))
    };

    let tree = resolve(tree)?;
    let parents = parents
        .iter()
        .map(|parent| resolve(parent.as_str()))
        .collect::<Result<Vec<_>>>()?;

    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    let author = Signature::from_parts(
        identity.author_name.as_str(),
        identity.author_email.as_str(),
        now,
        &identity.timezone,
    )
    .context("building author signature")?;
    let committer = Signature::from_parts(
        identity
            .committer_name
            .as_deref()
            .unwrap_or(&identity.author_name),
        identity
            .committer_email
            .as_deref()
            .unwrap_or(&identity.author_email),
        now,
        &identity.timezone,
    )
    .context("building committer signature")?;

    let commit = CommitData::new(tree, parents, author, committer, message);
    let oid = store.db.write(&commit).context("storing commit")?;

    println!("{}", oid);
    Ok(())
}
