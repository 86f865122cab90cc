use std::path::Path;

use anyhow::{Context, Result};
use plumb_db::ObjectKind;

use super::Store;

pub fn run(git_dir: Option<&Path>, path: &Path, write: bool) -> Result<()> {
    let contents =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let oid = if write {
        let store = Store::open(git_dir)?;
        store
            .db
            .put(ObjectKind::Blob, &contents)
            .context("storing blob")?
    } else {
        // hashing needs no store, so this works outside a repository
        plumb_db::address_of(&plumb_db::encode(ObjectKind::Blob, &contents))
    };

    println!("{}", oid);
    Ok(())
}
