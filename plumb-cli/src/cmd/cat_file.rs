use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use plumb_db::ObjectKind;

use super::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Kind,
    Size,
}

pub fn run(git_dir: Option<&Path>, object: &str, format: Format) -> Result<()> {
    let store = Store::open(git_dir)?;
    let oid = store
        .db
        .resolve(object)
        .with_context(|| format!("resolving {}", object))?;
    let object = store
        .db
        .get(oid)
        .with_context(|| format!("reading object {}", oid))?;

    match format {
        Format::Kind => println!("{}", object.kind()),
        Format::Size => println!("{}", object.size()),
        Format::Pretty if object.kind() == ObjectKind::Tree => {
            let tree = store.db.lookup_tree(oid)?;
            super::ls_tree::print(&tree, false)?;
        }
        Format::Pretty => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(object.data())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
