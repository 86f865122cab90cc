use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use plumb_db::tree::TreeData;

use super::Store;

pub fn run(git_dir: Option<&Path>, tree: &str, name_only: bool) -> Result<()> {
    let store = Store::open(git_dir)?;
    let oid = store
        .db
        .resolve(tree)
        .with_context(|| format!("resolving {}", tree))?;
    let tree = store
        .db
        .lookup_tree(oid)
        .with_context(|| format!("reading tree {}", oid))?;

    print(&tree, name_only)
}

/// One line per entry: `<mode> <kind> <address>\t<name>`, mode zero-padded to six digits.
pub fn print(tree: &TreeData, name_only: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();

    for (name, entry) in tree.iter() {
        if !name_only {
            write!(
                stdout,
                "{:0>6} {} {}\t",
                entry.mode().as_str(),
                entry.mode().object_kind(),
                entry.oid()
            )?;
        }
        stdout.write_all(name.as_bytes())?;
        stdout.write_all(b"\n")?;
    }

    stdout.flush()?;
    Ok(())
}
