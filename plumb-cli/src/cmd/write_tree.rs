use std::path::Path;

use anyhow::Result;

use super::Store;

pub fn run(git_dir: Option<&Path>) -> Result<()> {
    let store = Store::open(git_dir)?;
    let oid = store.write_tree()?;
    println!("{}", oid);
    Ok(())
}
