use anyhow::{Context, Result};
use plumb_db::layout;

pub fn run() -> Result<()> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    layout::init(&cwd).with_context(|| format!("initializing store in {}", cwd.display()))?;
    println!("Initialized git directory");
    Ok(())
}
