use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plumb_db::{layout, Database, Oid, SnapshotOptions};

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod init;
pub mod ls_tree;
pub mod write_tree;

/// An opened store and the work tree it belongs to.
pub struct Store {
    pub db: Database,
    pub meta: PathBuf,
    pub worktree: PathBuf,
}

impl Store {
    /// Uses `git_dir` when given, otherwise the nearest `.git` above the current directory.
    pub fn open(git_dir: Option<&Path>) -> Result<Self> {
        let meta = match git_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let cwd = std::env::current_dir().context("reading current directory")?;
                let root = layout::discover(&cwd)
                    .with_context(|| format!("not a git repository: {}", cwd.display()))?;
                root.join(layout::META_DIR)
            }
        };

        let db = Database::open(&meta)
            .with_context(|| format!("opening object store in {}", meta.display()))?;
        let worktree = meta
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!(meta = %meta.display(), "opened store");
        Ok(Self { db, meta, worktree })
    }

    /// Snapshots the work tree, leaving out the metadata directory whatever it is named.
    pub fn write_tree(&self) -> Result<Oid> {
        let mut options = SnapshotOptions::default();
        if let Some(name) = self.meta.file_name() {
            options.reserved = name.to_os_string();
        }

        self.db
            .write_tree_with(&self.worktree, &options)
            .with_context(|| format!("snapshotting {}", self.worktree.display()))
    }
}
