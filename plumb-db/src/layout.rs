//! On-disk layout of a store root.
//!
//! ```text
//! <worktree>/.git/HEAD        "ref: refs/heads/main\n"
//! <worktree>/.git/objects/    sharded object files
//! <worktree>/.git/refs/
//! ```

use std::path::{Path, PathBuf};

use crate::Result;

pub const META_DIR: &str = ".git";
pub const OBJECTS_DIR: &str = "objects";
pub const REFS_DIR: &str = "refs";
pub const HEAD_FILE: &str = "HEAD";
pub const DEFAULT_BRANCH: &str = "main";

pub const HEAD_CONTENTS: &str = const_format::concatcp!("ref: ", REFS_DIR, "/heads/", DEFAULT_BRANCH, "\n");

/// Creates the store root under `worktree`, returning the path of the metadata directory.
///
/// Existing directories are kept and an existing `HEAD` is not overwritten.
pub fn init(worktree: impl AsRef<Path>) -> Result<PathBuf> {
    let meta = worktree.as_ref().join(META_DIR);

    for dir in [meta.join(OBJECTS_DIR), meta.join(REFS_DIR)] {
        std::fs::create_dir_all(&dir)?;
    }

    let head = meta.join(HEAD_FILE);
    if head.exists() {
        tracing::debug!(path = %head.display(), "HEAD already present, leaving it");
    } else {
        std::fs::write(&head, HEAD_CONTENTS)?;
    }

    tracing::info!(path = %meta.display(), "initialized store");
    Ok(meta)
}

/// Walks up from `start` to the nearest directory holding a metadata directory
/// and returns that directory (the work tree root).
pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .find(|dir| dir.join(META_DIR).join(OBJECTS_DIR).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_layout() {
        let temp = tempdir::TempDir::new("layout").unwrap();
        let meta = init(temp.path()).unwrap();

        assert_eq!(meta, temp.path().join(".git"));
        assert!(meta.join("objects").is_dir());
        assert!(meta.join("refs").is_dir());
        assert_eq!(
            std::fs::read_to_string(meta.join("HEAD")).unwrap(),
            "ref: refs/heads/main\n"
        );
    }

    #[test]
    fn test_reinit_keeps_head() {
        let temp = tempdir::TempDir::new("layout").unwrap();
        let meta = init(temp.path()).unwrap();
        std::fs::write(meta.join("HEAD"), "ref: refs/heads/other\n").unwrap();

        init(temp.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(meta.join("HEAD")).unwrap(),
            "ref: refs/heads/other\n"
        );
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = tempdir::TempDir::new("layout").unwrap();
        init(temp.path()).unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover(&nested).unwrap(), temp.path());
    }
}
