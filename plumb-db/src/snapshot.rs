//! Directory snapshots: a work tree becomes blob and tree objects, bottom-up.

use std::ffi::OsString;
use std::fs::FileType;
use std::path::{Path, PathBuf};

use plumb_hash::Oid;

use crate::blob::Blob;
use crate::key::EntryName;
use crate::layout::META_DIR;
use crate::tree::{EntryMode, TreeData};
use crate::{Database, Result};

#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    /// Child name skipped in every directory of the walk.
    pub reserved: OsString,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            reserved: OsString::from(META_DIR),
        }
    }
}

struct Child {
    name: OsString,
    path: PathBuf,
    file_type: FileType,
}

/// A directory whose entries are still being collected.
struct Frame {
    children: Vec<Child>,
    tree: TreeData,
}

impl Frame {
    fn open(dir: &Path, options: &SnapshotOptions) -> Result<Self> {
        let mut children = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if name == options.reserved {
                tracing::trace!(dir = %dir.display(), "skipping reserved directory");
                continue;
            }
            children.push(Child {
                name,
                path: entry.path(),
                // does not follow symlinks
                file_type: entry.file_type()?,
            });
        }

        Ok(Self {
            children,
            tree: TreeData::new(),
        })
    }
}

impl Database {
    /// Stores the directory at `root` as a tree and returns its address.
    pub fn write_tree(&self, root: impl AsRef<Path>) -> Result<Oid> {
        self.write_tree_with(root.as_ref(), &SnapshotOptions::default())
    }

    #[tracing::instrument(skip_all, fields(root = %root.display()))]
    pub fn write_tree_with(&self, root: &Path, options: &SnapshotOptions) -> Result<Oid> {
        let mut top = Frame::open(root, options)?;
        // directories below `top` that are not finished yet, innermost last
        let mut stack: Vec<(EntryName, Frame)> = Vec::new();

        loop {
            let frame = match stack.last_mut() {
                Some((_, frame)) => frame,
                None => &mut top,
            };

            let Some(child) = frame.children.pop() else {
                let Some((name, done)) = stack.pop() else {
                    break;
                };
                let oid = self.write(&done.tree)?;
                tracing::debug!(%oid, %name, entries = done.tree.len(), "wrote subtree");

                let parent = match stack.last_mut() {
                    Some((_, parent)) => parent,
                    None => &mut top,
                };
                parent.tree.insert(name, EntryMode::Directory, oid);
                continue;
            };

            let name = EntryName::from_os_str(&child.name)?;
            let ty = if child.file_type.is_symlink() {
                // followed to the target; a dangling link fails the walk
                let target = std::fs::metadata(&child.path)?.file_type();
                if target.is_dir() {
                    tracing::warn!(path = %child.path.display(), "skipping symlink to directory");
                    continue;
                }
                target
            } else {
                child.file_type
            };

            if ty.is_dir() {
                stack.push((name, Frame::open(&child.path, options)?));
            } else if ty.is_file() {
                let contents = std::fs::read(&child.path)?;
                let oid = self.write(&Blob::new(contents))?;
                frame.tree.insert(name, EntryMode::File, oid);
            } else {
                tracing::warn!(path = %child.path.display(), "skipping special file");
            }
        }

        let oid = self.write(&top.tree)?;
        tracing::debug!(%oid, entries = top.tree.len(), "wrote tree");
        Ok(oid)
    }
}
