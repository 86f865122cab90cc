// loose objects only; packed storage would need its own index walk

use std::fs::ReadDir;
use std::path::Path;

use plumb_hash::Oid;

use crate::Result;

/// Addresses of every loose object under a mount, in directory order.
pub struct Iter {
    shards: Option<ReadDir>,
    current: Option<(String, ReadDir)>,
}

impl Iter {
    pub(crate) fn new(mount: &Path) -> Result<Self> {
        let shards = match mount.read_dir() {
            Ok(dir) => Some(dir),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            shards,
            current: None,
        })
    }

    fn next_shard(&mut self) -> Option<Result<()>> {
        let shards = self.shards.as_mut()?;
        loop {
            let entry = match shards.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };

            match entry.file_type() {
                Ok(ty) if !ty.is_dir() => continue,
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.len() != 2 || !name.bytes().all(|b| b.is_ascii_hexdigit()) {
                tracing::trace!(name, "skipping non-shard entry");
                continue;
            }

            return match entry.path().read_dir() {
                Ok(dir) => {
                    self.current = Some((name, dir));
                    Some(Ok(()))
                }
                Err(err) => Some(Err(err.into())),
            };
        }
    }
}

impl Iterator for Iter {
    type Item = Result<Oid>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((shard, dir)) = self.current.as_mut() else {
                if let Err(err) = self.next_shard()? {
                    return Some(Err(err));
                }
                continue;
            };

            let file = match dir.next() {
                Some(Ok(file)) => file,
                Some(Err(err)) => return Some(Err(err.into())),
                None => {
                    self.current = None;
                    continue;
                }
            };

            match file.file_type() {
                Ok(ty) if !ty.is_file() => continue,
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }

            // temp files from interrupted writes land here too
            let name = file.file_name();
            let name = name.to_string_lossy();
            if let Ok(oid) = Oid::try_from_str(format!("{}{}", shard, name)) {
                return Some(Ok(oid));
            }
        }
    }
}
