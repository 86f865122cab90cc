use std::io::Write as _;
use std::path::{Path, PathBuf};

use flate2::Compression;
use plumb_hash::Oid;

use crate::blob::Blob;
use crate::bytes::{self, Hash};
use crate::commit::{CommitData, Signature};
use crate::err::Error;
use crate::tree::TreeData;
use crate::{compress, layout, Object, ObjectKind, Result};

mod iter;

pub use iter::Iter;

const MIN_PREFIX_LEN: usize = 4;

/// Handle on an object directory: `<mount>/<2 hex>/<38 hex>`.
pub struct Database {
    pub(crate) mount: PathBuf,
    pub(crate) compression: Compression,
}

impl Database {
    /// Uses `mount` as the object directory itself.
    pub fn new(mount: impl Into<PathBuf>) -> Self {
        Self {
            mount: mount.into(),
            compression: Compression::default(),
        }
    }

    /// Opens the object directory of an initialized metadata directory (`.git`).
    pub fn open(meta: impl AsRef<Path>) -> Result<Self> {
        let mount = meta.as_ref().join(layout::OBJECTS_DIR);
        if !mount.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no object directory at {}", mount.display()),
            )
            .into());
        }
        Ok(Self::new(mount))
    }

    pub fn with_compression(mut self, level: Compression) -> Self {
        self.compression = level;
        self
    }

    pub fn mount(&self) -> &Path {
        &self.mount
    }

    pub fn hash(&self, object: impl Hash) -> Result<Oid> {
        object.hash().map(|(oid, _)| oid)
    }

    /// Address `payload` would be stored under, without writing it.
    pub fn hash_object(&self, kind: ObjectKind, payload: &[u8]) -> Oid {
        bytes::address_of(&bytes::encode(kind, payload))
    }

    pub fn write(&self, object: &(impl Hash + Validate)) -> Result<Oid> {
        object.validate(self)?;

        let (oid, data) = object.hash()?;
        self.write_encoded(oid, &data)?;
        Ok(oid)
    }

    pub fn put(&self, kind: ObjectKind, payload: &[u8]) -> Result<Oid> {
        let data = bytes::encode(kind, payload);
        let oid = bytes::address_of(&data);
        self.write_encoded(oid, &data)?;
        Ok(oid)
    }

    fn write_encoded(&self, oid: Oid, data: &[u8]) -> Result<()> {
        let (first, second) = oid.shard();
        let dir = self.mount.join(first);
        let path = dir.join(second);

        if path.exists() {
            tracing::trace!(%oid, "object already stored");
            return Ok(());
        }

        // create_dir_all treats an existing shard as success
        std::fs::create_dir_all(&dir)?;

        let compressed = compress::compress_with(data, self.compression)?;

        // write next to the target and rename so readers never see a partial object
        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(&compressed)?;
        file.as_file().sync_data()?;
        file.persist(&path).map_err(|e| e.error)?;

        tracing::debug!(%oid, size = data.len(), "wrote object");
        Ok(())
    }

    pub fn contains(&self, oid: Oid) -> bool {
        self.path(oid).is_file()
    }

    pub fn get(&self, oid: Oid) -> Result<Object> {
        let compressed = match std::fs::read(self.path(oid)) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(oid))
            }
            Err(e) => return Err(e.into()),
        };

        let data = compress::decompress(&compressed)?;
        let (kind, payload) = bytes::decode(&data)?;

        tracing::trace!(%oid, %kind, size = payload.len(), "read object");

        Ok(Object {
            oid,
            kind,
            data: payload.to_vec(),
        })
    }

    pub fn lookup_blob(&self, oid: Oid) -> Result<Blob> {
        let object = self.get_kind(ObjectKind::Blob, oid)?;
        Ok(Blob::new(object.into_data()))
    }

    pub fn lookup_tree(&self, oid: Oid) -> Result<TreeData> {
        let object = self.get_kind(ObjectKind::Tree, oid)?;
        bytes::tree::read(object.data())
    }

    pub fn lookup_commit(&self, oid: Oid) -> Result<CommitData> {
        let object = self.get_kind(ObjectKind::Commit, oid)?;
        bytes::commit::read(object.data())
    }

    /// Stores a commit of `tree` with the same signature as author and committer.
    #[allow(clippy::too_many_arguments)]
    pub fn make_commit(
        &self,
        tree: Oid,
        parent: Option<Oid>,
        author: &str,
        email: &str,
        message: &str,
        timestamp: i64,
        timezone: &str,
    ) -> Result<Oid> {
        let signature = Signature::from_parts(author, email, timestamp, timezone)?;
        let commit = CommitData::new(
            tree,
            parent.into_iter().collect(),
            signature.clone(),
            signature,
            message,
        );
        self.write(&commit)
    }

    pub fn iter(&self) -> Result<Iter> {
        Iter::new(&self.mount)
    }

    /// Expands an abbreviated hex address to the single stored object it names.
    pub fn resolve(&self, prefix: &str) -> Result<Oid> {
        let prefix = prefix.to_ascii_lowercase();

        if prefix.len() < MIN_PREFIX_LEN
            || prefix.len() > Oid::HEX_LEN
            || !prefix.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(Error::InvalidPrefix(prefix));
        }

        if prefix.len() == Oid::HEX_LEN {
            let oid = Oid::try_from_str(&prefix)?;
            return if self.contains(oid) {
                Ok(oid)
            } else {
                Err(Error::ObjectNotFound(oid))
            };
        }

        let (shard, rest) = prefix.split_at(2);
        let dir = match std::fs::read_dir(self.mount.join(shard)) {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::PrefixNotFound(prefix))
            }
            Err(e) => return Err(e.into()),
        };

        let mut found = None;
        for entry in dir {
            let name = entry?.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(rest) {
                continue;
            }
            let Ok(oid) = Oid::try_from_str(format!("{}{}", shard, name)) else {
                continue;
            };
            if found.replace(oid).is_some() {
                return Err(Error::AmbiguousPrefix(prefix));
            }
        }

        found.ok_or(Error::PrefixNotFound(prefix))
    }

    fn get_kind(&self, expected: ObjectKind, oid: Oid) -> Result<Object> {
        let object = self.get(oid)?;
        if object.kind != expected {
            return Err(Error::UnexpectedKind {
                expected,
                actual: object.kind,
            });
        }
        Ok(object)
    }

    pub(crate) fn path(&self, oid: Oid) -> PathBuf {
        let (first, second) = oid.shard();
        self.mount.join(first).join(second)
    }
}

/// Checks the objects a value references before it is written.
pub trait Validate: crate::sealed::Sealed {
    fn validate(&self, _db: &Database) -> Result<()> {
        Ok(())
    }
}

impl<T: Validate> Validate for &T {
    fn validate(&self, db: &Database) -> Result<()> {
        (*self).validate(db)
    }
}

impl<B> Validate for Blob<B> {}

impl Validate for TreeData {}

impl<S> Validate for CommitData<S> {
    fn validate(&self, db: &Database) -> Result<()> {
        db.get_kind(ObjectKind::Tree, self.tree)?;

        for parent in &self.parents {
            db.get_kind(ObjectKind::Commit, *parent)?;
        }

        Ok(())
    }
}
