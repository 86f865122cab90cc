use crate::{blob::Blob, ObjectKind};

use super::Result;

impl<B: AsRef<[u8]>> super::Hash for Blob<B> {
    const KIND: ObjectKind = ObjectKind::Blob;

    fn payload(&self) -> Result<Vec<u8>> {
        Ok(self.data().to_vec())
    }
}
