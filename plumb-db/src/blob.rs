/// Raw file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob<B = Vec<u8>>(pub(crate) B);

impl<B> crate::sealed::Sealed for Blob<B> {}

impl<B: AsRef<[u8]>> Blob<B> {
    pub fn new(data: B) -> Self {
        Self(data)
    }

    pub fn data(&self) -> &[u8] {
        self.0.as_ref()
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_ref().is_empty()
    }

    pub fn into_inner(self) -> B {
        self.0
    }
}
