// Fri Jan 16 2026 - Alex

/// Storage behind a byte or bit cursor: a caller's fixed view, or a buffer
/// we own and grow on write.
#[derive(Debug)]
pub enum Backing<'a> {
    View(&'a mut [u8]),
    Owned(Vec<u8>),
}

impl<'a> Backing<'a> {
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_growable(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::View(bytes) => bytes,
            Self::Owned(bytes) => bytes.as_slice(),
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::View(bytes) => bytes,
            Self::Owned(bytes) => bytes.as_mut_slice(),
        }
    }

    /// Makes `len` bytes addressable. Only the owned arm can grow; new bytes are zero.
    /// Returns `false` when a view would have to grow.
    pub fn ensure_len(&mut self, len: usize) -> bool {
        match self {
            Self::View(bytes) => len <= bytes.len(),
            Self::Owned(bytes) => {
                if len > bytes.len() {
                    bytes.resize(len, 0);
                }
                true
            }
        }
    }

    pub fn into_owned(self) -> Vec<u8> {
        match self {
            Self::View(bytes) => bytes.to_vec(),
            Self::Owned(bytes) => bytes,
        }
    }
}

impl Default for Backing<'_> {
    fn default() -> Self {
        Self::Owned(Vec::new())
    }
}
