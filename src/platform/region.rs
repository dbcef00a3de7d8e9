// Tue Jan 13 2026 - Alex

use std::fmt;
use std::slice;

/// A contiguous range of this process's address space. Purely a view: the
/// memory belongs to whoever mapped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRegion {
    base: usize,
    len: usize,
}

impl MemoryRegion {
    pub fn new(base: usize, len: usize) -> Self {
        Self { base, len }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.as_ptr() as usize, bytes.len())
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn end(&self) -> usize {
        self.base.saturating_add(self.len)
    }

    pub fn contains(&self, address: usize) -> bool {
        address >= self.base && address < self.end()
    }

    pub fn subregion(&self, offset: usize, len: usize) -> Option<Self> {
        let end = offset.checked_add(len)?;
        if end > self.len {
            return None;
        }
        Some(Self::new(self.base + offset, len))
    }

    /// Widens the region to whole pages. `page_size` must be a power of two.
    pub fn page_aligned(&self, page_size: usize) -> Self {
        let start = self.base & !(page_size - 1);
        let end = (self.end() + page_size - 1) & !(page_size - 1);
        Self::new(start, end - start)
    }

    /// # Safety
    ///
    /// The whole region must be mapped and readable for `'a`, and nothing may
    /// write to it while the slice is alive.
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        slice::from_raw_parts(self.base as *const u8, self.len)
    }

    /// # Safety
    ///
    /// The whole region must be mapped and writable for `'a`, with no other
    /// live references into it.
    pub unsafe fn as_mut_slice<'a>(&self) -> &'a mut [u8] {
        slice::from_raw_parts_mut(self.base as *mut u8, self.len)
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:016x}, 0x{:016x})", self.base, self.end())
    }
}
