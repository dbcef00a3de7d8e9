// Wed Jan 15 2026 - Alex

use crate::platform::{MemoryProtection, MemoryRegion, PlatformError};

/// Module lookup and page protection for the running process. Each supported
/// OS provides exactly one implementation on [`crate::platform::NativePlatform`].
pub trait MemoryService {
    /// Base and mapped size of a loaded module, or of the executable when
    /// `name` is `None`.
    fn module_region(&self, name: Option<&str>) -> Result<MemoryRegion, PlatformError>;

    /// Changes the protection of all of `region` or fails. Returns the previous
    /// protection where the OS reports it. Restoring it is up to the caller.
    ///
    /// # Safety
    ///
    /// Removing access from memory that is still in use (our own code, a live
    /// stack, a borrowed slice) crashes the process.
    unsafe fn set_protection(
        &self,
        region: &MemoryRegion,
        protection: MemoryProtection,
    ) -> Result<Option<MemoryProtection>, PlatformError>;

    /// Current protection of the page containing `address`.
    fn query_protection(&self, address: usize) -> Result<MemoryProtection, PlatformError>;

    /// Protection of every mapped piece of `region`, in address order and
    /// clipped to it. Unmapped gaps are left out.
    fn query_regions(&self, region: &MemoryRegion) -> Result<Vec<(MemoryRegion, MemoryProtection)>, PlatformError>;

    /// Renders an OS error code. Never fails.
    fn describe_error(&self, code: i32) -> String;

    fn page_size(&self) -> usize;
}
