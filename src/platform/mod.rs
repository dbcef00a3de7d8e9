// Wed Jan 15 2026 - Alex

pub mod error;
pub mod protection;
pub mod region;
pub mod traits;

#[cfg(target_os = "linux")]
#[path = "linux.rs"]
mod imp;

#[cfg(windows)]
#[path = "windows.rs"]
mod imp;

#[cfg(not(any(target_os = "linux", windows)))]
compile_error!("memprobe's platform layer supports Linux and Windows");

pub use error::PlatformError;
pub use protection::MemoryProtection;
pub use region::MemoryRegion;
pub use traits::MemoryService;

/// The [`MemoryService`] for the OS this crate was built for.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePlatform;

pub fn module_region(name: Option<&str>) -> Result<MemoryRegion, PlatformError> {
    NativePlatform.module_region(name)
}

/// # Safety
///
/// See [`MemoryService::set_protection`].
pub unsafe fn set_protection(
    region: &MemoryRegion,
    protection: MemoryProtection,
) -> Result<Option<MemoryProtection>, PlatformError> {
    NativePlatform.set_protection(region, protection)
}

pub fn query_protection(address: usize) -> Result<MemoryProtection, PlatformError> {
    NativePlatform.query_protection(address)
}

pub fn query_regions(region: &MemoryRegion) -> Result<Vec<(MemoryRegion, MemoryProtection)>, PlatformError> {
    NativePlatform.query_regions(region)
}

pub fn describe_error(code: i32) -> String {
    NativePlatform.describe_error(code)
}

pub fn page_size() -> usize {
    NativePlatform.page_size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use memmap2::MmapMut;

    fn probe() {}

    #[test]
    fn test_executable_region_contains_our_code() {
        let region = module_region(None).unwrap();
        assert!(!region.is_empty());
        assert!(region.contains(probe as usize));
        assert_eq!(region.base() % page_size(), 0);
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    #[test]
    fn test_named_module_region() {
        let region = module_region(Some("libc.so.6")).unwrap();
        assert!(!region.is_empty());
        assert_ne!(region, module_region(None).unwrap());
    }

    #[cfg(windows)]
    #[test]
    fn test_named_module_region() {
        let region = module_region(Some("kernel32.dll")).unwrap();
        assert!(region.len() > 0);
    }

    #[test]
    fn test_missing_module_fails() {
        let err = module_region(Some("memprobe-not-a-real-module.so")).unwrap_err();
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_describe_error_never_fails() {
        assert!(!describe_error(2).is_empty());
        assert!(!describe_error(-12345).is_empty());
    }

    #[test]
    fn test_protection_round_trip_keeps_contents() {
        let size = page_size();
        let mut scratch = MmapMut::map_anon(size).unwrap();
        for (i, byte) in scratch.iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }
        let expected = scratch.to_vec();
        let region = MemoryRegion::from_slice(&scratch);

        let original = query_protection(region.base()).unwrap();
        assert_eq!(original, MemoryProtection::READ_WRITE);

        unsafe { set_protection(&region, MemoryProtection::READ) }.unwrap();
        assert_eq!(query_protection(region.base()).unwrap(), MemoryProtection::READ);
        assert_eq!(&scratch[..], &expected[..]);

        let previous = unsafe { set_protection(&region, original) }.unwrap();
        if let Some(previous) = previous {
            assert_eq!(previous, MemoryProtection::READ);
        }
        assert_eq!(query_protection(region.base()).unwrap(), original);
        assert_eq!(&scratch[..], &expected[..]);
        scratch[0] = 0xFF;
    }

    #[test]
    fn test_query_regions_splits_by_protection() {
        let size = page_size();
        let scratch = MmapMut::map_anon(size * 3).unwrap();
        let whole = MemoryRegion::from_slice(&scratch);
        let middle = whole.subregion(size, size).unwrap();

        unsafe { set_protection(&middle, MemoryProtection::READ) }.unwrap();
        let pieces = query_regions(&whole).unwrap();
        unsafe { set_protection(&middle, MemoryProtection::READ_WRITE) }.unwrap();

        assert_eq!(pieces.first().unwrap().0.base(), whole.base());
        assert_eq!(pieces.last().unwrap().0.end(), whole.end());
        assert!(pieces.contains(&(middle, MemoryProtection::READ)));
        let covered: usize = pieces.iter().map(|(piece, _)| piece.len()).sum();
        assert_eq!(covered, whole.len());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unaligned_protection_change_fails_whole() {
        let size = page_size();
        let scratch = MmapMut::map_anon(size * 2).unwrap();
        let region = MemoryRegion::new(scratch.as_ptr() as usize + 1, size);

        let err = unsafe { set_protection(&region, MemoryProtection::READ) }.unwrap_err();
        assert_eq!(err.code(), Some(libc::EINVAL));
        assert_eq!(query_protection(scratch.as_ptr() as usize).unwrap(), MemoryProtection::READ_WRITE);
    }
}
