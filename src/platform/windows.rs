// Wed Jan 15 2026 - Alex

use crate::platform::{MemoryProtection, MemoryRegion, MemoryService, NativePlatform, PlatformError};
use std::ffi::{c_void, CString};
use std::mem::{size_of, MaybeUninit};
use windows::core::{PCSTR, PSTR};
use windows::Win32::Foundation::{GetLastError, ERROR_INVALID_PARAMETER};
use windows::Win32::System::Diagnostics::Debug::{
    FormatMessageA, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleA;
use windows::Win32::System::Memory::{
    VirtualProtect, VirtualQuery, MEMORY_BASIC_INFORMATION, MEM_COMMIT, PAGE_EXECUTE, PAGE_EXECUTE_READ,
    PAGE_EXECUTE_READWRITE, PAGE_EXECUTE_WRITECOPY, PAGE_NOACCESS, PAGE_PROTECTION_FLAGS,
    PAGE_READONLY, PAGE_READWRITE, PAGE_WRITECOPY,
};
use windows::Win32::System::ProcessStatus::{GetModuleInformation, MODULEINFO};
use windows::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};
use windows::Win32::System::Threading::GetCurrentProcess;

// Strips PAGE_GUARD, PAGE_NOCACHE and PAGE_WRITECOMBINE.
const PAGE_MODIFIER_MASK: u32 = 0xFF;

fn to_platform_error(error: windows::core::Error) -> PlatformError {
    // HRESULT_FROM_WIN32 wraps Win32 codes as 0x8007xxxx.
    let hresult = error.code().0;
    if (hresult as u32) & 0xFFFF_0000 == 0x8007_0000 {
        PlatformError::from_code(hresult & 0xFFFF)
    } else {
        PlatformError::from_code(hresult)
    }
}

// Windows has no write-only or write-without-read pages; writing implies reading.
fn to_page_flags(protection: MemoryProtection) -> PAGE_PROTECTION_FLAGS {
    match (protection.can_read(), protection.can_write(), protection.can_execute()) {
        (false, false, false) => PAGE_NOACCESS,
        (true, false, false) => PAGE_READONLY,
        (_, true, false) => PAGE_READWRITE,
        (false, false, true) => PAGE_EXECUTE,
        (true, false, true) => PAGE_EXECUTE_READ,
        (_, true, true) => PAGE_EXECUTE_READWRITE,
    }
}

fn from_page_flags(flags: PAGE_PROTECTION_FLAGS) -> MemoryProtection {
    let base = PAGE_PROTECTION_FLAGS(flags.0 & PAGE_MODIFIER_MASK);
    match base {
        PAGE_READONLY => MemoryProtection::READ,
        PAGE_READWRITE | PAGE_WRITECOPY => MemoryProtection::READ_WRITE,
        PAGE_EXECUTE => MemoryProtection::EXECUTE,
        PAGE_EXECUTE_READ => MemoryProtection::READ_EXECUTE,
        PAGE_EXECUTE_READWRITE | PAGE_EXECUTE_WRITECOPY => MemoryProtection::READ_WRITE_EXECUTE,
        _ => MemoryProtection::empty(),
    }
}

impl MemoryService for NativePlatform {
    fn module_region(&self, name: Option<&str>) -> Result<MemoryRegion, PlatformError> {
        let name = name
            .map(CString::new)
            .transpose()
            .map_err(|_| PlatformError::from_code(ERROR_INVALID_PARAMETER.0 as i32))?;
        let module_name = name
            .as_ref()
            .map_or(PCSTR::null(), |n| PCSTR(n.as_ptr() as *const u8));

        // GetModuleHandleA does not add a reference, so there is nothing to release.
        let module = unsafe { GetModuleHandleA(module_name) }.map_err(to_platform_error)?;

        let mut info = MODULEINFO::default();
        unsafe {
            GetModuleInformation(
                GetCurrentProcess(),
                module,
                &mut info,
                size_of::<MODULEINFO>() as u32,
            )
        }
        .map_err(to_platform_error)?;

        let region = MemoryRegion::new(info.lpBaseOfDll as usize, info.SizeOfImage as usize);
        log::debug!(
            "Resolved module {} to {}",
            name.as_deref().map_or("<main>".into(), |n| n.to_string_lossy()),
            region
        );
        Ok(region)
    }

    unsafe fn set_protection(
        &self,
        region: &MemoryRegion,
        protection: MemoryProtection,
    ) -> Result<Option<MemoryProtection>, PlatformError> {
        let mut previous = PAGE_PROTECTION_FLAGS(0);
        VirtualProtect(
            region.base() as *const c_void,
            region.len(),
            to_page_flags(protection),
            &mut previous,
        )
        .map_err(to_platform_error)?;

        let previous = from_page_flags(previous);
        log::debug!("Changed protection of {} from {} to {}", region, previous, protection);
        Ok(Some(previous))
    }

    fn query_protection(&self, address: usize) -> Result<MemoryProtection, PlatformError> {
        let mut info = MEMORY_BASIC_INFORMATION::default();
        let written = unsafe {
            VirtualQuery(
                Some(address as *const c_void),
                &mut info,
                size_of::<MEMORY_BASIC_INFORMATION>(),
            )
        };
        if written == 0 {
            return Err(PlatformError::from_code(unsafe { GetLastError() }.0 as i32));
        }
        Ok(from_page_flags(info.Protect))
    }

    fn query_regions(&self, region: &MemoryRegion) -> Result<Vec<(MemoryRegion, MemoryProtection)>, PlatformError> {
        let mut pieces = Vec::new();
        let mut address = region.base();

        while address < region.end() {
            let mut info = MEMORY_BASIC_INFORMATION::default();
            let written = unsafe {
                VirtualQuery(
                    Some(address as *const c_void),
                    &mut info,
                    size_of::<MEMORY_BASIC_INFORMATION>(),
                )
            };
            if written == 0 {
                return Err(PlatformError::from_code(unsafe { GetLastError() }.0 as i32));
            }

            let next = (info.BaseAddress as usize).saturating_add(info.RegionSize);
            let end = next.min(region.end());
            if info.State == MEM_COMMIT && end > address {
                pieces.push((MemoryRegion::new(address, end - address), from_page_flags(info.Protect)));
            }
            if next <= address {
                break;
            }
            address = next;
        }
        Ok(pieces)
    }

    fn describe_error(&self, code: i32) -> String {
        let mut buffer = [0u8; 512];
        let length = unsafe {
            FormatMessageA(
                FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                None,
                code as u32,
                0,
                PSTR(buffer.as_mut_ptr()),
                buffer.len() as u32,
                None,
            )
        };
        if length == 0 {
            return format!("Unknown error {:#x}", code);
        }
        String::from_utf8_lossy(&buffer[..length as usize]).trim_end().to_string()
    }

    fn page_size(&self) -> usize {
        let mut info = MaybeUninit::<SYSTEM_INFO>::zeroed();
        unsafe {
            GetSystemInfo(info.as_mut_ptr());
            info.assume_init().dwPageSize as usize
        }
    }
}
