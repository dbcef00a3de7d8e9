// Wed Jan 15 2026 - Alex

use crate::platform::{MemoryProtection, MemoryRegion, MemoryService, NativePlatform, PlatformError};
use libc::{c_char, c_int, c_void, dl_phdr_info, size_t};
use std::ffi::{CStr, CString};
use std::fs;
use std::ptr;
use std::slice;

// Leading fields of glibc's `struct link_map` (musl's `struct dso` starts the same way).
// A dlopen handle points at one.
#[repr(C)]
struct LinkMap {
    l_addr: usize,
    l_name: *const c_char,
    l_ld: *mut c_void,
    l_next: *mut LinkMap,
    l_prev: *mut LinkMap,
}

/// A dlopen reference, taken only to read loader metadata and closed on drop.
struct LibraryHandle(*mut c_void);

impl LibraryHandle {
    fn open(name: Option<&CStr>) -> Result<Self, PlatformError> {
        // RTLD_NOLOAD: report modules that are not loaded instead of loading them.
        let (path, flags) = match name {
            Some(name) => (name.as_ptr(), libc::RTLD_NOW | libc::RTLD_NOLOAD),
            None => (ptr::null(), libc::RTLD_NOW),
        };

        let handle = unsafe { libc::dlopen(path, flags) };
        if handle.is_null() {
            return Err(PlatformError::with_message(last_dl_error()));
        }
        Ok(Self(handle))
    }

    fn link_map(&self) -> &LinkMap {
        unsafe { &*(self.0 as *const LinkMap) }
    }
}

impl Drop for LibraryHandle {
    fn drop(&mut self) {
        unsafe {
            libc::dlclose(self.0);
        }
    }
}

fn last_dl_error() -> String {
    let message = unsafe { libc::dlerror() };
    if message.is_null() {
        return "Unknown dynamic loader error".to_string();
    }
    unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
}

struct ModuleSearch<'a> {
    load_bias: usize,
    name: &'a CStr,
    page_size: usize,
    found: Option<MemoryRegion>,
}

impl ModuleSearch<'_> {
    unsafe fn visit(&mut self, info: &dl_phdr_info) -> bool {
        let name = if info.dlpi_name.is_null() {
            <&CStr>::default()
        } else {
            CStr::from_ptr(info.dlpi_name)
        };
        if info.dlpi_addr as usize != self.load_bias || name != self.name {
            return false;
        }

        let headers = slice::from_raw_parts(info.dlpi_phdr, info.dlpi_phnum as usize);
        let loads = headers.iter().filter(|h| h.p_type == libc::PT_LOAD);
        let start = loads.clone().map(|h| h.p_vaddr as usize).min();
        let end = loads.map(|h| h.p_vaddr as usize + h.p_memsz as usize).max();

        if let (Some(start), Some(end)) = (start, end) {
            let region = MemoryRegion::new(self.load_bias + start, end - start);
            self.found = Some(region.page_aligned(self.page_size));
        }
        true
    }
}

unsafe extern "C" fn visit_module(info: *mut dl_phdr_info, _size: size_t, data: *mut c_void) -> c_int {
    let search = &mut *(data as *mut ModuleSearch<'_>);
    c_int::from(search.visit(&*info))
}

fn to_prot(protection: MemoryProtection) -> c_int {
    let mut prot = libc::PROT_NONE;
    if protection.can_read() {
        prot |= libc::PROT_READ;
    }
    if protection.can_write() {
        prot |= libc::PROT_WRITE;
    }
    if protection.can_execute() {
        prot |= libc::PROT_EXEC;
    }
    prot
}

/// Parses `/proc/self/maps` once into (range, protection) pairs, in address order.
fn read_maps() -> Result<Vec<(MemoryRegion, MemoryProtection)>, PlatformError> {
    let maps = fs::read_to_string("/proc/self/maps")?;
    let mut mappings = Vec::new();

    for line in maps.lines() {
        let mut fields = line.split_whitespace();
        let (Some(range), Some(perms)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Some((start, end)) = range.split_once('-') else {
            continue;
        };
        let (Ok(start), Ok(end)) = (usize::from_str_radix(start, 16), usize::from_str_radix(end, 16)) else {
            continue;
        };
        let protection = MemoryProtection::from_perms(perms)
            .ok_or_else(|| PlatformError::with_message(format!("Unexpected permissions '{}'", perms)))?;

        mappings.push((MemoryRegion::new(start, end - start), protection));
    }
    Ok(mappings)
}

impl MemoryService for NativePlatform {
    fn module_region(&self, name: Option<&str>) -> Result<MemoryRegion, PlatformError> {
        let name = name
            .map(CString::new)
            .transpose()
            .map_err(|_| PlatformError::from_code(libc::EINVAL))?;

        // Sized from the program headers, so the handle is only needed for the
        // load bias and the canonical path.
        let (load_bias, path) = {
            let handle = LibraryHandle::open(name.as_deref())?;
            let link_map = handle.link_map();
            let path = if link_map.l_name.is_null() {
                CString::default()
            } else {
                unsafe { CStr::from_ptr(link_map.l_name) }.to_owned()
            };
            (link_map.l_addr, path)
        };

        let mut search = ModuleSearch {
            load_bias,
            name: &path,
            page_size: self.page_size(),
            found: None,
        };
        unsafe {
            libc::dl_iterate_phdr(Some(visit_module), &mut search as *mut ModuleSearch<'_> as *mut c_void);
        }

        let region = search.found.ok_or_else(|| PlatformError::from_code(libc::ENOENT))?;
        log::debug!(
            "Resolved module {} ({}) to {}",
            name.as_deref().map_or("<main>".into(), |n| n.to_string_lossy()),
            path.to_string_lossy(),
            region
        );
        Ok(region)
    }

    unsafe fn set_protection(
        &self,
        region: &MemoryRegion,
        protection: MemoryProtection,
    ) -> Result<Option<MemoryProtection>, PlatformError> {
        if libc::mprotect(region.base() as *mut c_void, region.len(), to_prot(protection)) == -1 {
            return Err(PlatformError::last_os_error());
        }

        log::debug!("Changed protection of {} to {}", region, protection);
        Ok(None)
    }

    fn query_protection(&self, address: usize) -> Result<MemoryProtection, PlatformError> {
        read_maps()?
            .into_iter()
            .find(|(region, _)| region.contains(address))
            .map(|(_, protection)| protection)
            .ok_or_else(|| PlatformError::from_code(libc::ENOMEM))
    }

    fn query_regions(&self, region: &MemoryRegion) -> Result<Vec<(MemoryRegion, MemoryProtection)>, PlatformError> {
        let clipped = read_maps()?
            .into_iter()
            .filter_map(|(mapping, protection)| {
                let start = mapping.base().max(region.base());
                let end = mapping.end().min(region.end());
                (start < end).then(|| (MemoryRegion::new(start, end - start), protection))
            })
            .collect();
        Ok(clipped)
    }

    fn describe_error(&self, code: i32) -> String {
        let mut buffer = [0 as c_char; 256];
        let result = unsafe { libc::strerror_r(code, buffer.as_mut_ptr(), buffer.len()) };
        if result != 0 {
            return format!("Unknown error {}", code);
        }
        unsafe { CStr::from_ptr(buffer.as_ptr()) }.to_string_lossy().into_owned()
    }

    fn page_size(&self) -> usize {
        match unsafe { libc::sysconf(libc::_SC_PAGESIZE) } {
            size if size > 0 => size as usize,
            _ => 4096,
        }
    }
}
