// Tue Jan 13 2026 - Alex

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Read/write/execute access for a range of memory.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemoryProtection: u32 {
        const READ = 1;
        const WRITE = 2;
        const EXECUTE = 4;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
        const READ_EXECUTE = Self::READ.bits() | Self::EXECUTE.bits();
        const READ_WRITE_EXECUTE = Self::READ.bits() | Self::WRITE.bits() | Self::EXECUTE.bits();
    }
}

impl MemoryProtection {
    pub fn new(read: bool, write: bool, execute: bool) -> Self {
        let mut protection = Self::empty();
        protection.set(Self::READ, read);
        protection.set(Self::WRITE, write);
        protection.set(Self::EXECUTE, execute);
        protection
    }

    /// Parses the leading `rwx` triple of a permission string such as `r-xp`.
    pub fn from_perms(perms: &str) -> Option<Self> {
        let bytes = perms.as_bytes();
        if bytes.len() < 3 {
            return None;
        }

        let flag = |c: u8, set: u8| match c {
            b'-' => Some(false),
            c if c == set => Some(true),
            _ => None,
        };
        Some(Self::new(
            flag(bytes[0], b'r')?,
            flag(bytes[1], b'w')?,
            flag(bytes[2], b'x')?,
        ))
    }

    pub fn can_read(self) -> bool {
        self.contains(Self::READ)
    }

    pub fn can_write(self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn can_execute(self) -> bool {
        self.contains(Self::EXECUTE)
    }
}

impl fmt::Display for MemoryProtection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.can_read() { 'r' } else { '-' },
            if self.can_write() { 'w' } else { '-' },
            if self.can_execute() { 'x' } else { '-' },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_display() {
        assert_eq!(MemoryProtection::new(true, false, true), MemoryProtection::READ_EXECUTE);
        assert_eq!(MemoryProtection::READ_WRITE.to_string(), "rw-");
        assert_eq!(MemoryProtection::empty().to_string(), "---");
    }

    #[test]
    fn test_from_perms() {
        assert_eq!(MemoryProtection::from_perms("r-xp"), Some(MemoryProtection::READ_EXECUTE));
        assert_eq!(MemoryProtection::from_perms("rwx"), Some(MemoryProtection::READ_WRITE_EXECUTE));
        assert_eq!(MemoryProtection::from_perms("---s"), Some(MemoryProtection::empty()));
        assert_eq!(MemoryProtection::from_perms("rx-"), None);
        assert_eq!(MemoryProtection::from_perms("r"), None);
    }
}
