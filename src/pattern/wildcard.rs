// Tue Jan 13 2026 - Alex

use std::fmt;

/// One compiled signature position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureByte {
    Any,
    Exact(u8),
}

impl SignatureByte {
    pub fn matches(&self, byte: u8) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(b) => *b == byte,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn to_byte(&self) -> Option<u8> {
        match self {
            Self::Any => None,
            Self::Exact(b) => Some(*b),
        }
    }
}

impl From<u8> for SignatureByte {
    fn from(byte: u8) -> Self {
        Self::Exact(byte)
    }
}

impl From<Option<u8>> for SignatureByte {
    fn from(value: Option<u8>) -> Self {
        value.map_or(Self::Any, Self::Exact)
    }
}

impl fmt::Display for SignatureByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "?"),
            Self::Exact(b) => write!(f, "{:02X}", b),
        }
    }
}
