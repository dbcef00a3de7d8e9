// Tue Jan 15 2026 - Alex

//! Positioned byte and bit streams, wildcard byte signatures, and
//! per-process module and page-protection access.

pub mod cli;
pub mod config;
pub mod error;
pub mod pattern;
pub mod platform;
pub mod stream;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use pattern::{PatternError, Signature, SignatureByte};
pub use platform::{MemoryProtection, MemoryRegion, MemoryService, NativePlatform, PlatformError};
pub use stream::{
    BitStream, BitValue, Decode, FileStream, MemoryStream, Reader, SeekGuard, SeekOrigin, Stream,
    StreamError,
};
