// Fri Jan 16 2026 - Alex

pub mod backing;
pub mod bits;
pub mod error;
pub mod file;
pub mod guard;
pub mod memory;
pub mod origin;
pub mod reader;
pub mod traits;

pub use backing::Backing;
pub use bits::{BitStream, BitValue};
pub use error::StreamError;
pub use file::FileStream;
pub use guard::SeekGuard;
pub use memory::MemoryStream;
pub use origin::SeekOrigin;
pub use reader::{Decode, Reader};
pub use traits::{temporarily_seek, Stream};
