// Fri Jan 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Out of range: {count} units at index {index} exceed length {length}")]
    OutOfRange { index: u64, count: u64, length: u64 },
    #[error("Out of range: cannot seek to {target}, valid targets are 0..={limit}")]
    SeekOutOfRange { target: i128, limit: u64 },
    #[error("Bit width {width} exceeds the {max}-bit value type")]
    InvalidBitWidth { width: u32, max: u32 },
    #[error("Resource error: {0}")]
    Resource(#[from] std::io::Error),
}

impl StreamError {
    pub fn is_out_of_range(&self) -> bool {
        !matches!(self, Self::Resource(_))
    }
}
