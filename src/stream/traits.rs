// Fri Jan 16 2026 - Alex

use crate::stream::{SeekGuard, SeekOrigin, StreamError};

/// A seekable, byte-addressable source and sink.
///
/// Implementations keep `0 <= index <= length` after every call: a read or
/// write that would leave that range fails before touching any byte.
pub trait Stream {
    /// Reads exactly `count` bytes at the cursor and advances past them.
    fn read(&mut self, count: usize) -> Result<Vec<u8>, StreamError>;

    /// Writes `bytes` at the cursor and advances past them.
    fn write(&mut self, bytes: &[u8]) -> Result<(), StreamError>;

    /// Moves the cursor and returns the new absolute index.
    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<u64, StreamError>;

    fn index(&self) -> Result<u64, StreamError>;

    /// Seeks, runs `body`, then puts the cursor back where it was, whether
    /// `body` succeeded or not. An error from `body` wins over a restore error.
    ///
    /// Trait objects use the free [`temporarily_seek`] instead.
    fn temporarily_seek<T, E, F>(&mut self, offset: i64, origin: SeekOrigin, body: F) -> Result<T, E>
    where
        Self: Sized,
        E: From<StreamError>,
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        temporarily_seek(self, offset, origin, body)
    }
}

/// [`Stream::temporarily_seek`] for any stream, `dyn Stream` included.
pub fn temporarily_seek<S, T, E, F>(stream: &mut S, offset: i64, origin: SeekOrigin, body: F) -> Result<T, E>
where
    S: Stream + ?Sized,
    E: From<StreamError>,
    F: FnOnce(&mut S) -> Result<T, E>,
{
    let mut guard = SeekGuard::new(stream)?;
    guard.seek(offset, origin)?;

    let result = body(&mut *guard);
    let restored = guard.restore();

    let value = result?;
    restored?;
    Ok(value)
}
