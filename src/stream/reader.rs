// Fri Jan 16 2026 - Alex

use crate::stream::{Stream, StreamError};
use std::mem::size_of;

/// A type that can decode itself from a [`Reader`].
///
/// Implemented here for the primitive numeric types (native byte order, no
/// normalization); callers implement it for their own records.
pub trait Decode: Sized {
    fn decode<S: Stream + ?Sized>(reader: &mut Reader<'_, S>) -> Result<Self, StreamError>;
}

macro_rules! impl_decode_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode<S: Stream + ?Sized>(reader: &mut Reader<'_, S>) -> Result<Self, StreamError> {
                    let bytes = reader.read_bytes(size_of::<$ty>())?;
                    let mut raw = [0u8; size_of::<$ty>()];
                    raw.copy_from_slice(&bytes);
                    Ok(<$ty>::from_ne_bytes(raw))
                }
            }
        )*
    };
}

impl_decode_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize, f32, f64);

/// Typed decoding on top of a borrowed [`Stream`]. Holds no state besides the borrow.
pub struct Reader<'s, S: Stream + ?Sized> {
    stream: &'s mut S,
}

impl<'s, S: Stream + ?Sized> Reader<'s, S> {
    pub fn new(stream: &'s mut S) -> Self {
        Self { stream }
    }

    pub fn read<T: Decode>(&mut self) -> Result<T, StreamError> {
        T::decode(self)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, StreamError> {
        self.stream.read(count)
    }

    /// Decodes `T` until `predicate` rejects one. The rejected value is consumed
    /// from the stream but not returned, and nothing past it is read.
    pub fn read_while<T, P>(&mut self, mut predicate: P) -> Result<Vec<T>, StreamError>
    where
        T: Decode,
        P: FnMut(&T) -> bool,
    {
        let mut items = Vec::new();
        loop {
            let item = self.read::<T>()?;
            if !predicate(&item) {
                break;
            }
            items.push(item);
        }
        Ok(items)
    }

    pub fn stream(&self) -> &S {
        &*self.stream
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut *self.stream
    }
}
