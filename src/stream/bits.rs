// Sat Jan 17 2026 - Alex

use crate::stream::{Backing, SeekOrigin, StreamError};

/// A value that can travel through a [`BitStream`] as its raw unsigned bits.
/// Floats go through `to_bits`/`from_bits`; signed values through their
/// same-width unsigned form.
pub trait BitValue: Copy {
    const BITS: u32;

    fn to_raw(self) -> u64;
    fn from_raw(raw: u64) -> Self;
}

macro_rules! impl_bit_value {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl BitValue for $ty {
                const BITS: u32 = <$unsigned>::BITS;

                fn to_raw(self) -> u64 {
                    self as $unsigned as u64
                }

                fn from_raw(raw: u64) -> Self {
                    raw as $unsigned as $ty
                }
            }
        )*
    };
}

impl_bit_value!(
    u8 => u8, u16 => u16, u32 => u32, u64 => u64,
    i8 => u8, i16 => u16, i32 => u32, i64 => u64,
);

impl BitValue for f32 {
    const BITS: u32 = 32;

    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }

    fn from_raw(raw: u64) -> Self {
        f32::from_bits(raw as u32)
    }
}

impl BitValue for f64 {
    const BITS: u32 = 64;

    fn to_raw(self) -> u64 {
        self.to_bits()
    }

    fn from_raw(raw: u64) -> Self {
        f64::from_bits(raw)
    }
}

impl BitValue for bool {
    const BITS: u32 = 1;

    fn to_raw(self) -> u64 {
        self as u64
    }

    fn from_raw(raw: u64) -> Self {
        raw & 1 != 0
    }
}

/// Bit-granular cursor over a fixed view or an owned buffer.
///
/// Bit `n` lives in byte `n >> 3` at position `n & 7`, least significant
/// first. Only the owned arm grows, one byte at a time, and only when a
/// single-bit write lands just past the end.
#[derive(Debug, Default)]
pub struct BitStream<'a> {
    backing: Backing<'a>,
    bit_index: usize,
}

impl<'a> BitStream<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self {
            backing: Backing::View(bytes),
            bit_index: 0,
        }
    }

    pub fn growable() -> Self {
        Self::default()
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            backing: Backing::Owned(bytes),
            bit_index: 0,
        }
    }

    pub fn current_bit(&self) -> usize {
        self.bit_index
    }

    pub fn len_bits(&self) -> usize {
        self.backing.len() * 8
    }

    pub fn is_growable(&self) -> bool {
        self.backing.is_growable()
    }

    pub fn bytes(&self) -> &[u8] {
        self.backing.as_slice()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.backing.into_owned()
    }

    pub fn read_bit(&mut self) -> Result<bool, StreamError> {
        let byte_index = self.bit_index >> 3;
        let byte = *self
            .backing
            .as_slice()
            .get(byte_index)
            .ok_or_else(|| self.out_of_range(1))?;

        let value = (byte >> (self.bit_index & 7)) & 1;
        self.bit_index += 1;
        Ok(value != 0)
    }

    pub fn write_bit(&mut self, value: bool) -> Result<(), StreamError> {
        let byte_index = self.bit_index >> 3;
        if byte_index >= self.backing.len() && !self.backing.ensure_len(byte_index + 1) {
            return Err(self.out_of_range(1));
        }

        let mask = 1u8 << (self.bit_index & 7);
        let byte = &mut self.backing.as_mut_slice()[byte_index];
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }

        self.bit_index += 1;
        Ok(())
    }

    pub fn read<T: BitValue>(&mut self) -> Result<T, StreamError> {
        self.read_bits(T::BITS)
    }

    /// Reads `width` bits, least significant first, into the low bits of `T`.
    pub fn read_bits<T: BitValue>(&mut self, width: u32) -> Result<T, StreamError> {
        Self::check_width::<T>(width)?;
        if self.bit_index + width as usize > self.len_bits() {
            return Err(self.out_of_range(width));
        }

        let mut raw = 0u64;
        for i in 0..width {
            if self.read_bit()? {
                raw |= 1u64 << i;
            }
        }
        Ok(T::from_raw(raw))
    }

    pub fn write<T: BitValue>(&mut self, value: T) -> Result<(), StreamError> {
        self.write_bits(value, T::BITS)
    }

    /// Writes the low `width` bits of `value`, least significant first.
    pub fn write_bits<T: BitValue>(&mut self, value: T, width: u32) -> Result<(), StreamError> {
        Self::check_width::<T>(width)?;
        if !self.backing.is_growable() && self.bit_index + width as usize > self.len_bits() {
            return Err(self.out_of_range(width));
        }

        let raw = value.to_raw();
        for i in 0..width {
            self.write_bit((raw >> i) & 1 != 0)?;
        }
        Ok(())
    }

    /// Moves the bit cursor. `End` counts back from `8 * len`. Targets at or
    /// past the last bit fail, except bit 0 so an empty stream can be rewound.
    /// Never grows the backing.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize, StreamError> {
        let limit = self.len_bits() as u64;
        let target = origin
            .resolve(offset, self.bit_index as u64, limit)
            .unwrap_or(i128::MAX);

        if target != 0 && !(0..limit as i128).contains(&target) {
            return Err(StreamError::SeekOutOfRange { target, limit });
        }

        self.bit_index = target as usize;
        Ok(self.bit_index)
    }

    fn check_width<T: BitValue>(width: u32) -> Result<(), StreamError> {
        if width > T::BITS {
            return Err(StreamError::InvalidBitWidth { width, max: T::BITS });
        }
        Ok(())
    }

    fn out_of_range(&self, count: u32) -> StreamError {
        StreamError::OutOfRange {
            index: self.bit_index as u64,
            count: count as u64,
            length: self.len_bits() as u64,
        }
    }
}
