// Fri Jan 16 2026 - Alex

use crate::stream::{Backing, SeekOrigin, Stream, StreamError};

/// A [`Stream`] over memory: either a caller's fixed view or a buffer that
/// grows as it is written.
#[derive(Debug, Default)]
pub struct MemoryStream<'a> {
    backing: Backing<'a>,
    index: usize,
}

impl<'a> MemoryStream<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self {
            backing: Backing::View(bytes),
            index: 0,
        }
    }

    pub fn growable() -> Self {
        Self::default()
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            backing: Backing::Owned(bytes),
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.backing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backing.is_empty()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.len() - self.index
    }

    pub fn bytes(&self) -> &[u8] {
        self.backing.as_slice()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.backing.into_owned()
    }

    fn span_end(&self, count: usize) -> Result<usize, StreamError> {
        let out_of_range = || StreamError::OutOfRange {
            index: self.index as u64,
            count: count as u64,
            length: self.len() as u64,
        };
        self.index.checked_add(count).ok_or_else(out_of_range)
    }
}

impl Stream for MemoryStream<'_> {
    fn read(&mut self, count: usize) -> Result<Vec<u8>, StreamError> {
        let end = self.span_end(count)?;
        if end > self.len() {
            return Err(StreamError::OutOfRange {
                index: self.index as u64,
                count: count as u64,
                length: self.len() as u64,
            });
        }

        let bytes = self.backing.as_slice()[self.index..end].to_vec();
        self.index = end;
        Ok(bytes)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        let end = self.span_end(bytes.len())?;
        if !self.backing.ensure_len(end) {
            return Err(StreamError::OutOfRange {
                index: self.index as u64,
                count: bytes.len() as u64,
                length: self.len() as u64,
            });
        }

        self.backing.as_mut_slice()[self.index..end].copy_from_slice(bytes);
        self.index = end;
        Ok(())
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<u64, StreamError> {
        let length = self.len() as u64;
        let target = origin
            .resolve(offset, self.index as u64, length)
            .unwrap_or(i128::MAX);
        if !(0..=length as i128).contains(&target) {
            return Err(StreamError::SeekOutOfRange { target, limit: length });
        }

        self.index = target as usize;
        Ok(target as u64)
    }

    fn index(&self) -> Result<u64, StreamError> {
        Ok(self.index as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_writes_read_back_whole() {
        let data: Vec<u8> = (0u8..32).map(|b| b.wrapping_mul(7)).collect();
        for split in 0..=data.len() {
            let mut stream = MemoryStream::growable();
            stream.write(&data[..split]).unwrap();
            stream.write(&data[split..]).unwrap();
            stream.seek(0, SeekOrigin::Start).unwrap();
            assert_eq!(stream.read(data.len()).unwrap(), data);
            assert_eq!(stream.remaining(), 0);
        }
    }

    #[test]
    fn test_view_read_exact_and_bounds() {
        let mut storage = [1u8, 2, 3, 4];
        let mut stream = MemoryStream::new(&mut storage);

        assert_eq!(stream.read(4).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(stream.index().unwrap(), 4);

        let err = stream.read(1).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(stream.index().unwrap(), 4);
    }

    #[test]
    fn test_view_write_does_not_grow() {
        let mut storage = [0u8; 3];
        {
            let mut stream = MemoryStream::new(&mut storage);
            stream.write(&[9, 8]).unwrap();
            assert!(matches!(
                stream.write(&[7, 6]),
                Err(StreamError::OutOfRange { index: 2, count: 2, length: 3 })
            ));
            assert_eq!(stream.index().unwrap(), 2);
        }
        assert_eq!(storage, [9, 8, 0]);
    }

    #[test]
    fn test_growable_overwrites_then_extends() {
        let mut stream = MemoryStream::from_vec(vec![1, 2, 3]);
        stream.seek(2, SeekOrigin::Start).unwrap();
        stream.write(&[0xAA, 0xBB]).unwrap();
        assert_eq!(stream.into_inner(), vec![1, 2, 0xAA, 0xBB]);
    }

    #[test]
    fn test_seek_out_of_range_keeps_cursor() {
        let mut storage = [0u8; 8];
        let mut stream = MemoryStream::new(&mut storage);
        stream.seek(3, SeekOrigin::Start).unwrap();

        assert!(stream.seek(9, SeekOrigin::Start).is_err());
        assert!(stream.seek(-4, SeekOrigin::Current).is_err());
        assert!(stream.seek(9, SeekOrigin::End).is_err());
        assert!(stream.seek(-1, SeekOrigin::End).is_err());
        assert_eq!(stream.index().unwrap(), 3);

        assert_eq!(stream.seek(0, SeekOrigin::End).unwrap(), 8);
        assert_eq!(stream.seek(-2, SeekOrigin::Current).unwrap(), 6);
    }

    #[test]
    fn test_temporarily_seek_restores_on_success() {
        let mut storage = [10u8, 11, 12, 13, 14, 15, 16, 17];
        let mut stream = MemoryStream::new(&mut storage);
        stream.seek(1, SeekOrigin::Start).unwrap();

        let peeked: Result<Vec<u8>, StreamError> =
            stream.temporarily_seek(5, SeekOrigin::Start, |s| s.read(2));
        assert_eq!(peeked.unwrap(), vec![15, 16]);
        assert_eq!(stream.index().unwrap(), 1);
    }

    #[test]
    fn test_temporarily_seek_restores_on_failure() {
        let mut storage = [0u8; 8];
        let mut stream = MemoryStream::new(&mut storage);
        stream.seek(2, SeekOrigin::Start).unwrap();

        let result: Result<Vec<u8>, StreamError> =
            stream.temporarily_seek(5, SeekOrigin::Start, |s| s.read(10));
        assert!(result.unwrap_err().is_out_of_range());
        assert_eq!(stream.index().unwrap(), 2);
    }

    #[test]
    fn test_temporarily_seek_bad_target_keeps_cursor() {
        let mut storage = [0u8; 4];
        let mut stream = MemoryStream::new(&mut storage);
        stream.seek(1, SeekOrigin::Start).unwrap();

        let mut ran = false;
        let result: Result<(), StreamError> = stream.temporarily_seek(99, SeekOrigin::Start, |_| {
            ran = true;
            Ok(())
        });
        assert!(result.is_err());
        assert!(!ran);
        assert_eq!(stream.index().unwrap(), 1);
    }
}
