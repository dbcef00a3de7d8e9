// Fri Jan 16 2026 - Alex

use crate::stream::{SeekOrigin, Stream, StreamError};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// A [`Stream`] over an owned file handle. The OS file cursor is the index.
///
/// The handle is closed exactly once: by [`FileStream::close`] or on drop.
/// [`FileStream::into_file`] hands it back instead.
#[derive(Debug)]
pub struct FileStream {
    file: File,
}

impl FileStream {
    /// Takes ownership of an already open file; it will be closed by this stream.
    pub fn adopt(file: File) -> Self {
        Self { file }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StreamError> {
        let file = File::open(path)?;
        Ok(Self::adopt(file))
    }

    pub fn open_rw<P: AsRef<Path>>(path: P) -> Result<Self, StreamError> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self::adopt(file))
    }

    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StreamError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::adopt(file))
    }

    pub fn len(&self) -> Result<u64, StreamError> {
        Ok(self.file.metadata()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StreamError> {
        Ok(self.len()? == 0)
    }

    /// Flushes and syncs written data to disk, reporting any write-back
    /// failure, then closes the handle.
    pub fn close(mut self) -> Result<(), StreamError> {
        self.file.flush()?;
        self.file.sync_all()?;
        Ok(())
    }

    pub fn into_file(self) -> File {
        self.file
    }

    fn position(&self) -> Result<u64, StreamError> {
        Ok((&self.file).stream_position()?)
    }
}

impl Stream for FileStream {
    fn read(&mut self, count: usize) -> Result<Vec<u8>, StreamError> {
        let start = self.position()?;
        let length = self.len()?;
        let fits = start
            .checked_add(count as u64)
            .map_or(false, |end| end <= length);
        if !fits {
            return Err(StreamError::OutOfRange {
                index: start,
                count: count as u64,
                length,
            });
        }

        // The file can still shrink under us; a short read is reported the same way.
        let mut bytes = vec![0u8; count];

        match self.file.read_exact(&mut bytes) {
            Ok(()) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                self.file.seek(SeekFrom::Start(start))?;
                Err(StreamError::OutOfRange {
                    index: start,
                    count: count as u64,
                    length: self.len()?,
                })
            }
            Err(e) => Err(StreamError::Resource(e)),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        self.file.write_all(bytes)?;
        Ok(())
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<u64, StreamError> {
        // Negative targets are rejected up front; anything else is the OS's call.
        let target = match origin {
            SeekOrigin::Start => SeekFrom::Start(offset.max(0) as u64),
            SeekOrigin::Current => SeekFrom::Current(offset),
            SeekOrigin::End => SeekFrom::End(offset.checked_neg().unwrap_or(i64::MAX)),
        };
        let length = self.len()?;
        let resolved = origin
            .resolve(offset, self.position()?, length)
            .unwrap_or(i128::MIN);
        if resolved < 0 {
            return Err(StreamError::SeekOutOfRange { target: resolved, limit: length });
        }

        Ok(self.file.seek(target)?)
    }

    fn index(&self) -> Result<u64, StreamError> {
        self.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Reader;

    fn scratch(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_and_index_follow_os_cursor() {
        let file = scratch(&[1, 2, 3, 4, 5, 6]);
        let mut stream = FileStream::open(file.path()).unwrap();

        assert_eq!(stream.read(2).unwrap(), vec![1, 2]);
        assert_eq!(stream.index().unwrap(), 2);
        assert_eq!(stream.seek(1, SeekOrigin::End).unwrap(), 5);
        assert_eq!(stream.read(1).unwrap(), vec![6]);
    }

    #[test]
    fn test_short_read_is_out_of_range_and_keeps_cursor() {
        let file = scratch(&[1, 2, 3]);
        let mut stream = FileStream::open(file.path()).unwrap();
        stream.seek(1, SeekOrigin::Start).unwrap();

        let err = stream.read(5).unwrap_err();
        assert!(matches!(err, StreamError::OutOfRange { index: 1, count: 5, length: 3 }));
        assert_eq!(stream.index().unwrap(), 1);
    }

    #[test]
    fn test_huge_read_is_out_of_range() {
        let file = scratch(&[1, 2, 3]);
        let mut stream = FileStream::open(file.path()).unwrap();
        stream.seek(1, SeekOrigin::Start).unwrap();

        for count in [usize::MAX, 1 << 40] {
            let err = stream.read(count).unwrap_err();
            assert!(matches!(err, StreamError::OutOfRange { index: 1, length: 3, .. }));
            assert_eq!(stream.index().unwrap(), 1);
        }
        assert_eq!(stream.read(2).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_close_syncs_written_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closed.bin");
        let mut stream = FileStream::create(&path).unwrap();
        stream.write(&[0xAB; 32]).unwrap();
        stream.close().unwrap();

        let reopened = FileStream::open(&path).unwrap();
        assert_eq!(reopened.len().unwrap(), 32);
    }

    #[test]
    fn test_seek_before_start_fails() {
        let file = scratch(&[0; 4]);
        let mut stream = FileStream::open(file.path()).unwrap();
        stream.seek(2, SeekOrigin::Start).unwrap();

        assert!(stream.seek(-3, SeekOrigin::Current).unwrap_err().is_out_of_range());
        assert!(stream.seek(5, SeekOrigin::End).unwrap_err().is_out_of_range());
        assert!(stream.seek(-1, SeekOrigin::Start).unwrap_err().is_out_of_range());
        assert_eq!(stream.index().unwrap(), 2);
    }

    #[test]
    fn test_write_then_temporarily_seek() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.bin");
        let mut stream = FileStream::create(&path).unwrap();

        stream.write(&0xDEADBEEFu32.to_ne_bytes()).unwrap();
        stream.write(&[7, 7]).unwrap();

        let value: Result<u32, StreamError> = stream.temporarily_seek(0, SeekOrigin::Start, |s| {
            Reader::new(s).read::<u32>()
        });
        assert_eq!(value.unwrap(), 0xDEADBEEF);
        assert_eq!(stream.index().unwrap(), 6);
        stream.close().unwrap();

        assert_eq!(std::fs::read(&path).unwrap().len(), 6);
    }

    #[test]
    fn test_into_file_releases_ownership() {
        let file = scratch(&[42]);
        let stream = FileStream::open(file.path()).unwrap();
        let mut inner = stream.into_file();
        let mut byte = [0u8; 1];
        inner.read_exact(&mut byte).unwrap();
        assert_eq!(byte, [42]);
    }
}
