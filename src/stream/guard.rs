// Fri Jan 16 2026 - Alex

use crate::stream::{SeekOrigin, Stream, StreamError};
use std::ops::{Deref, DerefMut};

/// Remembers a stream's index and seeks back to it exactly once: through
/// [`SeekGuard::restore`], or on drop if the scope is left any other way.
pub struct SeekGuard<'s, S: Stream + ?Sized> {
    stream: &'s mut S,
    initial: u64,
    armed: bool,
}

impl<'s, S: Stream + ?Sized> SeekGuard<'s, S> {
    pub fn new(stream: &'s mut S) -> Result<Self, StreamError> {
        let initial = stream.index()?;
        Ok(Self {
            stream,
            initial,
            armed: true,
        })
    }

    pub fn initial(&self) -> u64 {
        self.initial
    }

    pub fn restore(mut self) -> Result<(), StreamError> {
        self.armed = false;
        self.seek_back()
    }

    fn seek_back(&mut self) -> Result<(), StreamError> {
        let target = i64::try_from(self.initial).map_err(|_| StreamError::SeekOutOfRange {
            target: self.initial as i128,
            limit: i64::MAX as u64,
        })?;
        self.stream.seek(target, SeekOrigin::Start)?;
        Ok(())
    }
}

impl<S: Stream + ?Sized> Deref for SeekGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.stream
    }
}

impl<S: Stream + ?Sized> DerefMut for SeekGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.stream
    }
}

impl<S: Stream + ?Sized> Drop for SeekGuard<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        if let Err(e) = self.seek_back() {
            log::warn!("Failed to restore stream index {}: {}", self.initial, e);
        }
    }
}
