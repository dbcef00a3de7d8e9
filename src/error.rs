// Sat Jan 17 2026 - Alex

use crate::pattern::PatternError;
use crate::platform::PlatformError;
use crate::stream::StreamError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfRange,
    MalformedPattern,
    Platform,
    Resource,
    Config,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("Config error: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Stream(StreamError::Resource(_)) | Self::Io(_) => ErrorKind::Resource,
            Self::Stream(_) => ErrorKind::OutOfRange,
            Self::Pattern(_) => ErrorKind::MalformedPattern,
            Self::Platform(_) => ErrorKind::Platform,
            Self::Config(_) | Self::Json(_) => ErrorKind::Config,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.kind() == ErrorKind::OutOfRange
    }
}
