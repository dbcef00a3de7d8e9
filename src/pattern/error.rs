// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Malformed pattern: invalid hex token '{token}' at position {position}")]
    Malformed { position: usize, token: String },
}
