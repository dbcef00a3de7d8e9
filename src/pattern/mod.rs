// Tue Jan 13 2026 - Alex

pub mod error;
pub mod signature;
pub mod wildcard;

pub use error::PatternError;
pub use signature::Signature;
pub use wildcard::SignatureByte;
