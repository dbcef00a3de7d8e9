// Tue Jan 13 2026 - Alex

use crate::pattern::{PatternError, SignatureByte};
use std::fmt;
use std::str::FromStr;

/// A byte pattern with wildcard positions, compiled from text such as
/// `"48 8B ? 05"`.
///
/// Whitespace is only a separator. Each `?` is one wildcard byte, so `??`
/// is two. Every other token is exactly two hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    values: Vec<SignatureByte>,
}

impl Signature {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let bytes = pattern.as_bytes();
        let mut values = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];
            if c.is_ascii_whitespace() {
                i += 1;
                continue;
            }
            if c == b'?' {
                values.push(SignatureByte::Any);
                i += 1;
                continue;
            }

            let malformed = || PatternError::Malformed {
                position: i,
                token: pattern[i..].chars().take(2).collect(),
            };
            let token = pattern
                .get(i..i + 2)
                .filter(|token| token.bytes().all(|b| b.is_ascii_hexdigit()))
                .ok_or_else(malformed)?;
            let value = u8::from_str_radix(token, 16).map_err(|_| malformed())?;

            values.push(SignatureByte::Exact(value));
            i += 2;
        }

        log::trace!("Compiled signature '{}' into {} entries", pattern, values.len());
        Ok(Self { values })
    }

    pub fn from_values(values: Vec<SignatureByte>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[SignatureByte] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// An empty signature is valid but never matches anything.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn wildcard_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_wildcard()).count()
    }

    pub fn matches_at(&self, haystack: &[u8], offset: usize) -> bool {
        match haystack.get(offset..) {
            Some(window) if !self.is_empty() && window.len() >= self.len() => self
                .values
                .iter()
                .zip(window)
                .all(|(expected, &actual)| expected.matches(actual)),
            _ => false,
        }
    }

    /// Returns the offset of the first match in `haystack`. Stops at the first hit.
    pub fn find_in(&self, haystack: &[u8]) -> Option<usize> {
        if self.is_empty() || haystack.len() < self.len() {
            return None;
        }

        let anchor = self
            .values
            .iter()
            .enumerate()
            .find_map(|(j, v)| v.to_byte().map(|b| (j, b)));

        let found = (0..=haystack.len() - self.len()).find(|&i| {
            let anchored = anchor.map_or(true, |(j, b)| haystack[i + j] == b);
            anchored && self.matches_at(haystack, i)
        });

        log::trace!("Signature '{}' scan over {} bytes: {:?}", self, haystack.len(), found);
        found
    }
}

impl FromStr for Signature {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
