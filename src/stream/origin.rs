// Fri Jan 16 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekOrigin {
    Start,
    Current,
    End,
}

impl SeekOrigin {
    /// Resolves `offset` against this origin. `End` counts backwards from `length`.
    /// Returns `None` when the arithmetic leaves the `i128` range.
    pub fn resolve(self, offset: i64, current: u64, length: u64) -> Option<i128> {
        let offset = offset as i128;
        match self {
            Self::Start => Some(offset),
            Self::Current => (current as i128).checked_add(offset),
            Self::End => (length as i128).checked_sub(offset),
        }
    }
}

impl fmt::Display for SeekOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Current => write!(f, "current"),
            Self::End => write!(f, "end"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_each_origin() {
        assert_eq!(SeekOrigin::Start.resolve(4, 2, 10), Some(4));
        assert_eq!(SeekOrigin::Current.resolve(3, 2, 10), Some(5));
        assert_eq!(SeekOrigin::Current.resolve(-3, 2, 10), Some(-1));
        assert_eq!(SeekOrigin::End.resolve(4, 2, 10), Some(6));
        assert_eq!(SeekOrigin::End.resolve(-1, 2, 10), Some(11));
    }
}
