//! Error types shared by every container in the crate.
//!
//! All failures are reported synchronously at the violating call. A
//! container that returns an error has not been modified.

use core::fmt;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors reported by container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The operation needs at least one element but the container is empty.
    EmptyContainer,
    /// The cursor denotes a boundary where the requested change is undefined,
    /// e.g. inserting after `end()` or erasing a sentinel.
    InvalidPosition,
    /// A cursor positioned on a sentinel was dereferenced.
    OutOfRangeDereference,
    /// Checked array access outside `[0, len)`.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// Requested capacity does not fit in the address space.
    CapacityOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyContainer => write!(f, "empty container"),
            Error::InvalidPosition => write!(f, "invalid position"),
            Error::OutOfRangeDereference => write!(f, "dereference beyond range"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for size {len}")
            }
            Error::CapacityOverflow => write!(f, "capacity overflow"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::EmptyContainer.to_string(), "empty container");
        assert_eq!(Error::InvalidPosition.to_string(), "invalid position");
        assert_eq!(
            Error::OutOfRangeDereference.to_string(),
            "dereference beyond range"
        );
        assert_eq!(
            Error::IndexOutOfRange { index: 9, len: 3 }.to_string(),
            "index 9 out of range for size 3"
        );
    }

    #[test]
    fn usable_as_boxed_error() {
        let err: Box<dyn std::error::Error> = Box::new(Error::CapacityOverflow);
        assert_eq!(err.to_string(), "capacity overflow");
    }
}
