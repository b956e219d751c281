//! Error type shared by the piece table and the line-indexed buffer.

use std::fmt;

/// Result alias for buffer operations.
pub type Result<T> = std::result::Result<T, BufferError>;

/// Which coordinate an out-of-bounds error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinate {
    /// A character offset into the document.
    Offset,
    /// The exclusive end of a character range.
    RangeEnd,
    /// A 0-based line number.
    Line,
    /// A 0-based column within a line.
    Column,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Offset => "offset",
            Self::RangeEnd => "range end",
            Self::Line => "line",
            Self::Column => "column",
        };
        f.write_str(name)
    }
}

/// Errors returned by buffer operations.
///
/// There is only one failure mode: a position that falls outside the current
/// document. Empty insertions and zero-length deletions are no-ops, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("{what} {index} is out of bounds (limit {limit})")]
    OutOfBounds {
        what: Coordinate,
        index: usize,
        limit: usize,
    },
}

impl BufferError {
    pub(crate) const fn out_of_bounds(what: Coordinate, index: usize, limit: usize) -> Self {
        Self::OutOfBounds { what, index, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message_names_coordinate() {
        let err = BufferError::out_of_bounds(Coordinate::Line, 7, 3);
        assert_eq!(err.to_string(), "line 7 is out of bounds (limit 3)");
    }

    #[test]
    fn test_range_end_display() {
        let err = BufferError::out_of_bounds(Coordinate::RangeEnd, 12, 10);
        assert_eq!(err.to_string(), "range end 12 is out of bounds (limit 10)");
    }
}
