use std::fmt;

/// Precondition violations reported by [`SegmentTree`](crate::SegmentTree).
///
/// Every error is raised before any mutation, so the tree is still valid afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegmentTreeError {
    /// A construction argument was rejected
    InvalidArgument { reason: &'static str },
    /// A point access outside `0..length`
    IndexOutOfRange { index: usize, length: usize },
}

impl fmt::Display for SegmentTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {}", reason),
            Self::IndexOutOfRange { index, length } => {
                write!(f, "index out of bounds: {} (length {})", index, length)
            }
        }
    }
}

impl std::error::Error for SegmentTreeError {}
