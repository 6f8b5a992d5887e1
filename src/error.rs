/// Errors of a [`ChunkDeque`](crate::ChunkDeque).
///
/// Every failure is reported synchronously at the offending call, and
/// validation happens before any structural change: a rejected operation
/// leaves the deque exactly as it was.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The deque has no elements, so there is no front or back to access
    /// or remove.
    #[error("the deque is empty")]
    ContainerEmpty,

    /// A positional access fell outside `0..len`.
    #[error("index `{index}` is out of bound for length `{len}`")]
    IndexOutOfBound {
        /// The requested index.
        index: usize,
        /// The deque's length at the time of the call.
        len: usize,
    },

    /// A cursor is past-the-end where that is not permitted, was minted by
    /// a different deque instance, or references an element that has since
    /// been removed or relocated.
    #[error("the cursor is invalid")]
    InvalidCursor,
}

/// Convenience alias for fallible [`ChunkDeque`](crate::ChunkDeque)
/// operations.
pub type Result<T> = std::result::Result<T, Error>;
