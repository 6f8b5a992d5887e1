use crate::error::{Error, Result};
use crate::{ChunkCapacity, ChunkDeque, Usize};

/// A detached position handle into a [`ChunkDeque`].
///
/// A `Cursor` is a plain `Copy` value, not a borrow: holding one does not
/// lock the deque, and the deque is free to mutate underneath it. In
/// exchange, every use revalidates the cursor against the live structure
/// and fails with [`Error::InvalidCursor`] when it no longer lines up,
/// instead of silently observing the wrong element.
///
/// A cursor stays valid as long as the block and element it was minted for
/// are untouched. Structural mutation through [`ChunkDeque::insert`] and
/// [`ChunkDeque::erase`] splits and re-merges blocks, so cursors acquired
/// before such a call must be re-acquired afterwards.
///
/// # Example
/// ```rust
/// use chunk_deque::{ChunkDeque, Error};
///
/// let mut deque: ChunkDeque<i64, 4> = ChunkDeque::from([1, 2, 3]);
///
/// let pos = deque.find(1).unwrap();
/// assert_eq!(pos.get(&deque), Ok(&2));
///
/// deque.erase(pos).unwrap();
/// assert_eq!(pos.get(&deque), Err(Error::InvalidCursor));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Identity of the owning deque, never shared between instances.
    pub(crate) deque: u64,
    /// `None` is the past-the-end position.
    pub(crate) spot: Option<Spot>,
}

/// The element coordinates a non-end cursor carries: arena handles paired
/// with never-reused identities, plus the in-block offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Spot {
    pub(crate) block: usize,
    pub(crate) block_id: u64,
    pub(crate) node: usize,
    pub(crate) node_id: u64,
    pub(crate) pos: usize,
}

impl Cursor {
    /// Checks if this is a past-the-end cursor.
    ///
    /// Note that this is a property of the cursor value alone; an end
    /// cursor of one deque is still rejected by every other.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.spot.is_none()
    }

    /// Returns a reference to the element this cursor refers to.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if the cursor is past-the-end, belongs to
    /// another deque, or went stale.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::{ChunkDeque, Error};
    ///
    /// let deque: ChunkDeque<i64, 4> = ChunkDeque::from([10, 20]);
    ///
    /// assert_eq!(deque.begin().get(&deque), Ok(&10));
    /// assert_eq!(deque.end().get(&deque), Err(Error::InvalidCursor));
    /// ```
    pub fn get<'a, T, const N: usize>(&self, deque: &'a ChunkDeque<T, N>) -> Result<&'a T>
    where
        Usize<N>: ChunkCapacity,
    {
        let (_, node, _) = deque.resolve(*self)?.ok_or(Error::InvalidCursor)?;
        Ok(&deque.nodes[node].value)
    }

    /// Returns a mutable reference to the element this cursor refers to.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if the cursor is past-the-end, belongs to
    /// another deque, or went stale.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let mut deque: ChunkDeque<i64, 4> = ChunkDeque::from([1, 2, 3]);
    ///
    /// let pos = deque.find(1).unwrap();
    /// *pos.get_mut(&mut deque).unwrap() = 20;
    ///
    /// assert_eq!(deque.at(1), Ok(&20));
    /// ```
    pub fn get_mut<'a, T, const N: usize>(
        &self,
        deque: &'a mut ChunkDeque<T, N>,
    ) -> Result<&'a mut T>
    where
        Usize<N>: ChunkCapacity,
    {
        let (_, node, _) = deque.resolve(*self)?.ok_or(Error::InvalidCursor)?;
        Ok(&mut deque.nodes[node].value)
    }

    /// Returns the cursor one position forward, crossing block boundaries
    /// as needed. Stepping past the last element yields the past-the-end
    /// cursor.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if this cursor is already past-the-end,
    /// belongs to another deque, or went stale.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let deque: ChunkDeque<i64, 2> = ChunkDeque::from([0, 1, 2]);
    ///
    /// let mut cursor = deque.begin();
    /// cursor = cursor.next(&deque).unwrap();
    /// assert_eq!(cursor.get(&deque), Ok(&1));
    ///
    /// // crosses into the second block
    /// cursor = cursor.next(&deque).unwrap();
    /// assert_eq!(cursor.get(&deque), Ok(&2));
    ///
    /// cursor = cursor.next(&deque).unwrap();
    /// assert!(cursor.is_end());
    /// ```
    pub fn next<T, const N: usize>(&self, deque: &ChunkDeque<T, N>) -> Result<Cursor>
    where
        Usize<N>: ChunkCapacity,
    {
        let (block, node, pos) = deque.resolve(*self)?.ok_or(Error::InvalidCursor)?;

        if let Some(next) = deque.nodes[node].next {
            return Ok(deque.cursor_to(block, next, pos + 1));
        }

        match deque.blocks[block].next {
            Some(next) => {
                let head = deque.blocks[next].list.head.unwrap();
                Ok(deque.cursor_to(next, head, 0))
            }
            None => Ok(deque.end()),
        }
    }

    /// Returns the cursor one position backward, crossing block boundaries
    /// as needed. Stepping back from the past-the-end cursor yields the
    /// last element.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if this cursor refers to the first element,
    /// is the past-the-end cursor of an empty deque, belongs to another
    /// deque, or went stale.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::{ChunkDeque, Error};
    ///
    /// let deque: ChunkDeque<i64, 2> = ChunkDeque::from([0, 1, 2]);
    ///
    /// let cursor = deque.end().prev(&deque).unwrap();
    /// assert_eq!(cursor.get(&deque), Ok(&2));
    ///
    /// assert_eq!(deque.begin().prev(&deque), Err(Error::InvalidCursor));
    /// ```
    pub fn prev<T, const N: usize>(&self, deque: &ChunkDeque<T, N>) -> Result<Cursor>
    where
        Usize<N>: ChunkCapacity,
    {
        let Some((block, node, pos)) = deque.resolve(*self)? else {
            let tail = deque.tail.ok_or(Error::InvalidCursor)?;
            let last = deque.blocks[tail].list.tail.unwrap();
            return Ok(deque.cursor_to(tail, last, deque.blocks[tail].len() - 1));
        };

        if let Some(prev) = deque.nodes[node].prev {
            return Ok(deque.cursor_to(block, prev, pos - 1));
        }

        let prev = deque.blocks[block].prev.ok_or(Error::InvalidCursor)?;
        let last = deque.blocks[prev].list.tail.unwrap();
        Ok(deque.cursor_to(prev, last, deque.blocks[prev].len() - 1))
    }

    /// Returns the cursor `offset` positions away, in either direction.
    /// Landing exactly one past the last element yields the past-the-end
    /// cursor.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if this cursor belongs to another deque or
    /// went stale; [`Error::IndexOutOfBound`] if the target position falls
    /// outside `[0, len]`.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let deque: ChunkDeque<i64, 2> = ChunkDeque::from([0, 1, 2, 3, 4]);
    ///
    /// let cursor = deque.begin().advance(&deque, 3).unwrap();
    /// assert_eq!(cursor.get(&deque), Ok(&3));
    ///
    /// let back = cursor.advance(&deque, -2).unwrap();
    /// assert_eq!(back.get(&deque), Ok(&1));
    ///
    /// assert!(deque.begin().advance(&deque, -1).is_err());
    /// assert!(deque.begin().advance(&deque, 6).is_err());
    /// ```
    pub fn advance<T, const N: usize>(&self, deque: &ChunkDeque<T, N>, offset: isize) -> Result<Cursor>
    where
        Usize<N>: ChunkCapacity,
    {
        let index = self.index(deque)?;
        let target = index
            .checked_add_signed(offset)
            .ok_or(Error::IndexOutOfBound {
                index: index.saturating_add_signed(offset),
                len: deque.len,
            })?;
        deque.find(target)
    }

    /// Returns the signed number of forward steps that take this cursor to
    /// `other`: positive when `other` lies closer to the end, negative when
    /// it lies closer to the front, zero when both refer to the same
    /// position.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if either cursor belongs to another deque
    /// or went stale.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let deque: ChunkDeque<i64, 2> = ChunkDeque::from([0, 1, 2, 3]);
    ///
    /// let first = deque.begin();
    /// let last = deque.end();
    ///
    /// assert_eq!(first.distance(&deque, last), Ok(4));
    /// assert_eq!(last.distance(&deque, first), Ok(-4));
    /// assert_eq!(first.distance(&deque, first), Ok(0));
    /// ```
    pub fn distance<T, const N: usize>(&self, deque: &ChunkDeque<T, N>, other: Cursor) -> Result<isize>
    where
        Usize<N>: ChunkCapacity,
    {
        let from = self.index(deque)?;
        let to = other.index(deque)?;
        Ok(to as isize - from as isize)
    }

    /// Returns the logical index of the position this cursor refers to.
    /// The past-the-end cursor maps to the length.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if the cursor belongs to another deque or
    /// went stale.
    pub fn index<T, const N: usize>(&self, deque: &ChunkDeque<T, N>) -> Result<usize>
    where
        Usize<N>: ChunkCapacity,
    {
        match deque.resolve(*self)? {
            Some((block, _, pos)) => Ok(deque.index_of(block, pos)),
            None => Ok(deque.len),
        }
    }
}
