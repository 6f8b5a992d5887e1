//! # chunk_deque
//!
//! `chunk_deque` implements a double-ended queue over **chunked linked
//! storage**: a doubly-linked chain of capacity-bounded blocks, each owning
//! a doubly-linked list of elements.
//!
//! ## Features
//! - Array-like random access by logical index.
//! - Constant-amortized-time insertion and removal at both ends and at
//!   arbitrary positions, without the shift cost of a flat array.
//! - A detached [`Cursor`] handle that survives mutation and is revalidated
//!   on every use, so stale positions are rejected instead of misbehaving.
//! - A rebalancing pass that merges under-full neighboring blocks after
//!   every arbitrary-position mutation, keeping fragmentation bounded.
//!
//! ## Use Cases
//! `chunk_deque` is built for scenarios where:
//! - You need a sequence with both random access and cheap insertion or
//!   removal far from the ends.
//! - You want positional handles that outlive mutations and fail loudly
//!   when they go stale, instead of borrowing the container.
//!
//! ## Example
//! ```rust
//! use chunk_deque::ChunkDeque;
//!
//! let mut deque: ChunkDeque<i64, 6> = ChunkDeque::new();
//! deque.push_back(2);
//! deque.push_front(0);
//!
//! let pos = deque.find(1).unwrap();
//! deque.insert(pos, 1).unwrap();
//!
//! assert_eq!(deque.front(), Ok(&0));
//! assert_eq!(deque.at(1), Ok(&1));
//! assert_eq!(deque.back(), Ok(&2));
//!
//! assert_eq!(deque.pop_back(), Ok(2));
//! assert_eq!(deque.pop_front(), Ok(0));
//! assert_eq!(deque.pop_front(), Ok(1));
//! ```

mod arena;
mod block;
mod cursor;
mod error;
mod into_iter;
mod iter;
mod iter_mut;
mod list;
mod node;
mod sailed;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use into_iter::IntoIter;
pub use iter::Iter;
pub use iter_mut::IterMut;

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;

use crate::arena::Arena;
use crate::block::Block;
use crate::list::List;
use crate::node::Node;

pub enum Usize<const N: usize> {}

pub trait ChunkCapacity: crate::sailed::Sailed {}

/// Source of instance identities, so that a cursor minted by one deque is
/// rejected by every other, including clones.
static INSTANCES: AtomicU64 = AtomicU64::new(0);

/// A double-ended queue over chunked linked storage.
///
/// # Structure
/// Elements are grouped into **blocks** of at most `N` elements. Blocks
/// form a doubly-linked chain; within each block the elements form a
/// doubly-linked list of their own. Random access walks the block chain
/// (cheap, there are few blocks) and then one block's list (bounded by
/// `N`), while insertion and removal anywhere split and re-merge blocks
/// with pure pointer surgery.
///
/// Nodes and blocks live in per-deque arenas indexed by integer handles,
/// with freed slots reused. Cursors carry never-reused identities next to
/// those handles and are revalidated on every use.
///
/// # Type Parameters
/// - `T`: the type of the stored elements.
/// - `N`: the per-block element capacity, fixed at compile time.
///
/// # Example
/// ```rust
/// use chunk_deque::ChunkDeque;
///
/// let mut deque: ChunkDeque<i64, 6> = ChunkDeque::new();
/// deque.push_back(3);
/// deque.push_front(1);
///
/// let pos = deque.find(1).unwrap();
/// deque.insert(pos, 2).unwrap();
///
/// assert!(!deque.is_empty());
/// assert_eq!(deque.len(), 3);
///
/// assert_eq!(deque.pop_front(), Ok(1));
/// assert_eq!(deque.pop_front(), Ok(2));
/// assert_eq!(deque.pop_front(), Ok(3));
/// ```
pub struct ChunkDeque<T, const N: usize>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) nodes: Arena<Node<T>>,
    pub(crate) blocks: Arena<Block>,
    pub(crate) head: Option<usize>,
    pub(crate) tail: Option<usize>,
    pub(crate) len: usize,
    pub(crate) identity: u64,
    next_id: u64,
}

impl<T, const N: usize, const M: usize> From<[T; M]> for ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn from(values: [T; M]) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> FromIterator<T> for ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T, const N: usize> Extend<T> for ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T, const N: usize> Extend<&'a T> for ChunkDeque<T, N>
where
    T: Clone,
    Usize<N>: ChunkCapacity,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, const N: usize> Default for ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    /// Creates a new, empty `ChunkDeque` with no elements and no allocated
    /// blocks.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let deque: ChunkDeque<i64, 6> = ChunkDeque::new();
    ///
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            blocks: Arena::new(),
            head: None,
            tail: None,
            len: 0,
            identity: INSTANCES.fetch_add(1, Relaxed),
            next_id: 0,
        }
    }

    /// Adds an element to the front of the deque.
    ///
    /// If the first block is full (or the deque is empty), a fresh block is
    /// linked in front to hold the element.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let mut deque: ChunkDeque<i64, 6> = ChunkDeque::new();
    /// deque.push_front(10);
    /// deque.push_front(20);
    ///
    /// assert_eq!(deque.len(), 2);
    ///
    /// assert_eq!(deque.pop_front(), Ok(20));
    /// assert_eq!(deque.pop_front(), Ok(10));
    /// ```
    pub fn push_front(&mut self, value: T) {
        let block = match self.head {
            Some(block) if self.blocks[block].len() < N => block,
            _ => {
                let block = self.alloc_block(List::new());
                self.link_front(block);
                block
            }
        };

        let node = self.alloc_node(value);
        self.blocks[block].list.push_front(&mut self.nodes, node);
        self.len += 1;
    }

    /// Adds an element to the back of the deque.
    ///
    /// If the last block is full (or the deque is empty), a fresh block is
    /// linked at the back to hold the element.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let mut deque: ChunkDeque<i64, 6> = ChunkDeque::new();
    /// deque.push_back(10);
    /// deque.push_back(20);
    ///
    /// assert_eq!(deque.len(), 2);
    ///
    /// assert_eq!(deque.pop_back(), Ok(20));
    /// assert_eq!(deque.pop_back(), Ok(10));
    /// ```
    pub fn push_back(&mut self, value: T) {
        let block = match self.tail {
            Some(block) if self.blocks[block].len() < N => block,
            _ => {
                let block = self.alloc_block(List::new());
                self.link_back(block);
                block
            }
        };

        let node = self.alloc_node(value);
        self.blocks[block].list.push_back(&mut self.nodes, node);
        self.len += 1;
    }

    /// Removes and returns the first element of the deque.
    ///
    /// # Errors
    /// [`Error::ContainerEmpty`] if the deque has no elements.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::{ChunkDeque, Error};
    ///
    /// let mut deque: ChunkDeque<i64, 4> = ChunkDeque::new();
    /// deque.push_front(10);
    /// deque.push_front(20);
    ///
    /// assert_eq!(deque.pop_front(), Ok(20));
    /// assert_eq!(deque.pop_front(), Ok(10));
    /// assert_eq!(deque.pop_front(), Err(Error::ContainerEmpty));
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        let block = self.head.ok_or(Error::ContainerEmpty)?;
        let node = self.blocks[block].list.pop_front(&mut self.nodes).unwrap();

        if self.blocks[block].is_empty() {
            self.unlink(block);
        }

        self.len -= 1;
        Ok(self.nodes.remove(node).value)
    }

    /// Removes and returns the last element of the deque.
    ///
    /// # Errors
    /// [`Error::ContainerEmpty`] if the deque has no elements.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::{ChunkDeque, Error};
    ///
    /// let mut deque: ChunkDeque<i64, 4> = ChunkDeque::new();
    /// deque.push_back(10);
    /// deque.push_back(20);
    ///
    /// assert_eq!(deque.pop_back(), Ok(20));
    /// assert_eq!(deque.pop_back(), Ok(10));
    /// assert_eq!(deque.pop_back(), Err(Error::ContainerEmpty));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        let block = self.tail.ok_or(Error::ContainerEmpty)?;
        let node = self.blocks[block].list.pop_back(&mut self.nodes).unwrap();

        if self.blocks[block].is_empty() {
            self.unlink(block);
        }

        self.len -= 1;
        Ok(self.nodes.remove(node).value)
    }

    /// Inserts `value` before the element `pos` refers to and returns a
    /// cursor to the inserted element.
    ///
    /// The past-the-end cursor is a legal position and appends, exactly
    /// like [`push_back`](Self::push_back); the begin cursor prepends like
    /// [`push_front`](Self::push_front). Any other position splits the
    /// owning block at the referenced element, appends the value to the
    /// shortened front part and lets the rebalancing pass merge the pieces
    /// back within the capacity bound.
    ///
    /// Cursors handed out before the call must be re-acquired afterwards;
    /// the returned cursor is re-resolved after rebalancing and is always
    /// fresh.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if `pos` belongs to another deque or no
    /// longer refers to a live element.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let mut deque: ChunkDeque<i64, 4> = ChunkDeque::new();
    /// deque.push_back(10);
    /// deque.push_back(30);
    ///
    /// let pos = deque.find(1).unwrap();
    /// let at = deque.insert(pos, 20).unwrap();
    ///
    /// assert_eq!(at.get(&deque), Ok(&20));
    /// assert_eq!(deque.at(1), Ok(&20));
    /// assert_eq!(deque.len(), 3);
    /// ```
    pub fn insert(&mut self, pos: Cursor, value: T) -> Result<Cursor> {
        let Some((block, node, offset)) = self.resolve(pos)? else {
            self.push_back(value);
            return self.find(self.len - 1);
        };

        let index = self.index_of(block, offset);
        if index == 0 {
            self.push_front(value);
            return Ok(self.begin());
        }

        let suffix = self.blocks[block]
            .list
            .split_at(&mut self.nodes, node, offset);
        let successor = self.alloc_block(suffix);
        self.link_after(block, successor);

        let fresh = self.alloc_node(value);
        self.blocks[block].list.push_back(&mut self.nodes, fresh);
        self.len += 1;

        self.maintain();
        self.find(index)
    }

    /// Removes the element `pos` refers to and returns a cursor to the
    /// element that logically followed it, or the past-the-end cursor if
    /// none did.
    ///
    /// # Errors
    /// [`Error::InvalidCursor`] if `pos` is past-the-end, belongs to
    /// another deque, or no longer refers to a live element.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let mut deque: ChunkDeque<i64, 4> = ChunkDeque::new();
    /// deque.extend([1, 2, 3]);
    ///
    /// let pos = deque.find(1).unwrap();
    /// let next = deque.erase(pos).unwrap();
    ///
    /// assert_eq!(next.get(&deque), Ok(&3));
    /// assert_eq!(deque.len(), 2);
    /// assert_eq!(deque.at(0), Ok(&1));
    /// assert_eq!(deque.at(1), Ok(&3));
    /// ```
    pub fn erase(&mut self, pos: Cursor) -> Result<Cursor> {
        let (block, node, offset) = self.resolve(pos)?.ok_or(Error::InvalidCursor)?;
        let index = self.index_of(block, offset);

        let mut suffix = self.blocks[block]
            .list
            .split_at(&mut self.nodes, node, offset);
        let target = suffix.pop_front(&mut self.nodes).unwrap();

        if suffix.len > 0 {
            let successor = self.alloc_block(suffix);
            self.link_after(block, successor);
        }

        self.nodes.remove(target);
        self.len -= 1;

        self.maintain();
        self.find(index)
    }

    /// Removes all elements, releasing every block and node.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::{ChunkDeque, Error};
    ///
    /// let mut deque: ChunkDeque<i32, 4> = ChunkDeque::new();
    /// deque.extend([1, 2, 3]);
    /// assert_eq!(deque.len(), 3);
    ///
    /// deque.clear();
    ///
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.front(), Err(Error::ContainerEmpty));
    /// assert_eq!(deque.back(), Err(Error::ContainerEmpty));
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.blocks.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns a reference to the first element of the deque.
    ///
    /// # Errors
    /// [`Error::ContainerEmpty`] if the deque has no elements.
    pub fn front(&self) -> Result<&T> {
        let block = self.head.ok_or(Error::ContainerEmpty)?;
        let node = self.blocks[block].list.head.unwrap();
        Ok(&self.nodes[node].value)
    }

    /// Returns a mutable reference to the first element of the deque.
    ///
    /// # Errors
    /// [`Error::ContainerEmpty`] if the deque has no elements.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        let block = self.head.ok_or(Error::ContainerEmpty)?;
        let node = self.blocks[block].list.head.unwrap();
        Ok(&mut self.nodes[node].value)
    }

    /// Returns a reference to the last element of the deque.
    ///
    /// # Errors
    /// [`Error::ContainerEmpty`] if the deque has no elements.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::{ChunkDeque, Error};
    ///
    /// let mut deque: ChunkDeque<i64, 4> = ChunkDeque::new();
    /// assert_eq!(deque.back(), Err(Error::ContainerEmpty));
    ///
    /// deque.push_back(10);
    /// deque.push_back(20);
    /// assert_eq!(deque.back(), Ok(&20));
    /// ```
    pub fn back(&self) -> Result<&T> {
        let block = self.tail.ok_or(Error::ContainerEmpty)?;
        let node = self.blocks[block].list.tail.unwrap();
        Ok(&self.nodes[node].value)
    }

    /// Returns a mutable reference to the last element of the deque.
    ///
    /// # Errors
    /// [`Error::ContainerEmpty`] if the deque has no elements.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        let block = self.tail.ok_or(Error::ContainerEmpty)?;
        let node = self.blocks[block].list.tail.unwrap();
        Ok(&mut self.nodes[node].value)
    }

    /// Returns a reference to the element at the logical index, if any.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let deque: ChunkDeque<i64, 4> = ChunkDeque::from([10, 20]);
    ///
    /// assert_eq!(deque.get(0), Some(&10));
    /// assert_eq!(deque.get(1), Some(&20));
    /// assert_eq!(deque.get(2), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        let (_, node, _) = self.locate(index)?;
        Some(&self.nodes[node].value)
    }

    /// Returns a mutable reference to the element at the logical index, if
    /// any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let (_, node, _) = self.locate(index)?;
        Some(&mut self.nodes[node].value)
    }

    /// Returns a reference to the element at the logical index, with
    /// bounds checking.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBound`] if `index` is not below the length.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::{ChunkDeque, Error};
    ///
    /// let deque: ChunkDeque<i64, 4> = ChunkDeque::from([10, 20]);
    ///
    /// assert_eq!(deque.at(1), Ok(&20));
    /// assert_eq!(deque.at(2), Err(Error::IndexOutOfBound { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.get(index).ok_or(Error::IndexOutOfBound { index, len })
    }

    /// Returns a mutable reference to the element at the logical index,
    /// with bounds checking.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBound`] if `index` is not below the length.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.get_mut(index)
            .ok_or(Error::IndexOutOfBound { index, len })
    }

    /// Returns the number of elements currently stored in the deque.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the deque is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a cursor to the first element, or the past-the-end cursor
    /// if the deque is empty.
    pub fn begin(&self) -> Cursor {
        match self.head {
            Some(block) => {
                let node = self.blocks[block].list.head.unwrap();
                self.cursor_to(block, node, 0)
            }
            None => self.end(),
        }
    }

    /// Returns the past-the-end cursor.
    ///
    /// The past-the-end cursor never dereferences, but it is a legal
    /// insertion position and the anchor for backward traversal.
    pub fn end(&self) -> Cursor {
        Cursor {
            deque: self.identity,
            spot: None,
        }
    }

    /// Resolves a logical index to a cursor.
    ///
    /// This is the single place where global indices are translated to a
    /// block and an in-block offset: the block chain is walked from the
    /// head, subtracting each block's count, then the owning block's list
    /// is walked by the remainder. `index == len` resolves to the
    /// past-the-end cursor.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBound`] if `index` is greater than the length.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let deque: ChunkDeque<i64, 4> = ChunkDeque::from([1, 2, 3]);
    ///
    /// let pos = deque.find(2).unwrap();
    /// assert_eq!(pos.get(&deque), Ok(&3));
    ///
    /// assert!(deque.find(3).unwrap().is_end());
    /// assert!(deque.find(4).is_err());
    /// ```
    pub fn find(&self, index: usize) -> Result<Cursor> {
        if index == self.len {
            return Ok(self.end());
        }

        let (block, node, pos) = self.locate(index).ok_or(Error::IndexOutOfBound {
            index,
            len: self.len,
        })?;
        Ok(self.cursor_to(block, node, pos))
    }

    /// Provides an iterator over the deque's elements.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let deque: ChunkDeque<_, 2> = ChunkDeque::from([0, 1, 2]);
    ///
    /// let mut iter = deque.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::from_deque(self)
    }

    /// Provides a mutable iterator over the deque's elements.
    ///
    /// # Example
    /// ```rust
    /// use chunk_deque::ChunkDeque;
    ///
    /// let mut deque: ChunkDeque<_, 2> = ChunkDeque::from([0, 1, 2]);
    ///
    /// for value in deque.iter_mut() {
    ///     *value += 10;
    /// }
    ///
    /// assert_eq!(deque, [10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, N> {
        IterMut::from_deque(self)
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn alloc_node(&mut self, value: T) -> usize {
        let id = self.fresh_id();
        self.nodes.insert(Node::new(id, value))
    }

    fn alloc_block(&mut self, list: List) -> usize {
        let id = self.fresh_id();
        self.blocks.insert(Block::new(id, list))
    }

    fn link_front(&mut self, block: usize) {
        self.blocks[block].prev = None;
        self.blocks[block].next = self.head;

        match self.head {
            Some(head) => self.blocks[head].prev = Some(block),
            None => self.tail = Some(block),
        }

        self.head = Some(block);
    }

    fn link_back(&mut self, block: usize) {
        self.blocks[block].prev = self.tail;
        self.blocks[block].next = None;

        match self.tail {
            Some(tail) => self.blocks[tail].next = Some(block),
            None => self.head = Some(block),
        }

        self.tail = Some(block);
    }

    fn link_after(&mut self, anchor: usize, block: usize) {
        let next = self.blocks[anchor].next;
        self.blocks[block].prev = Some(anchor);
        self.blocks[block].next = next;
        self.blocks[anchor].next = Some(block);

        match next {
            Some(next) => self.blocks[next].prev = Some(block),
            None => self.tail = Some(block),
        }
    }

    /// Removes `block` from the chain and releases its slot. The block
    /// must already have an empty list.
    fn unlink(&mut self, block: usize) {
        let Block { prev, next, list, .. } = self.blocks.remove(block);
        debug_assert_eq!(list.len, 0);

        match prev {
            Some(prev) => self.blocks[prev].next = next,
            None => self.head = next,
        }

        match next {
            Some(next) => self.blocks[next].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Resolves a logical index to its owning block, node and in-block
    /// offset.
    fn locate(&self, mut index: usize) -> Option<(usize, usize, usize)> {
        if index >= self.len {
            return None;
        }

        let mut block = self.head?;
        loop {
            let len = self.blocks[block].len();
            if index < len {
                break;
            }

            index -= len;
            block = self.blocks[block].next?;
        }

        let node = self.blocks[block].list.node_at(&self.nodes, index)?;
        Some((block, node, index))
    }

    /// The inverse of [`locate`](Self::locate): sums the counts of every
    /// block preceding `block` and adds the in-block offset.
    pub(crate) fn index_of(&self, block: usize, offset: usize) -> usize {
        let mut index = offset;
        let mut current = self.head;

        while let Some(visited) = current {
            if visited == block {
                return index;
            }

            index += self.blocks[visited].len();
            current = self.blocks[visited].next;
        }

        unreachable!("block {block} is not part of the chain");
    }

    pub(crate) fn cursor_to(&self, block: usize, node: usize, pos: usize) -> Cursor {
        Cursor {
            deque: self.identity,
            spot: Some(cursor::Spot {
                block,
                block_id: self.blocks[block].id,
                node,
                node_id: self.nodes[node].id,
                pos,
            }),
        }
    }

    /// Revalidates a cursor against the live structure.
    ///
    /// `Ok(None)` is the past-the-end cursor. Anything that no longer
    /// lines up is rejected: a foreign deque identity, a recycled block or
    /// node slot, an offset at or beyond the block's current count, or a
    /// node that is no longer the one sitting at that offset.
    pub(crate) fn resolve(&self, cursor: Cursor) -> Result<Option<(usize, usize, usize)>> {
        if cursor.deque != self.identity {
            return Err(Error::InvalidCursor);
        }

        let Some(spot) = cursor.spot else {
            return Ok(None);
        };

        let block = self
            .blocks
            .get(spot.block)
            .filter(|block| block.id == spot.block_id)
            .ok_or(Error::InvalidCursor)?;

        if spot.pos >= block.len() {
            return Err(Error::InvalidCursor);
        }

        let node = block
            .list
            .node_at(&self.nodes, spot.pos)
            .ok_or(Error::InvalidCursor)?;
        if node != spot.node || self.nodes[node].id != spot.node_id {
            return Err(Error::InvalidCursor);
        }

        Ok(Some((spot.block, node, spot.pos)))
    }

    /// Rebalancing pass, run after every split-based mutation.
    ///
    /// Walks the block chain once from the head and greedily merges every
    /// adjacent pair whose combined count fits in one block, re-examining
    /// the merged block against its new neighbor. Afterwards every
    /// surviving adjacent pair holds more than `N` elements combined,
    /// which caps the block count at `2 * len / N + 1` and sweeps out the
    /// empty blocks a split may have left behind.
    fn maintain(&mut self) {
        if self.len == 0 {
            self.clear();
            return;
        }

        let mut current = self.head;
        while let Some(block) = current {
            let next = self.blocks[block].next;
            match next {
                Some(next) if self.blocks[block].len() + self.blocks[next].len() <= N => {
                    let mut suffix = std::mem::take(&mut self.blocks[next].list);
                    self.blocks[block].list.append(&mut self.nodes, &mut suffix);
                    self.unlink(next);
                }
                _ => current = next,
            }
        }
    }
}

impl<T: Clone, const N: usize> Clone for ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T, const N: usize> std::ops::Index<usize> for ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T, const N: usize> std::ops::IndexMut<usize> for ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T, const N: usize, const M: usize> PartialEq<[T; M]> for ChunkDeque<T, N>
where
    T: PartialEq,
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &[T; M]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, const N: usize> PartialEq<&[T]> for ChunkDeque<T, N>
where
    T: PartialEq,
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &&[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, const N: usize> PartialEq<[T]> for ChunkDeque<T, N>
where
    T: PartialEq,
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, const N: usize> PartialEq for ChunkDeque<T, N>
where
    T: PartialEq,
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, const N: usize> Eq for ChunkDeque<T, N>
where
    T: Eq,
    Usize<N>: ChunkCapacity,
{
}

impl<T, const N: usize> PartialOrd for ChunkDeque<T, N>
where
    T: PartialOrd,
    Usize<N>: ChunkCapacity,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T, const N: usize> Ord for ChunkDeque<T, N>
where
    T: Ord,
    Usize<N>: ChunkCapacity,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T, const N: usize> Hash for ChunkDeque<T, N>
where
    T: Hash,
    Usize<N>: ChunkCapacity,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.iter().for_each(|v| v.hash(state));
    }
}

impl<T, const N: usize> std::fmt::Debug for ChunkDeque<T, N>
where
    T: std::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chunks = Vec::new();
        let mut current = self.head;

        while let Some(block) = current {
            let block = &self.blocks[block];
            let mut chunk = Vec::with_capacity(block.len());

            let mut node = block.list.head;
            while let Some(index) = node {
                chunk.push(&self.nodes[index].value);
                node = self.nodes[index].next;
            }

            chunks.push(chunk);
            current = block.next;
        }

        f.debug_list().entries(chunks).finish()
    }
}

impl<T, const N: usize> IntoIterator for ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::from_deque(self)
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::from_deque(self)
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut::from_deque(self)
    }
}

#[cfg(test)]
impl<T, const N: usize> ChunkDeque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Asserts every structural invariant of the deque: chain and list
    /// linkage is symmetric, block counts fit `[1, N]` and add up to the
    /// total, and both arenas hold exactly the live entries.
    pub(crate) fn check_invariants(&self) {
        let mut total = 0;
        let mut visited = 0;
        let mut prev = None;
        let mut current = self.head;

        while let Some(index) = current {
            let block = &self.blocks[index];
            assert_eq!(block.prev, prev, "block chain is not doubly linked");
            assert!(
                block.len() >= 1 && block.len() <= N,
                "block count {} escaped [1, {N}]",
                block.len()
            );

            let mut count = 0;
            let mut node_prev = None;
            let mut node = block.list.head;
            while let Some(at) = node {
                assert_eq!(self.nodes[at].prev, node_prev, "list is not doubly linked");
                node_prev = node;
                node = self.nodes[at].next;
                count += 1;
            }
            assert_eq!(block.list.tail, node_prev);
            assert_eq!(count, block.len());

            total += block.len();
            visited += 1;
            prev = current;
            current = block.next;
        }

        assert_eq!(self.tail, prev);
        assert_eq!(total, self.len);
        assert_eq!(visited, self.blocks.len());
        assert_eq!(self.nodes.len(), self.len);

        if self.len == 0 {
            assert_eq!(self.head, None);
            assert_eq!(self.tail, None);
        }
    }
}
