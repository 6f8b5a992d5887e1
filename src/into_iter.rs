use std::iter::FusedIterator;

use crate::{ChunkCapacity, ChunkDeque, Usize};

/// Owning iterator over a [`ChunkDeque`], in logical order.
///
/// Pops from the ends of the owned deque, so blocks and nodes are released
/// as the iterator progresses.
pub struct IntoIter<T, const N: usize>
where
    Usize<N>: ChunkCapacity,
{
    deque: ChunkDeque<T, N>,
}

impl<T, const N: usize> IntoIter<T, N>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) fn from_deque(deque: ChunkDeque<T, N>) -> Self {
        Self { deque }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> where Usize<N>: ChunkCapacity {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> where Usize<N>: ChunkCapacity {}

impl<T, const N: usize> std::fmt::Debug for IntoIter<T, N>
where
    T: std::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}
