use std::iter::FusedIterator;

use crate::{ChunkCapacity, ChunkDeque, Usize};

/// Immutable iterator over a [`ChunkDeque`], in logical order.
///
/// Walks each block's list and hops to the next block when a list runs
/// out. Both ends are tracked, so the iterator is double-ended.
pub struct Iter<'a, T, const N: usize>
where
    Usize<N>: ChunkCapacity,
{
    deque: &'a ChunkDeque<T, N>,
    front: Option<(usize, usize)>,
    back: Option<(usize, usize)>,
    remaining: usize,
}

impl<'a, T, const N: usize> Iter<'a, T, N>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) fn from_deque(deque: &'a ChunkDeque<T, N>) -> Self {
        let front = deque
            .head
            .map(|block| (block, deque.blocks[block].list.head.unwrap()));
        let back = deque
            .tail
            .map(|block| (block, deque.blocks[block].list.tail.unwrap()));

        Self {
            deque,
            front,
            back,
            remaining: deque.len(),
        }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let (block, node) = self.front?;
        self.remaining -= 1;

        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.front = match self.deque.nodes[node].next {
                Some(next) => Some((block, next)),
                None => {
                    let block = self.deque.blocks[block].next.unwrap();
                    Some((block, self.deque.blocks[block].list.head.unwrap()))
                }
            };
        }

        Some(&self.deque.nodes[node].value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> DoubleEndedIterator for Iter<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let (block, node) = self.back?;
        self.remaining -= 1;

        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.back = match self.deque.nodes[node].prev {
                Some(prev) => Some((block, prev)),
                None => {
                    let block = self.deque.blocks[block].prev.unwrap();
                    Some((block, self.deque.blocks[block].list.tail.unwrap()))
                }
            };
        }

        Some(&self.deque.nodes[node].value)
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> where Usize<N>: ChunkCapacity {}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> where Usize<N>: ChunkCapacity {}

impl<T, const N: usize> Clone for Iter<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T, const N: usize> std::fmt::Debug for Iter<'_, T, N>
where
    T: std::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::ChunkDeque;

    #[test]
    fn test_iter_yields_elements_in_order() {
        let sut: ChunkDeque<i32, 2> = ChunkDeque::from_iter(0..5);
        assert!(sut.iter().copied().eq(0..5));
        assert_eq!(sut.iter().len(), 5);
    }

    #[test]
    fn test_iter_yields_elements_in_reverse() {
        let sut: ChunkDeque<i32, 2> = ChunkDeque::from_iter(0..5);
        assert!(sut.iter().rev().copied().eq((0..5).rev()));
    }

    #[test]
    fn test_iter_meets_in_the_middle() {
        let sut: ChunkDeque<i32, 2> = ChunkDeque::from_iter(0..4);
        let mut iter = sut.iter();

        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_on_empty_deque_is_exhausted() {
        let sut: ChunkDeque<i32, 2> = ChunkDeque::new();
        let mut iter = sut.iter();

        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_size_hint_shrinks_from_both_ends() {
        let sut: ChunkDeque<i32, 3> = ChunkDeque::from_iter(0..5);
        let mut iter = sut.iter();

        assert_eq!(iter.size_hint(), (5, Some(5)));
        iter.next();
        iter.next_back();
        assert_eq!(iter.size_hint(), (3, Some(3)));
    }
}
