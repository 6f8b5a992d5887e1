use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::{ChunkCapacity, ChunkDeque, Usize};

/// Mutable iterator over a [`ChunkDeque`], in logical order.
pub struct IterMut<'a, T, const N: usize>
where
    Usize<N>: ChunkCapacity,
{
    deque: NonNull<ChunkDeque<T, N>>,
    front: Option<(usize, usize)>,
    back: Option<(usize, usize)>,
    remaining: usize,
    _marker: PhantomData<&'a mut ChunkDeque<T, N>>,
}

unsafe impl<T: Send, const N: usize> Send for IterMut<'_, T, N> where Usize<N>: ChunkCapacity {}
unsafe impl<T: Sync, const N: usize> Sync for IterMut<'_, T, N> where Usize<N>: ChunkCapacity {}

impl<'a, T, const N: usize> IterMut<'a, T, N>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) fn from_deque(deque: &'a mut ChunkDeque<T, N>) -> Self {
        let front = deque
            .head
            .map(|block| (block, deque.blocks[block].list.head.unwrap()));
        let back = deque
            .tail
            .map(|block| (block, deque.blocks[block].list.tail.unwrap()));
        let remaining = deque.len();

        Self {
            deque: NonNull::from(deque),
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T, const N: usize> Iterator for IterMut<'a, T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let (block, node) = self.front?;
        self.remaining -= 1;

        // SAFETY: the deque is exclusively borrowed for 'a and every node
        // is yielded at most once, so no two returned references alias.
        let deque = unsafe { &mut *self.deque.as_ptr() };

        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.front = match deque.nodes[node].next {
                Some(next) => Some((block, next)),
                None => {
                    let block = deque.blocks[block].next.unwrap();
                    Some((block, deque.blocks[block].list.head.unwrap()))
                }
            };
        }

        Some(&mut deque.nodes[node].value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IterMut<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let (block, node) = self.back?;
        self.remaining -= 1;

        // SAFETY: as in `next`, each node is yielded at most once.
        let deque = unsafe { &mut *self.deque.as_ptr() };

        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.back = match deque.nodes[node].prev {
                Some(prev) => Some((block, prev)),
                None => {
                    let block = deque.blocks[block].prev.unwrap();
                    Some((block, deque.blocks[block].list.tail.unwrap()))
                }
            };
        }

        Some(&mut deque.nodes[node].value)
    }
}

impl<T, const N: usize> ExactSizeIterator for IterMut<'_, T, N> where Usize<N>: ChunkCapacity {}

impl<T, const N: usize> FusedIterator for IterMut<'_, T, N> where Usize<N>: ChunkCapacity {}

impl<T, const N: usize> std::fmt::Debug for IterMut<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::ChunkDeque;

    #[test]
    fn test_iter_mut_updates_every_element() {
        let mut sut: ChunkDeque<i32, 2> = ChunkDeque::from_iter(0..5);

        for value in sut.iter_mut() {
            *value *= 10;
        }

        assert_eq!(sut, [0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_iter_mut_walks_backward() {
        let mut sut: ChunkDeque<i32, 2> = ChunkDeque::from_iter(0..4);

        for (offset, value) in sut.iter_mut().rev().enumerate() {
            *value += offset as i32;
        }

        assert_eq!(sut, [3, 3, 3, 3]);
    }

    #[test]
    fn test_iter_mut_meets_in_the_middle() {
        let mut sut: ChunkDeque<i32, 2> = ChunkDeque::from_iter(0..4);
        let mut iter = sut.iter_mut();

        assert_eq!(iter.next(), Some(&mut 0));
        assert_eq!(iter.next_back(), Some(&mut 3));
        assert_eq!(iter.next(), Some(&mut 1));
        assert_eq!(iter.next_back(), Some(&mut 2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_mut_on_empty_deque_is_exhausted() {
        let mut sut: ChunkDeque<i32, 2> = ChunkDeque::new();
        assert_eq!(sut.iter_mut().next(), None);
        assert_eq!(sut.iter_mut().len(), 0);
    }
}
