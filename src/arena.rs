use std::mem;
use std::ops::{Index, IndexMut};

/// Slot storage backing the nodes and blocks of a deque.
///
/// Handles are plain indices into the slot vector. Removed slots are pushed
/// onto an intrusive free list and reused by later insertions, so a handle
/// alone never proves the entry it once named is still alive; callers that
/// hand handles out (cursors) pair them with never-reused identities.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    len: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, value: T) -> usize {
        self.len += 1;

        match self.free {
            Some(index) => {
                let Slot::Vacant { next_free } = self.slots[index] else {
                    unreachable!("free list points at an occupied slot");
                };

                self.free = next_free;
                self.slots[index] = Slot::Occupied(value);
                index
            }
            None => {
                self.slots.push(Slot::Occupied(value));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn remove(&mut self, index: usize) -> T {
        let slot = mem::replace(
            &mut self.slots[index],
            Slot::Vacant {
                next_free: self.free,
            },
        );

        match slot {
            Slot::Occupied(value) => {
                self.free = Some(index);
                self.len -= 1;
                value
            }
            Slot::Vacant { next_free } => {
                self.slots[index] = Slot::Vacant { next_free };
                panic!("slot {index} is vacant");
            }
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        match self.slots.get(index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index)
            .unwrap_or_else(|| panic!("slot {index} is vacant"))
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("slot {index} is vacant"))
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    fn arena_insert_hands_out_distinct_slots() {
        let mut sut = Arena::new();
        assert_eq!(sut.len(), 0);

        let a = sut.insert("a");
        let b = sut.insert("b");
        let c = sut.insert("c");

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(sut.len(), 3);

        assert_eq!(sut.get(a), Some(&"a"));
        assert_eq!(sut.get(b), Some(&"b"));
        assert_eq!(sut.get(c), Some(&"c"));
    }

    #[test]
    fn arena_remove_frees_the_slot() {
        let mut sut = Arena::new();
        let a = sut.insert(1);
        let b = sut.insert(2);

        assert_eq!(sut.remove(a), 1);
        assert_eq!(sut.len(), 1);
        assert_eq!(sut.get(a), None);
        assert_eq!(sut.get(b), Some(&2));
    }

    #[test]
    fn arena_reuses_freed_slots_in_lifo_order() {
        let mut sut = Arena::new();
        let a = sut.insert(1);
        let b = sut.insert(2);
        let _c = sut.insert(3);

        sut.remove(a);
        sut.remove(b);

        assert_eq!(sut.insert(4), b);
        assert_eq!(sut.insert(5), a);
        assert_eq!(sut.insert(6), 3);
        assert_eq!(sut.len(), 4);
    }

    #[test]
    fn arena_get_mut_allows_in_place_updates() {
        let mut sut = Arena::new();
        let a = sut.insert(10);

        *sut.get_mut(a).unwrap() += 1;
        assert_eq!(sut.get(a), Some(&11));

        sut[a] += 1;
        assert_eq!(sut[a], 12);
    }

    #[test]
    fn arena_clear_drops_everything() {
        let mut sut = Arena::new();
        let a = sut.insert(1);
        sut.insert(2);

        sut.clear();
        assert_eq!(sut.len(), 0);
        assert_eq!(sut.get(a), None);

        let b = sut.insert(3);
        assert_eq!(sut.get(b), Some(&3));
    }

    #[test]
    fn arena_remove_on_vacant_slot_panics() {
        let mut sut = Arena::new();
        let a = sut.insert(1);
        sut.remove(a);

        let result = std::panic::catch_unwind(move || sut.remove(a));
        assert!(result.is_err());
    }
}
