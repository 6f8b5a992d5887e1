use crate::arena::Arena;
use crate::node::Node;

/// Header of the doubly-linked element list owned by a single block.
///
/// The nodes themselves live in the deque-wide arena; the header holds only
/// the boundary indices and the count. All link surgery goes through here,
/// so neither blocks nor the deque touch `prev`/`next` directly.
///
/// `head` is `None` iff `tail` is `None` iff `len == 0`, and `len` always
/// equals the number of nodes reachable from `head`.
#[derive(Default, Clone)]
pub(crate) struct List {
    pub(crate) head: Option<usize>,
    pub(crate) tail: Option<usize>,
    pub(crate) len: usize,
}

impl List {
    pub(crate) const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn push_front<T>(&mut self, nodes: &mut Arena<Node<T>>, index: usize) {
        nodes[index].prev = None;
        nodes[index].next = self.head;

        match self.head {
            Some(head) => nodes[head].prev = Some(index),
            None => self.tail = Some(index),
        }

        self.head = Some(index);
        self.len += 1;
    }

    pub(crate) fn push_back<T>(&mut self, nodes: &mut Arena<Node<T>>, index: usize) {
        nodes[index].prev = self.tail;
        nodes[index].next = None;

        match self.tail {
            Some(tail) => nodes[tail].next = Some(index),
            None => self.head = Some(index),
        }

        self.tail = Some(index);
        self.len += 1;
    }

    /// Unlinks and returns the first node, if any. The node stays in the
    /// arena; releasing its slot is the caller's business.
    pub(crate) fn pop_front<T>(&mut self, nodes: &mut Arena<Node<T>>) -> Option<usize> {
        let index = self.head?;
        self.head = nodes[index].next.take();

        match self.head {
            Some(head) => nodes[head].prev = None,
            None => self.tail = None,
        }

        self.len -= 1;
        Some(index)
    }

    /// Unlinks and returns the last node, if any.
    pub(crate) fn pop_back<T>(&mut self, nodes: &mut Arena<Node<T>>) -> Option<usize> {
        let index = self.tail?;
        self.tail = nodes[index].prev.take();

        match self.tail {
            Some(tail) => nodes[tail].next = None,
            None => self.head = None,
        }

        self.len -= 1;
        Some(index)
    }

    /// Splits off the suffix beginning at `index`, which must be the node
    /// sitting at position `at` of this list. Pure pointer surgery: no node
    /// moves, and the caller-known position makes the size transfer O(1).
    pub(crate) fn split_at<T>(
        &mut self,
        nodes: &mut Arena<Node<T>>,
        index: usize,
        at: usize,
    ) -> List {
        debug_assert!(at < self.len);

        let suffix = List {
            head: Some(index),
            tail: self.tail,
            len: self.len - at,
        };

        match nodes[index].prev.take() {
            Some(prev) => {
                nodes[prev].next = None;
                self.tail = Some(prev);
            }
            None => {
                self.head = None;
                self.tail = None;
            }
        }

        self.len = at;
        suffix
    }

    /// Splices the whole of `other` onto this list's tail in O(1), leaving
    /// `other` empty.
    pub(crate) fn append<T>(&mut self, nodes: &mut Arena<Node<T>>, other: &mut List) {
        let Some(other_head) = other.head else {
            return;
        };

        match self.tail {
            Some(tail) => {
                nodes[tail].next = Some(other_head);
                nodes[other_head].prev = Some(tail);
            }
            None => self.head = Some(other_head),
        }

        self.tail = other.tail;
        self.len += other.len;
        *other = List::new();
    }

    /// Walks from the head to the node at position `at`.
    pub(crate) fn node_at<T>(&self, nodes: &Arena<Node<T>>, at: usize) -> Option<usize> {
        if at >= self.len {
            return None;
        }

        let mut index = self.head?;
        for _ in 0..at {
            index = nodes[index].next?;
        }

        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::List;
    use crate::arena::Arena;
    use crate::node::Node;

    fn collect(list: &List, nodes: &Arena<Node<i32>>) -> Vec<i32> {
        let mut out = Vec::with_capacity(list.len);
        let mut cursor = list.head;
        while let Some(index) = cursor {
            out.push(nodes[index].value);
            cursor = nodes[index].next;
        }
        out
    }

    fn collect_rev(list: &List, nodes: &Arena<Node<i32>>) -> Vec<i32> {
        let mut out = Vec::with_capacity(list.len);
        let mut cursor = list.tail;
        while let Some(index) = cursor {
            out.push(nodes[index].value);
            cursor = nodes[index].prev;
        }
        out
    }

    fn build(nodes: &mut Arena<Node<i32>>, values: &[i32]) -> List {
        let mut list = List::new();
        for (id, &value) in values.iter().enumerate() {
            let index = nodes.insert(Node::new(id as u64, value));
            list.push_back(nodes, index);
        }
        list
    }

    #[test]
    fn push_front_and_back_keep_both_ends_linked() {
        let nodes = &mut Arena::new();
        let mut sut = List::new();

        let one = nodes.insert(Node::new(0, 1));
        sut.push_back(nodes, one);
        let zero = nodes.insert(Node::new(1, 0));
        sut.push_front(nodes, zero);
        let two = nodes.insert(Node::new(2, 2));
        sut.push_back(nodes, two);

        assert_eq!(sut.len, 3);
        assert_eq!(collect(&sut, nodes), [0, 1, 2]);
        assert_eq!(collect_rev(&sut, nodes), [2, 1, 0]);
    }

    #[test]
    fn pops_unlink_from_the_correct_end() {
        let nodes = &mut Arena::new();
        let mut sut = build(nodes, &[0, 1, 2, 3]);

        let front = sut.pop_front(nodes).unwrap();
        assert_eq!(nodes[front].value, 0);
        let back = sut.pop_back(nodes).unwrap();
        assert_eq!(nodes[back].value, 3);

        assert_eq!(sut.len, 2);
        assert_eq!(collect(&sut, nodes), [1, 2]);
        assert_eq!(collect_rev(&sut, nodes), [2, 1]);
    }

    #[test]
    fn popping_the_last_node_clears_both_ends() {
        let nodes = &mut Arena::new();
        let mut sut = build(nodes, &[7]);

        assert!(sut.pop_front(nodes).is_some());
        assert_eq!(sut.len, 0);
        assert_eq!(sut.head, None);
        assert_eq!(sut.tail, None);
        assert_eq!(sut.pop_back(nodes), None);
        assert_eq!(sut.pop_front(nodes), None);
    }

    #[test]
    fn split_at_moves_the_suffix_without_copying() {
        let nodes = &mut Arena::new();
        let mut sut = build(nodes, &[0, 1, 2, 3, 4]);

        let pivot = sut.node_at(nodes, 2).unwrap();
        let suffix = sut.split_at(nodes, pivot, 2);

        assert_eq!(sut.len, 2);
        assert_eq!(collect(&sut, nodes), [0, 1]);
        assert_eq!(collect_rev(&sut, nodes), [1, 0]);

        assert_eq!(suffix.len, 3);
        assert_eq!(collect(&suffix, nodes), [2, 3, 4]);
        assert_eq!(collect_rev(&suffix, nodes), [4, 3, 2]);
    }

    #[test]
    fn split_at_the_head_empties_the_original() {
        let nodes = &mut Arena::new();
        let mut sut = build(nodes, &[0, 1, 2]);

        let head = sut.head.unwrap();
        let suffix = sut.split_at(nodes, head, 0);

        assert_eq!(sut.len, 0);
        assert_eq!(sut.head, None);
        assert_eq!(sut.tail, None);
        assert_eq!(collect(&suffix, nodes), [0, 1, 2]);
    }

    #[test]
    fn append_splices_and_empties_the_other_list() {
        let nodes = &mut Arena::new();
        let mut sut = build(nodes, &[0, 1]);
        let mut other = build(nodes, &[2, 3, 4]);

        sut.append(nodes, &mut other);

        assert_eq!(sut.len, 5);
        assert_eq!(collect(&sut, nodes), [0, 1, 2, 3, 4]);
        assert_eq!(collect_rev(&sut, nodes), [4, 3, 2, 1, 0]);

        assert_eq!(other.len, 0);
        assert_eq!(other.head, None);
        assert_eq!(other.tail, None);
    }

    #[test]
    fn append_into_an_empty_list_adopts_everything() {
        let nodes = &mut Arena::new();
        let mut sut = List::new();
        let mut other = build(nodes, &[1, 2]);

        sut.append(nodes, &mut other);
        assert_eq!(collect(&sut, nodes), [1, 2]);

        // appending an emptied list is a no-op
        sut.append(nodes, &mut other);
        assert_eq!(sut.len, 2);
        assert_eq!(collect(&sut, nodes), [1, 2]);
    }

    #[test]
    fn node_at_walks_to_the_requested_position() {
        let nodes = &mut Arena::new();
        let sut = build(nodes, &[5, 6, 7]);

        assert_eq!(sut.node_at(nodes, 0).map(|i| nodes[i].value), Some(5));
        assert_eq!(sut.node_at(nodes, 1).map(|i| nodes[i].value), Some(6));
        assert_eq!(sut.node_at(nodes, 2).map(|i| nodes[i].value), Some(7));
        assert_eq!(sut.node_at(nodes, 3), None);
    }
}
