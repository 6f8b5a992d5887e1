/// One stored value of a deque, together with its intra-block links.
///
/// Nodes live in the deque-wide arena and only ever link to neighbors
/// within the same block. The `id` is assigned once, is unique within the
/// owning deque, and is never reused; it is what lets a stale cursor be
/// told apart from a live one after its arena slot has been recycled.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) id: u64,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl<T> Node<T> {
    pub(crate) const fn new(id: u64, value: T) -> Self {
        Self {
            value,
            id,
            prev: None,
            next: None,
        }
    }
}
