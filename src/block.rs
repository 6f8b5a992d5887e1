use crate::list::List;

/// One block of the deque: the owner of a contiguous run of up to `N`
/// logical elements, chained to its neighbors through arena indices.
///
/// Like nodes, every block carries a never-reused identity so a cursor can
/// tell a live block from a recycled slot. A block's count may drift
/// outside `[1, N]` while a single mutating call is in flight; the
/// rebalancing pass restores the bound before the call returns, and an
/// empty block never survives it.
pub(crate) struct Block {
    pub(crate) id: u64,
    pub(crate) list: List,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl Block {
    pub(crate) const fn new(id: u64, list: List) -> Self {
        Self {
            id,
            list,
            prev: None,
            next: None,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.list.len
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.list.len == 0
    }
}
