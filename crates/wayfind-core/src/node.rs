use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies the graph (or grid) that created a node.
///
/// Every owner gets a process-unique id, so a [`NodeId`] handed to the wrong graph is detected
/// instead of silently aliasing one of its nodes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(u64);

static OWNER_ID: AtomicU64 = AtomicU64::new(0);

impl OwnerId {
    /// Allocates a new owner id, distinct from every other one handed out by this process.
    pub fn fresh() -> OwnerId {
        OwnerId(OWNER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque identity of a node.
///
/// Node ids are ordered by owner and then by index; all nodes taking part in one search share an
/// owner, so within a search the order is the index order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    owner: OwnerId,
    index: u32,
}

impl NodeId {
    /// Creates the id of node number `index` of `owner`.
    #[track_caller]
    pub fn new(owner: OwnerId, index: usize) -> Self {
        let index = index.try_into().expect("node index must fit in u32");
        NodeId { owner, index }
    }

    /// The owner that created this node.
    #[inline(always)]
    pub fn owner(self) -> OwnerId {
        self.owner
    }

    /// Position of this node in its owner's node collection.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.owner, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owners_are_distinct() {
        let a = OwnerId::fresh();
        let b = OwnerId::fresh();
        assert_ne!(a, b);
        assert_ne!(NodeId::new(a, 3), NodeId::new(b, 3));
        assert_eq!(NodeId::new(a, 3), NodeId::new(a, 3));
    }

    #[test]
    fn same_owner_orders_by_index() {
        let owner = OwnerId::fresh();
        assert!(NodeId::new(owner, 2) < NodeId::new(owner, 10));
    }
}
