use std::cmp::Ordering;

use ahash::AHashMap;

use crate::NodeId;

/// Open set of a best-first search: a binary min-heap of nodes that supports lowering the key of
/// a node already in the heap.
///
/// Nodes are ordered by key, and nodes with equal keys by [`NodeId`], so the node returned by
/// [`OpenSet::next`] never depends on insertion order.
pub struct OpenSet<K> {
    heap: Vec<(K, NodeId)>,
    index: AHashMap<NodeId, usize>,
}

impl<K: PartialOrd + Copy> OpenSet<K> {
    /// Creates an empty open set.
    pub fn new() -> Self {
        OpenSet {
            heap: vec![],
            index: AHashMap::new(),
        }
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    /// Number of nodes in the open set.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the open set is exhausted.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `node` is currently in the open set.
    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// Inserts `node` with `key`, or lowers its key if it is already present.
    ///
    /// Keys may only decrease while a node is in the open set.
    pub fn relaxed(&mut self, node: NodeId, key: K) {
        match self.index.get(&node) {
            Some(&index) => {
                debug_assert!(key <= self.heap[index].0, "key of an open node increased");
                self.sift_up((key, node), index);
            }
            None => {
                self.heap.push((key, node));
                self.sift_up((key, node), self.heap.len() - 1);
            }
        }
    }

    /// Removes and returns the node with the smallest key.
    pub fn next(&mut self) -> Option<(NodeId, K)> {
        if self.heap.is_empty() {
            return None;
        }
        let (key, node) = self.heap.swap_remove(0);
        self.index.remove(&node);
        if let Some(&entry) = self.heap.first() {
            self.sift_down(entry, 0);
        }
        Some((node, key))
    }

    fn sift_up(&mut self, entry: (K, NodeId), mut index: usize) {
        while index > 0 {
            let parent_index = (index - 1) / 2;
            let parent = self.heap[parent_index];
            if le(&parent, &entry) {
                break;
            }
            self.heap[index] = parent;
            self.index.insert(parent.1, index);
            index = parent_index;
        }
        self.heap[index] = entry;
        self.index.insert(entry.1, index);
    }

    fn sift_down(&mut self, entry: (K, NodeId), mut index: usize) {
        loop {
            let child_1_index = index * 2 + 1;
            if child_1_index >= self.heap.len() {
                break;
            }

            let child_2_index = child_1_index + 1;
            let child_index = if child_2_index < self.heap.len()
                && !le(&self.heap[child_1_index], &self.heap[child_2_index])
            {
                child_2_index
            } else {
                child_1_index
            };
            let child = self.heap[child_index];

            if le(&entry, &child) {
                break;
            }

            self.heap[index] = child;
            self.index.insert(child.1, index);
            index = child_index;
        }

        self.heap[index] = entry;
        self.index.insert(entry.1, index);
    }
}

impl<K: PartialOrd + Copy> Default for OpenSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

fn le<K: PartialOrd>(lhs: &(K, NodeId), rhs: &(K, NodeId)) -> bool {
    match lhs.0.partial_cmp(&rhs.0) {
        Some(Ordering::Less) => true,
        Some(Ordering::Greater) => false,
        _ => lhs.1 <= rhs.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OwnerId;

    #[test]
    fn pops_in_key_order() {
        let owner = OwnerId::fresh();
        let mut open = OpenSet::new();
        for (i, key) in [5.0, 1.0, 4.0, 2.0, 3.0].into_iter().enumerate() {
            open.relaxed(NodeId::new(owner, i), key);
        }
        let keys: Vec<f64> = std::iter::from_fn(|| open.next()).map(|(_, k)| k).collect();
        assert_eq!(keys, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(open.is_empty());
    }

    #[test]
    fn equal_keys_pop_lowest_id_first() {
        let owner = OwnerId::fresh();
        let mut open = OpenSet::new();
        for i in [7, 3, 9, 1, 4] {
            open.relaxed(NodeId::new(owner, i), 2.0);
        }
        let order: Vec<usize> = std::iter::from_fn(|| open.next())
            .map(|(n, _)| n.index())
            .collect();
        assert_eq!(order, vec![1, 3, 4, 7, 9]);
    }

    #[test]
    fn decrease_key_reorders() {
        let owner = OwnerId::fresh();
        let a = NodeId::new(owner, 0);
        let b = NodeId::new(owner, 1);
        let c = NodeId::new(owner, 2);
        let mut open = OpenSet::new();
        open.relaxed(a, 1.0);
        open.relaxed(b, 5.0);
        open.relaxed(c, 3.0);
        open.relaxed(b, 0.5);
        assert_eq!(open.len(), 3);
        assert!(open.contains(b));
        assert_eq!(open.next(), Some((b, 0.5)));
        assert!(!open.contains(b));
        assert_eq!(open.next(), Some((a, 1.0)));
        assert_eq!(open.next(), Some((c, 3.0)));
        assert_eq!(open.next(), None);
    }
}
