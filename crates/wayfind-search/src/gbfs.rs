use log::debug;
use wayfind_core::traits::{Edge, Expander};
use wayfind_core::{GraphError, NodeId, OpenSet, Path, ScratchMap};

use crate::checked_heuristic;

/// Greedy best-first bookkeeping for one node.
#[derive(Clone, Copy, Debug)]
pub struct GbfsScratch<E> {
    /// Edge from the most recently expanded node that reached this one.
    pub parent_edge: Option<E>,
    /// Estimated cost from this node to the goal.
    pub heuristic: f64,
    pub in_open_set: bool,
    pub in_closed_set: bool,
}

impl<E> Default for GbfsScratch<E> {
    fn default() -> Self {
        GbfsScratch {
            parent_edge: None,
            heuristic: 0.0,
            in_open_set: false,
            in_closed_set: false,
        }
    }
}

/// Greedy best-first search: always expands the open node with the lowest heuristic value.
///
/// Edge costs are never consulted. Every time a node is expanded, each of its neighbours that is
/// not closed takes the expanded node as its parent, even if it was already open, so the path
/// found is generally not the cheapest one.
pub struct GreedyBestFirstSearcher<E> {
    scratch: ScratchMap<GbfsScratch<E>>,
    open: OpenSet<f64>,
    edges: Vec<E>,
    last: Option<(NodeId, NodeId, bool)>,
    expanded: usize,
}

impl<E: Edge> GreedyBestFirstSearcher<E> {
    pub fn new() -> Self {
        GreedyBestFirstSearcher {
            scratch: ScratchMap::default(),
            open: OpenSet::new(),
            edges: vec![],
            last: None,
            expanded: 0,
        }
    }

    /// Searches for some path from `start` to `goal`, guided only by `heuristic`.
    ///
    /// Returns `Ok(false)` when the goal is unreachable.
    pub fn search<X>(
        &mut self,
        expander: &X,
        start: NodeId,
        goal: NodeId,
        mut heuristic: impl FnMut(NodeId, NodeId) -> f64,
    ) -> Result<bool, GraphError>
    where
        X: Expander<Edge = E>,
    {
        expander.check(start)?;
        expander.check(goal)?;

        self.scratch.clear();
        self.open.clear();
        self.expanded = 0;
        debug!("greedy best-first search from {start:?} to {goal:?}");

        self.scratch.insert(
            start,
            GbfsScratch {
                heuristic: checked_heuristic(heuristic(start, goal)),
                in_closed_set: true,
                ..GbfsScratch::default()
            },
        );

        let mut current = start;
        let mut found = true;
        while current != goal {
            self.expanded += 1;
            self.edges.clear();
            expander.expand(current, &mut self.edges);

            for &edge in &self.edges {
                let neighbor = edge.target();
                let data = self.scratch.entry(neighbor).or_default();
                if data.in_closed_set {
                    continue;
                }

                data.parent_edge = Some(edge);
                if !data.in_open_set {
                    data.heuristic = checked_heuristic(heuristic(neighbor, goal));
                    data.in_open_set = true;
                    self.open.relaxed(neighbor, data.heuristic);
                }
            }

            let Some((next, _)) = self.open.next() else {
                found = false;
                break;
            };
            let data = self.scratch.entry(next).or_default();
            data.in_open_set = false;
            data.in_closed_set = true;
            current = next;
        }

        debug!(
            "greedy best-first search {} after expanding {} nodes",
            if found { "reached goal" } else { "exhausted open set" },
            self.expanded
        );
        self.last = Some((start, goal, found));
        Ok(found)
    }

    /// Scratch records of every node discovered by the last search.
    pub fn scratch(&self) -> &ScratchMap<GbfsScratch<E>> {
        &self.scratch
    }

    /// Scratch record of `node` from the last search.
    pub fn record(&self, node: NodeId) -> Option<&GbfsScratch<E>> {
        self.scratch.get(&node)
    }

    /// Number of nodes expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Path found by the last search, if it reached the goal.
    pub fn path(&self) -> Option<Path<E>> {
        let (start, goal, true) = self.last? else {
            return None;
        };
        Path::from_parents(start, goal, |node| {
            self.scratch.get(&node).and_then(|data| data.parent_edge)
        })
    }
}

impl<E: Edge> Default for GreedyBestFirstSearcher<E> {
    fn default() -> Self {
        Self::new()
    }
}
