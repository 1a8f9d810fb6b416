use log::{debug, trace};
use wayfind_core::traits::{Cost, Edge, Expander};
use wayfind_core::{GraphError, NodeId, OpenSet, Path, ScratchMap};

use crate::checked_heuristic;

/// A* bookkeeping for one node.
#[derive(Clone, Copy, Debug)]
pub struct AStarScratch<E> {
    /// Edge through which the cheapest known path reaches this node.
    pub parent_edge: Option<E>,
    /// Estimated cost from this node to the goal.
    pub heuristic: f64,
    /// Cost of the cheapest known path from the start.
    pub cost_from_start: f64,
    pub in_open_set: bool,
    pub in_closed_set: bool,
}

impl<E> AStarScratch<E> {
    /// `g + h`, the key the open set is ordered by.
    pub fn f(&self) -> f64 {
        self.cost_from_start + self.heuristic
    }
}

impl<E> Default for AStarScratch<E> {
    fn default() -> Self {
        AStarScratch {
            parent_edge: None,
            heuristic: 0.0,
            cost_from_start: 0.0,
            in_open_set: false,
            in_closed_set: false,
        }
    }
}

/// Optimal shortest path search.
///
/// With an admissible heuristic the path found is a cheapest one. Among open nodes with equal
/// `f`, the one with the lowest [`NodeId`] is expanded first.
pub struct AStarSearcher<E> {
    scratch: ScratchMap<AStarScratch<E>>,
    open: OpenSet<f64>,
    edges: Vec<E>,
    last: Option<(NodeId, NodeId, bool)>,
    expanded: usize,
}

impl<E: Edge + Cost> AStarSearcher<E> {
    pub fn new() -> Self {
        AStarSearcher {
            scratch: ScratchMap::default(),
            open: OpenSet::new(),
            edges: vec![],
            last: None,
            expanded: 0,
        }
    }

    /// Searches for a cheapest path from `start` to `goal`.
    ///
    /// Returns `Ok(false)` when the goal is unreachable. Scratch data from any previous search is
    /// discarded first.
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
        debug!("A* search from {start:?} to {goal:?}");

        self.scratch.insert(
            start,
            AStarScratch {
                heuristic: checked_heuristic(heuristic(start, goal)),
                in_closed_set: true,
                ..AStarScratch::default()
            },
        );

        let mut current = start;
        let mut found = true;
        while current != goal {
            self.expanded += 1;
            self.edges.clear();
            expander.expand(current, &mut self.edges);

            let current_g = self
                .scratch
                .get(&current)
                .map_or(0.0, |data| data.cost_from_start);

            for &edge in &self.edges {
                let neighbor = edge.target();
                let data = self.scratch.entry(neighbor).or_default();
                if data.in_closed_set {
                    continue;
                }

                let new_g = current_g + edge.cost();
                if !data.in_open_set {
                    data.parent_edge = Some(edge);
                    data.heuristic = checked_heuristic(heuristic(neighbor, goal));
                    data.cost_from_start = new_g;
                    data.in_open_set = true;
                    self.open.relaxed(neighbor, data.f());
                } else if new_g < data.cost_from_start {
                    trace!("relaxed {neighbor:?}: {} -> {new_g}", data.cost_from_start);
                    data.parent_edge = Some(edge);
                    data.cost_from_start = new_g;
                    self.open.relaxed(neighbor, data.f());
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
            "A* {} after expanding {} nodes",
            if found { "reached goal" } else { "exhausted open set" },
            self.expanded
        );
        self.last = Some((start, goal, found));
        Ok(found)
    }

    /// Scratch records of every node discovered by the last search.
    pub fn scratch(&self) -> &ScratchMap<AStarScratch<E>> {
        &self.scratch
    }

    /// Scratch record of `node` from the last search.
    pub fn record(&self, node: NodeId) -> Option<&AStarScratch<E>> {
        self.scratch.get(&node)
    }

    /// Number of nodes expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Cheapest path found by the last search, if it reached the goal.
    pub fn path(&self) -> Option<Path<E>> {
        let (start, goal, true) = self.last? else {
            return None;
        };
        Path::from_parents(start, goal, |node| {
            self.scratch.get(&node).and_then(|data| data.parent_edge)
        })
    }
}

impl<E: Edge + Cost> Default for AStarSearcher<E> {
    fn default() -> Self {
        Self::new()
    }
}
