use log::debug;
use rayon::prelude::*;

use crate::{GameState, GameTreeNode};

/// The move chosen for the maximizing player at the root of a game tree.
#[derive(Clone, Copy, Debug)]
pub struct Decision<'a, 't, S> {
    /// The root's child the maximizing player should move to.
    pub child: &'a GameTreeNode<'t, S>,
    /// Position of `child` in the root's children.
    pub index: usize,
    /// Minimax value of `child`.
    pub value: f64,
    /// Number of tree nodes evaluated to reach the decision, the root included.
    pub visited: usize,
}

/// Picks the root child with the highest minimax value, assuming the maximizing player moves at
/// the root. Among children with equal values the first one wins.
///
/// Returns `None` if the root is a leaf.
pub fn minimax_decide<'a, 't, S: GameState>(
    root: &'a GameTreeNode<'t, S>,
) -> Option<Decision<'a, 't, S>> {
    let mut visited = 1;
    let mut best: Option<(usize, f64)> = None;
    for (index, child) in root.children.iter().enumerate() {
        let value = min_value(child, &mut visited);
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((index, value));
        }
    }
    decision(root, best, visited, "minimax")
}

/// [`minimax_decide`] over the root's children in parallel. Makes the same decision.
pub fn par_minimax_decide<'a, 't, S: GameState + Sync>(
    root: &'a GameTreeNode<'t, S>,
) -> Option<Decision<'a, 't, S>> {
    let values: Vec<(f64, usize)> = root
        .children
        .par_iter()
        .map(|child| {
            let mut visited = 0;
            let value = min_value(child, &mut visited);
            (value, visited)
        })
        .collect();

    let mut visited = 1;
    let mut best: Option<(usize, f64)> = None;
    for (index, (value, count)) in values.into_iter().enumerate() {
        visited += count;
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((index, value));
        }
    }
    decision(root, best, visited, "parallel minimax")
}

/// [`minimax_decide`] with alpha-beta pruning. Makes the same decision while usually evaluating
/// far fewer nodes.
pub fn alpha_beta_decide<'a, 't, S: GameState>(
    root: &'a GameTreeNode<'t, S>,
) -> Option<Decision<'a, 't, S>> {
    let mut visited = 1;
    let mut best: Option<(usize, f64)> = None;
    for (index, child) in root.children.iter().enumerate() {
        let alpha = best.map_or(f64::NEG_INFINITY, |(_, max)| max);
        // A pruned child returns a value no greater than alpha, so it is never chosen.
        let value = alpha_beta_min(child, alpha, f64::INFINITY, &mut visited);
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((index, value));
        }
    }
    decision(root, best, visited, "alpha-beta")
}

/// The move chosen by [`alpha_beta_decide_depth`].
#[derive(Clone, Copy, Debug)]
pub struct Choice<S> {
    /// Position after the chosen move.
    pub state: S,
    /// Position of the move among the root's successors.
    pub index: usize,
    /// Value of `state`, exact where the search reached the end of the game.
    pub value: f64,
    /// Number of positions evaluated, the root included.
    pub visited: usize,
}

/// Alpha-beta search from `root` for the maximizing player, looking at most `depth` moves ahead.
///
/// Successors are generated while searching, so no tree is kept in memory. Positions reached
/// after `depth` moves are scored with [`GameState::score`] even if the game is not over. A
/// `depth` of zero is treated as one. Once `depth` covers the rest of the game this makes the
/// same choice as [`alpha_beta_decide`] on the fully generated tree.
///
/// Returns `None` if `root` is terminal.
pub fn alpha_beta_decide_depth<S: GameState>(root: &S, depth: usize) -> Option<Choice<S>> {
    let remaining = depth.max(1) - 1;
    let mut successors = vec![];
    root.successors(true, &mut successors);

    let mut visited = 1;
    let mut best: Option<(usize, f64)> = None;
    for (index, child) in successors.iter().enumerate() {
        let alpha = best.map_or(f64::NEG_INFINITY, |(_, max)| max);
        let value = depth_min(child, remaining, alpha, f64::INFINITY, &mut visited);
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((index, value));
        }
    }

    let (index, value) = best?;
    debug!(
        "depth {depth} alpha-beta chose move {index} with value {value} after visiting \
         {visited} positions"
    );
    Some(Choice {
        state: successors[index],
        index,
        value,
        visited,
    })
}

fn depth_max<S: GameState>(
    state: &S,
    depth: usize,
    mut alpha: f64,
    beta: f64,
    visited: &mut usize,
) -> f64 {
    *visited += 1;
    if depth == 0 || state.is_terminal() {
        return state.score();
    }
    let mut successors = vec![];
    state.successors(true, &mut successors);
    if successors.is_empty() {
        return state.score();
    }
    let mut max = f64::NEG_INFINITY;
    for child in &successors {
        max = max.max(depth_min(child, depth - 1, alpha, beta, visited));
        if max >= beta {
            return max;
        }
        alpha = alpha.max(max);
    }
    max
}

fn depth_min<S: GameState>(
    state: &S,
    depth: usize,
    alpha: f64,
    mut beta: f64,
    visited: &mut usize,
) -> f64 {
    *visited += 1;
    if depth == 0 || state.is_terminal() {
        return state.score();
    }
    let mut successors = vec![];
    state.successors(false, &mut successors);
    if successors.is_empty() {
        return state.score();
    }
    let mut min = f64::INFINITY;
    for child in &successors {
        min = min.min(depth_max(child, depth - 1, alpha, beta, visited));
        if min <= alpha {
            return min;
        }
        beta = beta.min(min);
    }
    min
}

fn decision<'a, 't, S>(
    root: &'a GameTreeNode<'t, S>,
    best: Option<(usize, f64)>,
    visited: usize,
    algorithm: &str,
) -> Option<Decision<'a, 't, S>> {
    let (index, value) = best?;
    debug!("{algorithm} chose child {index} with value {value} after visiting {visited} nodes");
    Some(Decision {
        child: &root.children[index],
        index,
        value,
        visited,
    })
}

fn max_value<S: GameState>(node: &GameTreeNode<S>, visited: &mut usize) -> f64 {
    *visited += 1;
    if node.is_leaf() {
        return node.state.score();
    }
    let mut max = f64::NEG_INFINITY;
    for child in node.children {
        max = max.max(min_value(child, visited));
    }
    max
}

fn min_value<S: GameState>(node: &GameTreeNode<S>, visited: &mut usize) -> f64 {
    *visited += 1;
    if node.is_leaf() {
        return node.state.score();
    }
    let mut min = f64::INFINITY;
    for child in node.children {
        min = min.min(max_value(child, visited));
    }
    min
}

fn alpha_beta_max<S: GameState>(
    node: &GameTreeNode<S>,
    mut alpha: f64,
    beta: f64,
    visited: &mut usize,
) -> f64 {
    *visited += 1;
    if node.is_leaf() {
        return node.state.score();
    }
    let mut max = f64::NEG_INFINITY;
    for child in node.children {
        max = max.max(alpha_beta_min(child, alpha, beta, visited));
        if max >= beta {
            return max;
        }
        alpha = alpha.max(max);
    }
    max
}

fn alpha_beta_min<S: GameState>(
    node: &GameTreeNode<S>,
    alpha: f64,
    mut beta: f64,
    visited: &mut usize,
) -> f64 {
    *visited += 1;
    if node.is_leaf() {
        return node.state.score();
    }
    let mut min = f64::INFINITY;
    for child in node.children {
        min = min.min(alpha_beta_max(child, alpha, beta, visited));
        if min <= alpha {
            return min;
        }
        beta = beta.min(min);
    }
    min
}
