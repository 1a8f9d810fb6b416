use bumpalo::Bump;

/// A position in a two-player, zero-sum game.
///
/// Players alternate. The maximizing player wants a high [`GameState::score`], the minimizing
/// player a low one.
pub trait GameState: Copy {
    /// Pushes every position reachable in one move onto `out`, in a fixed order.
    ///
    /// `max_to_move` says whether the maximizing player makes that move. Terminal positions push
    /// nothing.
    fn successors(&self, max_to_move: bool, out: &mut Vec<Self>);

    /// Value of a position from the maximizing player's point of view.
    ///
    /// Exact for terminal positions. Games searched with a depth limit also score the positions
    /// where the search is cut off, so the estimate there should stay between the values of a
    /// loss and a win.
    fn score(&self) -> f64;

    /// Whether the game is over, i.e. no move can be made from this position.
    fn is_terminal(&self) -> bool {
        let mut successors = vec![];
        self.successors(true, &mut successors);
        successors.is_empty()
    }
}

/// A node of a fully generated game tree. Leaves have no children.
#[derive(Clone, Copy, Debug)]
pub struct GameTreeNode<'t, S> {
    pub state: S,
    pub children: &'t [GameTreeNode<'t, S>],
}

impl<'t, S> GameTreeNode<'t, S> {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(GameTreeNode::size).sum::<usize>()
    }
}

/// Owns the memory of generated game trees. Every tree is freed at once by
/// [`GameTreeArena::reset`] or by dropping the arena.
pub struct GameTreeArena {
    bump: Bump,
}

impl GameTreeArena {
    pub fn new() -> Self {
        GameTreeArena { bump: Bump::new() }
    }

    /// Frees every tree generated so far.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Bytes currently allocated for trees.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Generates the complete game tree below `state`, where `max_to_move` says whether the
    /// maximizing player moves first.
    pub fn generate<S: GameState>(&self, state: S, max_to_move: bool) -> &GameTreeNode<'_, S> {
        let root = self.subtree(state, max_to_move);
        self.bump.alloc(root)
    }

    fn subtree<S: GameState>(&self, state: S, max_to_move: bool) -> GameTreeNode<'_, S> {
        let mut successors = vec![];
        state.successors(max_to_move, &mut successors);
        let children: Vec<_> = successors
            .into_iter()
            .map(|next| self.subtree(next, !max_to_move))
            .collect();
        GameTreeNode {
            state,
            children: self.bump.alloc_slice_copy(&children),
        }
    }
}

impl Default for GameTreeArena {
    fn default() -> Self {
        Self::new()
    }
}
