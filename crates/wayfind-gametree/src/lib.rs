//! Exhaustive game trees searched with minimax and alpha-beta pruning.
//!
//! A [`GameTreeArena`] generates every line of play below a [`GameState`]. The decision
//! functions then pick the move for the maximizing player at the root. Games too large to
//! generate whole are searched to a fixed depth with [`alpha_beta_decide_depth`].

mod connect_four;
mod minimax;
mod tictactoe;
mod tree;

pub use self::connect_four::*;
pub use self::minimax::*;
pub use self::tictactoe::*;
pub use self::tree::*;
