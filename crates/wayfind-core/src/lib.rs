#![warn(missing_docs)]
//! Core types and utilities for `wayfind`.
//!
//! This crate provides node identities, the graph model, the traits searches are generic over,
//! and the open set shared by the best-first searches.

mod error;
mod graph;
mod node;
mod path;
mod pqueue;
pub mod traits;

pub use crate::error::*;
pub use crate::graph::*;
pub use crate::node::*;
pub use crate::path::*;
pub use crate::pqueue::*;

/// Per-node search bookkeeping, keyed by node identity.
pub type ScratchMap<R> = ahash::AHashMap<NodeId, R>;
