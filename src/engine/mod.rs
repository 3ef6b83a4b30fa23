//! Connectedness propagation engine.
//!
//! Overview
//! - [`ConnectednessEngine`] runs a best-first, Dijkstra-like sweep that
//!   finalizes pixels in decreasing order of path strength, starting from a
//!   seed at full strength.
//! - The frontier is a max-heap with lazy stale-entry invalidation instead of
//!   a decrease-key operation; a side table of best tentative strengths
//!   arbitrates on pop.
//! - Edge affinities come from a [`PairwiseAffinity`](crate::affinity::PairwiseAffinity)
//!   model, either evaluated on demand or precomputed into an [`AffinityMap`]
//!   with row parallelism ahead of the sweep.
//! - Scratch buffers live in a reusable workspace so repeated runs avoid
//!   reallocations.

pub mod affinity_map;
mod frontier;
mod propagation;
mod state;
mod workspace;

pub use affinity_map::AffinityMap;
pub use propagation::{AffinityEvaluation, ConnectednessEngine, PropagationError, RunStats};
pub use state::VisitState;
