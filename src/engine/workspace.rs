//! Reusable propagation buffers amortised across runs.
//!
//! The engine allocates its visit-state grid, best-strength side table and
//! frontier heap once and reuses them; contents never leak across runs
//! because `reset` refills them before any propagation starts.

use super::frontier::Frontier;
use super::state::VisitState;

#[derive(Debug, Default)]
pub(crate) struct EngineWorkspace {
    pub states: Vec<VisitState>,
    /// Current best tentative strength per pixel; only meaningful for
    /// pixels in the `Queued` state.
    pub best: Vec<u16>,
    pub frontier: Frontier,
}

impl EngineWorkspace {
    /// Clear all per-run state and size the buffers for `len` pixels.
    pub fn reset(&mut self, len: usize) {
        self.states.clear();
        self.states.resize(len, VisitState::Unvisited);
        self.best.clear();
        self.best.resize(len, 0);
        self.frontier.reset();
    }
}
