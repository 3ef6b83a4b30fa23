//! Best-first connectedness propagation.
//!
//! Dijkstra's algorithm with the distance relation inverted to a strength
//! relation: a path is as strong as its weakest edge affinity, and every
//! pixel receives the strength of its strongest path to the seed. The greedy
//! argument carries over — once a pixel is popped with the current maximum
//! tentative strength, no unexplored path can beat it, because any such
//! path's strength is bounded by the strength of a not-yet-finalized pixel
//! on it.
//!
//! The sweep itself is single-threaded (finalization order is a global
//! invariant); the per-edge affinity work can be precomputed in parallel
//! beforehand, see [`AffinityMap`].

use super::affinity_map::AffinityMap;
use super::frontier::Frontier;
use super::state::VisitState;
use super::workspace::EngineWorkspace;
use crate::affinity::PairwiseAffinity;
use crate::image::{SceneImage, VectorImage};
use crate::types::MAX_SCORE;
use log::debug;
use std::time::Instant;

/// How edge affinities are obtained during propagation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AffinityEvaluation {
    /// Evaluate each edge whenever the propagation touches it.
    OnDemand,
    /// Evaluate all edges ahead of propagation, with row parallelism.
    #[default]
    Precomputed,
}

/// Seed validation failure; raised before any propagation work begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationError {
    SeedOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl std::fmt::Display for PropagationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropagationError::SeedOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "seed ({x}, {y}) outside {width}x{height} input")
            }
        }
    }
}

impl std::error::Error for PropagationError {}

/// Counters and timings of one propagation run.
#[derive(Clone, Copy, Debug)]
pub struct RunStats {
    pub evaluation: AffinityEvaluation,
    /// Time spent building the affinity map (0 for on-demand evaluation).
    pub affinity_ms: f64,
    pub propagation_ms: f64,
    /// Edge evaluations performed; for precomputed maps this is the total
    /// edge count, for on-demand evaluation edges may be counted repeatedly.
    pub edges_evaluated: usize,
    pub finalized: usize,
    pub frontier_pushes: usize,
    pub stale_pops: usize,
    pub peak_frontier: usize,
}

/// Best-first propagation engine.
///
/// Holds no state across calls other than scratch buffers that are refilled
/// before every run; results depend only on the inputs.
#[derive(Debug, Default)]
pub struct ConnectednessEngine {
    evaluation: AffinityEvaluation,
    workspace: EngineWorkspace,
}

enum EdgeSource<'a> {
    Demand {
        input: &'a VectorImage,
        model: &'a dyn PairwiseAffinity,
        evaluated: usize,
    },
    Cached {
        map: AffinityMap,
    },
}

impl EdgeSource<'_> {
    /// Affinity of the edge between two 4-adjacent pixels; `(ax, ay)` must
    /// precede `(bx, by)` in row-major order so that both evaluation modes
    /// score each undirected edge in the same direction.
    #[inline]
    fn between(&mut self, ax: usize, ay: usize, bx: usize, by: usize) -> u16 {
        match self {
            EdgeSource::Demand {
                input,
                model,
                evaluated,
            } => {
                *evaluated += 1;
                model.affinity(input.get(ax, ay), input.get(bx, by))
            }
            EdgeSource::Cached { map } => {
                if ay == by {
                    map.horizontal(ax, ay)
                } else {
                    map.vertical(ax, ay)
                }
            }
        }
    }

    fn evaluated(&self) -> usize {
        match self {
            EdgeSource::Demand { evaluated, .. } => *evaluated,
            EdgeSource::Cached { map } => map.edge_count(),
        }
    }
}

impl ConnectednessEngine {
    pub fn new(evaluation: AffinityEvaluation) -> Self {
        Self {
            evaluation,
            workspace: EngineWorkspace::default(),
        }
    }

    pub fn evaluation(&self) -> AffinityEvaluation {
        self.evaluation
    }

    /// Compute the connectedness scene for `seed`.
    pub fn run(
        &mut self,
        input: &VectorImage,
        model: &dyn PairwiseAffinity,
        seed: (usize, usize),
    ) -> Result<SceneImage, PropagationError> {
        self.run_with_stats(input, model, seed)
            .map(|(scene, _)| scene)
    }

    /// Compute the connectedness scene and report run counters.
    pub fn run_with_stats(
        &mut self,
        input: &VectorImage,
        model: &dyn PairwiseAffinity,
        seed: (usize, usize),
    ) -> Result<(SceneImage, RunStats), PropagationError> {
        let (w, h) = (input.w, input.h);
        let (sx, sy) = seed;
        if sx >= w || sy >= h {
            return Err(PropagationError::SeedOutOfBounds {
                x: sx,
                y: sy,
                width: w,
                height: h,
            });
        }
        debug!(
            "ConnectednessEngine::run start w={} h={} seed=({},{}) eval={:?}",
            w, h, sx, sy, self.evaluation
        );

        let affinity_start = Instant::now();
        let mut edges = match self.evaluation {
            AffinityEvaluation::OnDemand => EdgeSource::Demand {
                input,
                model,
                evaluated: 0,
            },
            AffinityEvaluation::Precomputed => EdgeSource::Cached {
                map: AffinityMap::build(input, model),
            },
        };
        let affinity_ms = affinity_start.elapsed().as_secs_f64() * 1000.0;

        let propagation_start = Instant::now();
        self.workspace.reset(w * h);
        let EngineWorkspace {
            states,
            best,
            frontier,
        } = &mut self.workspace;

        let mut scene = SceneImage::new(w, h);
        let seed_idx = sy * w + sx;
        states[seed_idx] = VisitState::Finalized;
        scene.data[seed_idx] = MAX_SCORE;
        let mut finalized = 1usize;
        relax_neighbors(seed_idx, MAX_SCORE, w, h, &mut edges, states, best, frontier);

        while let Some(entry) = frontier.pop() {
            let idx = entry.index as usize;
            // An entry is stale once its pixel was finalized through an
            // equal-strength duplicate, or once a stronger path superseded
            // its recorded strength in the side table.
            if states[idx] == VisitState::Finalized || entry.strength != best[idx] {
                frontier.note_stale();
                continue;
            }
            states[idx] = VisitState::Finalized;
            scene.data[idx] = entry.strength;
            finalized += 1;
            relax_neighbors(idx, entry.strength, w, h, &mut edges, states, best, frontier);
        }
        let propagation_ms = propagation_start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            "ConnectednessEngine::run done finalized={}/{} pushes={} stale_pops={}",
            finalized,
            w * h,
            frontier.pushes(),
            frontier.stale_pops()
        );

        let stats = RunStats {
            evaluation: self.evaluation,
            affinity_ms,
            propagation_ms,
            edges_evaluated: edges.evaluated(),
            finalized,
            frontier_pushes: frontier.pushes(),
            stale_pops: frontier.stale_pops(),
            peak_frontier: frontier.peak_len(),
        };
        Ok((scene, stats))
    }
}

/// Offer `strength`-limited candidates to the four neighbors of `idx`.
#[allow(clippy::too_many_arguments)]
fn relax_neighbors(
    idx: usize,
    strength: u16,
    w: usize,
    h: usize,
    edges: &mut EdgeSource<'_>,
    states: &mut [VisitState],
    best: &mut [u16],
    frontier: &mut Frontier,
) {
    let x = idx % w;
    let y = idx / w;
    if x > 0 && states[idx - 1] != VisitState::Finalized {
        let aff = edges.between(x - 1, y, x, y);
        queue_candidate(idx - 1, strength.min(aff), states, best, frontier);
    }
    if x + 1 < w && states[idx + 1] != VisitState::Finalized {
        let aff = edges.between(x, y, x + 1, y);
        queue_candidate(idx + 1, strength.min(aff), states, best, frontier);
    }
    if y > 0 && states[idx - w] != VisitState::Finalized {
        let aff = edges.between(x, y - 1, x, y);
        queue_candidate(idx - w, strength.min(aff), states, best, frontier);
    }
    if y + 1 < h && states[idx + w] != VisitState::Finalized {
        let aff = edges.between(x, y, x, y + 1);
        queue_candidate(idx + w, strength.min(aff), states, best, frontier);
    }
}

#[inline]
fn queue_candidate(
    nidx: usize,
    candidate: u16,
    states: &mut [VisitState],
    best: &mut [u16],
    frontier: &mut Frontier,
) {
    // Zero-strength paths never improve on the scene default; skipping them
    // keeps disconnected regions out of the queue entirely.
    if candidate == 0 {
        return;
    }
    if states[nidx] == VisitState::Unvisited || candidate > best[nidx] {
        best[nidx] = candidate;
        states[nidx] = VisitState::Queued;
        frontier.push(candidate, nidx as u32);
    }
}
