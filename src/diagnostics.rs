//! Diagnostics data model exposed by the segmenter and the demo binary.
//!
//! [`SegmentationReport`] is the main entry point returned by
//! [`Segmenter::execute_with_diagnostics`](crate::Segmenter), bundling the
//! compact [`SegmentationResult`] with a [`PipelineTrace`] describing the
//! stages of the run.

use crate::engine::{AffinityEvaluation, RunStats};
use crate::types::SegmentationResult;
use serde::{Deserialize, Serialize};

/// Timing entry for a single stage of the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Result produced by [`Segmenter::execute_with_diagnostics`](crate::Segmenter).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub result: SegmentationResult,
    pub trace: PipelineTrace,
}

/// End-to-end trace describing the internal execution of a run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub affinity: AffinityStage,
    pub propagation: PropagationStage,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub seed: [usize; 2],
}

/// Affinity evaluation statistics for one run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinityStage {
    pub elapsed_ms: f64,
    pub mode: String,
    pub edges_evaluated: usize,
}

/// Propagation statistics for one run.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropagationStage {
    pub elapsed_ms: f64,
    pub finalized: usize,
    pub frontier_pushes: usize,
    pub stale_pops: usize,
    pub peak_frontier: usize,
}

impl PipelineTrace {
    /// Assemble a trace from the engine's run counters.
    pub(crate) fn from_stats(
        width: usize,
        height: usize,
        seed: (usize, usize),
        stats: &RunStats,
        total_ms: f64,
    ) -> Self {
        let mode = match stats.evaluation {
            AffinityEvaluation::OnDemand => "onDemand",
            AffinityEvaluation::Precomputed => "precomputed",
        };
        let mut timings = TimingBreakdown::with_total(total_ms);
        if stats.affinity_ms > 0.0 {
            timings.push("affinity", stats.affinity_ms);
        }
        timings.push("propagation", stats.propagation_ms);

        Self {
            input: InputDescriptor {
                width,
                height,
                seed: [seed.0, seed.1],
            },
            timings,
            affinity: AffinityStage {
                elapsed_ms: stats.affinity_ms,
                mode: mode.to_string(),
                edges_evaluated: stats.edges_evaluated,
            },
            propagation: PropagationStage {
                elapsed_ms: stats.propagation_ms,
                finalized: stats.finalized,
                frontier_pushes: stats.frontier_pushes,
                stale_pops: stats.stale_pops,
                peak_frontier: stats.peak_frontier,
            },
        }
    }
}
