use serde::Serialize;

/// Maximum connectedness/affinity score; the seed's own connectedness.
pub const MAX_SCORE: u16 = u16::MAX;

/// Compact summary of one segmentation run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationResult {
    /// Seed coordinate the scene was propagated from.
    pub seed: [usize; 2],
    /// Threshold the mask statistics below were computed with.
    pub threshold: u16,
    /// Number of pixels at or above the threshold.
    pub object_pixels: usize,
    /// Object fraction of the whole grid, in [0, 1].
    pub coverage: f32,
    /// Mean connectedness score over the scene.
    pub mean_connectedness: f64,
    /// Wall-clock time of the run in milliseconds.
    pub latency_ms: f64,
}
