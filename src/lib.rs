#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod image;
pub mod segmenter;
pub mod types;

// Lower-level modules – still public, but considered unstable internals.
pub mod affinity;
pub mod config;
pub mod engine;

// --- High-level re-exports -------------------------------------------------

// Main entry points: segmenter + results.
pub use crate::segmenter::{AffinityParams, SegmentationError, Segmenter, SegmenterParams};
pub use crate::types::{SegmentationResult, MAX_SCORE};

// High-level diagnostics returned by the segmenter.
pub use crate::diagnostics::{PipelineTrace, SegmentationReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use fuzzy_connectedness::prelude::*;
///
/// # fn main() {
/// let image = VectorImage::filled(64, 64, [120.0, 80.0, 60.0]);
/// let mut segmenter = Segmenter::new(SegmenterParams::default());
/// segmenter.set_input(image);
/// segmenter.set_seed(32, 32);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{MaskImage, SceneImage, VectorImage};
    pub use crate::{AffinityParams, Segmenter, SegmenterParams, MAX_SCORE};
}
