//! Segmentation controller orchestrating affinity modeling, propagation and
//! thresholding.
//!
//! Modules
//! - [`params`] – configuration types used by the segmenter and the demo CLI.
//! - `pipeline` – the [`Segmenter`] implementation and its error taxonomy.

pub mod params;
mod pipeline;

pub use params::{AffinityParams, SegmenterParams};
pub use pipeline::{SegmentationError, Segmenter};
