//! Segmentation controller driving the pipeline end-to-end.
//!
//! The [`Segmenter`] owns the input grid, seed, threshold and affinity
//! model, triggers the propagation engine, and derives binary masks from the
//! stored connectedness scene. Thresholding is decoupled from execution:
//! after one run, threshold tuning is a pure scan over the scene.
//!
//! Typical usage:
//! ```no_run
//! use fuzzy_connectedness::image::VectorImage;
//! use fuzzy_connectedness::{AffinityParams, Segmenter, SegmenterParams};
//!
//! # fn example(image: VectorImage, affinity: AffinityParams) -> Result<(), Box<dyn std::error::Error>> {
//! let mut segmenter = Segmenter::new(SegmenterParams::default());
//! segmenter.set_input(image);
//! segmenter.set_seed(32, 32);
//! segmenter.configure_affinity(&affinity)?;
//! segmenter.execute()?;
//! let mask = segmenter.binary_mask()?;
//! println!("object pixels: {}", mask.object_pixels());
//! # Ok(())
//! # }
//! ```

use super::params::{AffinityParams, SegmenterParams};
use crate::affinity::{PairwiseAffinity, ProfileError};
use crate::diagnostics::{PipelineTrace, SegmentationReport};
use crate::engine::{ConnectednessEngine, PropagationError};
use crate::image::{MaskImage, SceneImage, VectorImage};
use crate::types::SegmentationResult;
use log::debug;
use std::time::Instant;

/// Precondition violations surfaced by the segmenter.
///
/// All are detected before any propagation work; a run either completes
/// fully or does not start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentationError {
    /// Model moments rejected at configuration time.
    InvalidModel(ProfileError),
    /// `execute` called before any affinity model was configured.
    ModelNotConfigured,
    /// Seed outside the input grid (`width`/`height` are 0 with no input).
    SeedOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Scene or mask requested before a successful run.
    NoResultAvailable,
}

impl std::fmt::Display for SegmentationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentationError::InvalidModel(err) => write!(f, "invalid affinity model: {err}"),
            SegmentationError::ModelNotConfigured => {
                write!(f, "affinity model not configured")
            }
            SegmentationError::SeedOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "seed ({x}, {y}) outside {width}x{height} input"),
            SegmentationError::NoResultAvailable => {
                write!(f, "no connectedness scene available; run execute() first")
            }
        }
    }
}

impl std::error::Error for SegmentationError {}

impl From<PropagationError> for SegmentationError {
    fn from(err: PropagationError) -> Self {
        match err {
            PropagationError::SeedOutOfBounds {
                x,
                y,
                width,
                height,
            } => SegmentationError::SeedOutOfBounds {
                x,
                y,
                width,
                height,
            },
        }
    }
}

/// Controller owning the configuration and the connectedness scene.
pub struct Segmenter {
    params: SegmenterParams,
    input: Option<VectorImage>,
    seed: (usize, usize),
    model: Option<Box<dyn PairwiseAffinity>>,
    engine: ConnectednessEngine,
    scene: Option<SceneImage>,
}

impl Segmenter {
    /// Create a segmenter with the supplied parameters.
    pub fn new(params: SegmenterParams) -> Self {
        let engine = ConnectednessEngine::new(params.evaluation);
        Self {
            params,
            input: None,
            seed: (0, 0),
            model: None,
            engine,
            scene: None,
        }
    }

    /// Install the input grid. Does not trigger computation; a scene from a
    /// previous run stays available until the next `execute`.
    pub fn set_input(&mut self, input: VectorImage) {
        self.input = Some(input);
    }

    /// Set the seed coordinate. Validated at `execute` time.
    pub fn set_seed(&mut self, x: usize, y: usize) {
        self.seed = (x, y);
    }

    /// Update the mask threshold. Never invalidates the stored scene.
    pub fn set_threshold(&mut self, threshold: u16) {
        self.params.threshold = threshold;
    }

    pub fn threshold(&self) -> u16 {
        self.params.threshold
    }

    /// Validate and install the affinity model described by `params`.
    /// On rejection the previously configured model is kept untouched.
    pub fn configure_affinity(&mut self, params: &AffinityParams) -> Result<(), SegmentationError> {
        let model = params.build().map_err(SegmentationError::InvalidModel)?;
        self.model = Some(model);
        Ok(())
    }

    /// Run the propagation and store the resulting scene.
    ///
    /// Re-running with unchanged configuration recomputes an identical
    /// scene.
    pub fn execute(&mut self) -> Result<(), SegmentationError> {
        self.execute_with_diagnostics().map(|_| ())
    }

    /// Run the propagation and return a detailed report alongside storing
    /// the scene.
    pub fn execute_with_diagnostics(&mut self) -> Result<SegmentationReport, SegmentationError> {
        let total_start = Instant::now();
        let (sx, sy) = self.seed;
        let input = match &self.input {
            Some(input) => input,
            None => {
                return Err(SegmentationError::SeedOutOfBounds {
                    x: sx,
                    y: sy,
                    width: 0,
                    height: 0,
                })
            }
        };
        if sx >= input.w || sy >= input.h {
            return Err(SegmentationError::SeedOutOfBounds {
                x: sx,
                y: sy,
                width: input.w,
                height: input.h,
            });
        }
        let model = self
            .model
            .as_deref()
            .ok_or(SegmentationError::ModelNotConfigured)?;

        debug!(
            "Segmenter::execute start w={} h={} seed=({},{})",
            input.w, input.h, sx, sy
        );
        let (width, height) = (input.w, input.h);
        let (scene, stats) = self.engine.run_with_stats(input, model, self.seed)?;
        let latency = total_start.elapsed().as_secs_f64() * 1000.0;

        let trace = PipelineTrace::from_stats(width, height, self.seed, &stats, latency);
        let mask = MaskImage::from_scene(&scene, self.params.threshold);
        let result = SegmentationResult {
            seed: [sx, sy],
            threshold: self.params.threshold,
            object_pixels: mask.object_pixels(),
            coverage: mask.coverage(),
            mean_connectedness: scene.mean_score(),
            latency_ms: latency,
        };
        debug!(
            "Segmenter::execute done finalized={} object_pixels={} latency_ms={:.3}",
            stats.finalized, result.object_pixels, latency
        );
        self.scene = Some(scene);

        Ok(SegmentationReport { result, trace })
    }

    /// Raw connectedness scores of the last successful run.
    pub fn connectedness(&self) -> Result<&SceneImage, SegmentationError> {
        self.scene
            .as_ref()
            .ok_or(SegmentationError::NoResultAvailable)
    }

    /// Binary mask derived fresh from the stored scene and the current
    /// threshold: `mask[p] = scene[p] >= threshold`.
    pub fn binary_mask(&self) -> Result<MaskImage, SegmentationError> {
        let scene = self.connectedness()?;
        Ok(MaskImage::from_scene(scene, self.params.threshold))
    }
}
