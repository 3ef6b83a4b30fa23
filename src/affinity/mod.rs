//! Pairwise fuzzy affinity between neighboring samples.
//!
//! An affinity model scores how likely two adjacent pixels are to belong to
//! the same object, as an integer in `[0, MAX_SCORE]`. The propagation
//! engine consumes models through the [`PairwiseAffinity`] capability trait;
//! concrete models are selected at configuration time rather than through
//! inheritance.

pub mod gaussian;
pub mod profile;
pub mod scalar;

pub use gaussian::{AffinityCombination, GaussianAffinity};
pub use profile::{MaterialProfile, ProfileError, ScalarProfile, SINGULARITY_EPS};
pub use scalar::ScalarAffinity;

use crate::image::Sample;
use crate::types::MAX_SCORE;

/// Capability interface scoring the similarity of two neighboring samples.
///
/// Implementations are deterministic, side-effect-free functions of the two
/// samples and their configuration.
pub trait PairwiseAffinity: Send + Sync {
    /// Affinity of the ordered pair `(a, b)` in `[0, MAX_SCORE]`.
    fn affinity(&self, a: Sample, b: Sample) -> u16;
}

/// Quantize a combined likelihood in [0, 1] to the integer score range.
#[inline]
pub(crate) fn quantize(value: f64) -> u16 {
    (value.clamp(0.0, 1.0) * f64::from(MAX_SCORE)).round() as u16
}
