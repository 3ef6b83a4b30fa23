//! Three-channel Gaussian affinity model.
//!
//! Combines two likelihoods per pixel pair:
//! - a homogeneity term: the pair mean value scored under the same-material
//!   profile;
//! - a difference term: the pair difference vector scored under the
//!   material-transition profile.
//!
//! How the two terms are merged into one affinity is a configurable policy
//! ([`AffinityCombination`]); the quantized result lands in `[0, MAX_SCORE]`.

use super::profile::{MaterialProfile, ProfileError};
use super::{quantize, PairwiseAffinity};
use crate::image::Sample;
use nalgebra::{Matrix3, Vector3};
use serde::Deserialize;

/// Policy merging the homogeneity likelihood `h` and the difference
/// likelihood `d` into one affinity in [0, 1].
///
/// `d` is high when the pair difference looks like a typical material
/// transition, so both policies enter it as `1 - d`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum AffinityCombination {
    /// `h · (1 - d)`: same material AND not a transition.
    ScaledByDifference,
    /// `w·h + (1-w)·(1-d)`; `w = 1` reduces to the pure homogeneity model.
    #[serde(rename_all = "camelCase")]
    WeightedMean { homogeneity_weight: f64 },
}

impl Default for AffinityCombination {
    fn default() -> Self {
        AffinityCombination::ScaledByDifference
    }
}

impl AffinityCombination {
    #[inline]
    fn combine(&self, homogeneity: f64, difference: f64) -> f64 {
        match *self {
            AffinityCombination::ScaledByDifference => homogeneity * (1.0 - difference),
            AffinityCombination::WeightedMean { homogeneity_weight } => {
                let w = homogeneity_weight.clamp(0.0, 1.0);
                w * homogeneity + (1.0 - w) * (1.0 - difference)
            }
        }
    }
}

/// Gaussian affinity over three-channel samples.
#[derive(Clone, Debug)]
pub struct GaussianAffinity {
    homogeneity: MaterialProfile,
    difference: MaterialProfile,
    combination: AffinityCombination,
}

impl GaussianAffinity {
    pub fn new(homogeneity: MaterialProfile, difference: MaterialProfile) -> Self {
        Self {
            homogeneity,
            difference,
            combination: AffinityCombination::default(),
        }
    }

    pub fn with_combination(mut self, combination: AffinityCombination) -> Self {
        self.combination = combination;
        self
    }

    /// Replace the same-material profile. The previously stored profile is
    /// kept untouched when the new moments are rejected.
    pub fn set_homogeneity(
        &mut self,
        mean: Vector3<f64>,
        covariance: Matrix3<f64>,
    ) -> Result<(), ProfileError> {
        self.homogeneity = MaterialProfile::from_moments(mean, covariance)?;
        Ok(())
    }

    /// Replace the material-transition profile; same contract as
    /// [`set_homogeneity`](Self::set_homogeneity).
    pub fn set_difference(
        &mut self,
        mean: Vector3<f64>,
        covariance: Matrix3<f64>,
    ) -> Result<(), ProfileError> {
        self.difference = MaterialProfile::from_moments(mean, covariance)?;
        Ok(())
    }

    pub fn homogeneity(&self) -> &MaterialProfile {
        &self.homogeneity
    }

    pub fn difference(&self) -> &MaterialProfile {
        &self.difference
    }

    pub fn combination(&self) -> AffinityCombination {
        self.combination
    }
}

impl PairwiseAffinity for GaussianAffinity {
    fn affinity(&self, a: Sample, b: Sample) -> u16 {
        let av = Vector3::new(f64::from(a[0]), f64::from(a[1]), f64::from(a[2]));
        let bv = Vector3::new(f64::from(b[0]), f64::from(b[1]), f64::from(b[2]));
        let h = self.homogeneity.likelihood(&(0.5 * (av + bv)));
        let d = self.difference.likelihood(&(av - bv));
        quantize(self.combination.combine(h, d))
    }
}
