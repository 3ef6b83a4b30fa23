//! Scalar-intensity affinity variant.
//!
//! Collapses each sample to its channel mean and scores pairs with
//! single-channel Gaussian profiles. Useful for grayscale inputs or when a
//! full covariance model is not available.

use super::profile::{ProfileError, ScalarProfile};
use super::{quantize, PairwiseAffinity};
use crate::image::Sample;

/// Pairwise affinity over channel-mean intensities.
#[derive(Clone, Copy, Debug)]
pub struct ScalarAffinity {
    homogeneity: ScalarProfile,
    difference: ScalarProfile,
}

impl ScalarAffinity {
    pub fn new(homogeneity: ScalarProfile, difference: ScalarProfile) -> Self {
        Self {
            homogeneity,
            difference,
        }
    }

    /// Replace the same-material profile, keeping the previous one on error.
    pub fn set_homogeneity(&mut self, mean: f64, variance: f64) -> Result<(), ProfileError> {
        self.homogeneity = ScalarProfile::from_moments(mean, variance)?;
        Ok(())
    }

    /// Replace the transition profile, keeping the previous one on error.
    pub fn set_difference(&mut self, mean: f64, variance: f64) -> Result<(), ProfileError> {
        self.difference = ScalarProfile::from_moments(mean, variance)?;
        Ok(())
    }

    pub fn homogeneity(&self) -> &ScalarProfile {
        &self.homogeneity
    }

    pub fn difference(&self) -> &ScalarProfile {
        &self.difference
    }
}

#[inline]
fn intensity(s: Sample) -> f64 {
    (f64::from(s[0]) + f64::from(s[1]) + f64::from(s[2])) / 3.0
}

impl PairwiseAffinity for ScalarAffinity {
    fn affinity(&self, a: Sample, b: Sample) -> u16 {
        let ia = intensity(a);
        let ib = intensity(b);
        let h = self.homogeneity.likelihood(0.5 * (ia + ib));
        let d = self.difference.likelihood(ia - ib);
        quantize(h * (1.0 - d))
    }
}
