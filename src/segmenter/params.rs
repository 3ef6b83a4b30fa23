//! Parameter types configuring the segmenter.
//!
//! `SegmenterParams` carries the run-independent knobs; `AffinityParams` is
//! the declarative model description consumed by
//! [`Segmenter::configure_affinity`](super::Segmenter::configure_affinity)
//! (and by the demo's JSON config).

use crate::affinity::{
    AffinityCombination, GaussianAffinity, MaterialProfile, PairwiseAffinity, ProfileError,
    ScalarAffinity, ScalarProfile,
};
use crate::engine::AffinityEvaluation;
use crate::types::MAX_SCORE;
use nalgebra::{Matrix3, Vector3};
use serde::Deserialize;

/// Segmenter-wide parameters.
#[derive(Clone, Debug)]
pub struct SegmenterParams {
    /// Initial score threshold used when deriving the binary mask.
    pub threshold: u16,
    /// Edge affinity evaluation policy for the propagation engine.
    pub evaluation: AffinityEvaluation,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            threshold: MAX_SCORE / 2,
            evaluation: AffinityEvaluation::default(),
        }
    }
}

/// Declarative description of an affinity model.
///
/// The variant is picked at configuration time; both build into a
/// [`PairwiseAffinity`] implementation for the engine.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "model", rename_all = "camelCase")]
pub enum AffinityParams {
    /// Full three-channel Gaussian model with covariance matrices.
    #[serde(rename_all = "camelCase")]
    GaussianRgb {
        mean: [f64; 3],
        covariance: [[f64; 3]; 3],
        diff_mean: [f64; 3],
        diff_covariance: [[f64; 3]; 3],
        #[serde(default)]
        combination: AffinityCombination,
    },
    /// Channel-mean intensity model with scalar variances.
    #[serde(rename_all = "camelCase")]
    ScalarIntensity {
        mean: f64,
        variance: f64,
        diff_mean: f64,
        diff_variance: f64,
    },
}

impl AffinityParams {
    /// Validate the moments and build the model. Singular covariances and
    /// degenerate variances are rejected here, never at evaluation time.
    pub fn build(&self) -> Result<Box<dyn PairwiseAffinity>, ProfileError> {
        match self {
            AffinityParams::GaussianRgb {
                mean,
                covariance,
                diff_mean,
                diff_covariance,
                combination,
            } => {
                let homogeneity =
                    MaterialProfile::from_moments(vector3(mean), matrix3(covariance))?;
                let difference =
                    MaterialProfile::from_moments(vector3(diff_mean), matrix3(diff_covariance))?;
                Ok(Box::new(
                    GaussianAffinity::new(homogeneity, difference).with_combination(*combination),
                ))
            }
            AffinityParams::ScalarIntensity {
                mean,
                variance,
                diff_mean,
                diff_variance,
            } => {
                let homogeneity = ScalarProfile::from_moments(*mean, *variance)?;
                let difference = ScalarProfile::from_moments(*diff_mean, *diff_variance)?;
                Ok(Box::new(ScalarAffinity::new(homogeneity, difference)))
            }
        }
    }
}

fn vector3(v: &[f64; 3]) -> Vector3<f64> {
    Vector3::new(v[0], v[1], v[2])
}

fn matrix3(m: &[[f64; 3]; 3]) -> Matrix3<f64> {
    Matrix3::new(
        m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_params_reject_singular_covariance() {
        let params = AffinityParams::GaussianRgb {
            mean: [0.0; 3],
            covariance: [[0.0; 3]; 3],
            diff_mean: [0.0; 3],
            diff_covariance: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            combination: AffinityCombination::default(),
        };
        assert!(matches!(
            params.build(),
            Err(ProfileError::SingularCovariance { .. })
        ));
    }

    #[test]
    fn affinity_params_deserialize_from_config_json() {
        let json = r#"{
            "model": "gaussianRgb",
            "mean": [120.0, 80.0, 60.0],
            "covariance": [[25.0, 0.0, 0.0], [0.0, 25.0, 0.0], [0.0, 0.0, 25.0]],
            "diffMean": [60.0, 60.0, 60.0],
            "diffCovariance": [[25.0, 0.0, 0.0], [0.0, 25.0, 0.0], [0.0, 0.0, 25.0]],
            "combination": { "rule": "weightedMean", "homogeneityWeight": 0.7 }
        }"#;
        let params: AffinityParams = serde_json::from_str(json).unwrap();
        assert!(matches!(
            params,
            AffinityParams::GaussianRgb {
                combination: AffinityCombination::WeightedMean { .. },
                ..
            }
        ));
        assert!(params.build().is_ok());

        let scalar = r#"{
            "model": "scalarIntensity",
            "mean": 128.0, "variance": 16.0,
            "diffMean": 80.0, "diffVariance": 16.0
        }"#;
        let params: AffinityParams = serde_json::from_str(scalar).unwrap();
        assert!(params.build().is_ok());
    }
}
