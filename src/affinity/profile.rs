//! Statistical material profiles backing the affinity models.
//!
//! A profile stores first and second moments of a pixel-pair statistic
//! (pair mean for homogeneity, pair difference for transitions) together
//! with the derived matrix inverse and determinant. The derived values are
//! recomputed on every construction, never lazily, so they are always
//! consistent with the stored moments.

use nalgebra::{Matrix3, Vector3};

/// Determinants (or variances) below this are treated as singular.
pub const SINGULARITY_EPS: f64 = 1e-12;

/// Reasons a profile's moments may be rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProfileError {
    SingularCovariance { determinant: f64 },
    DegenerateVariance { variance: f64 },
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::SingularCovariance { determinant } => {
                write!(f, "singular covariance matrix (det {determinant:.3e})")
            }
            ProfileError::DegenerateVariance { variance } => {
                write!(f, "degenerate variance ({variance:.3e})")
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// Three-channel Gaussian profile: mean vector, covariance matrix, and the
/// cached inverse/determinant used by every likelihood evaluation.
#[derive(Clone, Debug)]
pub struct MaterialProfile {
    mean: Vector3<f64>,
    covariance: Matrix3<f64>,
    inverse: Matrix3<f64>,
    determinant: f64,
}

impl MaterialProfile {
    /// Build a profile from its moments, rejecting (near-)singular
    /// covariance matrices up front rather than at evaluation time.
    pub fn from_moments(
        mean: Vector3<f64>,
        covariance: Matrix3<f64>,
    ) -> Result<Self, ProfileError> {
        let determinant = covariance.determinant();
        if determinant.abs() < SINGULARITY_EPS {
            return Err(ProfileError::SingularCovariance { determinant });
        }
        let inverse = covariance
            .try_inverse()
            .ok_or(ProfileError::SingularCovariance { determinant })?;
        Ok(Self {
            mean,
            covariance,
            inverse,
            determinant,
        })
    }

    pub fn mean(&self) -> &Vector3<f64> {
        &self.mean
    }

    pub fn covariance(&self) -> &Matrix3<f64> {
        &self.covariance
    }

    pub fn determinant(&self) -> f64 {
        self.determinant
    }

    /// Gaussian likelihood of `x` normalized by the density peak at the
    /// profile mean: `exp(-0.5 · (x-mean)ᵀ·Σ⁻¹·(x-mean))`. A perfect match
    /// yields exactly 1.0; the normalization constant cancels.
    pub fn likelihood(&self, x: &Vector3<f64>) -> f64 {
        let centered = x - self.mean;
        let q = centered.dot(&(self.inverse * centered));
        (-0.5 * q).exp()
    }
}

/// Single-channel profile for the scalar-intensity affinity variant.
#[derive(Clone, Copy, Debug)]
pub struct ScalarProfile {
    mean: f64,
    variance: f64,
}

impl ScalarProfile {
    pub fn from_moments(mean: f64, variance: f64) -> Result<Self, ProfileError> {
        if variance < SINGULARITY_EPS {
            return Err(ProfileError::DegenerateVariance { variance });
        }
        Ok(Self { mean, variance })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Peak-normalized Gaussian likelihood of `x`.
    pub fn likelihood(&self, x: f64) -> f64 {
        let centered = x - self.mean;
        (-0.5 * centered * centered / self.variance).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_singular_covariance() {
        let singular = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            MaterialProfile::from_moments(Vector3::zeros(), singular),
            Err(ProfileError::SingularCovariance { .. })
        ));
    }

    #[test]
    fn likelihood_peaks_at_mean() {
        let mean = Vector3::new(10.0, 20.0, 30.0);
        let cov = Matrix3::from_diagonal(&Vector3::new(4.0, 4.0, 4.0));
        let profile = MaterialProfile::from_moments(mean, cov).unwrap();
        assert!((profile.likelihood(&mean) - 1.0).abs() < 1e-12);
        let off = Vector3::new(12.0, 20.0, 30.0);
        let l = profile.likelihood(&off);
        assert!(l < 1.0 && l > 0.0);
        // one channel, two units off, variance 4 -> exp(-0.5)
        assert!((l - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn scalar_profile_rejects_zero_variance() {
        assert!(matches!(
            ScalarProfile::from_moments(1.0, 0.0),
            Err(ProfileError::DegenerateVariance { .. })
        ));
        let p = ScalarProfile::from_moments(5.0, 2.0).unwrap();
        assert!((p.likelihood(5.0) - 1.0).abs() < 1e-12);
    }
}
