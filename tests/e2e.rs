mod common;

use common::synthetic_image::{uniform_rgb, uniform_with_outlier};
use fuzzy_connectedness::affinity::AffinityCombination;
use fuzzy_connectedness::engine::AffinityEvaluation;
use fuzzy_connectedness::{
    AffinityParams, SegmentationError, Segmenter, SegmenterParams, MAX_SCORE,
};

const DIAG_25: [[f64; 3]; 3] = [[25.0, 0.0, 0.0], [0.0, 25.0, 0.0], [0.0, 0.0, 25.0]];
const DIAG_1000: [[f64; 3]; 3] = [[1000.0, 0.0, 0.0], [0.0, 1000.0, 0.0], [0.0, 0.0, 1000.0]];

/// Homogeneity centered on `value`, transition profile far away from the
/// zero difference of a uniform image.
fn tight_params(value: [f64; 3]) -> AffinityParams {
    AffinityParams::GaussianRgb {
        mean: value,
        covariance: DIAG_25,
        diff_mean: [60.0, 60.0, 60.0],
        diff_covariance: DIAG_25,
        combination: AffinityCombination::ScaledByDifference,
    }
}

fn segmenter_for(input: fuzzy_connectedness::image::VectorImage, threshold: u16) -> Segmenter {
    let mut segmenter = Segmenter::new(SegmenterParams {
        threshold,
        ..Default::default()
    });
    segmenter.set_input(input);
    segmenter
}

#[test]
fn uniform_grid_is_fully_connected_at_max_score() {
    let mut segmenter = segmenter_for(uniform_rgb(4, 4, [100.0; 3]), 1);
    segmenter.set_seed(0, 0);
    segmenter
        .configure_affinity(&tight_params([100.0, 100.0, 100.0]))
        .unwrap();
    segmenter.execute().unwrap();

    let scene = segmenter.connectedness().unwrap();
    assert!(scene.data.iter().all(|&v| v == MAX_SCORE));

    // The mask is all-true for any threshold up to MAX_SCORE.
    for threshold in [1u16, 30_000, MAX_SCORE] {
        segmenter.set_threshold(threshold);
        let mask = segmenter.binary_mask().unwrap();
        assert_eq!(mask.object_pixels(), 16, "threshold {threshold}");
    }
}

#[test]
fn uniform_grid_with_pure_homogeneity_weighting_and_zero_centered_difference() {
    // With the weighted-mean policy at weight 1, a zero-centered difference
    // profile must not penalize the zero differences of a uniform image.
    let params = AffinityParams::GaussianRgb {
        mean: [100.0, 100.0, 100.0],
        covariance: DIAG_25,
        diff_mean: [0.0, 0.0, 0.0],
        diff_covariance: DIAG_25,
        combination: AffinityCombination::WeightedMean {
            homogeneity_weight: 1.0,
        },
    };
    let mut segmenter = segmenter_for(uniform_rgb(4, 4, [100.0; 3]), MAX_SCORE);
    segmenter.set_seed(0, 0);
    segmenter.configure_affinity(&params).unwrap();
    segmenter.execute().unwrap();
    let scene = segmenter.connectedness().unwrap();
    assert!(scene.data.iter().all(|&v| v == MAX_SCORE));
}

#[test]
fn outlier_cell_scores_lower_and_threshold_partitions_the_mask() {
    let input = uniform_with_outlier(4, 4, [100.0; 3], (2, 2), [180.0; 3]);
    let params = AffinityParams::GaussianRgb {
        mean: [100.0, 100.0, 100.0],
        covariance: DIAG_1000,
        diff_mean: [60.0, 60.0, 60.0],
        diff_covariance: DIAG_1000,
        combination: AffinityCombination::ScaledByDifference,
    };
    let mut segmenter = segmenter_for(input, 30_000);
    segmenter.set_seed(0, 0);
    segmenter.configure_affinity(&params).unwrap();
    segmenter.execute().unwrap();

    let scene = segmenter.connectedness().unwrap();
    let outlier = scene.get(2, 2);
    for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        assert!(
            outlier < scene.get(x, y),
            "outlier {} not below neighbor ({x},{y})={}",
            outlier,
            scene.get(x, y)
        );
    }

    // A threshold between the two levels separates exactly the outlier.
    let neighbor_level = scene.get(1, 2);
    let threshold = outlier / 2 + neighbor_level / 2;
    segmenter.set_threshold(threshold);
    let mask = segmenter.binary_mask().unwrap();
    assert!(!mask.get(2, 2));
    assert_eq!(mask.object_pixels(), 15);
}

#[test]
fn repeated_execution_is_deterministic() {
    let input = uniform_with_outlier(6, 5, [100.0; 3], (4, 2), [160.0; 3]);
    let params = AffinityParams::GaussianRgb {
        mean: [100.0, 100.0, 100.0],
        covariance: DIAG_1000,
        diff_mean: [60.0, 60.0, 60.0],
        diff_covariance: DIAG_1000,
        combination: AffinityCombination::ScaledByDifference,
    };

    let mut segmenter = segmenter_for(input.clone(), 20_000);
    segmenter.set_seed(1, 1);
    segmenter.configure_affinity(&params).unwrap();
    segmenter.execute().unwrap();
    let first_scene = segmenter.connectedness().unwrap().clone();
    let first_mask = segmenter.binary_mask().unwrap();

    segmenter.execute().unwrap();
    assert_eq!(*segmenter.connectedness().unwrap(), first_scene);
    assert_eq!(segmenter.binary_mask().unwrap(), first_mask);

    // On-demand evaluation matches the default precomputed map.
    let mut on_demand = Segmenter::new(SegmenterParams {
        threshold: 20_000,
        evaluation: AffinityEvaluation::OnDemand,
    });
    on_demand.set_input(input);
    on_demand.set_seed(1, 1);
    on_demand.configure_affinity(&params).unwrap();
    on_demand.execute().unwrap();
    assert_eq!(*on_demand.connectedness().unwrap(), first_scene);
}

#[test]
fn rethresholding_never_touches_the_scene() {
    let mut segmenter = segmenter_for(
        uniform_with_outlier(4, 4, [100.0; 3], (3, 3), [180.0; 3]),
        10_000,
    );
    segmenter.set_seed(0, 0);
    segmenter
        .configure_affinity(&tight_params([100.0, 100.0, 100.0]))
        .unwrap();
    segmenter.execute().unwrap();
    let scene_before = segmenter.connectedness().unwrap().clone();

    segmenter.set_threshold(40_000);
    let mask = segmenter.binary_mask().unwrap();
    assert_eq!(*segmenter.connectedness().unwrap(), scene_before);

    // Mask equals the pointwise comparison against the stored scene.
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(mask.get(x, y), scene_before.get(x, y) >= 40_000);
        }
    }

    // Setting the same threshold again yields the same mask.
    segmenter.set_threshold(40_000);
    assert_eq!(segmenter.binary_mask().unwrap(), mask);
}

#[test]
fn singular_covariance_is_rejected_and_previous_model_survives() {
    let mut segmenter = segmenter_for(uniform_rgb(4, 4, [100.0; 3]), 1);
    segmenter.set_seed(0, 0);
    segmenter
        .configure_affinity(&tight_params([100.0, 100.0, 100.0]))
        .unwrap();

    let singular = AffinityParams::GaussianRgb {
        mean: [100.0, 100.0, 100.0],
        covariance: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
        diff_mean: [60.0, 60.0, 60.0],
        diff_covariance: DIAG_25,
        combination: AffinityCombination::ScaledByDifference,
    };
    assert!(matches!(
        segmenter.configure_affinity(&singular),
        Err(SegmentationError::InvalidModel(_))
    ));

    // The model configured first still produces the uniform result.
    segmenter.execute().unwrap();
    let scene = segmenter.connectedness().unwrap();
    assert!(scene.data.iter().all(|&v| v == MAX_SCORE));
}

#[test]
fn out_of_bounds_seed_fails_before_any_result_exists() {
    let mut segmenter = segmenter_for(uniform_rgb(4, 4, [100.0; 3]), 1);
    segmenter.set_seed(4, 0);
    segmenter
        .configure_affinity(&tight_params([100.0, 100.0, 100.0]))
        .unwrap();
    assert_eq!(
        segmenter.execute().unwrap_err(),
        SegmentationError::SeedOutOfBounds {
            x: 4,
            y: 0,
            width: 4,
            height: 4
        }
    );
    assert_eq!(
        segmenter.connectedness().unwrap_err(),
        SegmentationError::NoResultAvailable
    );
    assert_eq!(
        segmenter.binary_mask().unwrap_err(),
        SegmentationError::NoResultAvailable
    );
}
