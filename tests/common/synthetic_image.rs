use fuzzy_connectedness::image::{Sample, VectorImage};

/// Generates a uniform image with every pixel set to `value`.
pub fn uniform_rgb(width: usize, height: usize, value: Sample) -> VectorImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    VectorImage::filled(width, height, value)
}

/// Uniform image with a single outlier pixel.
pub fn uniform_with_outlier(
    width: usize,
    height: usize,
    value: Sample,
    outlier_at: (usize, usize),
    outlier: Sample,
) -> VectorImage {
    let mut img = uniform_rgb(width, height, value);
    img.set(outlier_at.0, outlier_at.1, outlier);
    img
}

/// Deterministic structured image: a smooth ramp with a periodic bump, so
/// that different paths between two pixels genuinely differ in strength.
pub fn textured_rgb(width: usize, height: usize) -> VectorImage {
    let mut img = VectorImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let ramp = (7 * x + 13 * y) % 23;
            let bump = ((x * y) % 5) * 6;
            let base = 90.0 + ramp as f32 + bump as f32;
            img.set(x, y, [base, base * 0.8, base * 1.1]);
        }
    }
    img
}
