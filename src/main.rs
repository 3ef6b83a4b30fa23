use fuzzy_connectedness::image::VectorImage;
use fuzzy_connectedness::{AffinityParams, Segmenter, SegmenterParams};

fn main() {
    // Demo stub: uniform background with a brighter square, seeded inside it
    let (w, h) = (64usize, 64usize);
    let mut image = VectorImage::filled(w, h, [40.0, 40.0, 40.0]);
    for y in 16..48 {
        for x in 16..48 {
            image.set(x, y, [180.0, 120.0, 90.0]);
        }
    }

    let mut segmenter = Segmenter::new(SegmenterParams {
        threshold: 30_000,
        ..Default::default()
    });
    segmenter.set_input(image);
    segmenter.set_seed(32, 32);

    let affinity = AffinityParams::GaussianRgb {
        mean: [180.0, 120.0, 90.0],
        covariance: [[100.0, 0.0, 0.0], [0.0, 100.0, 0.0], [0.0, 0.0, 100.0]],
        diff_mean: [140.0, 80.0, 50.0],
        diff_covariance: [[100.0, 0.0, 0.0], [0.0, 100.0, 0.0], [0.0, 0.0, 100.0]],
        combination: Default::default(),
    };
    if let Err(err) = segmenter.configure_affinity(&affinity) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    match segmenter.execute_with_diagnostics() {
        Ok(report) => println!(
            "object_pixels={} coverage={:.3} latency_ms={:.3}",
            report.result.object_pixels, report.result.coverage, report.result.latency_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
