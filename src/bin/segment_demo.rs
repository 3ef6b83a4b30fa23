use fuzzy_connectedness::config::segment::{load_config, SegmentToolConfig};
use fuzzy_connectedness::engine::AffinityEvaluation;
use fuzzy_connectedness::image::io::{
    load_rgb_image, save_mask_image, save_scene_image, write_json_file,
};
use fuzzy_connectedness::{SegmentationReport, Segmenter, SegmenterParams};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| "Usage: segment_demo <config.json>".to_string())?;
    let config = load_config(&config_path)?;

    let input = load_rgb_image(&config.input)?;
    let evaluation = if config.engine.precompute_affinity {
        AffinityEvaluation::Precomputed
    } else {
        AffinityEvaluation::OnDemand
    };

    let mut segmenter = Segmenter::new(SegmenterParams {
        threshold: config.threshold,
        evaluation,
    });
    segmenter.set_input(input);
    segmenter.set_seed(config.seed[0], config.seed[1]);
    segmenter
        .configure_affinity(&config.affinity)
        .map_err(|e| format!("Invalid affinity config: {e}"))?;

    let report = segmenter
        .execute_with_diagnostics()
        .map_err(|e| format!("Segmentation failed: {e}"))?;

    print_text_summary(&report);
    save_artifacts(&segmenter, &config, &report)?;
    Ok(())
}

fn print_text_summary(report: &SegmentationReport) {
    let res = &report.result;
    println!("Segmentation summary");
    println!("  seed: ({}, {})", res.seed[0], res.seed[1]);
    println!("  threshold: {}", res.threshold);
    println!("  object pixels: {}", res.object_pixels);
    println!("  coverage: {:.3}", res.coverage);
    println!("  mean connectedness: {:.1}", res.mean_connectedness);
    println!("  latency_ms: {:.3}", res.latency_ms);
    for stage in &report.trace.timings.stages {
        println!("    {}: {:.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn save_artifacts(
    segmenter: &Segmenter,
    config: &SegmentToolConfig,
    report: &SegmentationReport,
) -> Result<(), String> {
    if let Some(path) = &config.output.scene_image {
        let scene = segmenter
            .connectedness()
            .map_err(|e| format!("No scene to save: {e}"))?;
        save_scene_image(scene, path)?;
        println!("Scene image written to {}", path.display());
    }
    if let Some(path) = &config.output.mask_image {
        let mask = segmenter
            .binary_mask()
            .map_err(|e| format!("No mask to save: {e}"))?;
        save_mask_image(&mask, path)?;
        println!("Mask image written to {}", path.display());
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}
