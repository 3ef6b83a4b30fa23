use crate::segmenter::AffinityParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON configuration consumed by the `segment_demo` binary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentToolConfig {
    pub input: PathBuf,
    /// Seed coordinate as `[x, y]`.
    pub seed: [usize; 2],
    pub threshold: u16,
    pub affinity: AffinityParams,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: SegmentOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Precompute all edge affinities in parallel before propagation.
    pub precompute_affinity: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precompute_affinity: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentOutputConfig {
    /// Grayscale PNG of the connectedness scene.
    pub scene_image: Option<PathBuf>,
    /// Black/white PNG of the thresholded mask.
    pub mask_image: Option<PathBuf>,
    /// Pretty JSON segmentation report.
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<SegmentToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
