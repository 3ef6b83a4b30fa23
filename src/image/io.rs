//! I/O helpers for the demo binaries.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into a [`VectorImage`] with
//!   channel values in [0, 255].
//! - `save_scene_image`: write a connectedness scene as a grayscale PNG
//!   (scores scaled to 8 bits).
//! - `save_mask_image`: write a binary mask as a black/white PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.

use super::{ImageView, MaskImage, SceneImage, VectorImage};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to an RGB sample grid.
pub fn load_rgb_image(path: &Path) -> Result<VectorImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let w = img.width() as usize;
    let h = img.height() as usize;
    let data = img
        .pixels()
        .map(|p| [f32::from(p[0]), f32::from(p[1]), f32::from(p[2])])
        .collect();
    VectorImage::from_samples(w, h, data)
}

/// Save a connectedness scene as a grayscale PNG, scaling `0..=65535` to 8 bits.
pub fn save_scene_image(scene: &SceneImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(scene.w as u32, scene.h as u32);
    for y in 0..scene.h {
        for (x, &score) in scene.row(y).iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([(score >> 8) as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a binary mask as a PNG with object pixels in white.
pub fn save_mask_image(mask: &MaskImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for y in 0..mask.h {
        for (x, &inside) in mask.row(y).iter().enumerate() {
            let v = if inside { 255u8 } else { 0u8 };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
