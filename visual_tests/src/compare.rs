use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;
use std::path::Path;

/// Channel difference above which a pixel counts as changed
const PIXEL_TOLERANCE: u8 = 10;

/// Result of comparing two frames
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
    /// Pixels whose largest channel difference exceeds the tolerance
    pub differing_pixels: usize,
}

/// Compare two PNG files
pub fn compare_images(reference: &Path, captured: &Path) -> Result<CompareResult> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    compare_frames(&reference, &captured)
}

/// Compare two frames with MSSIM over RGB plus a per-pixel count
pub fn compare_frames(reference: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Frame sizes differ: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }

    let reference_rgb = image::DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let captured_rgb = image::DynamicImage::ImageRgba8(captured.clone()).to_rgb8();
    let score = image_compare::rgb_similarity_structure(
        &Algorithm::MSSIMSimple,
        &reference_rgb,
        &captured_rgb,
    )
    .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?
    .score;

    let differing_pixels = reference
        .pixels()
        .zip(captured.pixels())
        .filter(|(a, b)| pixel_difference(a, b) > PIXEL_TOLERANCE)
        .count();

    Ok(CompareResult {
        similarity: score,
        differing_pixels,
    })
}

/// Write an image with changed pixels in red over a dimmed copy of the capture
pub fn generate_diff_image(reference: &Path, captured: &Path, output: &Path) -> Result<()> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();

    let diff = RgbaImage::from_fn(captured.width(), captured.height(), |x, y| {
        let cap = captured.get_pixel(x, y);
        let delta = reference
            .get_pixel_checked(x, y)
            .map_or(u8::MAX, |r| pixel_difference(r, cap));
        if delta > PIXEL_TOLERANCE {
            Rgba([(delta as f32 / 255.0 * 200.0 + 55.0) as u8, 0, 0, 255])
        } else {
            Rgba([cap[0] / 3, cap[1] / 3, cap[2] / 3, 255])
        }
    });

    diff.save(output)?;
    Ok(())
}

fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .take(3)
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}
