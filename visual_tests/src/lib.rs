mod capture;
mod compare;
mod expected;

pub use capture::{capture_scene, render_scene, CaptureConfig, Scene};
pub use compare::{compare_frames, compare_images, generate_diff_image, CompareResult};
pub use expected::{expected_scale, render_expected};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to render scene: {0}")]
    Capture(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Reference image not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    pub scene: Scene,
    pub width: u32,
    pub height: u32,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
    /// Changed pixels tolerated on top of the similarity check
    pub max_differing_pixels: usize,
}

impl VisualTestConfig {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            width: 600,
            height: 300,
            similarity_threshold: 0.99,
            max_differing_pixels: 16,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity and changed pixels within limits)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Pixels that changed beyond the per-channel tolerance
    pub differing_pixels: usize,
    /// Path to the rendered frame
    pub captured_path: PathBuf,
    /// Path to the reference image
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

/// Get the path to the references directory
pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

/// Get the path to a reference image for a scene
pub fn reference_path(scene_name: &str) -> PathBuf {
    references_dir().join(format!("{}.png", scene_name))
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

/// Get the path to a rendered frame
pub fn captured_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_captured.png", scene_name))
}

/// Get the path to a diff image
pub fn diff_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", scene_name))
}

/// Run a visual regression test
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    // Ensure output directory exists
    std::fs::create_dir_all(output_dir())?;

    let name = config.scene.name;
    let ref_path = reference_path(name);
    let cap_path = captured_path(name);

    // Check if reference exists
    if !ref_path.exists() {
        return Err(VisualTestError::ReferenceNotFound(ref_path));
    }

    capture_scene(&CaptureConfig {
        scene: config.scene,
        output_path: cap_path.clone(),
        width: config.width,
        height: config.height,
    })?;

    // Compare images
    let compare_result = compare_images(&ref_path, &cap_path)?;
    let passed = compare_result.similarity >= config.similarity_threshold
        && compare_result.differing_pixels <= config.max_differing_pixels;

    // Generate diff if failed
    let diff = if !passed {
        let diff_file = diff_path(name);
        generate_diff_image(&ref_path, &cap_path, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        differing_pixels: compare_result.differing_pixels,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Record the reference image for a scene.
///
/// References are drawn by [`render_expected`], not by the renderer under
/// test, so a broken renderer cannot record its own output as correct.
pub fn update_reference(config: &VisualTestConfig) -> Result<PathBuf> {
    // Ensure references directory exists
    std::fs::create_dir_all(references_dir())?;

    let ref_path = reference_path(config.scene.name);
    render_expected(config.scene, config.width, config.height)?.save(&ref_path)?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
