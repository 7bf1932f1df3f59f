use crate::{Result, VisualTestError};
use image::RgbaImage;
use std::path::PathBuf;
use std::time::Duration;
use trivert::animation::FrameScheduler;
use trivert::renderer::{PixmapSurface, Renderer};

/// A named point in the animation to render
#[derive(Clone, Copy, Debug)]
pub struct Scene {
    /// Name used for reference and output files
    pub name: &'static str,
    /// Render passes after a tap on the first node (0 = never tapped)
    pub ticks: usize,
}

/// Configuration for capturing a scene
pub struct CaptureConfig {
    pub scene: Scene,
    /// Path where the rendered frame will be saved
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Scheduler that only remembers whether a frame was requested
#[derive(Default)]
struct FrameQueue {
    pending: bool,
}

impl FrameScheduler for FrameQueue {
    fn request_redraw(&mut self, _delay: Duration) -> trivert::Result<()> {
        self.pending = true;
        Ok(())
    }

    fn cancel(&mut self) {
        self.pending = false;
    }
}

/// Drive the renderer through a scene offscreen
fn render(scene: Scene, width: u32, height: u32) -> Result<PixmapSurface> {
    let mut surface =
        PixmapSurface::new(width, height).map_err(|e| VisualTestError::Capture(e.to_string()))?;
    let mut renderer = Renderer::new();
    let mut frames = FrameQueue::default();

    if scene.ticks > 0 {
        renderer.handle_tap(&mut frames);
    }
    renderer.render(&mut surface, &mut frames);
    for _ in 1..scene.ticks {
        if !frames.pending {
            break;
        }
        frames.pending = false;
        renderer.render(&mut surface, &mut frames);
    }
    Ok(surface)
}

/// Last frame the renderer draws for a scene
pub fn render_scene(scene: Scene, width: u32, height: u32) -> Result<RgbaImage> {
    Ok(render(scene, width, height)?.to_image())
}

/// Render a scene offscreen and save it as PNG
pub fn capture_scene(config: &CaptureConfig) -> Result<()> {
    let surface = render(config.scene, config.width, config.height)?;
    surface.save_png(&config.output_path).map_err(|e| {
        VisualTestError::Capture(format!(
            "Failed to save {}: {}",
            config.output_path.display(),
            e
        ))
    })?;

    if !config.output_path.exists() {
        return Err(VisualTestError::Capture(format!(
            "Frame was not written to {}",
            config.output_path.display()
        )));
    }

    Ok(())
}
