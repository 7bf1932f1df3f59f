pub mod animation;
pub mod chain;
pub mod constants;
pub mod geometry;
pub mod surface;
pub mod transform;
pub mod traversal;

// These modules are public for hosts that bring their own surface or loop
pub mod platform;
pub mod renderer;

use std::path::PathBuf;

use platform::{Channel, Event, RunSummary};
use renderer::Renderer;
use thiserror::Error;

pub mod prelude {
    pub use crate::animation::{AnimatorController, FrameScheduler, Phase, ScaleState};
    pub use crate::chain::{Node, NodeChain};
    pub use crate::constants::*;
    pub use crate::geometry::{
        clamped_progress, draw_node_figure, point_on_circle, NodeLayout, Point,
    };
    pub use crate::platform::{
        input_channel, Event, EventResponse, MouseButton, RunSummary, Sender,
    };
    pub use crate::renderer::{DrawCommand, PixmapSurface, RecordingSurface, Renderer};
    pub use crate::surface::{Color, Paint, SavedState, StrokeCap, Surface};
    pub use crate::traversal::{Step, TransitionComplete, Traversal};
    pub use crate::{App, AppConfig, Error};
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
    #[error("Surface is no longer available")]
    SurfaceClosed,
    #[error("Could not allocate a {width}x{height} pixmap")]
    PixmapAllocation { width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Host surface settings. The animation itself has no knobs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    /// Write every rendered frame as a PNG into this directory
    pub frames_dir: Option<PathBuf>,
    /// File name prefix for exported frames
    pub frame_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
            frames_dir: None,
            frame_prefix: "frame".to_string(),
        }
    }
}

pub struct App {
    config: AppConfig,
    renderer: Renderer,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            renderer: Renderer::new(),
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn frames_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.frames_dir = Some(dir.into());
        self
    }

    pub fn frame_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.frame_prefix = prefix.into();
        self
    }

    /// Set a callback that gets called with `(index, new_scale)` each time a
    /// node finishes its transition.
    pub fn on_transition_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, f32) + 'static,
    {
        self.renderer = self.renderer.on_transition_complete(callback);
        self
    }

    /// Run on an offscreen surface until `input` is closed and the animation
    /// has come to rest.
    ///
    /// # Example
    /// ```ignore
    /// let (taps, input) = input_channel();
    /// std::thread::spawn(move || {
    ///     for _ in 0..3 {
    ///         taps.send(Event::tap(0.0, 0.0)).ok();
    ///         std::thread::sleep(Duration::from_secs(3));
    ///     }
    /// });
    ///
    /// let summary = App::new().frames_dir("frames").run(input)?;
    /// ```
    pub fn run(self, input: Channel<Event>) -> Result<RunSummary> {
        let _ = env_logger::try_init();
        platform::headless::run(self.config, self.renderer, input)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
