//! Offscreen host: a calloop event loop driving a [`PixmapSurface`].
//!
//! Input arrives over a calloop channel, redraw requests become timer
//! sources on the same loop, so everything runs on the thread that called
//! [`App::run`](crate::App::run).

use std::path::PathBuf;
use std::time::Duration;

use calloop::channel::{Channel, Event as ChannelEvent};
use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopHandle, LoopSignal, RegistrationToken};

use super::Event;
use crate::animation::FrameScheduler;
use crate::constants::NODE_COUNT;
use crate::renderer::{PixmapSurface, Renderer};
use crate::{AppConfig, Error, Result};

/// Loop state that can be redrawn by a [`CalloopScheduler`] timer.
pub trait RedrawTarget: Sized + 'static {
    fn scheduler_mut(&mut self) -> &mut CalloopScheduler<Self>;

    fn redraw(&mut self);
}

/// [`FrameScheduler`] backed by calloop timers.
///
/// At most one redraw is outstanding; its registration token is the cancel
/// handle.
pub struct CalloopScheduler<D: 'static> {
    handle: LoopHandle<'static, D>,
    pending: Option<RegistrationToken>,
    closed: bool,
}

impl<D: RedrawTarget> CalloopScheduler<D> {
    pub fn new(handle: LoopHandle<'static, D>) -> Self {
        Self {
            handle,
            pending: None,
            closed: false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Mark the surface as gone. Pending and future redraws are dropped.
    pub fn close(&mut self) {
        self.cancel();
        self.closed = true;
    }
}

impl<D: RedrawTarget> FrameScheduler for CalloopScheduler<D> {
    fn request_redraw(&mut self, delay: Duration) -> Result<()> {
        if self.closed {
            return Err(Error::SurfaceClosed);
        }
        self.cancel();

        let timer = if delay.is_zero() {
            Timer::immediate()
        } else {
            Timer::from_duration(delay)
        };
        let token = self
            .handle
            .insert_source(timer, |_deadline, _, target: &mut D| {
                target.scheduler_mut().pending = None;
                target.redraw();
                TimeoutAction::Drop
            })
            .map_err(|e| Error::EventLoop(e.error))?;
        self.pending = Some(token);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            self.handle.remove(token);
        }
    }
}

/// What a headless run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub transitions: u64,
    pub final_scales: [f32; NODE_COUNT],
}

struct FrameExporter {
    dir: PathBuf,
    prefix: String,
    next: u64,
}

impl FrameExporter {
    fn export(&mut self, surface: &PixmapSurface) -> Result<()> {
        let path = self
            .dir
            .join(format!("{}_{:05}.png", self.prefix, self.next));
        self.next += 1;
        surface.save_png(path)
    }
}

struct HeadlessState {
    renderer: Renderer,
    surface: PixmapSurface,
    scheduler: CalloopScheduler<HeadlessState>,
    exporter: Option<FrameExporter>,
    input_closed: bool,
    signal: LoopSignal,
}

impl HeadlessState {
    /// Input is exhausted and the last frame has been painted.
    fn is_settled(&self) -> bool {
        self.input_closed && !self.scheduler.has_pending() && !self.renderer.is_animating()
    }

    fn handle_input(&mut self, event: ChannelEvent<Event>) {
        match event {
            ChannelEvent::Msg(event) => {
                self.renderer.handle_event(&event, &mut self.scheduler);
            }
            ChannelEvent::Closed => {
                log::debug!("Input source closed");
                self.input_closed = true;
            }
        }
    }
}

impl RedrawTarget for HeadlessState {
    fn scheduler_mut(&mut self) -> &mut CalloopScheduler<Self> {
        &mut self.scheduler
    }

    fn redraw(&mut self) {
        self.renderer.render(&mut self.surface, &mut self.scheduler);
        if let Some(exporter) = self.exporter.as_mut() {
            if let Err(e) = exporter.export(&self.surface) {
                log::warn!("Failed to export frame {}: {}", exporter.next - 1, e);
            }
        }
    }
}

pub(crate) fn run(
    config: AppConfig,
    renderer: Renderer,
    input: Channel<Event>,
) -> Result<RunSummary> {
    let surface = PixmapSurface::new(config.width, config.height)?;
    log::info!("Created headless surface {}x{}", config.width, config.height);

    let exporter = match config.frames_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            log::info!("Exporting frames to {}", dir.display());
            Some(FrameExporter {
                dir,
                prefix: config.frame_prefix,
                next: 0,
            })
        }
        None => None,
    };

    let mut event_loop: EventLoop<'static, HeadlessState> = EventLoop::try_new()?;
    let handle = event_loop.handle();

    handle
        .insert_source(input, |event, _, state: &mut HeadlessState| {
            state.handle_input(event)
        })
        .map_err(|e| Error::EventLoop(e.error))?;

    let mut state = HeadlessState {
        renderer,
        surface,
        scheduler: CalloopScheduler::new(handle),
        exporter,
        input_closed: false,
        signal: event_loop.get_signal(),
    };

    // First frame
    state.scheduler.request_redraw(Duration::ZERO)?;

    event_loop.run(None::<Duration>, &mut state, |state| {
        if state.is_settled() {
            state.scheduler.close();
            state.signal.stop();
        }
    })?;

    let summary = RunSummary {
        frames: state.renderer.frames(),
        transitions: state.renderer.transitions(),
        final_scales: state.renderer.scales(),
    };
    log::info!(
        "Headless run finished: {} frames, {} transitions",
        summary.frames,
        summary.transitions
    );
    Ok(summary)
}
