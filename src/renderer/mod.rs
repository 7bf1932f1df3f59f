//! Frame composition.
//!
//! The [`Renderer`] owns the traversal and the animation loop. Each draw
//! clears the surface, paints every figure and runs one animation tick; a tap
//! starts the node under the cursor when it is at rest.

mod commands;
mod pixmap;

pub use commands::{DrawCommand, RecordingSurface};
pub use pixmap::PixmapSurface;

use crate::animation::{AnimatorController, FrameScheduler};
use crate::constants::{BACKGROUND_COLOR, NODE_COUNT};
use crate::platform::{Event, EventResponse, MouseButton};
use crate::surface::{Paint, Surface};
use crate::traversal::{TransitionComplete, Traversal};

/// Called with `(index, new_scale)` whenever a node settles.
pub type CompletionCallback = Box<dyn FnMut(usize, f32)>;

pub struct Renderer {
    traversal: Traversal,
    animator: AnimatorController,
    paint: Paint,
    on_complete: Option<CompletionCallback>,
    frames: u64,
    transitions: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            traversal: Traversal::new(),
            animator: AnimatorController::new(),
            paint: Paint::default(),
            on_complete: None,
            frames: 0,
            transitions: 0,
        }
    }

    /// Register a listener for settled transitions.
    pub fn on_transition_complete<F: FnMut(usize, f32) + 'static>(mut self, callback: F) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Transitions completed so far
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn scales(&self) -> [f32; NODE_COUNT] {
        self.traversal.scales()
    }

    /// Paint one frame and advance the animation by one tick.
    pub fn render<S, F>(&mut self, surface: &mut S, scheduler: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        surface.clear(BACKGROUND_COLOR);
        self.traversal.draw(surface, &self.paint);
        self.frames += 1;

        let traversal = &mut self.traversal;
        let on_complete = &mut self.on_complete;
        let transitions = &mut self.transitions;
        self.animator.tick(scheduler, |animator| {
            if let Some(TransitionComplete { index, scale }) = traversal.update() {
                *transitions += 1;
                log::debug!("Node {} settled at scale {}", index, scale);
                animator.stop();
                if let Some(callback) = on_complete.as_mut() {
                    callback(index, scale);
                }
            }
        });
    }

    /// Primary action: start the node under the cursor if it is at rest.
    pub fn handle_tap<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> bool {
        if self.traversal.start_updating() {
            log::debug!("Tap started node {}", self.traversal.current().index);
            self.animator.start(scheduler);
            true
        } else {
            log::debug!("Tap ignored, node {} still moving", self.traversal.current().index);
            false
        }
    }

    /// Route an input event. Only a primary button press is handled.
    pub fn handle_event<F: FrameScheduler + ?Sized>(
        &mut self,
        event: &Event,
        scheduler: &mut F,
    ) -> EventResponse {
        match event {
            Event::MouseDown {
                button: MouseButton::Left,
                ..
            } => {
                self.handle_tap(scheduler);
                EventResponse::Handled
            }
            _ => EventResponse::Ignored,
        }
    }

    /// Stop animating and drop any pending frame.
    pub fn cancel<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        self.animator.cancel(scheduler);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::constants::FRAME_DELAY;
    use crate::Result;

    #[derive(Default)]
    struct ManualScheduler {
        pending: Option<Duration>,
        requests: usize,
    }

    impl FrameScheduler for ManualScheduler {
        fn request_redraw(&mut self, delay: Duration) -> Result<()> {
            self.pending = Some(delay);
            self.requests += 1;
            Ok(())
        }

        fn cancel(&mut self) {
            self.pending = None;
        }
    }

    /// Keep drawing while the scheduler has a pending frame.
    fn pump(
        renderer: &mut Renderer,
        surface: &mut RecordingSurface,
        scheduler: &mut ManualScheduler,
    ) {
        let mut guard = 0;
        while scheduler.pending.take().is_some() {
            guard += 1;
            assert!(guard < 1000, "animation never settled");
            renderer.render(surface, scheduler);
        }
    }

    #[test]
    fn test_render_clears_then_draws() {
        let mut renderer = Renderer::new();
        let mut surface = RecordingSurface::new(600.0, 300.0);
        let mut scheduler = ManualScheduler::default();
        renderer.render(&mut surface, &mut scheduler);

        assert_eq!(
            surface.commands()[0],
            DrawCommand::Clear {
                color: BACKGROUND_COLOR
            }
        );
        // Idle: nothing scheduled
        assert_eq!(scheduler.requests, 0);
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_tap_runs_one_transition_and_stops() {
        let mut renderer = Renderer::new();
        let mut surface = RecordingSurface::new(600.0, 300.0);
        let mut scheduler = ManualScheduler::default();

        assert!(renderer.handle_tap(&mut scheduler));
        assert!(renderer.is_animating());
        assert_eq!(scheduler.pending, Some(Duration::ZERO));

        pump(&mut renderer, &mut surface, &mut scheduler);

        assert!(!renderer.is_animating());
        assert_eq!(renderer.transitions(), 1);
        assert_eq!(renderer.scales(), [1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(renderer.traversal().current().index, 1);
        assert!(renderer.frames() >= 20);
    }

    #[test]
    fn test_tap_while_moving_is_ignored() {
        let mut renderer = Renderer::new();
        let mut surface = RecordingSurface::new(600.0, 300.0);
        let mut scheduler = ManualScheduler::default();

        renderer.handle_tap(&mut scheduler);
        renderer.render(&mut surface, &mut scheduler);
        assert_eq!(scheduler.pending, Some(FRAME_DELAY));
        let before = renderer.traversal().current().state;

        assert!(!renderer.handle_tap(&mut scheduler));
        assert_eq!(renderer.traversal().current().state, before);
        assert_eq!(scheduler.pending, Some(FRAME_DELAY));
    }

    #[test]
    fn test_completion_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut renderer = Renderer::new()
            .on_transition_complete(move |index, scale| sink.borrow_mut().push((index, scale)));
        let mut surface = RecordingSurface::new(600.0, 300.0);
        let mut scheduler = ManualScheduler::default();

        for _ in 0..2 {
            renderer.handle_tap(&mut scheduler);
            pump(&mut renderer, &mut surface, &mut scheduler);
        }
        assert_eq!(*seen.borrow(), vec![(0, 1.0), (1, 1.0)]);
    }

    #[test]
    fn test_only_primary_press_is_handled() {
        let mut renderer = Renderer::new();
        let mut scheduler = ManualScheduler::default();

        let ignored = [
            Event::MouseMove { x: 1.0, y: 1.0 },
            Event::MouseUp {
                x: 1.0,
                y: 1.0,
                button: MouseButton::Left,
            },
            Event::MouseDown {
                x: 1.0,
                y: 1.0,
                button: MouseButton::Right,
            },
            Event::MouseLeave,
        ];
        for event in &ignored {
            assert_eq!(
                renderer.handle_event(event, &mut scheduler),
                EventResponse::Ignored
            );
        }
        assert!(!renderer.is_animating());

        let press = Event::MouseDown {
            x: 1.0,
            y: 1.0,
            button: MouseButton::Left,
        };
        assert_eq!(
            renderer.handle_event(&press, &mut scheduler),
            EventResponse::Handled
        );
        assert!(renderer.is_animating());
    }

    #[test]
    fn test_cancel_drops_pending_frame() {
        let mut renderer = Renderer::new();
        let mut scheduler = ManualScheduler::default();
        renderer.handle_tap(&mut scheduler);
        renderer.cancel(&mut scheduler);
        assert!(!renderer.is_animating());
        assert_eq!(scheduler.pending, None);
    }
}
