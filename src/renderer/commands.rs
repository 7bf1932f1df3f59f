//! Draw command definitions and a surface that records them.

use crate::geometry::Point;
use crate::surface::{Color, Paint, Surface};
use crate::transform::Transform;

/// A single draw operation in surface coordinates.
///
/// Points have already been mapped through the transform that was current
/// when the command was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear {
        color: Color,
    },

    /// Closed polygon.
    Path {
        points: Vec<Point>,
        paint: Paint,
    },

    Line {
        from: Point,
        to: Point,
        paint: Paint,
    },
}

/// [`Surface`] that keeps a display list instead of pixels.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    transform: Transform,
    stack: Vec<Transform>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `save` calls without a matching `restore`.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current_transform(&self) -> Transform {
        self.transform
    }

    fn map(&self, x: f32, y: f32) -> Point {
        let (x, y) = self.transform.transform_point(x, y);
        Point::new(x, y)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn draw_path(&mut self, points: &[Point], paint: &Paint) {
        let points = points.iter().map(|p| self.map(p.x, p.y)).collect();
        self.commands.push(DrawCommand::Path {
            points,
            paint: *paint,
        });
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        let from = self.map(x0, y0);
        let to = self.map(x1, y1);
        self.commands.push(DrawCommand::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(transform) => self.transform = transform,
            None => log::warn!("RecordingSurface: restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.then(&Transform::translate(dx, dy));
    }

    fn rotate(&mut self, degrees: f32) {
        self.transform = self.transform.then(&Transform::rotate_degrees(degrees));
    }
}
