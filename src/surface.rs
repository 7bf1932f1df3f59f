//! The drawing surface the figures are painted onto.
//!
//! The core never creates a canvas itself. Hosts hand it something that
//! implements [`Surface`]: the raster [`PixmapSurface`](crate::renderer::PixmapSurface),
//! the [`RecordingSurface`](crate::renderer::RecordingSurface) used by tests, or
//! their own backend.

use std::ops::{Deref, DerefMut};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Convert to 8-bit RGBA channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
}

/// Line end decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

/// Style used for a draw call. Shapes are always outlined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f32,
    pub stroke_cap: StrokeCap,
}

impl Paint {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn stroke_cap(mut self, cap: StrokeCap) -> Self {
        self.stroke_cap = cap;
        self
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            stroke_width: 1.0,
            stroke_cap: StrokeCap::Butt,
        }
    }
}

/// Primitive drawing operations consumed by the renderer.
///
/// Coordinates passed to the draw calls are in the current local frame, i.e.
/// after every `translate`/`rotate` since the matching `save`.
pub trait Surface {
    /// Surface width in pixels
    fn width(&self) -> f32;

    /// Surface height in pixels
    fn height(&self) -> f32;

    /// Fill the whole surface, ignoring the current transform.
    fn clear(&mut self, color: Color);

    /// Stroke a closed polygon through `points`.
    fn draw_path(&mut self, points: &[Point], paint: &Paint);

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching `save`.
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);

    /// Rotate the local frame clockwise by `degrees` (y axis points down).
    fn rotate(&mut self, degrees: f32);
}

/// Scoped transform: saves on creation and restores on drop.
///
/// Dropping happens on every exit path, including early returns and
/// unwinding, so the surface never leaks a translated or rotated frame.
pub struct SavedState<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::transform::Transform;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0x311B92);
        assert_eq!(c.to_rgba8(), [0x31, 0x1B, 0x92, 0xFF]);
    }

    #[test]
    fn test_paint_builder() {
        let paint = Paint::new(Color::WHITE)
            .stroke_width(3.0)
            .stroke_cap(StrokeCap::Round);
        assert_eq!(paint.color, Color::WHITE);
        assert_eq!(paint.stroke_width, 3.0);
        assert_eq!(paint.stroke_cap, StrokeCap::Round);
    }

    #[test]
    fn test_saved_state_restores_on_drop() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        {
            let mut saved = SavedState::new(&mut surface);
            saved.translate(10.0, 10.0);
            assert_eq!(saved.save_depth(), 1);
        }
        assert_eq!(surface.save_depth(), 0);
        assert_eq!(surface.current_transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_saved_state_restores_on_panic() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut saved = SavedState::new(&mut surface);
            saved.rotate(45.0);
            panic!("draw failed");
        }));
        assert!(result.is_err());
        assert_eq!(surface.save_depth(), 0);
        assert_eq!(surface.current_transform(), Transform::IDENTITY);
    }
}
