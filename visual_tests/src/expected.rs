//! What each scene should look like, drawn without the renderer.
//!
//! Figure centers, vertex directions and per-node progress are worked out here
//! from the layout rules (five figures spaced `width / 6` apart on the
//! horizontal center line, vertices at 30, 150 and 270 degrees) and painted
//! straight onto a tiny-skia pixmap. References recorded from this module
//! never pass through the code they are used to check.

use crate::capture::Scene;
use crate::{Result, VisualTestError};
use image::RgbaImage;
use resvg::tiny_skia::{self, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

const FIGURES: usize = 5;
const FIGURE_RGB: [u8; 3] = [0x31, 0x1B, 0x92];
const BACKGROUND_RGB: [u8; 3] = [0xBD, 0xBD, 0xBD];

/// Vertex directions of an unrotated figure, clockwise from +x (y down)
const VERTEX_DEGREES: [f32; 3] = [30.0, 150.0, 270.0];

/// Scale the first figure shows in the last frame of `scene`.
///
/// The first rendered frame shows the tap's starting point; every further
/// frame is one step further. Steps are `0.05 / 3` until the scale reaches
/// `0.51` and `0.05` after that, and the transition snaps to `1.0` once it
/// overshoots.
pub fn expected_scale(ticks: usize) -> f32 {
    let mut scale = 0.0f32;
    for _ in 1..ticks {
        scale += if scale < 0.51 { 0.05 / 3.0 } else { 0.05 };
        if scale > 1.0 {
            return 1.0;
        }
    }
    scale
}

/// Paint the frame `scene` should produce at the given size.
pub fn render_expected(scene: Scene, width: u32, height: u32) -> Result<RgbaImage> {
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        VisualTestError::Capture(format!("Cannot allocate a {}x{} frame", width, height))
    })?;
    pixmap.fill(color(BACKGROUND_RGB));

    let (w, h) = (width as f32, height as f32);
    let gap = w / (FIGURES + 1) as f32;
    let radius = gap / 3.0;
    let stroke = Stroke {
        width: w.min(h) / 90.0,
        line_cap: LineCap::Round,
        ..Stroke::default()
    };
    let mut paint = Paint::default();
    paint.set_color(color(FIGURE_RGB));
    paint.anti_alias = true;

    let first_scale = expected_scale(scene.ticks);
    for figure in 0..FIGURES {
        let scale = if figure == 0 { first_scale } else { 0.0 };
        let lines = (scale * 2.0).clamp(0.0, 1.0);
        let turn = (scale * 2.0 - 1.0).clamp(0.0, 1.0);
        let transform = Transform::from_translate(gap * (figure + 1) as f32, h / 2.0)
            .pre_concat(Transform::from_rotate(180.0 * turn));

        let mut triangle = PathBuilder::new();
        for (i, degrees) in VERTEX_DEGREES.iter().enumerate() {
            let (x, y) = polar(radius, *degrees);
            if i == 0 {
                triangle.move_to(x, y);
            } else {
                triangle.line_to(x, y);
            }
        }
        triangle.close();
        if let Some(path) = triangle.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }

        for (i, degrees) in VERTEX_DEGREES.iter().enumerate() {
            let length = (lines * 3.0 - i as f32).clamp(0.0, 1.0);
            let (x, y) = polar(radius * length, *degrees);
            let mut line = PathBuilder::new();
            line.move_to(0.0, 0.0);
            line.line_to(x, y);
            if let Some(path) = line.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, transform, None);
            }
        }
    }

    Ok(to_image(&pixmap))
}

fn polar(radius: f32, degrees: f32) -> (f32, f32) {
    let angle = degrees.to_radians();
    (radius * angle.cos(), radius * angle.sin())
}

fn color([r, g, b]: [u8; 3]) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(r, g, b, 255)
}

fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (target, source) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = source.demultiply();
        *target = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn scene(ticks: usize) -> Scene {
        Scene { name: "test", ticks }
    }

    #[test]
    fn test_expected_scale() {
        assert_eq!(expected_scale(0), 0.0);
        assert_eq!(expected_scale(1), 0.0);
        assert!(approx_eq(expected_scale(10), 9.0 * 0.05 / 3.0));
        // 31 slow steps cross 0.51, then three fast ones
        assert!(approx_eq(expected_scale(35), 31.0 * 0.05 / 3.0 + 3.0 * 0.05));
        assert_eq!(expected_scale(42), 1.0);
        assert_eq!(expected_scale(60), 1.0);
    }

    #[test]
    fn test_settled_figure_points_down() {
        let image = render_expected(scene(60), 600, 300).expect("render");
        let figure = image::Rgba([0x31, 0x1B, 0x92, 255]);
        let background = image::Rgba([0xBD, 0xBD, 0xBD, 255]);
        // First center is (100, 150) with radius 33.3; after half a turn the
        // top vertex sits below the center and the bottom edge is gone.
        assert_eq!(*image.get_pixel(100, 182), figure);
        assert_eq!(*image.get_pixel(100, 118), background);
        assert_eq!(*image.get_pixel(120, 166), background);
        // The second figure is untouched: bottom edge at y = 166.7
        assert_eq!(*image.get_pixel(220, 166), figure);
        assert_eq!(*image.get_pixel(200, 182), background);
    }

    #[test]
    fn test_zero_size_is_an_error() {
        assert!(matches!(
            render_expected(scene(0), 0, 300),
            Err(VisualTestError::Capture(_))
        ));
    }
}
