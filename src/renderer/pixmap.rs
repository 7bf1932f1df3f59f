//! Raster surface backed by a tiny-skia pixmap.

use std::path::Path;

use resvg::tiny_skia;

use crate::geometry::Point;
use crate::surface::{Color, Paint, StrokeCap, Surface};
use crate::{Error, Result};

pub struct PixmapSurface {
    pixmap: tiny_skia::Pixmap,
    transform: tiny_skia::Transform,
    stack: Vec<tiny_skia::Transform>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(Error::PixmapAllocation { width, height })?;
        Ok(Self {
            pixmap,
            transform: tiny_skia::Transform::identity(),
            stack: Vec::new(),
        })
    }

    /// RGBA value of a single pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // tiny-skia only checks the flat index, so x == width would wrap
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    pub fn to_image(&self) -> image::RgbaImage {
        let mut image = image::RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (target, source) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = source.demultiply();
            *target = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image().save(path.as_ref())?;
        Ok(())
    }

    fn stroke(&mut self, path: &tiny_skia::Path, paint: &Paint) {
        let stroke = tiny_skia::Stroke {
            width: paint.stroke_width,
            line_cap: line_cap(paint.stroke_cap),
            ..tiny_skia::Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &skia_paint(paint), &stroke, self.transform, None);
    }
}

fn line_cap(cap: StrokeCap) -> tiny_skia::LineCap {
    match cap {
        StrokeCap::Butt => tiny_skia::LineCap::Butt,
        StrokeCap::Round => tiny_skia::LineCap::Round,
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn skia_paint(paint: &Paint) -> tiny_skia::Paint<'static> {
    let mut skia = tiny_skia::Paint::default();
    skia.set_color(skia_color(paint.color));
    skia.anti_alias = true;
    skia
}

impl Surface for PixmapSurface {
    fn width(&self) -> f32 {
        self.pixmap.width() as f32
    }

    fn height(&self) -> f32 {
        self.pixmap.height() as f32
    }

    fn clear(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
    }

    fn draw_path(&mut self, points: &[Point], paint: &Paint) {
        let mut builder = tiny_skia::PathBuilder::new();
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        builder.close();
        // Degenerate paths (all points equal) produce nothing to draw
        let Some(path) = builder.finish() else {
            return;
        };
        self.stroke(&path, paint);
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        let mut builder = tiny_skia::PathBuilder::new();
        builder.move_to(x0, y0);
        builder.line_to(x1, y1);
        if let Some(path) = builder.finish() {
            self.stroke(&path, paint);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.pre_translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f32) {
        self.transform = self.transform.pre_concat(tiny_skia::Transform::from_rotate(degrees));
    }
}
