//! Pure geometry for a single figure: a triangle inscribed in a circle with
//! three lines growing from the center toward its vertices.
//!
//! One unit of scale is split into two phases. During the first half the
//! vertex lines grow one after another; during the second half the whole
//! figure turns by 180 degrees.

use std::f32::consts::PI;

use crate::constants::{FIGURE_COLOR, NODE_COUNT, SIZE_FACTOR, STROKE_FACTOR, TRIS};
use crate::surface::{Paint, SavedState, StrokeCap, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Angle between two consecutive triangle vertices.
pub fn vertex_step() -> f32 {
    2.0 * PI / TRIS as f32
}

/// Angle of vertex `j` for a vertex step of `base_angle`.
pub fn vertex_angle(base_angle: f32, j: usize) -> f32 {
    base_angle / 4.0 + base_angle * j as f32
}

pub fn point_on_circle(radius: f32, angle: f32) -> Point {
    Point::new(radius * angle.cos(), radius * angle.sin())
}

/// Progress of sub-phase `segment` when one unit of `scale` is split into
/// `segment_count` equal sub-phases. Always in `[0, 1]`.
pub fn clamped_progress(scale: f32, segment: usize, segment_count: usize) -> f32 {
    let inverse = 1.0 / segment_count as f32;
    (scale - segment as f32 * inverse).max(0.0).min(inverse) * segment_count as f32
}

pub fn draw_triangle<S: Surface + ?Sized>(
    surface: &mut S,
    radius: f32,
    base_angle: f32,
    paint: &Paint,
) {
    let points: Vec<Point> = (0..TRIS)
        .map(|j| point_on_circle(radius, vertex_angle(base_angle, j)))
        .collect();
    surface.draw_path(&points, paint);
}

pub fn draw_radial_line<S: Surface + ?Sized>(
    surface: &mut S,
    radius: f32,
    vertex_index: usize,
    base_angle: f32,
    paint: &Paint,
) {
    let vertex = point_on_circle(radius, vertex_angle(base_angle, vertex_index));
    surface.draw_line(0.0, 0.0, vertex.x, vertex.y, paint);
}

/// Placement of the figures for a given surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    /// Horizontal distance between two figure centers
    pub gap: f32,
    /// Circumradius of the triangle
    pub size: f32,
    pub stroke_width: f32,
    /// Vertical position of every figure center
    pub center_y: f32,
}

impl NodeLayout {
    pub fn new(width: f32, height: f32) -> Self {
        let gap = width / (NODE_COUNT + 1) as f32;
        Self {
            gap,
            size: gap / SIZE_FACTOR,
            stroke_width: width.min(height) / STROKE_FACTOR,
            center_y: height / 2.0,
        }
    }

    pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Self {
        Self::new(surface.width(), surface.height())
    }

    /// Center of figure `index`.
    pub fn origin(&self, index: usize) -> Point {
        Point::new(self.gap * (index + 1) as f32, self.center_y)
    }
}

/// Draw figure `index` at progress `scale`.
///
/// The triangle is always drawn at full size; only the vertex lines follow
/// the first phase.
pub fn draw_node_figure<S: Surface + ?Sized>(
    surface: &mut S,
    index: usize,
    scale: f32,
    paint: &Paint,
) {
    let layout = NodeLayout::for_surface(&*surface);
    let mut paint = *paint;
    paint.color = FIGURE_COLOR;
    paint.stroke_width = layout.stroke_width;
    paint.stroke_cap = StrokeCap::Round;
    let base_angle = vertex_step();
    let sc1 = clamped_progress(scale, 0, 2);
    let sc2 = clamped_progress(scale, 1, 2);
    let origin = layout.origin(index);

    let mut local = SavedState::new(surface);
    local.translate(origin.x, origin.y);
    local.rotate(180.0 * sc2);
    draw_triangle(&mut *local, layout.size, base_angle, &paint);
    for j in 0..TRIS {
        let sc = clamped_progress(sc1, j, TRIS);
        draw_radial_line(&mut *local, layout.size * sc, j, base_angle, &paint);
    }
}
