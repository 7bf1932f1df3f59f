//! Fixed constants for the figure row. None of these are user-configurable.

use std::time::Duration;

use crate::surface::Color;

/// Number of figures in the row.
pub const NODE_COUNT: usize = 5;

/// Vertices per triangle, and the number of staggered vertex lines per node.
pub const TRIS: usize = 3;

/// Ratio between the horizontal gap and the triangle radius.
pub const SIZE_FACTOR: f32 = 3.0;

/// Stroke width is `min(width, height) / STROKE_FACTOR`.
pub const STROKE_FACTOR: f32 = 90.0;

/// Scale threshold after which a transition switches to the fast step.
pub const SC_DIV: f32 = 0.51;

/// Base scale increment per animation tick.
pub const SC_GAP: f32 = 0.05;

/// Delay between two animation frames.
pub const FRAME_DELAY: Duration = Duration::from_millis(50);

/// Stroke color of every figure.
pub const FIGURE_COLOR: Color = Color::from_hex(0x311B92);

/// Color the surface is cleared to before each frame.
pub const BACKGROUND_COLOR: Color = Color::from_hex(0xBDBDBD);
