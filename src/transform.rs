/// A 2D affine transformation stored as the top two rows of a 3x3 matrix.
///
/// Used by the recording surface to map local drawing coordinates back to
/// surface coordinates across nested `save`/`translate`/`rotate` calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Matrix data in row-major order: [a, b, tx, c, d, ty]
    pub data: [f32; 6],
}

impl Transform {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, // row 1
        ],
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            data: [
                1.0, 0.0, x, // row 0
                0.0, 1.0, y, // row 1
            ],
        }
    }

    /// Rotation about the origin. With a y-down surface a positive angle
    /// turns clockwise on screen.
    pub fn rotate(angle_radians: f32) -> Self {
        let cos = angle_radians.cos();
        let sin = angle_radians.sin();
        Self {
            data: [
                cos, -sin, 0.0, // row 0
                sin, cos, 0.0, // row 1
            ],
        }
    }

    pub fn rotate_degrees(angle_degrees: f32) -> Self {
        Self::rotate(angle_degrees.to_radians())
    }

    /// Compose this transform with another: self * other
    /// Applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let [a0, b0, tx0, c0, d0, ty0] = self.data;
        let [a1, b1, tx1, c1, d1, ty1] = other.data;

        Transform {
            data: [
                a0 * a1 + b0 * c1,
                a0 * b1 + b0 * d1,
                a0 * tx1 + b0 * ty1 + tx0,
                c0 * a1 + d0 * c1,
                c0 * b1 + d0 * d1,
                c0 * tx1 + d0 * ty1 + ty0,
            ],
        }
    }

    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, tx, c, d, ty] = self.data;
        (a * x + b * y + tx, c * x + d * y + ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_identity() {
        let t = Transform::IDENTITY;
        assert_eq!(t.transform_point(3.0, 4.0), (3.0, 4.0));
    }

    #[test]
    fn test_translate() {
        let t = Transform::translate(10.0, 20.0);
        let (x, y) = t.transform_point(5.0, 5.0);
        assert!(approx_eq(x, 15.0));
        assert!(approx_eq(y, 25.0));
    }

    #[test]
    fn test_rotate() {
        let t = Transform::rotate_degrees(90.0);
        let (x, y) = t.transform_point(1.0, 0.0);
        assert!(approx_eq(x, 0.0));
        assert!(approx_eq(y, 1.0));
    }

    #[test]
    fn test_translate_then_rotate_local_frame() {
        // Canvas-style: translate the origin, then rotate about the new origin
        let t = Transform::translate(100.0, 50.0).then(&Transform::rotate_degrees(180.0));
        let (x, y) = t.transform_point(10.0, 0.0);
        assert!(approx_eq(x, 90.0));
        assert!(approx_eq(y, 50.0));
    }
}
