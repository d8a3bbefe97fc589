//! Planar rigid transformations for placing diagram elements.
//!
//! Elements are drawn about their own centre and then translated onto a page
//! slot; sieve holes are drawn on the positive x axis and rotated into
//! position. Only rotations and translations are needed, so circle radii and
//! stroke widths are preserved by every [`Transform`].

use nalgebra::{Matrix2, Vector2};

/// A rigid transformation: rotation matrix + translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// 2x2 rotation matrix.
    pub matrix: Matrix2<f64>,
    /// Translation vector (mm).
    pub translation: Vector2<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            matrix: Matrix2::identity(),
            translation: Vector2::zeros(),
        }
    }
}

impl Transform {
    /// Create a pure translation.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            matrix: Matrix2::identity(),
            translation: Vector2::new(dx, dy),
        }
    }

    /// Create a counter-clockwise rotation about the origin, in degrees.
    pub fn rotation_degrees(angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self {
            matrix: Matrix2::new(cos, -sin, sin, cos),
            translation: Vector2::zeros(),
        }
    }

    /// Apply this transformation to a 2D point.
    pub fn apply(&self, point: &[f64; 2]) -> [f64; 2] {
        let v = Vector2::new(point[0], point[1]);
        let result = self.matrix * v + self.translation;
        [result.x, result.y]
    }

    /// Compose two transforms: self followed by other.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            matrix: other.matrix * self.matrix,
            translation: other.matrix * self.translation + other.translation,
        }
    }

    /// Where the local origin lands after the transform.
    pub fn origin(&self) -> [f64; 2] {
        [self.translation.x, self.translation.y]
    }
}
