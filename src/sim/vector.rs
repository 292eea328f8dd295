//! 2D vector math
//!
//! `Vector2` is glam's double-precision vector. The few operations the engine
//! needs that glam spells differently live on [`VectorExt`].

use glam::DVec2;

/// Immutable 2D value type used for positions, velocities and normals
pub type Vector2 = DVec2;

/// Engine-flavored vector operations
pub trait VectorExt {
    /// Uniform scale
    fn scale(self, s: f64) -> Self;
    /// Per-axis scale
    fn scale_xy(self, sx: f64, sy: f64) -> Self;
    /// Scalar 2D cross product: `ax * by - bx * ay`
    fn cross(self, other: Self) -> f64;
}

impl VectorExt for Vector2 {
    #[inline]
    fn scale(self, s: f64) -> Self {
        self * s
    }

    #[inline]
    fn scale_xy(self, sx: f64, sy: f64) -> Self {
        Vector2::new(self.x * sx, self.y * sy)
    }

    #[inline]
    fn cross(self, other: Self) -> f64 {
        self.x * other.y - other.x * self.y
    }
}

/// Mirror `velocity` about a unit `normal`: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vector2, normal: Vector2) -> Vector2 {
    velocity - normal.scale(2.0 * velocity.dot(normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_dot() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -4.0);
        assert_eq!(a + b, Vector2::new(4.0, -2.0));
        assert_eq!(a.dot(b), -5.0);
    }

    #[test]
    fn test_scale_uniform_and_per_axis() {
        let v = Vector2::new(2.0, -3.0);
        assert_eq!(v.scale(2.0), Vector2::new(4.0, -6.0));
        assert_eq!(v.scale_xy(-1.0, 0.5), Vector2::new(-2.0, -1.5));
    }

    #[test]
    fn test_cross_sign() {
        let x = Vector2::X;
        let y = Vector2::Y;
        assert_eq!(x.cross(y), 1.0);
        assert_eq!(y.cross(x), -1.0);
        assert_eq!(x.cross(x), 0.0);
        // Same as glam's perp_dot
        let a = Vector2::new(3.0, 7.0);
        let b = Vector2::new(-2.0, 5.0);
        assert_eq!(a.cross(b), a.perp_dot(b));
    }

    #[test]
    fn test_reflect() {
        // Moving right, hits a wall whose normal points left
        let reflected = reflect(Vector2::new(100.0, 0.0), Vector2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 1e-12);
        assert!(reflected.y.abs() < 1e-12);

        // Tangential component is untouched
        let reflected = reflect(Vector2::new(3.0, -4.0), Vector2::Y);
        assert_eq!(reflected, Vector2::new(3.0, 4.0));
    }
}
