use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// A 2D vector used for boid positions, velocities and steering forces.
///
/// Plain value type: arithmetic is componentwise and everything is copied.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    /// Creates a new Vector2D.
    #[inline(always)]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a zero vector.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Unit vector pointing along `angle_rad`.
    #[inline(always)]
    pub fn from_angle(angle_rad: f64) -> Self {
        Self::new(angle_rad.cos(), angle_rad.sin())
    }

    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Euclidean norm.
    #[inline(always)]
    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance between two points. Symmetric in its arguments.
    #[inline(always)]
    pub fn distance(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline(always)]
    pub fn scale(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    /// Clamps the magnitude to `max`, keeping the direction.
    ///
    /// The vector is divided by its own magnitude and then scaled by `max`,
    /// rather than normalized in one step. A vector whose magnitude is not
    /// strictly greater than `max` (including the zero vector) is left alone.
    pub fn limit(&mut self, max: f64) {
        let mag = self.magnitude();
        if mag > max {
            *self /= mag;
            *self *= max;
        }
    }
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        // Callers guarantee a non-zero divisor.
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl MulAssign<f64> for Vector2D {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl DivAssign<f64> for Vector2D {
    fn div_assign(&mut self, scalar: f64) {
        self.x /= scalar;
        self.y /= scalar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_magnitude() {
        assert_eq!(Vector2D::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vector2D::zero().magnitude(), 0.0);
    }

    #[test]
    fn test_compound_assignment() {
        let mut v = Vector2D::new(1.0, 2.0);
        v += Vector2D::new(3.0, 4.0);
        assert_eq!(v, Vector2D::new(4.0, 6.0));
        v -= Vector2D::new(1.0, 1.0);
        assert_eq!(v, Vector2D::new(3.0, 5.0));
        v *= 2.0;
        assert_eq!(v, Vector2D::new(6.0, 10.0));
        v /= 4.0;
        assert_eq!(v, Vector2D::new(1.5, 2.5));
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (Vector2D::new(0.0, 0.0), Vector2D::new(3.0, 4.0)),
            (Vector2D::new(-12.5, 7.25), Vector2D::new(1899.9, 0.001)),
            (Vector2D::new(100.0, 100.0), Vector2D::new(110.0, 100.0)),
            (Vector2D::new(1e-9, -1e-9), Vector2D::new(-3e-9, 2e-9)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.distance(b), b.distance(a));
        }
        assert_eq!(pairs[0].0.distance(pairs[0].1), 5.0);
    }

    #[test]
    fn test_limit_rescales_to_max() {
        let mut v = Vector2D::new(30.0, 40.0);
        v.limit(2.0);
        assert!((v.magnitude() - 2.0).abs() < EPS);
        assert!((v.x - 1.2).abs() < EPS);
        assert!((v.y - 1.6).abs() < EPS);
    }

    #[test]
    fn test_limit_below_max_is_noop() {
        let mut v = Vector2D::new(0.3, -0.4);
        v.limit(0.5);
        assert_eq!(v, Vector2D::new(0.3, -0.4));
    }

    #[test]
    fn test_limit_zero_vector_untouched() {
        let mut v = Vector2D::zero();
        v.limit(0.0);
        assert!(v.is_zero());
        assert!(!v.x.is_nan() && !v.y.is_nan());
    }

    #[test]
    fn test_limit_is_idempotent() {
        let inputs = [
            Vector2D::new(-2.0, 0.0),
            Vector2D::new(7.0, -24.0),
            Vector2D::new(0.01, 0.02),
            Vector2D::new(1e6, 1e-6),
        ];
        for input in inputs {
            let mut once = input;
            once.limit(0.05);
            let mut twice = once;
            twice.limit(0.05);
            assert!((once.x - twice.x).abs() < EPS);
            assert!((once.y - twice.y).abs() < EPS);
        }
    }

    #[test]
    fn test_limit_matches_normalization_for_small_magnitudes() {
        let mut v = Vector2D::new(3e-150, 4e-150);
        v.limit(1e-151);
        assert!((v.magnitude() - 1e-151).abs() <= 1e-151 * 1e-12);
        assert!((v.x / v.y - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_from_angle_is_unit_length() {
        for i in 0..16 {
            let v = Vector2D::from_angle(i as f64 * std::f64::consts::TAU / 16.0);
            assert!((v.magnitude() - 1.0).abs() < EPS);
        }
    }
}
