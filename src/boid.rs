use boids_common::Vector2D;
use serde::{Deserialize, Serialize};

/// Kinematic state of a single boid.
///
/// `acceleration` is a per-tick accumulator: forces are summed into it during
/// a tick and it is cleared by [`Boid::update`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
        }
    }

    /// A boid at `position` flying at unit speed along `heading_rad`.
    pub fn with_heading(position: Vector2D, heading_rad: f64) -> Self {
        Self::new(position, Vector2D::from_angle(heading_rad))
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Forward Euler step with a unit time step.
    pub fn update(&mut self, max_speed: f64) {
        self.velocity += self.acceleration;
        self.velocity.limit(max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2D::zero();
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite one.
    pub fn wrap_edges(&mut self, width: f64, height: f64) {
        if self.position.x > width {
            self.position.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = width;
        }

        if self.position.y > height {
            self.position.y = 0.0;
        } else if self.position.y < 0.0 {
            self.position.y = height;
        }
    }

    /// Pixel coordinates, truncated toward zero.
    pub fn pixel(&self) -> (i32, i32) {
        (self.position.x as i32, self.position.y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boid_creation() {
        let boid = Boid::new(Vector2D::new(10.0, 20.0), Vector2D::new(1.0, 1.0));
        assert_eq!(boid.position, Vector2D::new(10.0, 20.0));
        assert_eq!(boid.velocity, Vector2D::new(1.0, 1.0));
        assert!(boid.acceleration.is_zero());
    }

    #[test]
    fn test_forces_accumulate_until_update() {
        let mut boid = Boid::new(Vector2D::zero(), Vector2D::zero());
        boid.apply_force(Vector2D::new(0.25, 0.0));
        boid.apply_force(Vector2D::new(0.25, -0.5));
        assert_eq!(boid.acceleration, Vector2D::new(0.5, -0.5));

        boid.update(2.0);
        assert_eq!(boid.velocity, Vector2D::new(0.5, -0.5));
        assert_eq!(boid.position, Vector2D::new(0.5, -0.5));
        assert!(boid.acceleration.is_zero());
    }

    #[test]
    fn test_update_clamps_speed_before_moving() {
        let mut boid = Boid::new(Vector2D::new(5.0, 5.0), Vector2D::new(2.0, 0.0));
        boid.apply_force(Vector2D::new(1.0, 0.0));
        boid.update(2.0);
        assert!((boid.velocity.magnitude() - 2.0).abs() < 1e-12);
        assert!((boid.position.x - 7.0).abs() < 1e-12);
        assert_eq!(boid.position.y, 5.0);
    }

    #[test]
    fn test_wrap_edges_below_zero() {
        let mut boid = Boid::new(Vector2D::new(-1.0, -1.0), Vector2D::zero());
        boid.wrap_edges(100.0, 50.0);
        assert_eq!(boid.position, Vector2D::new(100.0, 50.0));
    }

    #[test]
    fn test_wrap_edges_past_far_edge() {
        let mut boid = Boid::new(Vector2D::new(100.5, 50.01), Vector2D::zero());
        boid.wrap_edges(100.0, 50.0);
        assert_eq!(boid.position, Vector2D::zero());
    }

    #[test]
    fn test_wrap_edges_axes_are_independent() {
        let mut boid = Boid::new(Vector2D::new(101.0, 25.0), Vector2D::zero());
        boid.wrap_edges(100.0, 50.0);
        assert_eq!(boid.position, Vector2D::new(0.0, 25.0));

        let mut boid = Boid::new(Vector2D::new(40.0, -0.5), Vector2D::zero());
        boid.wrap_edges(100.0, 50.0);
        assert_eq!(boid.position, Vector2D::new(40.0, 50.0));
    }

    #[test]
    fn test_wrap_edges_inside_is_noop() {
        let mut boid = Boid::new(Vector2D::new(0.0, 50.0), Vector2D::zero());
        boid.wrap_edges(100.0, 50.0);
        assert_eq!(boid.position, Vector2D::new(0.0, 50.0));
    }

    #[test]
    fn test_pixel_truncates() {
        let boid = Boid::new(Vector2D::new(12.99, 0.5), Vector2D::zero());
        assert_eq!(boid.pixel(), (12, 0));
    }
}
