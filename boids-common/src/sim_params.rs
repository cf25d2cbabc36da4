use serde::{Deserialize, Serialize};

pub const DEFAULT_WORLD_WIDTH: f64 = 1900.0;
pub const DEFAULT_WORLD_HEIGHT: f64 = 1200.0;
pub const DEFAULT_NUM_BOIDS: u32 = 500;
pub const DEFAULT_ALIGNMENT_RADIUS: f64 = 50.0;
pub const DEFAULT_COHESION_RADIUS: f64 = 30.0;
pub const DEFAULT_SEPARATION_RADIUS: f64 = 20.0;
pub const DEFAULT_MAX_SPEED: f64 = 2.0;
pub const DEFAULT_MAX_FORCE: f64 = 0.05;

/// Runtime parameters derived from the configuration, read on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockParams {
    // World
    pub world_width: f64,
    pub world_height: f64,

    // Population
    pub num_boids: u32,

    // Perception radii (strict: a neighbor must be closer than the radius)
    pub alignment_radius: f64,
    pub cohesion_radius: f64,
    pub separation_radius: f64,

    // Limits
    pub max_speed: f64,
    pub max_force: f64,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            num_boids: DEFAULT_NUM_BOIDS,
            alignment_radius: DEFAULT_ALIGNMENT_RADIUS,
            cohesion_radius: DEFAULT_COHESION_RADIUS,
            separation_radius: DEFAULT_SEPARATION_RADIUS,
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
        }
    }
}

impl FlockParams {
    /// Default steering constants inside a custom world.
    pub fn with_bounds(world_width: f64, world_height: f64, num_boids: u32) -> Self {
        Self {
            world_width,
            world_height,
            num_boids,
            ..Self::default()
        }
    }

    /// The widest perception radius of the three rules.
    pub fn max_perception_radius(&self) -> f64 {
        self.alignment_radius
            .max(self.cohesion_radius)
            .max(self.separation_radius)
    }
}
