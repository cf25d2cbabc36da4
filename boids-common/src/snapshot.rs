use serde::{Serialize, Deserialize};
use crate::vecmath::Vector2D;

/// A snapshot of the flock and its summary metrics at a specific tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of ticks completed when the snapshot was taken.
    pub tick: u32,
    /// The number of boids in the flock.
    pub boid_count: u32,
    /// Mean position of all boids.
    pub center_of_mass: Vector2D,
    /// Mean velocity magnitude.
    pub mean_speed: f64,
    /// Polarization of the flock: |mean velocity| / mean speed.
    /// 0 means headings cancel out, 1 means every boid flies the same way.
    pub order_parameter: f64,
    /// `neighbor_counts_distribution[n]` is the number of boids with exactly n
    /// others inside the alignment radius. The last bin also collects overflow.
    pub neighbor_counts_distribution: Vec<u32>,
    /// Integer-truncated (x, y) of every boid in flock order, the same points a
    /// renderer plots. Present only when `save_positions_in_snapshot` is set.
    #[serde(default)]
    pub positions: Option<Vec<(i32, i32)>>,
}
