use crate::boid::Boid;
use anyhow::Result;
use boids_common::{FlockParams, Vector2D};
use log::debug;
use rand::distr::Uniform;
use rand::prelude::*;

/// Fixed-size, ordered collection of boids.
///
/// The order is the update order within a tick. Boids are created once and
/// never added or removed afterwards, so the engine only gets a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Flock {
    boids: Vec<Boid>,
}

impl Flock {
    /// Places `params.num_boids` boids uniformly in `[0, width) x [0, height)`,
    /// each flying at unit speed along a uniformly random heading.
    ///
    /// For every boid the RNG is drawn for x, then y, then the heading.
    pub fn initialize<R: Rng>(params: &FlockParams, rng: &mut R) -> Result<Self> {
        let x_dist = Uniform::new(0.0, params.world_width)?;
        let y_dist = Uniform::new(0.0, params.world_height)?;
        let heading_dist = Uniform::new(0.0, std::f64::consts::TAU)?;

        let boids: Vec<Boid> = (0..params.num_boids)
            .map(|_| {
                let x = rng.sample(&x_dist);
                let y = rng.sample(&y_dist);
                let heading = rng.sample(&heading_dist);
                Boid::with_heading(Vector2D::new(x, y), heading)
            })
            .collect();

        debug!(
            "Placed {} boids in a {} x {} world.",
            boids.len(),
            params.world_width,
            params.world_height
        );
        Ok(Self { boids })
    }

    /// Same as [`Flock::initialize`] with a `StdRng` seeded from `seed`.
    pub fn from_seed(params: &FlockParams, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::initialize(params, &mut rng)
    }

    /// Wraps an explicit set of boids, e.g. a hand-built scenario.
    pub fn from_boids(boids: Vec<Boid>) -> Self {
        Self { boids }
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub(crate) fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    /// Integer-truncated positions in flock order, ready to plot as points.
    pub fn positions(&self) -> Vec<(i32, i32)> {
        self.boids.iter().map(Boid::pixel).collect()
    }
}
