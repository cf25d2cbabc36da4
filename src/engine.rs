use crate::boid::Boid;
use crate::flock::Flock;
use boids_common::{FlockParams, Vector2D};

/// The three steering contributions computed for one boid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub separation: Vector2D,
}

/// Computes local steering rules and advances a [`Flock`] one tick at a time.
///
/// Every rule scans the whole flock for every boid, so a tick costs O(n²).
/// Boids are updated in place in ascending index order: boid `i` sees the
/// same-tick state of boids `0..i` and the previous-tick state of the rest.
#[derive(Debug, Clone)]
pub struct FlockingEngine {
    params: FlockParams,
}

impl FlockingEngine {
    pub fn new(params: FlockParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    /// Advances every boid by one tick: wrap, steer, integrate.
    pub fn tick(&self, flock: &mut Flock) {
        let boids = flock.boids_mut();
        for index in 0..boids.len() {
            boids[index].wrap_edges(self.params.world_width, self.params.world_height);

            let steering = self.steering(boids, index);

            let boid = &mut boids[index];
            boid.apply_force(steering.alignment);
            boid.apply_force(steering.cohesion);
            boid.apply_force(steering.separation);
            boid.update(self.params.max_speed);
        }
    }

    /// All three rules for the boid at `index`, read against `boids` as it is now.
    pub fn steering(&self, boids: &[Boid], index: usize) -> Steering {
        Steering {
            alignment: self.alignment(boids, index),
            cohesion: self.cohesion(boids, index),
            separation: self.separation(boids, index),
        }
    }

    /// Steer toward the average heading of neighbors.
    pub fn alignment(&self, boids: &[Boid], index: usize) -> Vector2D {
        let mut steering = Vector2D::zero();
        let mut total = 0usize;
        for (other, _) in neighbors(boids, index, self.params.alignment_radius) {
            steering += other.velocity;
            total += 1;
        }

        if total > 0 {
            steering /= total as f64;
            steering.limit(self.params.max_speed);
            steering -= boids[index].velocity;
            steering.limit(self.params.max_force);
        }
        steering
    }

    /// Steer toward the average position of neighbors.
    pub fn cohesion(&self, boids: &[Boid], index: usize) -> Vector2D {
        let mut steering = Vector2D::zero();
        let mut total = 0usize;
        for (other, _) in neighbors(boids, index, self.params.cohesion_radius) {
            steering += other.position;
            total += 1;
        }

        if total > 0 {
            steering /= total as f64;
            steering -= boids[index].position;
            steering.limit(self.params.max_force);
        }
        steering
    }

    /// Steer away from close neighbors, weighted by inverse distance.
    ///
    /// A distinct boid at exactly the same position has no direction to push
    /// along and is skipped. The final limit runs even when nothing was found.
    pub fn separation(&self, boids: &[Boid], index: usize) -> Vector2D {
        let position = boids[index].position;
        let mut steering = Vector2D::zero();
        let mut total = 0usize;
        for (other, distance) in neighbors(boids, index, self.params.separation_radius) {
            if distance <= 0.0 {
                continue;
            }
            steering += (position - other.position) / distance;
            total += 1;
        }

        if total > 0 {
            steering /= total as f64;
        }
        steering.limit(self.params.max_force);
        steering
    }
}

/// Every boid other than `boids[index]` strictly closer than `radius`, with its
/// distance. Self-exclusion is by index so identical twins still see each other.
fn neighbors<'a>(
    boids: &'a [Boid],
    index: usize,
    radius: f64,
) -> impl Iterator<Item = (&'a Boid, f64)> + 'a {
    let position = boids[index].position;
    boids
        .iter()
        .enumerate()
        .filter(move |&(other_index, _)| other_index != index)
        .map(move |(_, other)| (other, position.distance(other.position)))
        .filter(move |&(_, distance)| distance < radius)
}
