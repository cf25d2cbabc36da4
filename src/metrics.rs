use crate::boid::Boid;
use boids_common::Vector2D;
use log::warn;
use rayon::prelude::*;

/// Size of the neighbor-count histogram. Counts at or above the last bin land in it.
pub const MAX_EXPECTED_NEIGHBORS: usize = 64;

/// Mean position of the flock; zero for an empty flock.
pub fn center_of_mass(boids: &[Boid]) -> Vector2D {
    if boids.is_empty() {
        return Vector2D::zero();
    }
    let mut sum = Vector2D::zero();
    for boid in boids {
        sum += boid.position;
    }
    sum / boids.len() as f64
}

pub fn mean_speed(boids: &[Boid]) -> f64 {
    if boids.is_empty() {
        return 0.0;
    }
    boids.iter().map(|b| b.velocity.magnitude()).sum::<f64>() / boids.len() as f64
}

/// Polarization (0 = headings cancel out, 1 = everyone flies the same way).
pub fn order_parameter(boids: &[Boid]) -> f64 {
    let avg_speed = mean_speed(boids);
    if avg_speed < 1e-10 {
        return 0.0;
    }
    let mut avg_velocity = Vector2D::zero();
    for boid in boids {
        avg_velocity += boid.velocity;
    }
    avg_velocity /= boids.len() as f64;
    (avg_velocity.magnitude() / avg_speed).min(1.0)
}

/// Number of other boids strictly within `radius` of each boid, in flock order.
///
/// Read-only, so the boids are scanned in parallel.
pub fn neighbor_counts(boids: &[Boid], radius: f64) -> Vec<u32> {
    boids
        .par_iter()
        .enumerate()
        .map(|(idx, boid)| {
            boids
                .iter()
                .enumerate()
                .filter(|&(other_idx, other)| {
                    other_idx != idx && boid.position.distance(other.position) < radius
                })
                .count() as u32
        })
        .collect()
}

/// `histogram[n]` = number of boids with exactly `n` neighbors.
pub fn neighbor_count_histogram(counts: &[u32]) -> Vec<u32> {
    let mut histogram = vec![0u32; MAX_EXPECTED_NEIGHBORS];
    let last = histogram.len() - 1;
    let mut overflowed = 0usize;
    for &count in counts {
        let bin = count as usize;
        if bin < last {
            histogram[bin] += 1;
        } else {
            if bin > last {
                overflowed += 1;
            }
            histogram[last] += 1;
        }
    }
    if overflowed > 0 {
        warn!(
            "{} boids have more than {} neighbors; counted in the last bin.",
            overflowed, last
        );
    }
    histogram
}
