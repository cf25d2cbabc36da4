use crate::engine::FlockingEngine;
use crate::flock::Flock;
use crate::metrics;
use anyhow::Result;
use boids_common::{FlockParams, SimulationConfig, Snapshot};
use log::{debug, info};
use rand::prelude::*;

/// Drives the flocking engine one tick at a time and records snapshots.
///
/// Owns the flock for its whole life; nothing else mutates it.
pub struct Simulation {
    /// The simulation configuration this run was built from.
    config: SimulationConfig,
    /// Runtime parameters derived from `config`.
    params: FlockParams,
    engine: FlockingEngine,
    flock: Flock,
    /// Number of ticks completed so far.
    current_tick: u32,
    /// Stores collected snapshots at record intervals.
    recorded_snapshots: Vec<Snapshot>,
}

impl Simulation {
    /// Creates a new `Simulation`, placing the flock with an RNG seeded from `flock.seed`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.flock.seed);
        Self::with_rng(config, &mut rng)
    }

    /// Creates a new `Simulation`, drawing the initial flock from `rng`.
    pub fn with_rng<R: Rng>(config: SimulationConfig, rng: &mut R) -> Result<Self> {
        let params = config.get_flock_params();
        let flock = Flock::initialize(&params, rng)?;
        info!(
            "Initialized flock of {} boids in a {} x {} world.",
            flock.len(),
            params.world_width,
            params.world_height
        );
        Ok(Self::from_flock(config, flock))
    }

    /// Runs `config` against a hand-built flock.
    pub fn from_flock(config: SimulationConfig, flock: Flock) -> Self {
        let params = config.get_flock_params();
        Self {
            config,
            params,
            engine: FlockingEngine::new(params),
            flock,
            current_tick: 0,
            recorded_snapshots: Vec::new(),
        }
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) {
        self.engine.tick(&mut self.flock);
        self.current_tick += 1;
    }

    /// Runs up to `max_ticks` ticks, asking `should_stop` before each one.
    /// Returns the number of ticks actually run.
    pub fn run_until<F>(&mut self, max_ticks: u32, mut should_stop: F) -> u32
    where
        F: FnMut(&Simulation) -> bool,
    {
        let mut ticks_run = 0;
        while ticks_run < max_ticks {
            if should_stop(self) {
                debug!("Stop requested after {} ticks.", ticks_run);
                break;
            }
            self.step();
            ticks_run += 1;
        }
        ticks_run
    }

    /// Collects the flock metrics and stores them as a Snapshot.
    pub fn record_snapshot(&mut self) {
        let boids = self.flock.boids();
        let counts = metrics::neighbor_counts(boids, self.params.alignment_radius);
        let neighbor_counts_distribution = metrics::neighbor_count_histogram(&counts);

        let positions = if self.config.output.save_positions_in_snapshot {
            Some(self.flock.positions())
        } else {
            None
        };

        let snapshot = Snapshot {
            tick: self.current_tick,
            boid_count: boids.len() as u32,
            center_of_mass: metrics::center_of_mass(boids),
            mean_speed: metrics::mean_speed(boids),
            order_parameter: metrics::order_parameter(boids),
            neighbor_counts_distribution,
            positions,
        };

        let avg_neighbors = if counts.is_empty() {
            0.0
        } else {
            counts.iter().map(|&c| c as f64).sum::<f64>() / counts.len() as f64
        };
        debug!(
            "Snapshot at tick {}: order={:.3}, mean_speed={:.3}, avg_neighbors={:.2}",
            snapshot.tick, snapshot.order_parameter, snapshot.mean_speed, avg_neighbors
        );

        self.recorded_snapshots.push(snapshot);
    }

    /// Current positions at full precision, in flock order.
    pub fn get_results(&self) -> Vec<(f64, f64)> {
        self.flock
            .boids()
            .iter()
            .map(|b| (b.position.x, b.position.y))
            .collect()
    }

    /// Integer-truncated positions for a renderer.
    pub fn positions(&self) -> Vec<(i32, i32)> {
        self.flock.positions()
    }

    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    pub fn boid_count(&self) -> usize {
        self.flock.len()
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn get_recorded_snapshots(&self) -> &[Snapshot] {
        &self.recorded_snapshots
    }
}
