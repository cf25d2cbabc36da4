//! Deterministic boids flocking engine.
//!
//! A [`Flock`] of boids is advanced one tick at a time by a [`FlockingEngine`]
//! applying alignment, cohesion and separation, then integrating and wrapping
//! at the world edges. [`Simulation`] drives the engine and records snapshots.

pub mod boid;
pub mod engine;
pub mod flock;
pub mod metrics;
pub mod output;
pub mod simulation;

pub use boid::Boid;
pub use engine::{FlockingEngine, Steering};
pub use flock::Flock;
pub use output::OutputFormat;
pub use simulation::Simulation;
