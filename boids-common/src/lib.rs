pub mod config;
pub mod sim_params;
pub mod snapshot;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{SimulationConfig, UniverseConfig, FlockConfig, SteeringConfig, TimingConfig, OutputConfig};
pub use sim_params::FlockParams;
pub use snapshot::Snapshot;
pub use vecmath::Vector2D;
