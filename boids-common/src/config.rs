use serde::{Deserialize, Serialize};
use anyhow::Result;
use crate::sim_params::{
    FlockParams, DEFAULT_ALIGNMENT_RADIUS, DEFAULT_COHESION_RADIUS, DEFAULT_MAX_FORCE,
    DEFAULT_MAX_SPEED, DEFAULT_NUM_BOIDS, DEFAULT_SEPARATION_RADIUS, DEFAULT_WORLD_HEIGHT,
    DEFAULT_WORLD_WIDTH,
};
use std::path::Path;

// Simulation bounds. Boids wrap toroidally at these edges.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UniverseConfig {
    pub width: f64,
    pub height: f64,
}

// Population and initial placement
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FlockConfig {
    pub num_boids: u32,
    #[serde(default)]
    pub seed: u64,
}

// Steering constants. Every field falls back to the classic values.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SteeringConfig {
    #[serde(default = "default_alignment_radius")]
    pub alignment_radius: f64,
    #[serde(default = "default_cohesion_radius")]
    pub cohesion_radius: f64,
    #[serde(default = "default_separation_radius")]
    pub separation_radius: f64,
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    #[serde(default = "default_max_force")]
    pub max_force: f64,
}

// Configuration for timing, counted in ticks
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TimingConfig {
    pub total_ticks: u32,
    #[serde(default = "default_record_interval_ticks")]
    pub record_interval_ticks: u32,
}

// Configuration for output settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub base_filename: String,
    pub save_snapshots: bool,
    pub save_positions: bool,
    #[serde(default)]
    pub save_positions_in_snapshot: bool,
    pub format: Option<String>, // Output format: "json", "bincode", "messagepack"
}

// Main simulation configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationConfig {
    pub universe: UniverseConfig,
    pub flock: FlockConfig,
    #[serde(default)]
    pub steering: SteeringConfig,
    pub timing: TimingConfig,
    pub output: OutputConfig,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        SteeringConfig {
            alignment_radius: DEFAULT_ALIGNMENT_RADIUS,
            cohesion_radius: DEFAULT_COHESION_RADIUS,
            separation_radius: DEFAULT_SEPARATION_RADIUS,
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            universe: UniverseConfig {
                width: DEFAULT_WORLD_WIDTH,
                height: DEFAULT_WORLD_HEIGHT,
            },
            flock: FlockConfig {
                num_boids: DEFAULT_NUM_BOIDS,
                seed: 0,
            },
            steering: SteeringConfig::default(),
            timing: TimingConfig {
                total_ticks: 1000,
                record_interval_ticks: default_record_interval_ticks(),
            },
            output: OutputConfig {
                base_filename: "boids".to_string(),
                save_snapshots: true,
                save_positions: true,
                save_positions_in_snapshot: true,
                format: Some("json".to_string()),
            },
        }
    }
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config = Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))?;

        Ok(config)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let universe = &self.universe;
        if !(universe.width.is_finite() && universe.width > 0.0)
            || !(universe.height.is_finite() && universe.height > 0.0)
        {
            anyhow::bail!(
                "universe width and height must be positive and finite (got {} x {}).",
                universe.width,
                universe.height
            );
        }
        if self.flock.num_boids == 0 {
            anyhow::bail!("num_boids must be greater than 0.");
        }

        let steering = &self.steering;
        for (name, radius) in [
            ("alignment_radius", steering.alignment_radius),
            ("cohesion_radius", steering.cohesion_radius),
            ("separation_radius", steering.separation_radius),
        ] {
            if !(radius.is_finite() && radius > 0.0) {
                anyhow::bail!("{} must be positive (got {}).", name, radius);
            }
        }
        if !(steering.max_speed.is_finite() && steering.max_speed >= 0.0) {
            anyhow::bail!("max_speed must be non-negative (got {}).", steering.max_speed);
        }
        if !(steering.max_force.is_finite() && steering.max_force >= 0.0) {
            anyhow::bail!("max_force must be non-negative (got {}).", steering.max_force);
        }

        if self.output.base_filename.trim().is_empty() {
            anyhow::bail!("output.base_filename must not be empty.");
        }

        Ok(())
    }

    /// Converts the configuration into the parameters used at runtime.
    pub fn get_flock_params(&self) -> FlockParams {
        FlockParams {
            world_width: self.universe.width,
            world_height: self.universe.height,
            num_boids: self.flock.num_boids,
            alignment_radius: self.steering.alignment_radius,
            cohesion_radius: self.steering.cohesion_radius,
            separation_radius: self.steering.separation_radius,
            max_speed: self.steering.max_speed,
            max_force: self.steering.max_force,
        }
    }
}

fn default_alignment_radius() -> f64 {
    DEFAULT_ALIGNMENT_RADIUS
}

fn default_cohesion_radius() -> f64 {
    DEFAULT_COHESION_RADIUS
}

fn default_separation_radius() -> f64 {
    DEFAULT_SEPARATION_RADIUS
}

fn default_max_speed() -> f64 {
    DEFAULT_MAX_SPEED
}

fn default_max_force() -> f64 {
    DEFAULT_MAX_FORCE
}

fn default_record_interval_ticks() -> u32 {
    10
}
