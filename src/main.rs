use anyhow::Result;
use clap::Parser;
use log::{info, warn, error, debug, trace};
use std::path::PathBuf;
use std::time::Instant;

use boids_common::SimulationConfig;
use boids_engine::output::{self, OutputFormat};
use boids_engine::Simulation;

/// Headless boids flocking run
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override `timing.total_ticks` from the config
    #[arg(long)]
    ticks: Option<u32>,
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    let args = Args::parse();

    info!("Starting Boids Flocking Engine...");

    // --- Load Configuration ---
    let mut config = SimulationConfig::load(&args.config)?;
    if let Some(ticks) = args.ticks {
        info!("Overriding total_ticks from command line: {}", ticks);
        config.timing.total_ticks = ticks;
    }

    // --- Initialize Simulation ---
    let mut sim = Simulation::new(config)?;
    debug!("Flock Parameters: {:#?}", sim.params());

    // --- Simulation Loop ---
    let total_ticks = sim.config().timing.total_ticks;
    let mut record_interval_ticks = sim.config().timing.record_interval_ticks;
    if record_interval_ticks == 0 {
        warn!("Record interval of 0 ticks is invalid. Recording every tick.");
        record_interval_ticks = 1;
    }
    info!("Recording snapshot every {} ticks.", record_interval_ticks);

    info!("Starting simulation loop for {} ticks...", total_ticks);
    let start_time = Instant::now();
    let mut previous_print_time = start_time;

    // --- Initial Snapshot (tick = 0) ---
    info!("Recording initial snapshot (tick 0)...");
    sim.record_snapshot();

    for tick in 0..total_ticks {
        let tick_start_time = Instant::now();
        sim.step();
        let tick_duration = tick_start_time.elapsed();

        let current_time = Instant::now();
        let print_interval_secs = 5.0;
        let should_print_status = current_time.duration_since(previous_print_time).as_secs_f64() >= print_interval_secs;
        let is_record_tick = (tick + 1) % record_interval_ticks == 0;
        let is_last_tick = tick == total_ticks - 1;

        if is_record_tick || is_last_tick {
            sim.record_snapshot();
        }

        if should_print_status || is_last_tick {
            info!(
                "Tick [{}/{}] | Boids: {} | Tick Time: {:6.2} ms | Elapsed: {:.2} s",
                tick + 1,
                total_ticks,
                sim.boid_count(),
                tick_duration.as_secs_f64() * 1000.0,
                start_time.elapsed().as_secs_f64()
            );
            previous_print_time = current_time;
        } else {
            trace!(
                "Tick [{}/{}] completed in {:.2} ms",
                tick + 1,
                total_ticks,
                tick_duration.as_secs_f64() * 1000.0
            );
        }
    }

    let total_duration = start_time.elapsed();
    let ticks_per_sec = if total_duration.as_secs_f64() > 0.0 {
        total_ticks as f64 / total_duration.as_secs_f64()
    } else {
        0.0
    };
    info!(
        "Simulation finished in {:.3} seconds ({:.1} ticks/s).",
        total_duration.as_secs_f64(),
        ticks_per_sec
    );

    // --- Save Recorded Data ---
    let output_config = &sim.config().output;
    if output_config.save_snapshots {
        let format = OutputFormat::from_config(output_config.format.as_deref());
        let path = format.snapshot_path(&output_config.base_filename);
        let snapshots = sim.get_recorded_snapshots();
        match output::write_snapshots(&path, format, snapshots) {
            Ok(()) => info!("{} snapshots saved to {} ({:?})", snapshots.len(), path.display(), format),
            Err(e) => error!("{:#}", e),
        }
    } else {
        info!("Skipping saving snapshots as per config (save_snapshots is false).");
    }

    if output_config.save_positions {
        let path = output::final_positions_path(&output_config.base_filename);
        match output::write_final_positions(&path, &sim.get_results()) {
            Ok(()) => info!("Final positions saved to {}", path.display()),
            Err(e) => error!("{:#}", e),
        }
    } else {
        info!("Skipping saving final positions as per config.");
    }

    info!("Simulation Complete.");
    Ok(())
}
