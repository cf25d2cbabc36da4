use anyhow::{Context, Result};
use boids_common::Snapshot;
use log::error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// On-disk encoding for recorded snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    /// A `u32` snapshot count followed by each snapshot, bincode-encoded.
    Bincode,
    MessagePack,
}

impl OutputFormat {
    /// Reads the `output.format` setting. Missing means JSON; unknown values
    /// are logged and fall back to JSON.
    pub fn from_config(format: Option<&str>) -> Self {
        match format.unwrap_or("json") {
            "json" => OutputFormat::Json,
            "bincode" => OutputFormat::Bincode,
            "messagepack" => OutputFormat::MessagePack,
            other => {
                error!("Unknown output format: {}. Using JSON instead.", other);
                OutputFormat::Json
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bin",
            OutputFormat::MessagePack => "msgpack",
        }
    }

    pub fn snapshot_path(self, base_filename: &str) -> PathBuf {
        PathBuf::from(format!("{}_snapshots.{}", base_filename, self.extension()))
    }
}

pub fn final_positions_path(base_filename: &str) -> PathBuf {
    PathBuf::from(format!("{}_final_positions.csv", base_filename))
}

/// Writes all snapshots to `path` in `format`.
pub fn write_snapshots(path: &Path, format: OutputFormat, snapshots: &[Snapshot]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Error creating snapshot file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut writer, snapshots)
                .context("Error serializing snapshots to JSON")?;
        }
        OutputFormat::Bincode => {
            bincode::serialize_into(&mut writer, &(snapshots.len() as u32))
                .context("Error writing snapshot count header")?;
            for snapshot in snapshots {
                bincode::serialize_into(&mut writer, snapshot)
                    .context("Error serializing snapshot to bincode")?;
            }
        }
        OutputFormat::MessagePack => {
            rmp_serde::encode::write(&mut writer, snapshots)
                .context("Error serializing snapshots to MessagePack")?;
        }
    }

    writer
        .flush()
        .with_context(|| format!("Error writing snapshot file '{}'", path.display()))?;
    Ok(())
}

/// Writes full-precision final positions as a two-column CSV.
pub fn write_final_positions(path: &Path, positions: &[(f64, f64)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Error creating CSV file '{}'", path.display()))?;
    writer.write_record(["x", "y"])?;
    for (x, y) in positions {
        writer.write_record(&[format!("{:.4}", x), format!("{:.4}", y)])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boids_common::Vector2D;
    use std::io::BufReader;

    fn sample_snapshots() -> Vec<Snapshot> {
        (0..3)
            .map(|i| Snapshot {
                tick: i * 10,
                boid_count: 2,
                center_of_mass: Vector2D::new(1.5, 2.5),
                mean_speed: 1.0,
                order_parameter: 0.5,
                neighbor_counts_distribution: vec![0, 2],
                positions: if i == 1 { None } else { Some(vec![(1, 2), (3, 4)]) },
            })
            .collect()
    }

    #[test]
    fn test_format_from_config() {
        assert_eq!(OutputFormat::from_config(None), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config(Some("bincode")), OutputFormat::Bincode);
        assert_eq!(OutputFormat::from_config(Some("messagepack")), OutputFormat::MessagePack);
        assert_eq!(OutputFormat::from_config(Some("yaml")), OutputFormat::Json);
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            OutputFormat::Bincode.snapshot_path("run"),
            PathBuf::from("run_snapshots.bin")
        );
        assert_eq!(final_positions_path("run"), PathBuf::from("run_final_positions.csv"));
    }

    #[test]
    fn test_bincode_stream_has_count_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.bin");
        let snapshots = sample_snapshots();
        write_snapshots(&path, OutputFormat::Bincode, &snapshots).unwrap();

        let mut reader = BufReader::new(File::open(&path).unwrap());
        let count: u32 = bincode::deserialize_from(&mut reader).unwrap();
        assert_eq!(count, 3);
        let read: Vec<Snapshot> = (0..count)
            .map(|_| bincode::deserialize_from(&mut reader).unwrap())
            .collect();
        assert_eq!(read, snapshots);
    }

    #[test]
    fn test_json_and_messagepack_written() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = sample_snapshots();

        let json_path = dir.path().join("s.json");
        write_snapshots(&json_path, OutputFormat::Json, &snapshots).unwrap();
        let text = std::fs::read_to_string(&json_path).unwrap();
        let parsed: Vec<Snapshot> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, snapshots);

        let msgpack_path = dir.path().join("s.msgpack");
        write_snapshots(&msgpack_path, OutputFormat::MessagePack, &snapshots).unwrap();
        let bytes = std::fs::read(&msgpack_path).unwrap();
        let parsed: Vec<Snapshot> = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(parsed, snapshots);
    }

    #[test]
    fn test_final_positions_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final.csv");
        write_final_positions(&path, &[(1.0, 2.5), (1899.125, 0.0)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "x,y\n1.0000,2.5000\n1899.1250,0.0000\n");
    }
}
