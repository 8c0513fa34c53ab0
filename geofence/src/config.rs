//! Command line configuration shared by the binaries.
//!
//! The geofence is read from an optional JSON file (missing fields take the
//! [`GeofenceDefinition::default`] values) and then individual fields are
//! overridden from the command line.

use std::{error::Error, path::PathBuf};

use tracing_subscriber::EnvFilter;

use crate::{GeoPoint, GeofenceDefinition};

#[derive(Debug, Clone, clap::Args)]
pub struct DefinitionArgs {
    /// JSON file with the geofence definition
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Latitude of the center in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,
    /// Longitude of the center in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,
    /// Radius in meters
    #[arg(long)]
    pub radius: Option<f64>,
    /// Ground elevation at the center, meters above sea level
    #[arg(long, allow_negative_numbers = true)]
    pub ground_elevation: Option<f64>,
    /// Ceiling height over the ground in meters
    #[arg(long)]
    pub ceiling_height: Option<f64>,
    /// Number of polygon edges
    #[arg(long)]
    pub segments: Option<usize>,
    /// Log filter, e.g. `info` or `geofence=debug`
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl DefinitionArgs {
    pub fn load(&self) -> Result<GeofenceDefinition, Box<dyn Error>> {
        let mut definition = match &self.config {
            Some(path) => serde_json::from_reader::<_, GeofenceDefinition>(
                std::fs::File::open(path)
                    .map_err(|e| format!("Failed to open config file. Reason: {e}"))?,
            )
            .map_err(|e| format!("Failed to parse config file. Reason: {e}"))?,
            None => GeofenceDefinition::default(),
        };

        if self.latitude.is_some() || self.longitude.is_some() {
            let center = GeoPoint::new(
                self.latitude.unwrap_or(definition.center.latitude),
                self.longitude.unwrap_or(definition.center.longitude),
            );
            definition = definition.set_center(center);
        }

        if let Some(radius) = self.radius {
            definition = definition.set_radius_m(radius);
        }

        if let Some(ground_elevation) = self.ground_elevation {
            definition = definition.set_ground_elevation_m(ground_elevation);
        }

        if let Some(ceiling_height) = self.ceiling_height {
            definition = definition.set_ceiling_height_m(ceiling_height);
        }

        if let Some(segments) = self.segments {
            definition = definition.set_segments(segments);
        }

        definition
            .validate()
            .map_err(|e| format!("Invalid geofence definition. Reason: {e}"))?;

        Ok(definition)
    }

    /// Installs a stderr subscriber, `RUST_LOG` wins over `--log-level`.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        definition: DefinitionArgs,
    }

    #[test]
    fn defaults_without_arguments() {
        let cli = Cli::parse_from(["test"]);

        assert_eq!(cli.definition.load().unwrap(), GeofenceDefinition::default());
        assert_eq!(cli.definition.log_level, "info");
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from([
            "test",
            "--longitude",
            "-0.1246",
            "--radius",
            "120",
            "--segments",
            "32",
        ]);
        let definition = cli.definition.load().unwrap();

        assert_eq!(definition.center, GeoPoint::new(30.723398, -0.1246));
        assert_eq!(definition.radius_m, 120.0);
        assert_eq!(definition.segments, 32);
        assert_eq!(definition.ceiling_altitude_m(), 325.0);
    }

    #[test]
    fn rejects_invalid_override() {
        let cli = Cli::parse_from(["test", "--radius", "0"]);

        assert!(cli.definition.load().is_err());
    }

    #[test]
    fn missing_config_file() {
        let cli = Cli::parse_from(["test", "--config", "/nonexistent/geofence.json"]);

        assert!(cli.definition.load().is_err());
    }
}
