use std::{fs::File, io::Write, path::PathBuf};

use geofence::{
    GeofenceEvaluator, GeofenceMonitor, LocationSample, TransitionEvent, config::DefinitionArgs,
};
use time::OffsetDateTime;

#[derive(Debug, serde::Deserialize)]
struct LocationCsv {
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

#[derive(Debug, serde::Serialize)]
struct EventCsv {
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    event: TransitionEvent,
    message: &'static str,
}

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv file with `timestamp,latitude,longitude,altitude` columns
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("locations.csv"), required = false)]
    pub input: PathBuf,
    /// Output csv file with transitions. _Note_: will truncate old file if exists
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("events.csv"), required = false)]
    pub output: PathBuf,
    #[command(flatten)]
    pub definition: DefinitionArgs,
    /// Don't save changes
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
    /// Print notifications to stdout
    #[arg(short, long, default_value_t = false, required = false)]
    pub print: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Args {
        input,
        output,
        definition,
        dry,
        print,
    } = <Args as clap::Parser>::parse();

    definition.init_logging();

    let definition = definition.load()?;
    let ceiling = definition.ceiling_altitude_m();

    tracing::info!(
        latitude = definition.center.latitude,
        longitude = definition.center.longitude,
        radius_m = definition.radius_m,
        ceiling_m = ceiling,
        "monitoring geofence"
    );

    let evaluator = GeofenceEvaluator::new(definition)
        .map_err(|e| format!("Failed to build geofence. Reason: {e}"))?;

    let stdout = std::io::stdout();
    let mut monitor = GeofenceMonitor::new(evaluator, |_: TransitionEvent, message: &str| {
        if print {
            let _ = writeln!(stdout.lock(), "{message}");
        }
    });

    let mut rdr = csv::Reader::from_reader(
        File::open(input).map_err(|e| format!("Failed to read input file. Reason: {e}"))?,
    );

    let mut wrt = match dry {
        true => None,
        false => Some(
            csv::Writer::from_path(&output)
                .map_err(|e| format!("Failed to create output file. Reason: {e}"))?,
        ),
    };

    let mut total = 0;
    let mut skipped = 0;
    let mut events = 0;

    for row in rdr.deserialize::<LocationCsv>() {
        total += 1;

        let LocationCsv {
            timestamp,
            latitude,
            longitude,
            altitude,
        } = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(row = total, error = %e, "skipping malformed row");
                skipped += 1;
                continue;
            }
        };

        let event = match monitor.process(&LocationSample::new(latitude, longitude, altitude)) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(row = total, error = %e, "skipping location sample");
                skipped += 1;
                continue;
            }
        };

        events += 1;

        if let Some(wrt) = &mut wrt {
            wrt.serialize(EventCsv {
                timestamp,
                event,
                message: event.message(),
            })?;
        }
    }

    println!("Total: {total} samples | skipped: {skipped} | transitions: {events}");

    if let Some(mut wrt) = wrt {
        println!("Saving to {}", output.to_string_lossy());
        wrt.flush()?;
    }

    println!("Done!");

    Ok(())
}
