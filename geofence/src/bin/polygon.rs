use std::path::PathBuf;

use geofence::{GeoPoint, GeofencePolygon, config::DefinitionArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Output file. _Note_: will truncate old file if exists
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("polygon.csv"), required = false)]
    pub output: PathBuf,
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,
    #[command(flatten)]
    pub definition: DefinitionArgs,
    /// Don't save changes
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
    /// Print polygon to stdout
    #[arg(short, long, default_value_t = false, required = false)]
    pub print: bool,
}

fn to_csv(polygon: &GeofencePolygon) -> Result<String, Box<dyn std::error::Error>> {
    let mut wrt = csv::Writer::from_writer(Vec::new());

    for vertex in polygon.vertices() {
        wrt.serialize(vertex)?;
    }

    let bytes = wrt
        .into_inner()
        .map_err(|e| format!("Failed to write csv. Reason: {e}"))?;

    Ok(String::from_utf8(bytes)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Args {
        output,
        format,
        definition,
        dry,
        print,
    } = <Args as clap::Parser>::parse();

    definition.init_logging();

    let definition = definition.load()?;
    let polygon = GeofencePolygon::from_definition(&definition)
        .map_err(|e| format!("Failed to build geofence. Reason: {e}"))?;

    let rendered = match format {
        Format::Csv => to_csv(&polygon)?,
        Format::Json => serde_json::to_string_pretty(polygon.vertices())?,
    };

    let GeoPoint {
        latitude,
        longitude,
    } = definition.center;
    println!(
        "Polygon around ({latitude}, {longitude}), {} m: {} points",
        definition.radius_m,
        polygon.len()
    );

    if print {
        println!("{rendered}");
    }

    if !dry {
        println!("Save to {}", output.to_string_lossy());

        std::fs::write(output, rendered)
            .map_err(|e| format!("Failed to save polygon. Reason: {e}"))?;
    }

    println!("Done!");

    Ok(())
}
