use std::io::Write;

use chrono::Utc;
use tracker::{query::list_vehicles, source::VehicleSource};
use utility::time::format_relative_at;

use super::Console;
use crate::{args::StatusArgs, error::CliError, format};

pub async fn run<V, O, E>(
    source: &V,
    args: &StatusArgs,
    console: &mut Console<O, E>,
) -> Result<(), CliError>
where
    V: VehicleSource,
    O: Write,
    E: Write,
{
    let vehicles = source.current_vehicles().await;
    if vehicles.is_empty() {
        return Err(CliError::NoVehicleData);
    }

    let vehicles = list_vehicles(vehicles, args.active);
    let out = &mut console.out;
    if vehicles.is_empty() {
        writeln!(out, "No active plows currently moving.")?;
        return Ok(());
    }

    let title = if args.active {
        "🚛 Active"
    } else {
        "📊 All"
    };
    writeln!(out, "{title} Snow Plows ({} vehicles):\n", vehicles.len())?;

    let now = Utc::now();
    for vehicle in &vehicles {
        writeln!(out, "{}", vehicle.name)?;
        writeln!(out, "  Status: {}", format::status_line(vehicle))?;
        writeln!(
            out,
            "  Location: {}",
            format::coordinates(vehicle.latitude, vehicle.longitude)
        )?;
        if let Some(heading) = vehicle.heading_degrees {
            writeln!(out, "  Heading: {}", format::heading(heading))?;
        }
        writeln!(
            out,
            "  Last update: {}",
            format_relative_at(vehicle.observed_at, now)
        )?;
        writeln!(out)?;
    }

    Ok(())
}
