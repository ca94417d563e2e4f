use std::io::Write;

use chrono::Utc;
use tracker::{
    query::vehicles_near,
    source::{Geocoder, VehicleSource},
};
use utility::time::format_relative_at;

use super::Console;
use crate::{args::NearArgs, error::CliError, format};

pub async fn run<G, V, O, E>(
    geocoder: &G,
    source: &V,
    args: &NearArgs,
    console: &mut Console<O, E>,
) -> Result<(), CliError>
where
    G: Geocoder,
    V: VehicleSource,
    O: Write,
    E: Write,
{
    let reference = geocoder
        .geocode(&args.location)
        .await
        .ok_or_else(|| CliError::LocationNotFound(args.location.clone()))?;
    writeln!(console.err, "Searching near: {} ({})\n", args.location, reference)?;

    let vehicles = source.current_vehicles().await;
    if vehicles.is_empty() {
        return Err(CliError::NoVehicleData);
    }

    let results = vehicles_near(vehicles, &reference, args.radius);
    let out = &mut console.out;
    if results.is_empty() {
        writeln!(out, "No plows found within {} miles.", args.radius)?;
        return Ok(());
    }

    writeln!(
        out,
        "Found {} plows within {} miles:\n",
        results.len(),
        args.radius
    )?;

    let now = Utc::now();
    for result in results.iter().take(args.limit) {
        let vehicle = &result.content;
        writeln!(
            out,
            "🚛 {} — {:.2} miles away",
            vehicle.name, result.distance_miles
        )?;
        writeln!(out, "   {}", format::speed_line(vehicle))?;
        writeln!(
            out,
            "   Updated: {}",
            format_relative_at(vehicle.observed_at, now)
        )?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use model::{vehicle::VehicleReading, GeoPoint};

    use super::*;
    use crate::commands::fakes::{console, stderr, stdout, FakeFeed, FakeGeocoder};

    fn geocoder() -> FakeGeocoder {
        FakeGeocoder {
            known: "Oakland",
            point: GeoPoint::new(40.4406, -79.9959),
        }
    }

    fn reading(name: &str, latitude: f64) -> VehicleReading {
        VehicleReading {
            name: name.to_owned(),
            observed_at: Some(Utc::now() - Duration::hours(2)),
            latitude: Some(latitude),
            longitude: Some(-79.9959),
            speed_mph: 12.0,
            heading_degrees: None,
        }
    }

    fn args(location: &str, radius: f64, limit: usize) -> NearArgs {
        NearArgs {
            location: location.to_owned(),
            radius,
            limit,
        }
    }

    fn feed() -> FakeFeed {
        FakeFeed {
            vehicles: vec![
                reading("PW-far", 40.60),
                reading("PW-mid", 40.46),
                reading("PW-near", 40.4410),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_nearest_first_and_truncated() {
        let mut console = console();
        run(&geocoder(), &feed(), &args("Oakland", 2.0, 1), &mut console)
            .await
            .unwrap();

        let out = stdout(&console);
        assert!(out.starts_with("Found 2 plows within 2 miles:\n\n"));
        assert!(out.contains("🚛 PW-near — 0.03 miles away\n"));
        assert!(out.contains("   🟢 Moving (12.0 mph)\n"));
        assert!(out.contains("   Updated: 2 hours ago\n"));
        assert!(!out.contains("PW-mid"));
        assert!(!out.contains("PW-far"));
        assert!(stderr(&console).starts_with("Searching near: Oakland (40.4406, -79.9959)"));
    }

    #[tokio::test]
    async fn test_none_in_radius_is_not_an_error() {
        let mut console = console();
        run(&geocoder(), &feed(), &args("Oakland", 0.01, 10), &mut console)
            .await
            .unwrap();
        assert_eq!(stdout(&console), "No plows found within 0.01 miles.\n");
    }

    #[tokio::test]
    async fn test_unknown_location() {
        let mut console = console();
        let result = run(&geocoder(), &feed(), &args("Atlantis", 2.0, 10), &mut console).await;
        assert!(matches!(result, Err(CliError::LocationNotFound(location)) if location == "Atlantis"));
        assert!(stdout(&console).is_empty());
    }

    #[tokio::test]
    async fn test_empty_feed_is_an_error() {
        let mut console = console();
        let result = run(
            &geocoder(),
            &FakeFeed::default(),
            &args("Oakland", 2.0, 10),
            &mut console,
        )
        .await;
        assert!(matches!(result, Err(CliError::NoVehicleData)));
    }
}
