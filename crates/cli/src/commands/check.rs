use std::io::Write;

use chrono::Utc;
use tracker::{
    query::{was_plowed, PlowCheck},
    source::{Geocoder, TrackSource},
};
use utility::time::format_relative_at;

use super::{window_start, Console};
use crate::{args::CheckArgs, error::CliError, format::plural};

pub async fn run<G, T, F, O, E>(
    geocoder: &G,
    source: &T,
    default_address: F,
    args: &CheckArgs,
    console: &mut Console<O, E>,
) -> Result<(), CliError>
where
    G: Geocoder,
    T: TrackSource,
    F: FnOnce() -> Option<String>,
    O: Write,
    E: Write,
{
    let address = match &args.address {
        Some(address) => address.clone(),
        None => {
            let address = default_address().ok_or(CliError::MissingAddress)?;
            writeln!(console.err, "Using default address: {address}\n")?;
            address
        }
    };

    let reference = geocoder
        .geocode(&address)
        .await
        .ok_or_else(|| CliError::LocationNotFound(address.clone()))?;

    let now = Utc::now();
    let since = window_start(now, args.hours)?;

    let out = &mut console.out;
    writeln!(out, "Checking plow activity near: {address}")?;
    writeln!(
        out,
        "Looking back {} hours, within {} feet\n",
        args.hours, args.radius
    )?;

    let track = source.track_since(since, None).await;
    if track.is_empty() {
        writeln!(
            out,
            "No route history available. There may not be recent snow activity."
        )?;
        return Ok(());
    }

    let report = match was_plowed(track, &reference, args.radius, since) {
        PlowCheck::Plowed(report) => report,
        PlowCheck::NotPlowed => {
            writeln!(
                out,
                "❌ No plow activity found within {} feet of this address",
                args.radius
            )?;
            writeln!(out, "   in the last {} hours.", args.hours)?;
            return Ok(());
        }
    };

    let most_recent = report.most_recent();
    writeln!(out, "✅ YES — Your street has been plowed!")?;
    writeln!(
        out,
        "\n   Most recent: {}",
        format_relative_at(most_recent.point.observed_at, now)
    )?;
    writeln!(out, "   Plow: {}", most_recent.point.name)?;
    writeln!(
        out,
        "   Distance: {:.0} feet from address",
        most_recent.distance_feet
    )?;

    if report.vehicles().len() > 1 {
        writeln!(
            out,
            "\n   {} total passes by {} different plows:",
            report.passes().len(),
            report.vehicles().len()
        )?;
        for (vehicle, passes) in report.pass_counts() {
            writeln!(out, "     {vehicle}: {}", plural(*passes, "pass", "passes"))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use model::{track::TrackPoint, GeoPoint};

    use super::*;
    use crate::commands::fakes::{console, stderr, stdout, FakeFeed, FakeGeocoder};

    const HOME: &str = "5000 Forbes Ave";

    fn geocoder() -> FakeGeocoder {
        FakeGeocoder {
            known: HOME,
            point: GeoPoint::new(40.4406, -79.9959),
        }
    }

    fn args(address: Option<&str>) -> CheckArgs {
        CheckArgs {
            address: address.map(str::to_owned),
            hours: 12,
            radius: 200.0,
        }
    }

    fn sample(name: &str, minutes_ago: i64, latitude: f64) -> TrackPoint {
        TrackPoint {
            name: name.to_owned(),
            observed_at: Some(Utc::now() - Duration::minutes(minutes_ago)),
            latitude: Some(latitude),
            longitude: Some(-79.9959),
        }
    }

    fn feed(track: Vec<TrackPoint>) -> FakeFeed {
        FakeFeed {
            track,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_plowed_by_several_vehicles() {
        let feed = feed(vec![
            sample("PW-2", 20, 40.4407),
            sample("PW-1", 90, 40.4406),
            sample("PW-1", 200, 40.4405),
            sample("PW-3", 30, 40.4500),
        ]);
        let mut console = console();
        run(&geocoder(), &feed, || None, &args(Some(HOME)), &mut console)
            .await
            .unwrap();

        let out = stdout(&console);
        assert!(out.starts_with(
            "Checking plow activity near: 5000 Forbes Ave\nLooking back 12 hours, within 200 feet\n\n"
        ));
        assert!(out.contains("✅ YES — Your street has been plowed!\n"));
        assert!(out.contains("   Most recent: 20 mins ago\n"));
        assert!(out.contains("   Plow: PW-2\n"));
        assert!(out.contains("   Distance: 36 feet from address\n"));
        assert!(out.contains("   3 total passes by 2 different plows:\n"));
        assert!(out.contains("     PW-1: 2 passes\n     PW-2: 1 pass\n"));
        assert!(!out.contains("PW-3"));

        let requests = feed.track_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, None);
        let window = Utc::now() - requests[0].0;
        assert!(window >= Duration::hours(12) && window < Duration::hours(12) + Duration::minutes(1));
    }

    #[tokio::test]
    async fn test_single_plow_has_no_breakdown() {
        let feed = feed(vec![sample("PW-2", 20, 40.4407)]);
        let mut console = console();
        run(&geocoder(), &feed, || None, &args(Some(HOME)), &mut console)
            .await
            .unwrap();
        let out = stdout(&console);
        assert!(out.contains("   Plow: PW-2\n"));
        assert!(!out.contains("different plows"));
    }

    #[tokio::test]
    async fn test_not_plowed_is_not_an_error() {
        let feed = feed(vec![sample("PW-3", 30, 40.4500)]);
        let mut console = console();
        run(&geocoder(), &feed, || None, &args(Some(HOME)), &mut console)
            .await
            .unwrap();
        assert!(stdout(&console).ends_with(
            "❌ No plow activity found within 200 feet of this address\n   in the last 12 hours.\n"
        ));
    }

    #[tokio::test]
    async fn test_empty_history_is_not_an_error() {
        let mut console = console();
        run(&geocoder(), &feed(vec![]), || None, &args(Some(HOME)), &mut console)
            .await
            .unwrap();
        assert!(stdout(&console).ends_with(
            "No route history available. There may not be recent snow activity.\n"
        ));
    }

    #[tokio::test]
    async fn test_uses_default_address() {
        let feed = feed(vec![sample("PW-2", 20, 40.4407)]);
        let mut console = console();
        run(
            &geocoder(),
            &feed,
            || Some(HOME.to_owned()),
            &args(None),
            &mut console,
        )
        .await
        .unwrap();
        assert!(stderr(&console).starts_with("Using default address: 5000 Forbes Ave"));
        assert!(stdout(&console).contains("plowed!"));
    }

    #[tokio::test]
    async fn test_window_out_of_range_is_an_error() {
        let feed = feed(vec![sample("PW-2", 20, 40.4407)]);
        let mut console = console();
        let mut args = args(Some(HOME));
        args.hours = u32::MAX;
        let result = run(&geocoder(), &feed, || None, &args, &mut console).await;
        assert!(matches!(result, Err(CliError::WindowOutOfRange { hours: u32::MAX })));
        assert!(feed.track_requests.lock().unwrap().is_empty());
        assert!(stdout(&console).is_empty());
    }

    #[tokio::test]
    async fn test_missing_address() {
        let mut console = console();
        let result = run(&geocoder(), &feed(vec![]), || None, &args(None), &mut console).await;
        assert!(matches!(result, Err(CliError::MissingAddress)));
    }

    #[tokio::test]
    async fn test_explicit_address_skips_default() {
        let mut console = console();
        let result = run(
            &geocoder(),
            &feed(vec![]),
            || panic!("default address must not be consulted"),
            &args(Some("Nowhere Rd")),
            &mut console,
        )
        .await;
        assert!(matches!(result, Err(CliError::LocationNotFound(address)) if address == "Nowhere Rd"));
    }
}
