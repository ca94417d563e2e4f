use std::io::Write;

use chrono::Utc;
use tracker::{query::group_track_by_day, source::TrackSource};

use super::{window_start, Console, HISTORY_MAX_POINTS};
use crate::{args::HistoryArgs, error::CliError, format};

pub async fn run<T, O, E>(
    source: &T,
    args: &HistoryArgs,
    console: &mut Console<O, E>,
) -> Result<(), CliError>
where
    T: TrackSource,
    O: Write,
    E: Write,
{
    let since = window_start(Utc::now(), args.hours)?;

    let out = &mut console.out;
    writeln!(
        out,
        "Route history for {} (last {} hours):\n",
        args.vehicle, args.hours
    )?;

    let track = source.track_since(since, Some(&args.vehicle)).await;
    let history = group_track_by_day(track, HISTORY_MAX_POINTS);
    if history.total == 0 {
        return Err(CliError::NoHistory {
            vehicle: args.vehicle.clone(),
        });
    }

    writeln!(out, "Found {} GPS points:\n", history.total)?;
    for group in &history.days {
        writeln!(out, "{}", format::day_label(group.day))?;
        for point in &group.points {
            writeln!(out, "{}", format::track_line(point))?;
        }
    }
    if history.remaining > 0 {
        writeln!(out, "\n  ... and {} more points", history.remaining)?;
    }

    Ok(())
}
