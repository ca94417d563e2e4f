//! Subcommand handlers.
//!
//! Handlers are generic over the data sources and write to a [`Console`],
//! so they run the same against the live services and against test
//! doubles.

use std::io::{self, Stderr, Stdout, Write};

use arcgis::{client::FeatureServiceClient, feed::PlowFeed};
use chrono::{DateTime, Duration, Utc};
use nominatim::NominatimClient;

use crate::{args::Command, default_address::default_address, error::CliError, settings::Settings};

pub mod check;
pub mod history;
pub mod near;
pub mod status;

pub const HISTORY_MAX_POINTS: usize = 50;

/// Results go to `out`, progress notes to `err`.
pub struct Console<O: Write, E: Write> {
    pub out: O,
    pub err: E,
}

impl Console<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

/// Build the service clients from `settings` and dispatch `command`.
pub async fn run<O: Write, E: Write>(
    command: Command,
    settings: &Settings,
    console: &mut Console<O, E>,
) -> Result<(), CliError> {
    let feed_client = FeatureServiceClient::new(&settings.user_agent, settings.feed_timeout)
        .map_err(|why| CliError::HttpClient(why.to_string()))?;
    let feed = PlowFeed::new(
        feed_client,
        settings.vehicles_url.as_str(),
        settings.history_url.as_str(),
    );

    match command {
        Command::Status(args) => status::run(&feed, &args, console).await,
        Command::History(args) => history::run(&feed, &args, console).await,
        Command::Near(args) => {
            let geocoder = geocoder(settings)?;
            near::run(&geocoder, &feed, &args, console).await
        }
        Command::Check(args) => {
            let geocoder = geocoder(settings)?;
            check::run(&geocoder, &feed, default_address, &args, console).await
        }
    }
}

/// Start of a look-back window of `hours` ending at `now`.
pub fn window_start(now: DateTime<Utc>, hours: u32) -> Result<DateTime<Utc>, CliError> {
    Duration::try_hours(i64::from(hours))
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or(CliError::WindowOutOfRange { hours })
}

fn geocoder(settings: &Settings) -> Result<NominatimClient, CliError> {
    NominatimClient::new(
        settings.geocoder_url.as_str(),
        &settings.user_agent,
        settings.geocode_timeout,
    )
    .map_err(|why| CliError::HttpClient(why.to_string()))
}
