//! CLI error handling with user-facing messages.

use std::fmt;
use std::io;
use std::process;

use crate::default_address::DEFAULT_ADDRESS_VAR;

#[derive(Debug)]
pub enum CliError {
    /// `check` without an address and without a configured default
    MissingAddress,
    /// Geocoder found nothing for the given text
    LocationNotFound(String),
    /// Vehicle feed returned nothing
    NoVehicleData,
    /// Track feed returned nothing for a vehicle
    NoHistory { vehicle: String },
    /// Look-back window reaches before the earliest representable time
    WindowOutOfRange { hours: u32 },
    /// HTTP client could not be built
    HttpClient(String),
    Output(io::Error),
}

impl CliError {
    /// Exit the process with an error message and status 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::MissingAddress => {
                eprintln!("Usage: snowplow check \"123 Main St, Pittsburgh\"");
                eprintln!();
                eprintln!("Or set a default in TOOLS.md:");
                eprintln!("  ## Snow Plow");
                eprintln!("  Default address: 123 Main St, Pittsburgh, PA 15213");
                eprintln!();
                eprintln!("Or export {}.", DEFAULT_ADDRESS_VAR);
            }
            CliError::NoHistory { .. } => {
                eprintln!("The vehicle ID may be incorrect, or no data in this time window.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingAddress => write!(f, "Address required."),
            CliError::LocationNotFound(location) => {
                write!(f, "Could not find location '{}'", location)
            }
            CliError::NoVehicleData => write!(
                f,
                "No vehicle data available. There may not be an active snow event."
            ),
            CliError::NoHistory { vehicle } => write!(f, "No history found for {}.", vehicle),
            CliError::WindowOutOfRange { hours } => {
                write!(f, "Cannot look back {} hours.", hours)
            }
            CliError::HttpClient(msg) => write!(f, "Failed to create HTTP client: {}", msg),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Output(e)
    }
}
