use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "snowplow")]
#[command(about = "Pittsburgh snow plow tracker", long_about = None)]
#[command(after_help = "Data source: https://pittsburghpa.gov/dpw/snow-plow-tracker")]
pub struct Args {
    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current plow status
    Status(StatusArgs),
    /// Find plows near a location
    Near(NearArgs),
    /// Check if a street was plowed
    Check(CheckArgs),
    /// Show vehicle route history
    History(HistoryArgs),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StatusArgs {
    /// Only show moving plows
    #[arg(long)]
    pub active: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct NearArgs {
    /// Address, zip, or neighborhood
    pub location: String,

    /// Search radius in miles
    #[arg(short, long, default_value_t = 2.0)]
    pub radius: f64,

    /// Max results
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CheckArgs {
    /// Street address to check (defaults to the configured address)
    pub address: Option<String>,

    /// Hours to look back
    #[arg(short = 't', long, default_value_t = 12)]
    pub hours: u32,

    /// Radius in feet
    #[arg(short, long, default_value_t = 200.0)]
    pub radius: f64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct HistoryArgs {
    /// Vehicle ID (e.g., PW-110)
    pub vehicle: String,

    /// Hours to show
    #[arg(short = 't', long, default_value_t = 6)]
    pub hours: u32,
}
