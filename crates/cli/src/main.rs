use clap::{CommandFactory, Parser};
use cli::{args::Args, commands, commands::Console, settings::Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let Some(command) = args.command else {
        if let Err(why) = Args::command().print_help() {
            log::error!("Failed to print help: {why}");
        }
        return;
    };

    let settings = Settings::from_env();
    log::debug!("{settings:?}");

    let mut console = Console::stdio();
    if let Err(err) = commands::run(command, &settings, &mut console).await {
        err.exit();
    }
}
