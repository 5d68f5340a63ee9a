mod app;
mod cli;
mod config;
mod event;
mod http;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = config::init_app_config()?;
    let _log_guard = logging::init(&config)?;
    let client = http::client(&config)?;

    // Without a terminal there is nothing to browse in, so print instead
    if args.headless || !is_terminal() {
        return event::run_headless(&client, &config.start_route, args.json).await;
    }

    let mut app = App::new(config.start_route.clone(), config.server.to_string());

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app, &client).await;
    terminal::cleanup_terminal_state(true, true);

    result.map(|()| ExitCode::SUCCESS)
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
