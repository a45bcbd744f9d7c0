use clap::Parser;
use color_eyre::Result;
use tracing::info;

use taipei_households::app::App;
use taipei_households::cli::CliArgs;
use taipei_households::config::init_app_config;
use taipei_households::logging::init_tracing;
use taipei_households::{event, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Piped output gets the plain report
    let headless = args.wants_headless() || !is_terminal();
    init_tracing(headless, config.debug)?;
    info!(api_url = %config.api_url, fallback = %config.fallback_path.display(), "Starting");

    let mut app = App::new(config).await?;

    if headless {
        return event::run_headless(&mut app, args.json).await;
    }

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup_terminal_state(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
