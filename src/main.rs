use clap::Parser;
use tracing::{error, Level};

use credit_score::{
    cli::{init_config, log_level, run_score, Cli, Commands},
    configuration::{AppState, Config, State},
    error::Error,
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = init_config();

    init_tracing(log_level(&config))?;
    let config = config?;

    match cli.command {
        Some(Commands::Score { input, text }) => run_score(input, text),
        Some(Commands::Serve) | None => serve(config).await,
    }
}

fn init_tracing(level: Level) -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

async fn serve(config: Config) -> Result<(), Error> {
    let state = State::new(config)?;
    let app_state = AppState::new(state);

    server::server_task(&app_state).await
}
