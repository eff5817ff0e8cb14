mod cli;
mod shell;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Args, Commands};
use soven::Config;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::new(args.data_dir.clone())?;
    init_logging(&config, args.verbose)?;

    match args.command {
        Commands::Register { username, password, assistant, interests } => {
            cli::handle_register(&config, username, password, assistant, interests).await
        }
        Commands::Chat { username, assistant } => {
            cli::handle_chat(&config, username, assistant).await
        }
        Commands::Status { username, assistant } => {
            cli::handle_status(&config, username, assistant)
        }
        Commands::Network => cli::handle_network(&config),
        Commands::Fetch { address } => cli::handle_fetch(&config, address).await,
    }
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::WARN)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
