//! src/main.rs

use anyhow::Result;
use clap::Parser;

mod api;
mod cli;
mod commands;
mod config;
mod history;
mod mock;
mod prompt;
mod render;
mod selection;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::handle_init().await?,
        Commands::Generate(args) => commands::generate::handle_generate(args).await?,
        Commands::History { action } => commands::history::handle_history(action).await?,
    }

    Ok(())
}
