//! blogdesk-cli: admin console for the blog API
//! Screens map to subcommands; each command drives the same session types a UI would.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;


use blogdesk::infra::telemetry;
use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, Ctx, load_settings};
use handlers::{analytics, auth, categories, posts, uploads};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    telemetry::init(&settings.logging)?;
    let ctx = Ctx::new(&settings)?;

    match cli.command {
        Commands::Auth(cmd) => auth::handle(&ctx, cmd.action).await?,
        Commands::Posts(cmd) => posts::handle(&ctx, cmd.action).await?,
        Commands::Categories(cmd) => categories::handle(&ctx, cmd.action).await?,
        Commands::Analytics => analytics::handle(&ctx).await?,
        Commands::Uploads(cmd) => uploads::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
