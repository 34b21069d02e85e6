mod cli;
mod download;
mod reading;
mod subsetter;
#[cfg(test)]
mod test_support;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use subsetter::CopernicusMarineToolbox;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Insitu(args) => {
            let summary = command::insitu(args).await?;
            println!("{}", summary);
        }
        Commands::Subset(args) => {
            let toolbox = CopernicusMarineToolbox::new(&args.toolbox);
            let completed = command::subset(args, &toolbox).await?;
            println!("{} subset requests completed", completed);
        }
    }

    Ok(())
}
