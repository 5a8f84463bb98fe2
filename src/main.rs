use clap::Parser;

mod changelog;
mod changeset;
mod cli;
mod command;
mod config;
mod error;
mod exec;
mod forge;
mod manifest;
mod outputs;
mod repo;
mod result;
mod setup;
mod tool;

#[cfg(test)]
mod test_helpers;

use crate::result::Result;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("changesets_action")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    if let Err(err) = command::run::execute(&cli_args).await {
        // surface the failure to the hosting workflow before exiting non-zero
        outputs::annotate_error(&format!("{err:#}"));
        return Err(err);
    }

    Ok(())
}
