use clap::Parser;
use tracing::debug;

use pay_cli::cli::Cli;
use pay_cli::config::CliConfig;
use pay_cli::{commands, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_optional(cli.config.as_deref())?;
    logging::init_logging(config.log_level.as_deref())?;
    debug!(?cli, "parsed command line");

    let output = commands::run(&cli, &config)?;
    print!("{output}");

    Ok(())
}
