use std::io;

use clap::Parser;
use oml_catalog::cli::Cli;

mod logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let stdout = io::stdout();
    oml_catalog::run(cli, &mut stdout.lock())?;
    Ok(())
}
