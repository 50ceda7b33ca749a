//! CLI entrypoint for `cog-cfn`.

use clap::Parser;
use cog_cfn_cli::cli::Args;
use cog_cfn_cli::{logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();
    let args = Args::parse();
    let mut stdout = std::io::stdout().lock();
    run(&args, &mut stdout)?;
    Ok(())
}
