//! Library interface for the `cog-cfn` command.
//!
//! The binary parses [`cli::Args`], layers them over the file and
//! environment configuration, assembles the Cog template, and hands it to
//! [`output::emit`].

use std::io::Write;

use cog_cfn::{AssemblyConfig, stack};
use tracing::debug;

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;

use crate::cli::Args;
use crate::error::AppError;
use crate::output::Destination;

/// Runs one generation with the given arguments.
///
/// # Errors
///
/// Propagates configuration, assembly, and output failures.
pub fn run<W: Write>(args: &Args, stdout: &mut W) -> Result<Destination, AppError> {
    let config = AssemblyConfig::load_with_overrides(args.config.as_deref(), &args.overrides())?;
    let template = stack::assemble(&config)?;
    let destination = output::emit(&template, &config, stdout)?;
    debug!(?destination, "template emitted");
    Ok(destination)
}
