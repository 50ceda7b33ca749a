//! Delivery of the generated template.

use std::io::Write;

use camino::Utf8PathBuf;
use cog_cfn::{AssemblyConfig, Template};

use crate::error::AppError;

/// Where a document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Written to the provided stdout handle.
    Stdout,
    /// Written to a file.
    File(Utf8PathBuf),
}

/// Writes `template` to the configured output file, or to `stdout` when
/// none is configured.
///
/// # Errors
///
/// Returns [`AppError::InvalidOutputPath`] when the output names a
/// directory, [`AppError::Stdout`] when stdout cannot be written, and
/// assembly errors from rendering or writing the file.
pub fn emit<W: Write>(
    template: &Template,
    config: &AssemblyConfig,
    stdout: &mut W,
) -> Result<Destination, AppError> {
    match &config.output {
        Some(path) if path.is_dir() => Err(AppError::InvalidOutputPath { path: path.clone() }),
        Some(path) => {
            template.write(path, config.pretty)?;
            Ok(Destination::File(path.clone()))
        }
        None => {
            let document = template.generate(config.pretty)?;
            writeln!(stdout, "{document}")
                .and_then(|()| stdout.flush())
                .map_err(AppError::Stdout)?;
            Ok(Destination::Stdout)
        }
    }
}
