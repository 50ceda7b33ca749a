//! Error types for the `cog-cfn` command.

use camino::Utf8PathBuf;
use cog_cfn::CfnError;
use thiserror::Error;

/// Errors surfaced by the `cog-cfn` pipeline.
#[derive(Debug, Error)]
pub enum AppError {
    /// Loading the configuration or assembling the template failed.
    #[error(transparent)]
    Assembly(#[from] CfnError),

    /// The output path names a directory.
    #[error("output path {path} is a directory")]
    InvalidOutputPath {
        /// Offending path.
        path: Utf8PathBuf,
    },

    /// Writing the document to stdout failed.
    #[error("failed to write template to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}
