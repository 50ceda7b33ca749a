//! Primary error enum for template assembly.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type CfnResult<T> = Result<T, CfnError>;

/// Errors that can occur while assembling the template.
///
/// Permissive registration never produces an error; the duplicate and
/// undeclared variants are only returned by the checked operations
/// ([`crate::AssemblyContext::try_register`] and
/// [`crate::AssemblyContext::prepend_declared`]).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CfnError {
    /// A parameter with the same canonical id was already declared.
    #[error("parameter '{id}' is already declared")]
    DuplicateParameter {
        /// Canonical id that collided.
        id: String,
    },

    /// A presentation group referenced an id that was never declared.
    #[error("parameter '{id}' is not declared and cannot join a presentation group")]
    UndeclaredParameter {
        /// Id that was referenced.
        id: String,
    },

    /// A fragment referenced an asset that could not be found.
    #[error("asset '{name}' was not found in the asset directory or the bundled set")]
    MissingAsset {
        /// File name of the asset.
        name: String,
    },

    /// A template fragment did not have the expected shape.
    #[error("invalid template fragment '{fragment}': {message}")]
    InvalidFragment {
        /// Name of the fragment.
        fragment: String,
        /// Human-readable explanation.
        message: String,
    },

    /// Configuration could not be loaded or deserialised.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Box<FigmentError>),

    /// JSON parsing or serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
