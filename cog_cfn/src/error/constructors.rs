//! Constructors for `CfnError`.

use camino::Utf8Path;
use figment::Error as FigmentError;

use super::CfnError;

impl CfnError {
    /// Construct a configuration error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cog_cfn::CfnError;
    /// let e = CfnError::configuration(figment::Error::from("boom"));
    /// assert!(matches!(e, CfnError::Configuration(_)));
    /// ```
    #[must_use]
    pub fn configuration(source: FigmentError) -> Self {
        Self::Configuration(Box::new(source))
    }

    /// Construct an I/O error tagged with the path that failed.
    #[must_use]
    pub fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Construct an invalid-fragment error.
    #[must_use]
    pub fn invalid_fragment(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFragment {
            fragment: fragment.into(),
            message: message.into(),
        }
    }
}
