//! Layered configuration for an assembly run.
//!
//! Values are merged from, lowest to highest precedence: built-in defaults, a
//! TOML file, environment variables prefixed with [`ENV_PREFIX`], and finally
//! caller-supplied overrides (typically the command line).
//!
//! Environment values are parsed as scalars, so text and path settings also
//! accept values such as `2024` or `true` and read them back as text.

mod text;

use std::io::{Error as IoError, ErrorKind};

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CfnError, CfnResult};

/// Prefix for environment variables that feed the configuration.
pub const ENV_PREFIX: &str = "COG_CFN_";

/// Configuration file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "cog-cfn.toml";

const DEFAULT_DESCRIPTION: &str = "Cog ChatOps Platform";
const DEFAULT_COG_IMAGE: &str = "operable/cog:1.0.0-rc.1";
const DEFAULT_RELAY_IMAGE: &str = "operable/relay:1.0.0-rc.1";

/// Settings that shape the generated template and where it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Template description.
    #[serde(deserialize_with = "text::text")]
    pub description: String,
    /// Default value of the `CogImage` parameter.
    #[serde(deserialize_with = "text::text")]
    pub cog_image: String,
    /// Default value of the `RelayImage` parameter.
    #[serde(deserialize_with = "text::text")]
    pub relay_image: String,
    /// Directory whose files override the bundled assets.
    #[serde(deserialize_with = "text::optional_text")]
    pub asset_dir: Option<Utf8PathBuf>,
    /// Output file; the document goes to stdout when unset.
    #[serde(deserialize_with = "text::optional_text")]
    pub output: Option<Utf8PathBuf>,
    /// Pretty-print the JSON document.
    pub pretty: bool,
    /// Reject duplicate registrations and undeclared group members.
    pub strict: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_owned(),
            cog_image: DEFAULT_COG_IMAGE.to_owned(),
            relay_image: DEFAULT_RELAY_IMAGE.to_owned(),
            asset_dir: None,
            output: None,
            pretty: true,
            strict: false,
        }
    }
}

impl AssemblyConfig {
    /// Builds the layered figment without extracting it.
    ///
    /// When `path` is `None` the [`DEFAULT_CONFIG_FILE`] is merged if it
    /// exists. An explicit `path` is merged as given; see [`Self::load`] for
    /// the existence check.
    #[must_use]
    pub fn figment(path: Option<&Utf8Path>) -> Figment {
        let file = path.map_or_else(
            || Utf8PathBuf::from(DEFAULT_CONFIG_FILE),
            Utf8Path::to_path_buf,
        );
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file.as_std_path()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the configuration without overrides.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::Io`] when an explicit `path` does not exist and
    /// [`CfnError::Configuration`] when a layer fails to parse.
    pub fn load(path: Option<&Utf8Path>) -> CfnResult<Self> {
        Self::load_with_overrides(path, &NoOverrides {})
    }

    /// Loads the configuration and merges `overrides` on top.
    ///
    /// Fields the overrides do not serialise leave the lower layers intact,
    /// so override structs should skip unset values.
    ///
    /// # Errors
    ///
    /// As for [`Self::load`].
    pub fn load_with_overrides<T: Serialize>(
        path: Option<&Utf8Path>,
        overrides: &T,
    ) -> CfnResult<Self> {
        if let Some(explicit) = path
            && !explicit.is_file()
        {
            return Err(CfnError::io(
                explicit,
                IoError::new(ErrorKind::NotFound, "configuration file not found"),
            ));
        }
        let config: Self = Self::figment(path)
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(CfnError::configuration)?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }
}

#[derive(Serialize)]
struct NoOverrides {}
