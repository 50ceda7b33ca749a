//! Command-line interface definitions for `cog-cfn`.

use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;

/// Parsed CLI arguments for `cog-cfn`.
#[derive(Debug, Parser)]
#[command(name = "cog-cfn")]
#[command(about = "Generate the Cog CloudFormation template")]
#[command(version)]
pub struct Args {
    /// Configuration file; `cog-cfn.toml` in the working directory is used
    /// when present and no path is given.
    #[arg(long, short = 'c', value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Write the template to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "path")]
    pub output: Option<Utf8PathBuf>,
    /// Directory whose files replace the bundled assets.
    #[arg(long, value_name = "dir")]
    pub asset_dir: Option<Utf8PathBuf>,
    /// Default Cog Docker image.
    #[arg(long, value_name = "image")]
    pub cog_image: Option<String>,
    /// Default Relay Docker image.
    #[arg(long, value_name = "image")]
    pub relay_image: Option<String>,
    /// Template description.
    #[arg(long, value_name = "text")]
    pub description: Option<String>,
    /// Emit compact JSON.
    #[arg(long = "compact")]
    pub is_compact: bool,
    /// Fail on duplicate parameters and undeclared group members.
    #[arg(long = "strict")]
    pub is_strict: bool,
}

impl Args {
    /// The configuration layer contributed by explicitly supplied flags.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            description: self.description.clone(),
            cog_image: self.cog_image.clone(),
            relay_image: self.relay_image.clone(),
            asset_dir: self.asset_dir.clone(),
            output: self.output.clone(),
            pretty: self.is_compact.then_some(false),
            strict: self.is_strict.then_some(true),
        }
    }
}

/// Flag values merged over the file and environment layers; unset fields
/// are not serialised and leave lower layers untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cog_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relay_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset_dir: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pretty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strict: Option<bool>,
}
