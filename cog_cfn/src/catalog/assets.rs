//! Opaque text assets embedded into fragments.

use std::fmt;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;
use tracing::debug;

use crate::{CfnError, CfnResult};

/// Key of the single-entry object that marks an asset placeholder.
pub const ASSET_PLACEHOLDER: &str = "Cog::Asset";

/// Assets compiled into the crate, by file name.
pub const BUNDLED_ASSETS: [(&str, &str); 3] = [
    ("cloud-config", include_str!("../../assets/cloud-config")),
    ("docker-compose.yml", include_str!("../../assets/docker-compose.yml")),
    ("lambda-timestamp.js", include_str!("../../assets/lambda-timestamp.js")),
];

/// Where asset text is read from.
///
/// An asset directory, when given, is consulted first; names it does not
/// contain fall back to [`BUNDLED_ASSETS`].
pub struct AssetSource {
    dir: Option<AssetDir>,
}

struct AssetDir {
    path: Utf8PathBuf,
    handle: Dir,
}

impl AssetSource {
    /// Uses only the bundled assets.
    #[must_use]
    pub const fn bundled() -> Self {
        Self { dir: None }
    }

    /// Reads assets from `path`, falling back to the bundled set.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::Io`] if the directory cannot be opened.
    pub fn from_dir(path: &Utf8Path) -> CfnResult<Self> {
        let handle =
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|err| CfnError::io(path, err))?;
        Ok(Self {
            dir: Some(AssetDir {
                path: path.to_path_buf(),
                handle,
            }),
        })
    }

    /// Loads the text of the asset called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::Io`] when the asset directory holds the file but
    /// it cannot be read, and [`CfnError::MissingAsset`] when neither the
    /// directory nor the bundled set has it.
    pub fn load(&self, name: &str) -> CfnResult<String> {
        if let Some(dir) = &self.dir {
            match dir.handle.read_to_string(name) {
                Ok(text) => return Ok(text),
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    debug!(
                        asset = name,
                        dir = %dir.path,
                        "asset not in directory; using bundled copy"
                    );
                }
                Err(err) => return Err(CfnError::io(&dir.path.join(name), err)),
            }
        }
        BUNDLED_ASSETS
            .iter()
            .find(|(bundled, _)| *bundled == name)
            .map(|(_, text)| (*text).to_owned())
            .ok_or_else(|| CfnError::MissingAsset {
                name: name.to_owned(),
            })
    }

    /// Replaces every asset placeholder inside `value` with the asset text.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::load`] failures.
    pub fn resolve(&self, value: &mut Value) -> CfnResult<()> {
        if let Some(name) = placeholder_name(value) {
            *value = Value::String(self.load(&name)?);
            return Ok(());
        }
        match value {
            Value::Object(map) => {
                for child in map.values_mut() {
                    self.resolve(child)?;
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.resolve(item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl Default for AssetSource {
    fn default() -> Self {
        Self::bundled()
    }
}

impl fmt::Debug for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetSource")
            .field("dir", &self.dir.as_ref().map(|dir| dir.path.as_str()))
            .finish()
    }
}

fn placeholder_name(value: &Value) -> Option<String> {
    let map = value.as_object().filter(|map| map.len() == 1)?;
    map.get(ASSET_PLACEHOLDER)
        .and_then(Value::as_str)
        .map(str::to_owned)
}
