//! Writing a finished document to disk.

use std::io::{ErrorKind, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use tracing::info;

use super::Template;
use crate::{CfnError, CfnResult};

impl Template {
    /// Writes the generated document to `path`, creating parent directories
    /// and replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::Io`] when `path` has no file name or the file
    /// cannot be written, and [`CfnError::Json`] if rendering fails.
    pub fn write(&self, path: &Utf8Path, pretty: bool) -> CfnResult<()> {
        let Some(file_name) = path.file_name() else {
            return Err(CfnError::io(
                path,
                std::io::Error::new(ErrorKind::InvalidInput, "output path has no file name"),
            ));
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let document = self.generate(pretty)?;
        let dir = ensure_dir(parent)?;
        let mut file = dir
            .open_with(
                file_name,
                OpenOptions::new().write(true).create(true).truncate(true),
            )
            .map_err(|err| CfnError::io(path, err))?;
        file.write_all(document.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .map_err(|err| CfnError::io(path, err))?;
        info!(path = %path, bytes = document.len(), "wrote template");
        Ok(())
    }
}

fn ensure_dir(path: &Utf8Path) -> CfnResult<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|create_err| CfnError::io(path, create_err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|open_err| CfnError::io(path, open_err))
        }
        Err(err) => Err(CfnError::io(path, err)),
    }
}
