//! Helpers for configuration tests that run inside a `figment::Jail`.
//!
//! The jail gives each test a scratch working directory and restores any
//! environment variables it sets, which is exactly what layered
//! configuration loading needs.

use anyhow::{Result, anyhow};

use crate::env;

/// Runs `f` inside a [`figment::Jail`] and returns the closure's value.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure produced no value"))
}

/// Runs `f` inside a [`figment::Jail`] after removing every environment
/// variable whose name starts with `prefix`.
///
/// Variables exported by the surrounding shell would otherwise leak into the
/// layer under test. They are restored once the jail has been torn down.
///
/// # Errors
///
/// As for [`with_jail`].
pub fn with_clean_jail<F, T>(prefix: &str, f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let _lock = env::lock();
    let _cleared = env::clear_prefixed(prefix);
    with_jail(f)
}

/// Converts any displayable error into a [`figment::Error`] so library
/// errors can cross the jail boundary with `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a map_err adapter, which passes the error by value"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
