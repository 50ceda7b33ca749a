//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter; `RUST_LOG` is consulted
/// when it is unset.
pub const LOG_ENV: &str = "COG_CFN_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// The filter directive taken from the environment.
#[must_use]
pub fn filter_directive() -> String {
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned())
}

/// Installs the global subscriber.
///
/// An unparsable directive falls back to warnings only. Installing twice is
/// harmless; the first subscriber stays in place.
pub fn init() {
    let filter = EnvFilter::try_new(filter_directive())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_helpers::env;

    #[test]
    fn prefers_the_tool_variable() {
        let _lock = env::lock();
        let _tool = env::set_var(LOG_ENV, "cog_cfn=debug");
        let _rust = env::set_var("RUST_LOG", "trace");
        assert_eq!(filter_directive(), "cog_cfn=debug");
    }

    #[test]
    fn falls_back_to_rust_log_then_default() {
        let _lock = env::lock();
        let _tool = env::set_var(LOG_ENV, "  ");
        {
            let _rust = env::set_var("RUST_LOG", "info");
            assert_eq!(filter_directive(), "info");
        }
        let _rust = env::remove_var("RUST_LOG");
        assert_eq!(filter_directive(), DEFAULT_DIRECTIVE);
    }
}
