//! API key resolution
//!
//! An explicit `--api-key` always wins. Otherwise the key is taken from the
//! `IBMCLOUD_API_KEY` environment variable when it holds a non-empty value.

use crate::options::{ApiKey, Options};
use tracing::info;

/// Environment variable consulted when `--api-key` is not given
pub const API_KEY_ENV: &str = "IBMCLOUD_API_KEY";

/// Where the resolved API key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Flag,
    Environment,
    Unset,
}

/// Fill in `options.api_key` from the environment if it was not supplied.
///
/// `lookup` stands in for the process environment. It is called at most once,
/// and never when the flag already provided a key. A missing key is not an
/// error here; subcommands that need one check for it themselves.
pub fn resolve_api_key<F>(options: &mut Options, lookup: F) -> CredentialSource
where
    F: FnOnce(&str) -> Option<String>,
{
    if !options.api_key.is_empty() {
        return CredentialSource::Flag;
    }

    match lookup(API_KEY_ENV) {
        Some(key) if !key.is_empty() => {
            info!("Using an API key from {} environment variable", API_KEY_ENV);
            options.api_key = ApiKey::new(key);
            CredentialSource::Environment
        }
        _ => CredentialSource::Unset,
    }
}

/// Process environment lookup used by the binary
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
