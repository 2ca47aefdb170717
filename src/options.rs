//! Resolved invocation options
//!
//! Options are bound once from the parsed command line, completed by the
//! credential resolver, and read-only for every subcommand afterwards.

use clap::ArgMatches;
use clap::parser::ValueSource;
use std::fmt;
use std::path::PathBuf;

/// Audit log file used when `--audit-file` is not given.
pub const DEFAULT_AUDIT_FILE: &str = "pvsadm.log";

/// Argument ids of the persistent flags, in registration order.
pub const API_KEY: &str = "api-key";
pub const DEBUG: &str = "debug";
pub const AUDIT_FILE: &str = "audit-file";
pub const VERBOSE: &str = "verbose";

/// IBM Cloud API key. Empty means unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Expose the raw key for handing to an API client.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

/// Options shared by every subcommand
#[derive(Debug, Clone)]
pub struct Options {
    /// IBM Cloud API key (`--api-key`, falls back to `IBMCLOUD_API_KEY`)
    pub api_key: ApiKey,

    /// Enable PowerVS API debugging
    pub debug: bool,

    /// Audit log file requested on the command line
    pub audit_file: PathBuf,

    /// Logging verbosity (`-v` count)
    pub verbose: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            debug: false,
            audit_file: PathBuf::from(DEFAULT_AUDIT_FILE),
            verbose: 0,
        }
    }
}

impl Options {
    /// Bind the persistent flags from parsed matches.
    ///
    /// Persistent flags are accepted on every node of the command tree, so the
    /// matched subcommand chain is walked and the deepest value that was
    /// actually typed on the command line wins. Untouched flags keep their
    /// defaults.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let chain = subcommand_chain(matches);
        let mut options = Self::default();

        if let Some(key) = explicit::<String>(&chain, API_KEY) {
            options.api_key = ApiKey::new(key);
        }
        if let Some(debug) = explicit::<bool>(&chain, DEBUG) {
            options.debug = debug;
        }
        if let Some(path) = explicit::<PathBuf>(&chain, AUDIT_FILE) {
            options.audit_file = path;
        }
        options.verbose = chain
            .iter()
            .filter_map(|m| m.try_get_one::<u8>(VERBOSE).ok().flatten().copied())
            .fold(0u8, |acc, n| acc.saturating_add(n));

        options
    }
}

/// Root matches followed by each matched subcommand, outermost first.
pub(crate) fn subcommand_chain(matches: &ArgMatches) -> Vec<&ArgMatches> {
    let mut chain = vec![matches];
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        chain.push(sub);
        current = sub;
    }
    chain
}

fn explicit<T>(chain: &[&ArgMatches], id: &str) -> Option<T>
where
    T: Clone + Send + Sync + 'static,
{
    chain.iter().rev().find_map(|m| {
        if m.value_source(id) != Some(ValueSource::CommandLine) {
            return None;
        }
        m.try_get_one::<T>(id).ok().flatten().cloned()
    })
}
