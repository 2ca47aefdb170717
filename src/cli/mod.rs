//! Command-line interface for pvsadm
//!
//! [`run`] is the whole startup sequence: build the command tree, parse,
//! bind options, resolve the API key, then dispatch with a frozen [`Context`].

pub mod commands;
pub mod context;
pub mod help;
pub mod registry;

mod output;

pub use context::Context;
pub use output::Output;
pub use registry::{Executable, Registry};

use crate::audit::Auditor;
use crate::cloud::CloudClient;
use crate::config::Settings;
use crate::credentials;
use crate::logging;
use crate::options::Options;
use anyhow::Result;
use std::ffi::OsString;
use std::sync::Arc;
use tracing::{debug, warn};

/// Parse `args` and run the selected subcommand.
///
/// `auditor` is built by the caller before anything is parsed and is never
/// rebound, even when `--audit-file` names another path. `lookup` reads
/// environment variables.
///
/// Parse failures, including `--help` and `--version`, come back as a
/// [`clap::Error`] inside the returned error.
pub fn run<I, T, F>(
    args: I,
    auditor: Arc<Auditor>,
    client: Arc<dyn CloudClient>,
    lookup: F,
) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: FnOnce(&str) -> Option<String>,
{
    let registry = Registry::with_builtin_commands();
    let mut cmd = registry.build();
    let matches = cmd.try_get_matches_from_mut(args)?;

    let mut options = Options::from_matches(&matches);

    // Broken settings only cost the tool its log preferences
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    logging::init(&settings.log, options.verbose);
    if let Some(err) = settings_error {
        warn!("{err:#}, using default settings");
    }

    credentials::resolve_api_key(&mut options, lookup);

    if options.audit_file != auditor.path() {
        debug!(
            requested = %options.audit_file.display(),
            active = %auditor.path().display(),
            "--audit-file is not applied, audit entries go to the default file"
        );
    }

    let ctx = Context::new(options, auditor, client);
    registry.dispatch(&mut cmd, &ctx, &matches)
}
