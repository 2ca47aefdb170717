//! `pvsadm version`

use crate::cli::context::Context;
use crate::cli::registry::Executable;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub struct Version;

impl Executable for Version {
    fn command(&self) -> Command {
        Command::new("version").about("Print the version number")
    }

    fn execute(&self, ctx: &Context, _matches: &ArgMatches) -> Result<()> {
        ctx.output().line(&version_line());
        Ok(())
    }
}

fn version_line() -> String {
    // Set by the release pipeline
    let commit = option_env!("GIT_SHA").unwrap_or("unknown");
    format!(
        "Version: {}, Commit: {}, Target: {}-{}",
        crate::VERSION,
        commit,
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}
