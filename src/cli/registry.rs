//! Command tree assembly
//!
//! Subcommands are independent [`Executable`] units. The registry puts them
//! under the `pvsadm` root and gives every node of the tree the persistent
//! flags, so `--api-key` and friends work before or after any subcommand name.

use super::commands::{get::Get, image::Image, purge::Purge, version::Version};
use super::context::Context;
use super::help;
use crate::credentials::API_KEY_ENV;
use crate::options::{API_KEY, AUDIT_FILE, DEBUG, DEFAULT_AUDIT_FILE, VERBOSE};
use anyhow::{Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::path::PathBuf;

const ABOUT: &str = "pvsadm is a command for managing powervs infra";

const LONG_ABOUT: &str = "Power Systems Virtual Server projects deliver flexible compute capacity for \
Power Systems workloads.
Integrated with the IBM Cloud platform for on-demand provisioning.

This is a tool built for the Power Systems Virtual Server helps managing and maintaining the \
resources easily";

/// A subcommand that can be registered under the root
pub trait Executable: Send + Sync {
    /// The clap node for this subcommand, including any nested children.
    fn command(&self) -> Command;

    /// Run with the matches of this subcommand's own node.
    fn execute(&self, ctx: &Context, matches: &ArgMatches) -> Result<()>;
}

/// Ordered set of top-level subcommands
#[derive(Default)]
pub struct Registry {
    commands: Vec<(String, Box<dyn Executable>)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the subcommands shipped in this crate
    pub fn with_builtin_commands() -> Self {
        Self::new()
            .register(Purge)
            .register(Get)
            .register(Version)
            .register(Image)
    }

    /// Add a subcommand.
    ///
    /// # Panics
    ///
    /// If a subcommand with the same name is already registered.
    pub fn register(mut self, executable: impl Executable + 'static) -> Self {
        let name = executable.command().get_name().to_string();
        assert!(
            self.find(&name).is_none(),
            "subcommand `{name}` is registered twice"
        );
        self.commands.push((name, Box::new(executable)));
        self
    }

    pub fn find(&self, name: &str) -> Option<&dyn Executable> {
        self.commands
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, executable)| executable.as_ref())
    }

    /// Names in registration order
    #[cfg(test)]
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|(name, _)| name.as_str())
    }

    /// Build the full command tree.
    pub fn build(&self) -> Command {
        let root = Command::new("pvsadm")
            .about(ABOUT)
            .long_about(LONG_ABOUT)
            .version(crate::VERSION)
            .subcommands(self.commands.iter().map(|(_, executable)| executable.command()));

        with_persistent_flags(root, None)
    }

    /// Run the matched subcommand.
    ///
    /// `cmd` must be the tree `matches` were parsed from. A namespace invoked
    /// without one of its children prints its help instead of failing.
    pub fn dispatch(&self, cmd: &mut Command, ctx: &Context, matches: &ArgMatches) -> Result<()> {
        let Some((name, sub_matches)) = matches.subcommand() else {
            cmd.print_help()?;
            return Ok(());
        };

        if let Some(node) = unfinished_namespace(cmd, matches) {
            node.print_help()?;
            return Ok(());
        }

        let executable = self
            .find(name)
            .ok_or_else(|| anyhow!("unknown command \"{name}\" for \"pvsadm\""))?;
        executable.execute(ctx, sub_matches)
    }
}

/// Flags every node accepts, in display order.
fn persistent_flags(hide_audit_file: bool) -> [Arg; 4] {
    [
        Arg::new(API_KEY)
            .short('k')
            .long("api-key")
            .value_name("KEY")
            .help(format!("IBMCLOUD API Key(env name: {API_KEY_ENV})"))
            .action(ArgAction::Set),
        Arg::new(DEBUG)
            .long("debug")
            .help("Enable PowerVS debug option(ATTENTION: dev only option, may print sensitive data from APIs)")
            .action(ArgAction::SetTrue)
            .hide(true),
        Arg::new(AUDIT_FILE)
            .long("audit-file")
            .value_name("FILE")
            .help("Audit logs for the tool")
            .value_parser(value_parser!(PathBuf))
            .default_value(DEFAULT_AUDIT_FILE)
            .action(ArgAction::Set)
            .hide(hide_audit_file),
        Arg::new(VERBOSE)
            .short('v')
            .long("verbose")
            .help("Increase log verbosity (-v debug, -vv trace)")
            .action(ArgAction::Count),
    ]
}

/// Attach the persistent flags to `cmd` and, recursively, to all its children.
fn with_persistent_flags(cmd: Command, parent: Option<&str>) -> Command {
    let name = cmd.get_name().to_string();
    let children: Vec<String> = cmd
        .get_subcommands()
        .map(|child| child.get_name().to_string())
        .collect();

    let mut cmd = cmd.args(persistent_flags(help::hides_audit_file(&name, parent)));
    for child in children {
        cmd = cmd.mut_subcommand(&child, |sub| with_persistent_flags(sub, Some(name.as_str())));
    }
    cmd
}

/// The deepest matched node, if it has children but none of them was chosen.
fn unfinished_namespace<'a>(cmd: &'a mut Command, matches: &ArgMatches) -> Option<&'a mut Command> {
    let mut node = cmd;
    let mut current = matches;
    while let Some((name, sub_matches)) = current.subcommand() {
        node = node.find_subcommand_mut(name)?;
        current = sub_matches;
    }
    node.has_subcommands().then_some(node)
}
