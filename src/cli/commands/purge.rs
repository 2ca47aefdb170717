//! `pvsadm purge`: bulk deletion of PowerVS resources
//!
//! Every non-dry-run purge is written to the audit log before the request is
//! handed to the cloud client.

use super::InstanceArgs;
use crate::cli::context::Context;
use crate::cli::registry::Executable;
use crate::cloud::Request;
use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches, Subcommand};
use regex::Regex;
use std::time::Duration;

pub struct Purge;

#[derive(Subcommand, Debug)]
enum PurgeCommands {
    /// Purge the PowerVS images
    Images(PurgeArgs),
    /// Purge the PowerVS SSH keys
    Keys(PurgeArgs),
    /// Purge the PowerVS networks
    Networks(PurgeArgs),
    /// Purge the PowerVS instances
    Vms(PurgeArgs),
    /// Purge the PowerVS volumes
    Volumes(PurgeArgs),
}

impl PurgeCommands {
    fn split(self) -> (&'static str, PurgeArgs) {
        match self {
            PurgeCommands::Images(args) => ("images", args),
            PurgeCommands::Keys(args) => ("keys", args),
            PurgeCommands::Networks(args) => ("networks", args),
            PurgeCommands::Vms(args) => ("vms", args),
            PurgeCommands::Volumes(args) => ("volumes", args),
        }
    }
}

#[derive(Args, Debug)]
struct PurgeArgs {
    #[command(flatten)]
    instance: InstanceArgs,

    /// Only show what would be deleted
    #[arg(long)]
    dry_run: bool,

    /// Delete without asking for confirmation
    #[arg(long)]
    no_prompt: bool,

    /// Keep going when a single deletion fails
    #[arg(long)]
    ignore_errors: bool,

    /// Only resources created before this long ago (e.g. 72h)
    #[arg(long, value_parser = humantime::parse_duration, conflicts_with = "since")]
    before: Option<Duration>,

    /// Only resources created within this long ago (e.g. 2h)
    #[arg(long, value_parser = humantime::parse_duration)]
    since: Option<Duration>,

    /// Only resources whose name matches this regular expression
    #[arg(long, value_parser = parse_regex)]
    regexp: Option<Regex>,
}

fn parse_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)
}

impl Executable for Purge {
    fn command(&self) -> Command {
        PurgeCommands::augment_subcommands(
            Command::new("purge").about("Purge the PowerVS resources"),
        )
    }

    fn execute(&self, ctx: &Context, matches: &ArgMatches) -> Result<()> {
        ctx.require_api_key()?;

        let (kind, args) = PurgeCommands::from_arg_matches(matches)?.split();
        let command = format!("purge {kind}");
        let instance = args.instance.instance()?;

        let mut request = Request::new(&command)
            .instance(instance.clone())
            .param("ignore_errors", args.ignore_errors);
        if let Some(before) = args.before {
            request = request.param("before", humantime::format_duration(before));
        }
        if let Some(since) = args.since {
            request = request.param("since", humantime::format_duration(since));
        }
        if let Some(regexp) = &args.regexp {
            request = request.param("regexp", regexp.as_str());
        }

        let output = ctx.output();
        if args.dry_run {
            output.info(&format!("Dry run: would purge {kind} of instance {instance}"));
            for (key, value) in &request.params {
                output.key_value(&format!("{key}:"), value);
            }
            return Ok(());
        }

        if !args.no_prompt && !output.confirm(&format!("Purge {kind} of instance {instance}?"))? {
            output.warning("Purge cancelled");
            return Ok(());
        }

        ctx.auditor().log(&command, "delete", &request)?;
        ctx.submit(request)
    }
}
