//! `pvsadm get`: read-only queries

use super::InstanceArgs;
use crate::cli::context::Context;
use crate::cli::registry::Executable;
use crate::cloud::Request;
use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches, Subcommand};
use std::time::Duration;

pub struct Get;

#[derive(Subcommand, Debug)]
enum GetCommands {
    /// Get the PowerVS events
    Events(EventsArgs),
    /// Get the ports of a PowerVS network
    Ports(PortsArgs),
}

#[derive(Args, Debug)]
struct EventsArgs {
    #[command(flatten)]
    instance: InstanceArgs,

    /// Show events newer than this (e.g. 30m, 24h, 7d)
    #[arg(long, default_value = "24h", value_parser = humantime::parse_duration)]
    since: Duration,
}

#[derive(Args, Debug)]
struct PortsArgs {
    #[command(flatten)]
    instance: InstanceArgs,

    /// Network ID or name
    #[arg(long)]
    network: String,
}

impl Executable for Get {
    fn command(&self) -> Command {
        GetCommands::augment_subcommands(Command::new("get").about("Get the resources"))
    }

    fn execute(&self, ctx: &Context, matches: &ArgMatches) -> Result<()> {
        ctx.require_api_key()?;

        let request = match GetCommands::from_arg_matches(matches)? {
            GetCommands::Events(args) => Request::new("get events")
                .instance(args.instance.instance()?)
                .param("since", humantime::format_duration(args.since)),
            GetCommands::Ports(args) => Request::new("get ports")
                .instance(args.instance.instance()?)
                .param("network", args.network),
        };

        ctx.submit(request)
    }
}
