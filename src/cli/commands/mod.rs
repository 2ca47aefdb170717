//! Built-in subcommands
//!
//! Each subcommand validates its flags and hands a [`Request`](crate::cloud::Request)
//! to the cloud client. Talking to IBM Cloud is the client's job.

pub mod get;
pub mod image;
pub mod purge;
pub mod version;

use crate::cloud::Instance;
use anyhow::{Result, bail};
use clap::Args;

/// Selects the PowerVS service instance to work on
#[derive(Args, Debug, Clone, Default)]
pub struct InstanceArgs {
    /// Instance ID of the PowerVS instance
    #[arg(short = 'i', long = "instance-id", conflicts_with = "instance_name")]
    pub instance_id: Option<String>,

    /// Instance name of the PowerVS
    #[arg(short = 'n', long = "instance-name")]
    pub instance_name: Option<String>,
}

impl InstanceArgs {
    pub fn instance(&self) -> Result<Instance> {
        match (&self.instance_id, &self.instance_name) {
            (Some(id), _) if !id.is_empty() => Ok(Instance::Id(id.clone())),
            (_, Some(name)) if !name.is_empty() => Ok(Instance::Name(name.clone())),
            _ => bail!("--instance-id or --instance-name required"),
        }
    }
}
