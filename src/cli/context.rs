//! Everything a subcommand gets to work with

use crate::audit::Auditor;
use crate::cli::Output;
use crate::cloud::{CloudClient, Request};
use crate::credentials::API_KEY_ENV;
use crate::options::{ApiKey, Options};
use anyhow::{Result, bail};
use std::sync::Arc;

/// Resolved options plus the shared audit log and cloud client.
///
/// Built once after credential resolution; subcommands only get `&Context`.
pub struct Context {
    options: Options,
    auditor: Arc<Auditor>,
    client: Arc<dyn CloudClient>,
    output: Output,
}

impl Context {
    pub fn new(options: Options, auditor: Arc<Auditor>, client: Arc<dyn CloudClient>) -> Self {
        Self {
            options,
            auditor,
            client,
            output: Output::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn auditor(&self) -> &Auditor {
        &self.auditor
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// The API key, or an error telling the user how to provide one.
    pub fn require_api_key(&self) -> Result<&ApiKey> {
        if self.options.api_key.is_empty() {
            bail!(
                "api-key can't be empty, pass the token via --api-key or set {} environment variable",
                API_KEY_ENV
            );
        }
        Ok(&self.options.api_key)
    }

    /// Hand a request to the cloud client along with the resolved API key,
    /// tagged with the debug option.
    pub fn submit(&self, request: Request) -> Result<()> {
        let request = request.debug(self.options.debug);
        tracing::debug!(command = %request.command, "submitting request");
        self.client.submit(&self.options.api_key, &request)
    }
}
