//! Seam between subcommands and the PowerVS API client
//!
//! Subcommands validate their input and describe the work as a [`Request`].
//! Executing it against IBM Cloud belongs to a [`CloudClient`] implementation
//! supplied by whoever links the binary.

use crate::options::ApiKey;
use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// PowerVS service instance a request targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Instance {
    Id(String),
    Name(String),
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instance::Id(id) => write!(f, "id {id}"),
            Instance::Name(name) => write!(f, "name {name}"),
        }
    }
}

/// A validated operation ready to be sent to the cloud
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// Command path, e.g. `purge vms`
    pub command: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<Instance>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,

    /// Ask the client to log API traffic
    #[serde(skip)]
    pub debug: bool,
}

impl Request {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            instance: None,
            params: BTreeMap::new(),
            debug: false,
        }
    }

    pub fn instance(mut self, instance: Instance) -> Self {
        self.instance = Some(instance);
        self
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Executes requests against IBM Cloud
pub trait CloudClient: Send + Sync {
    /// Run `request`, authenticating with `api_key`. The key is empty for
    /// requests that need no IBM Cloud session (`image qcow2ova`).
    fn submit(&self, api_key: &ApiKey, request: &Request) -> Result<()>;
}

/// Client wired into the stock binary: no API client is linked, so every
/// request fails with a clear message.
#[derive(Debug, Default)]
pub struct UnavailableClient;

impl CloudClient for UnavailableClient {
    fn submit(&self, _api_key: &ApiKey, request: &Request) -> Result<()> {
        bail!(
            "{}: no PowerVS API client is linked into this build",
            request.command
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_client_names_the_command() {
        let err = UnavailableClient
            .submit(&ApiKey::new("key"), &Request::new("get events"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "get events: no PowerVS API client is linked into this build"
        );
    }

    #[test]
    fn test_request_serializes_without_empty_fields() {
        let request = Request::new("purge keys").debug(true);
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded, serde_json::json!({"command": "purge keys"}));
    }
}
