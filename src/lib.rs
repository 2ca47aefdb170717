//! # pvsadm
//!
//! Command-line tool for managing IBM Power Systems Virtual Server (PowerVS)
//! infrastructure.
//!
//! This crate is the startup and dispatch layer: it resolves the IBM Cloud API
//! key, assembles the `get`, `image`, `purge` and `version` subcommands under
//! one command tree with shared flags, and owns the process-wide audit log.
//!
//! ```bash
//! export IBMCLOUD_API_KEY=...
//! pvsadm purge vms --instance-name my-lab --dry-run
//! ```

pub mod audit;
pub mod cli;
pub mod cloud;
pub mod config;
pub mod credentials;
pub mod logging;
pub mod options;

pub use audit::Auditor;
pub use cli::run;
pub use options::{ApiKey, DEFAULT_AUDIT_FILE, Options};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
